use serde::{Serialize, Deserialize};

use std::ops::{Index, AddAssign};


/// Number of instances per class value.
/// `counts[c]` is the number of instances of class `c`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassCounts(Vec<usize>);


impl ClassCounts {
    /// Construct an all-zero distribution over `n_classes` classes.
    pub fn new(n_classes: usize) -> Self {
        Self(vec![0; n_classes])
    }


    /// Construct a distribution from raw counts.
    pub fn from_counts(counts: Vec<usize>) -> Self {
        Self(counts)
    }


    /// Add one instance of class `class`.
    #[inline]
    pub fn add(&mut self, class: usize) {
        if class >= self.0.len() {
            self.0.resize(class + 1, 0);
        }
        self.0[class] += 1;
    }


    /// Returns the number of classes.
    pub fn n_classes(&self) -> usize {
        self.0.len()
    }


    /// Returns the total number of instances.
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }


    /// Returns `true` if no instance was counted.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }


    /// Returns the count of class `class` (0 if out of range).
    pub fn get(&self, class: usize) -> usize {
        self.0.get(class).copied().unwrap_or(0)
    }


    /// Returns the class with the most instances.
    /// Ties go to the lowest class index;
    /// an empty distribution yields class `0`.
    pub fn majority(&self) -> usize {
        let mut best = 0;
        for (c, &n) in self.0.iter().enumerate() {
            if n > self.get(best) { best = c; }
        }
        best
    }


    /// Returns the number of instances not in the majority class.
    pub fn errors(&self) -> usize {
        self.total() - self.get(self.majority())
    }


    /// Returns `true` if at most one class has instances.
    pub fn is_pure(&self) -> bool {
        self.0.iter().filter(|&&n| n > 0).count() <= 1
    }


    /// Returns the counts as a slice.
    pub fn as_slice(&self) -> &[usize] {
        &self.0[..]
    }


    /// Returns the Shannon entropy (base 2) of the distribution.
    /// `0 * log(0)` is taken as `0`.
    pub fn entropy(&self) -> f64 {
        entropy_of(&self.0[..])
    }
}


impl Index<usize> for ClassCounts {
    type Output = usize;
    #[inline]
    fn index(&self, class: usize) -> &Self::Output {
        &self.0[class]
    }
}


impl AddAssign<&ClassCounts> for ClassCounts {
    fn add_assign(&mut self, other: &ClassCounts) {
        if other.0.len() > self.0.len() {
            self.0.resize(other.0.len(), 0);
        }
        self.0.iter_mut()
            .zip(other.0.iter())
            .for_each(|(a, b)| { *a += b; });
    }
}


/// Shannon entropy (base 2) of a vector of counts.
pub(crate) fn entropy_of(counts: &[usize]) -> f64 {
    let total = counts.iter().sum::<usize>();
    if total == 0 { return 0f64; }
    let total = total as f64;

    counts.iter()
        .filter(|&&n| n > 0)
        .map(|&n| {
            let p = n as f64 / total;
            -p * p.log2()
        })
        .sum::<f64>()
}
