//! Confusion matrix of a multi-class classifier.
use serde::{Serialize, Deserialize};

use std::fmt;
use std::ops::AddAssign;


/// A confusion matrix for multi-class classification.
///
/// Entry `matrix[actual][predicted]` counts how many instances
/// of class `actual` were predicted as `predicted`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    matrix: Vec<Vec<usize>>,
    n_classes: usize,
}


impl ConfusionMatrix {
    /// Construct an all-zero matrix over `n_classes` classes.
    pub fn new(n_classes: usize) -> Self {
        Self {
            matrix: vec![vec![0usize; n_classes]; n_classes],
            n_classes,
        }
    }


    /// Build a confusion matrix from actual and predicted class values.
    /// Pairs are taken up to the shorter of the two slices.
    ///
    /// # Panics
    /// Panics if a class value is not less than `n_classes`.
    pub fn from_labels(actual: &[usize], predicted: &[usize], n_classes: usize)
        -> Self
    {
        let mut matrix = Self::new(n_classes);
        actual.iter()
            .zip(predicted)
            .for_each(|(&a, &p)| matrix.add(a, p));
        matrix
    }


    /// Records one prediction.
    ///
    /// # Panics
    /// Panics if a class value is not less than `self.n_classes()`.
    #[inline]
    pub fn add(&mut self, actual: usize, predicted: usize) {
        self.matrix[actual][predicted] += 1;
    }


    /// Returns the count of instances of class `actual`
    /// predicted as `predicted`.
    #[inline]
    pub fn get(&self, actual: usize, predicted: usize) -> usize {
        self.matrix[actual][predicted]
    }


    /// Returns the number of classes.
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }


    /// Returns the total number of recorded predictions.
    pub fn total(&self) -> usize {
        self.matrix.iter()
            .flat_map(|row| row.iter())
            .sum()
    }


    /// Returns the number of correct predictions, i.e., the trace.
    pub fn correct(&self) -> usize {
        (0..self.n_classes).map(|c| self.matrix[c][c]).sum()
    }


    /// Returns the number of instances of class `class` (row sum).
    pub fn actual_total(&self, class: usize) -> usize {
        self.matrix[class].iter().sum()
    }


    /// Returns the number of predictions of class `class` (column sum).
    pub fn predicted_total(&self, class: usize) -> usize {
        self.matrix.iter().map(|row| row[class]).sum()
    }


    /// Return the underlying matrix rows.
    pub fn as_rows(&self) -> &[Vec<usize>] {
        &self.matrix[..]
    }


    /// Renders the matrix with lettered columns.
    /// `labels[c]` names class `c` in the legend.
    pub fn render<S>(&self, labels: &[S]) -> String
        where S: AsRef<str>
    {
        let ids = (0..self.n_classes).map(short_id).collect::<Vec<_>>();
        let max_count = self.matrix.iter()
            .flat_map(|row| row.iter())
            .copied()
            .max()
            .unwrap_or(0);
        let width = ids.iter()
            .map(|id| id.len())
            .chain(std::iter::once(max_count.to_string().len()))
            .max()
            .unwrap_or(1)
            + 1;

        let mut out = String::new();
        for id in ids.iter() {
            out.push_str(&format!(" {id:>width$}"));
        }
        out.push_str("   <-- classified as\n");

        for (c, row) in self.matrix.iter().enumerate() {
            for count in row.iter() {
                out.push_str(&format!(" {count:>width$}"));
            }
            let label = labels.get(c).map(|l| l.as_ref()).unwrap_or("?");
            out.push_str(&format!(" | {id:>width$} = {label}\n", id = ids[c]));
        }
        out
    }
}


impl AddAssign<&ConfusionMatrix> for ConfusionMatrix {
    /// Cell-wise sum of two matrices.
    /// The result covers the larger of the two class counts.
    fn add_assign(&mut self, other: &ConfusionMatrix) {
        if other.n_classes > self.n_classes {
            let n = other.n_classes;
            self.matrix.iter_mut().for_each(|row| row.resize(n, 0));
            self.matrix.resize(n, vec![0usize; n]);
            self.n_classes = n;
        }
        for (row, other_row) in self.matrix.iter_mut().zip(&other.matrix) {
            row.iter_mut()
                .zip(other_row)
                .for_each(|(a, b)| { *a += b; });
        }
    }
}


impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = (0..self.n_classes)
            .map(|c| c.to_string())
            .collect::<Vec<_>>();
        write!(f, "{}", self.render(&labels[..]))
    }
}


/// Short identifier of class `c`: `a`, ..., `z`, `aa`, `ab`, ...
pub(crate) fn short_id(c: usize) -> String {
    let mut n = c;
    let mut letters = Vec::new();
    loop {
        letters.push((b'a' + (n % 26) as u8) as char);
        if n < 26 { break; }
        n = n / 26 - 1;
    }
    letters.iter().rev().collect()
}
