//! Defines the splitting criterion of the decision tree,
//! the C4.5 gain ratio.
use crate::dataset::{ClassCounts, Dataset};
use crate::dataset::class_counts::entropy_of;


/// Gains at or below this value are treated as zero,
/// so that round-off never produces a meaningless split.
const MIN_GAIN: f64 = 1e-10;


/// Scores of a candidate split on one attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitScore {
    /// Index of the attribute in the catalog.
    pub attribute: usize,
    /// Information gain, scaled by the fraction of known values.
    pub info_gain: f64,
    /// Entropy of the partition sizes.
    pub split_info: f64,
    /// `info_gain / split_info`, or `0` if `split_info` is `0`.
    pub gain_ratio: f64,
}


/// Chooses the attribute to split on.
///
/// For a candidate attribute `a` on the subset `S`,
/// the information gain is `H(S) - sum_v |S_v|/|S| * H(S_v)`
/// and the split information is the entropy of the partition sizes
/// `|S_v|/|S|`.
/// Both are computed over the instances whose value of `a` is known;
/// the gain is then scaled by the fraction of known values.
#[derive(Debug, Clone, Copy, Default)]
pub struct Splitter;


impl Splitter {
    /// Construct a new splitter.
    pub fn new() -> Self {
        Self
    }


    /// Scores the split of `data[rows]` on `attribute`.
    pub fn score(&self, data: &Dataset, rows: &[usize], attribute: usize)
        -> SplitScore
    {
        let n_values = data.catalog()
            .attribute(attribute)
            .map(|attr| attr.n_values())
            .unwrap_or(0);
        let n_classes = data.catalog().n_classes();

        let mut partitions = vec![ClassCounts::new(n_classes); n_values];
        let mut known = ClassCounts::new(n_classes);
        for &r in rows {
            if let Some(v) = data.instance(r).value(attribute) {
                let class = data.class_value(r);
                partitions[v].add(class);
                known.add(class);
            }
        }

        let n_known = known.total();
        if n_known == 0 {
            return SplitScore {
                attribute, info_gain: 0f64, split_info: 0f64, gain_ratio: 0f64,
            };
        }

        let n_known_f = n_known as f64;
        let children = partitions.iter()
            .map(|p| p.total() as f64 / n_known_f * p.entropy())
            .sum::<f64>();
        let known_ratio = n_known_f / rows.len() as f64;
        let info_gain = known_ratio * (known.entropy() - children);

        let sizes = partitions.iter()
            .map(|p| p.total())
            .collect::<Vec<_>>();
        let split_info = entropy_of(&sizes[..]);

        let gain_ratio = if split_info > 0f64 && info_gain > MIN_GAIN {
            info_gain / split_info
        } else {
            0f64
        };

        SplitScore { attribute, info_gain, split_info, gain_ratio, }
    }


    /// Returns the eligible attribute with the highest gain ratio,
    /// or `None` if no attribute has a positive gain ratio.
    /// Ties go to the attribute listed first in `eligible`,
    /// which should be in increasing index order.
    pub fn best_split<I>(&self, data: &Dataset, rows: &[usize], eligible: I)
        -> Option<SplitScore>
        where I: IntoIterator<Item = usize>
    {
        let mut best: Option<SplitScore> = None;
        for attribute in eligible {
            let score = self.score(data, rows, attribute);
            if score.gain_ratio <= 0f64 { continue; }

            let improves = best.map_or(true, |b| score.gain_ratio > b.gain_ratio);
            if improves {
                best = Some(score);
            }
        }
        best
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Attribute, FeatureCatalog, Instance};

    /// `A` determines the class, `B` is constant, `C` is noise.
    fn dataset() -> Dataset {
        let attrs = vec![
            Attribute::new("A", ["x", "y"]),
            Attribute::new("B", ["p", "q"]),
            Attribute::new("C", ["u", "v"]),
            Attribute::new("class", ["yes", "no"]),
        ];
        let catalog = FeatureCatalog::new("toy", attrs, 3).unwrap();
        let instances = (0..8)
            .map(|i| {
                let a = i % 2;
                let c = (i / 2) % 2;
                Instance::new(vec![Some(a), Some(0), Some(c), Some(a)])
            })
            .collect();
        Dataset::new(catalog, instances).unwrap()
    }

    #[test]
    fn picks_the_determining_attribute() {
        let data = dataset();
        let rows = (0..data.len()).collect::<Vec<_>>();
        let best = Splitter::new().best_split(&data, &rows, [0, 1, 2]).unwrap();
        assert_eq!(best.attribute, 0);
        assert!((best.info_gain - 1f64).abs() < 1e-12);
        assert!((best.gain_ratio - 1f64).abs() < 1e-12);
    }

    #[test]
    fn constant_and_independent_attributes_score_zero() {
        let data = dataset();
        let rows = (0..data.len()).collect::<Vec<_>>();
        let splitter = Splitter::new();

        let b = splitter.score(&data, &rows, 1);
        assert_eq!(b.split_info, 0f64);
        assert_eq!(b.gain_ratio, 0f64);

        let c = splitter.score(&data, &rows, 2);
        assert_eq!(c.gain_ratio, 0f64);
        assert!(splitter.best_split(&data, &rows, [1, 2]).is_none());
    }

    #[test]
    fn ties_go_to_the_lowest_index() {
        let data = dataset();
        // Only rows where `A` and `C` agree, so both separate the classes.
        let rows = [0, 3, 4, 7];
        let best = Splitter::new().best_split(&data, &rows, [0, 2]).unwrap();
        assert_eq!(best.attribute, 0);
    }

    #[test]
    fn missing_values_scale_the_gain() {
        let attrs = vec![
            Attribute::new("A", ["x", "y"]),
            Attribute::new("class", ["yes", "no"]),
        ];
        let catalog = FeatureCatalog::new("toy", attrs, 1).unwrap();
        let instances = vec![
            Instance::new(vec![Some(0), Some(0)]),
            Instance::new(vec![Some(1), Some(1)]),
            Instance::new(vec![None, Some(0)]),
            Instance::new(vec![None, Some(1)]),
        ];
        let data = Dataset::new(catalog, instances).unwrap();
        let score = Splitter::new().score(&data, &[0, 1, 2, 3], 0);
        assert!((score.info_gain - 0.5).abs() < 1e-12);
        assert!((score.split_info - 1f64).abs() < 1e-12);
    }
}
