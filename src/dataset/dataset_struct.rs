use rand::prelude::*;

use std::sync::Arc;

use crate::TreeError;
use super::{
    catalog::FeatureCatalog,
    class_counts::ClassCounts,
    instance::Instance,
};


/// An ordered sequence of instances sharing one [`FeatureCatalog`].
///
/// The instances live in a shared, immutable arena.
/// A `Dataset` is a list of row positions into that arena,
/// so sub-ranges, selections, and shuffles are cheap views
/// that never copy or mutate an instance.
#[derive(Debug, Clone)]
pub struct Dataset {
    catalog: Arc<FeatureCatalog>,
    instances: Arc<[Instance]>,
    target: Arc<[usize]>,
    rows: Vec<usize>,
}


impl Dataset {
    /// Construct a dataset from a catalog and its instances.
    /// Every instance is checked against the catalog before
    /// the dataset is returned.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`TreeError::InstanceLength`] | an instance has the wrong arity |
    /// | [`TreeError::ValueOutOfVocabulary`] | a value index is out of its vocabulary |
    /// | [`TreeError::MissingClass`] | an instance has no class value |
    pub fn new<C>(catalog: C, instances: Vec<Instance>)
        -> Result<Self, TreeError>
        where C: Into<Arc<FeatureCatalog>>
    {
        let catalog = catalog.into();
        let expected = catalog.n_attributes();
        let class_index = catalog.class_index();

        let mut target = Vec::with_capacity(instances.len());
        for (row, instance) in instances.iter().enumerate() {
            if instance.len() != expected {
                return Err(TreeError::InstanceLength {
                    row, expected, got: instance.len(),
                });
            }

            for (attr, value) in catalog.attributes().iter().zip(instance.values()) {
                if let Some(v) = value {
                    if *v >= attr.n_values() {
                        return Err(TreeError::ValueOutOfVocabulary {
                            row,
                            attribute: attr.name().to_string(),
                            value: v.to_string(),
                        });
                    }
                }
            }

            let class = instance.value(class_index)
                .ok_or(TreeError::MissingClass { row })?;
            target.push(class);
        }

        let rows = (0..instances.len()).collect();
        let instances: Arc<[Instance]> = Arc::from(instances);
        let target: Arc<[usize]> = Arc::from(target);

        Ok(Self { catalog, instances, target, rows, })
    }


    /// Returns the catalog.
    pub fn catalog(&self) -> &FeatureCatalog {
        &self.catalog
    }


    /// Returns the shared handle of the catalog.
    pub fn shared_catalog(&self) -> Arc<FeatureCatalog> {
        Arc::clone(&self.catalog)
    }


    /// Returns the number of instances in this view.
    pub fn len(&self) -> usize {
        self.rows.len()
    }


    /// Returns `true` if this view has no instance.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }


    /// Returns the `i`-th instance of this view.
    /// Panics if `i >= self.len()`, like slice indexing.
    #[inline]
    pub fn instance(&self, i: usize) -> &Instance {
        &self.instances[self.rows[i]]
    }


    /// Returns the class value of the `i`-th instance of this view.
    /// Panics if `i >= self.len()`, like slice indexing.
    #[inline]
    pub fn class_value(&self, i: usize) -> usize {
        self.target[self.rows[i]]
    }


    /// Iterates over `(instance, class value)` pairs in view order.
    pub fn iter(&self) -> impl Iterator<Item = (&Instance, usize)> + '_ {
        self.rows.iter()
            .map(|&r| (&self.instances[r], self.target[r]))
    }


    /// Returns the class values of this view, in order.
    pub fn target(&self) -> Vec<usize> {
        self.rows.iter()
            .map(|&r| self.target[r])
            .collect()
    }


    /// Returns the contiguous sub-range `[start, end)` of this view.
    /// Bounds are clamped to the view.
    pub fn range(&self, start: usize, end: usize) -> Self {
        let end = end.min(self.len());
        let start = start.min(end);
        self.with_rows(self.rows[start..end].to_vec())
    }


    /// Returns the view made of the given positions of this view.
    /// Positions out of range are skipped.
    pub fn select(&self, positions: &[usize]) -> Self {
        let rows = positions.iter()
            .filter_map(|&p| self.rows.get(p).copied())
            .collect();
        self.with_rows(rows)
    }


    /// Returns this view in a pseudo-random order determined by `seed`.
    pub fn shuffled(&self, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut rows = self.rows.clone();
        rows.shuffle(&mut rng);
        self.with_rows(rows)
    }


    /// Returns the class distribution of this view.
    pub fn class_counts(&self) -> ClassCounts {
        let mut counts = ClassCounts::new(self.catalog.n_classes());
        for &r in self.rows.iter() {
            counts.add(self.target[r]);
        }
        counts
    }


    fn with_rows(&self, rows: Vec<usize>) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            instances: Arc::clone(&self.instances),
            target: Arc::clone(&self.target),
            rows,
        }
    }
}
