//! Defines the builder that grows a decision tree.
use fixedbitset::FixedBitSet;
use serde::{Serialize, Deserialize};
use tracing::{debug, instrument};

use crate::TreeError;
use crate::common::checker;
use crate::dataset::{ClassCounts, Dataset};
use super::{
    criterion::Splitter,
    node::Node,
    prune::prune,
    model::DecisionTreeModel,
};


/// Default confidence factor of the pessimistic pruning.
pub const DEFAULT_CONFIDENCE: f64 = 0.25;
/// Default minimum number of instances a node needs to be split.
pub const DEFAULT_MIN_LEAF_SIZE: usize = 2;


/// Grows a [`DecisionTreeModel`] from a [`Dataset`].
///
/// The tree is grown top-down.
/// At each node, the eligible attribute with the highest gain ratio
/// is chosen and the node gets one child per value of that attribute.
/// An attribute is never tested twice on the same path.
/// The growth stops when the node is pure, when no attribute
/// is eligible or informative, or when the node covers fewer than
/// `min_leaf_size` instances.
/// The grown tree is then pruned bottom-up
/// unless pruning is turned off.
///
/// # Example
/// ```no_run
/// use minitrees::prelude::*;
///
/// let data = DatasetReader::default()
///     .file("/path/to/car.arff")
///     .class_attribute("class")
///     .read()
///     .unwrap();
///
/// let model = DecisionTreeBuilder::new()
///     .confidence(0.25)
///     .min_leaf_size(2)
///     .build(&data)
///     .unwrap();
///
/// println!("{model}");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionTreeBuilder {
    confidence: f64,
    min_leaf_size: usize,
    pruning: bool,
}


impl Default for DecisionTreeBuilder {
    fn default() -> Self {
        Self {
            confidence: DEFAULT_CONFIDENCE,
            min_leaf_size: DEFAULT_MIN_LEAF_SIZE,
            pruning: true,
        }
    }
}


impl DecisionTreeBuilder {
    /// Construct a builder with the default parameters:
    /// confidence `0.25`, minimum leaf size `2`, pruning on.
    pub fn new() -> Self {
        Self::default()
    }


    /// Set the confidence factor of the pruning.
    /// Smaller values prune more. Must lie in `(0, 0.5]`.
    pub fn confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }


    /// Set the minimum number of instances a node needs to be split.
    pub fn min_leaf_size(mut self, size: usize) -> Self {
        self.min_leaf_size = size;
        self
    }


    /// Turn the pruning on or off.
    pub fn pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }


    /// Returns the confidence factor.
    pub fn get_confidence(&self) -> f64 {
        self.confidence
    }


    /// Returns the minimum leaf size.
    pub fn get_min_leaf_size(&self) -> usize {
        self.min_leaf_size
    }


    /// Returns `true` if the pruning is on.
    pub fn get_pruning(&self) -> bool {
        self.pruning
    }


    /// Grows (and prunes) a tree on `data`.
    /// An empty dataset yields a single leaf predicting class `0`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`TreeError::InvalidConfidence`] | confidence outside `(0, 0.5]` |
    /// | [`TreeError::InvalidMinLeafSize`] | minimum leaf size is `0` |
    #[instrument(
        skip_all,
        fields(
            relation = data.catalog().relation(),
            n_instances = data.len(),
        )
    )]
    pub fn build(&self, data: &Dataset) -> Result<DecisionTreeModel, TreeError> {
        checker::check_confidence(self.confidence)?;
        checker::check_min_leaf_size(self.min_leaf_size)?;

        let catalog = data.catalog();
        let mut eligible = FixedBitSet::with_capacity(catalog.n_attributes());
        eligible.insert_range(..);
        eligible.set(catalog.class_index(), false);

        let rows = (0..data.len()).collect::<Vec<_>>();
        let mut root = self.grow(data, rows, &eligible);

        debug!(
            n_leaves = root.num_leaves(),
            size = root.size(),
            "grew the full tree"
        );

        if self.pruning {
            let errors = prune(&mut root, self.confidence);
            debug!(
                n_leaves = root.num_leaves(),
                size = root.size(),
                estimated_errors = errors,
                "pruned the tree"
            );
        }

        Ok(DecisionTreeModel::new(data.shared_catalog(), root))
    }


    /// Grows the subtree over `data[rows]`, testing only
    /// the attributes in `eligible`.
    fn grow(&self, data: &Dataset, rows: Vec<usize>, eligible: &FixedBitSet)
        -> Node
    {
        let n_classes = data.catalog().n_classes();
        let mut counts = ClassCounts::new(n_classes);
        for &r in rows.iter() {
            counts.add(data.class_value(r));
        }

        if counts.is_pure()
            || eligible.count_ones(..) == 0
            || rows.len() < self.min_leaf_size
        {
            return Node::leaf(counts);
        }

        let best = Splitter::new().best_split(data, &rows[..], eligible.ones());
        let Some(best) = best else {
            return Node::leaf(counts);
        };

        let attribute = best.attribute;
        let n_values = data.catalog()
            .attribute(attribute)
            .map(|attr| attr.n_values())
            .unwrap_or(0);

        // Instances whose value is missing reach none of the children.
        let mut partitions = vec![Vec::new(); n_values];
        for r in rows {
            if let Some(v) = data.instance(r).value(attribute) {
                partitions[v].push(r);
            }
        }

        let mut eligible = eligible.clone();
        eligible.set(attribute, false);

        let majority = counts.majority();
        let children = partitions.into_iter()
            .map(|part| {
                if part.is_empty() {
                    Node::empty_leaf(majority, n_classes)
                } else {
                    self.grow(data, part, &eligible)
                }
            })
            .collect();

        Node::Split { attribute, children, counts }
    }
}
