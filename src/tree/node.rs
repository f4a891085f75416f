//! Defines the inner representation
//! of the decision tree.
use serde::{Serialize, Deserialize};

use crate::Classifier;
use crate::dataset::{ClassCounts, Instance};


/// Enumeration of split nodes and leaves.
/// Every node keeps the class distribution of the training instances
/// that reached it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    /// A node with one child per value of `attribute`.
    Split {
        /// Index of the tested attribute in the catalog.
        attribute: usize,
        /// `children[v]` handles the instances whose value is `v`.
        children: Vec<Node>,
        /// Training class distribution at this node.
        counts: ClassCounts,
    },


    /// A node that predicts a single class.
    Leaf {
        /// The predicted class value.
        class: usize,
        /// Training class distribution at this node.
        counts: ClassCounts,
    },
}


impl Node {
    /// Returns a leaf that predicts the majority class of `counts`.
    #[inline]
    pub(crate) fn leaf(counts: ClassCounts) -> Self {
        let class = counts.majority();
        Self::Leaf { class, counts }
    }


    /// Returns a leaf that covers no training instance
    /// and predicts `class`.
    #[inline]
    pub(crate) fn empty_leaf(class: usize, n_classes: usize) -> Self {
        Self::Leaf { class, counts: ClassCounts::new(n_classes) }
    }


    /// Returns `true` if this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }


    /// Returns the training class distribution at this node.
    pub fn counts(&self) -> &ClassCounts {
        match self {
            Self::Split { counts, .. } | Self::Leaf { counts, .. } => counts,
        }
    }


    /// Returns the class this node predicts when traversal stops here.
    /// For a split node this is the majority class of its distribution.
    pub fn prediction(&self) -> usize {
        match self {
            Self::Split { counts, .. } => counts.majority(),
            Self::Leaf { class, .. } => *class,
        }
    }


    /// Returns the number of leaves in this subtree.
    pub fn num_leaves(&self) -> usize {
        match self {
            Self::Split { children, .. } => {
                children.iter().map(Node::num_leaves).sum()
            },
            Self::Leaf { .. } => 1,
        }
    }


    /// Returns the number of nodes in this subtree.
    pub fn size(&self) -> usize {
        match self {
            Self::Split { children, .. } => {
                1 + children.iter().map(Node::size).sum::<usize>()
            },
            Self::Leaf { .. } => 1,
        }
    }


    /// Returns the depth of this subtree. A single leaf has depth `0`.
    pub fn depth(&self) -> usize {
        match self {
            Self::Split { children, .. } => {
                1 + children.iter().map(Node::depth).max().unwrap_or(0)
            },
            Self::Leaf { .. } => 0,
        }
    }


    /// Follows the branches taken by `instance` and returns
    /// the node where the traversal stops.
    /// The traversal stops at a leaf, or at a split node whose
    /// attribute is missing (or unknown to the node) in `instance`.
    pub fn route(&self, instance: &Instance) -> &Node {
        let mut node = self;
        while let Self::Split { attribute, children, .. } = node {
            let next = instance.value(*attribute)
                .and_then(|v| children.get(v));
            match next {
                Some(child) => { node = child; },
                None => break,
            }
        }
        node
    }
}


impl Classifier for Node {
    #[inline]
    fn predict(&self, instance: &Instance) -> usize {
        self.route(instance).prediction()
    }


    #[inline]
    fn class_distribution(&self, instance: &Instance) -> &ClassCounts {
        self.route(instance).counts()
    }
}
