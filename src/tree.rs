//! The C4.5-style decision tree:
//! gain-ratio splitting, multiway nominal branches,
//! pessimistic pruning, and the trained model.

/// Defines the gain-ratio splitter.
pub mod criterion;

/// Defines the nodes of a trained tree.
pub mod node;

/// Defines the tree builder.
pub mod builder;

/// Defines the pessimistic error-based pruning.
pub(crate) mod prune;

/// Defines the trained model and its persistence.
pub mod model;

/// Defines the text and DOT renderings of a trained model.
pub mod export;


pub use criterion::{Splitter, SplitScore};
pub use node::Node;
pub use builder::DecisionTreeBuilder;
pub use model::DecisionTreeModel;
