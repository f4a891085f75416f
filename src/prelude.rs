//! Exports the standard structs and traits.
//!
pub use crate::error::TreeError;


pub use crate::dataset::{
    Attribute,
    FeatureCatalog,
    Instance,
    Dataset,
    DatasetReader,
    ClassCounts,
};


pub use crate::classifier::Classifier;


pub use crate::tree::{
    DecisionTreeBuilder,
    DecisionTreeModel,
    Node,
};


pub use crate::evaluation::{
    evaluate,
    ConfusionMatrix,
    EvaluationResult,
};


pub use crate::research::{
    cross_validate,
    CrossValidation,
    CrossValidationResult,
    HoldoutSplit,
    Experiment,
    ExperimentConfig,
    ExperimentReport,
};
