//! This directory provides the experiment protocols:
//! holdout splits, k-fold cross validation,
//! and the experiment that combines them.

/// Defines the k-fold cross validation.
pub mod cross_validation;

/// Defines the seeded train/test split.
pub mod holdout;

/// Defines the experiment driver and its report.
pub mod experiment;


pub use cross_validation::{
    cross_validate,
    CrossValidation,
    CrossValidationResult,
    FoldSummary,
    Folds,
};
pub use holdout::HoldoutSplit;
pub use experiment::{
    Experiment,
    ExperimentConfig,
    ExperimentReport,
    HoldoutConfig,
    HoldoutOutcome,
};
