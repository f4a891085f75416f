//! Evaluation of trained models:
//! confusion matrices, per-class metrics, and their text reports.

/// Defines the confusion matrix.
pub mod confusion;

/// Defines the evaluator and its result.
pub mod evaluator;

/// Defines the text reports.
pub mod report;


pub use confusion::ConfusionMatrix;
pub use evaluator::{
    evaluate,
    EvaluationResult,
    ClassMetrics,
};
