//! Defines the error type shared by every fallible operation.
use std::path::PathBuf;


/// Errors from dataset construction, tree growing, evaluation,
/// and the research helpers.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// Returned when an attribute declares no values.
    #[error("attribute `{name}` has an empty vocabulary")]
    EmptyVocabulary {
        /// Name of the offending attribute.
        name: String,
    },

    /// Returned when two attributes share a name.
    #[error("attribute `{name}` is declared more than once")]
    DuplicateAttribute {
        /// The duplicated name.
        name: String,
    },

    /// Returned when the class index does not point at an attribute.
    #[error("class index {class_index} is out of range for {n_attributes} attributes")]
    ClassIndexOutOfRange {
        /// The requested class index.
        class_index: usize,
        /// Number of attributes in the catalog.
        n_attributes: usize,
    },

    /// Returned when an attribute name is not part of the catalog.
    #[error("attribute `{name}` does not exist")]
    UnknownAttribute {
        /// The requested name.
        name: String,
    },

    /// Returned when an instance has the wrong number of values.
    #[error("instance {row} has {got} values, expected {expected}")]
    InstanceLength {
        /// Zero-based position of the instance.
        row: usize,
        /// Number of attributes in the catalog.
        expected: usize,
        /// Number of values in the instance.
        got: usize,
    },

    /// Returned when a value lies outside its attribute's vocabulary.
    #[error("instance {row}: value `{value}` is not in the vocabulary of `{attribute}`")]
    ValueOutOfVocabulary {
        /// Zero-based position of the instance.
        row: usize,
        /// Name of the attribute.
        attribute: String,
        /// The offending value (label or index).
        value: String,
    },

    /// Returned when an instance has no class value.
    #[error("instance {row} has a missing class value")]
    MissingClass {
        /// Zero-based position of the instance.
        row: usize,
    },

    /// Returned when an ARFF attribute is not nominal.
    #[error("attribute `{name}` has unsupported type `{kind}`; only nominal attributes are supported")]
    UnsupportedAttribute {
        /// Name of the attribute.
        name: String,
        /// Declared type.
        kind: String,
    },

    /// Returned when the ARFF text cannot be parsed.
    #[error("parse error at line {line}: {reason}")]
    Parse {
        /// One-based line number.
        line: usize,
        /// Human-readable description.
        reason: String,
    },

    /// Returned when the number of folds is less than 2.
    #[error("n_folds must be at least 2, got {n_folds}")]
    InvalidFoldCount {
        /// The requested number of folds.
        n_folds: usize,
    },

    /// Returned when there are fewer instances than folds.
    #[error("cannot split {n_instances} instances into {n_folds} folds")]
    TooFewInstancesForFolds {
        /// The requested number of folds.
        n_folds: usize,
        /// Number of instances in the dataset.
        n_instances: usize,
    },

    /// Returned when the pruning confidence is not in `(0, 0.5]`.
    #[error("pruning confidence must be in (0, 0.5], got {confidence}")]
    InvalidConfidence {
        /// The requested confidence.
        confidence: f64,
    },

    /// Returned when the minimum leaf size is zero.
    #[error("min_leaf_size must be at least 1, got {min_leaf_size}")]
    InvalidMinLeafSize {
        /// The requested size.
        min_leaf_size: usize,
    },

    /// Returned when a train fraction is not in `(0, 1)`.
    #[error("train fraction must be in (0, 1), got {fraction}")]
    InvalidTrainFraction {
        /// The requested fraction.
        fraction: f64,
    },

    /// Returned when a model is applied to data described by another catalog.
    #[error("the dataset catalog `{dataset}` does not match the model catalog `{model}`")]
    CatalogMismatch {
        /// Relation name of the model's catalog.
        model: String,
        /// Relation name of the dataset's catalog.
        dataset: String,
    },

    /// Returned when a decoded model does not fit its own catalog.
    #[error("invalid model: {reason}")]
    InvalidModel {
        /// What is inconsistent.
        reason: String,
    },

    /// Returned when JSON encoding or decoding fails.
    #[error("failed to (de)serialize model")]
    Serialize {
        /// The underlying serde_json error.
        #[from]
        source: serde_json::Error,
    },

    /// Returned when reading or writing a file fails.
    #[error("I/O error on {path}")]
    Io {
        /// Path of the file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
