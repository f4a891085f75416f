#![warn(missing_docs)]

//!
//! A crate that provides C4.5-style decision trees
//! over categorical (nominal) data,
//! together with the protocols to evaluate them.
//!
//! - Growing
//!     [`DecisionTreeBuilder`] grows a multiway tree top-down,
//!     choosing at each node the attribute of maximal gain ratio,
//!     and then prunes it bottom-up by the pessimistic error estimate.
//!
//! - Evaluation
//!     [`evaluate`] produces an [`EvaluationResult`]:
//!     a confusion matrix, accuracy, kappa,
//!     and per-class precision/recall/F1.
//!
//! - Experiments
//!     [`HoldoutSplit`] and [`CrossValidation`] train and evaluate
//!     trees on seeded splits of a [`Dataset`];
//!     [`Experiment`] runs the holdout models and the cross validation
//!     and renders a full text report.
//!
//! A trained [`DecisionTreeModel`] renders itself as indented text
//! or as a Graphviz DOT graph, and can be saved as JSON.
//!
//! ```no_run
//! use minitrees::prelude::*;
//!
//! let data = DatasetReader::default()
//!     .file("/path/to/car.arff")
//!     .class_attribute("class")
//!     .read()
//!     .unwrap();
//!
//! let (train, test) = HoldoutSplit::new(0.7)
//!     .seed(1)
//!     .split(&data)
//!     .unwrap();
//!
//! let model = DecisionTreeBuilder::new()
//!     .build(&train)
//!     .unwrap();
//!
//! let result = evaluate(&model, &test).unwrap();
//! println!("{}", result.summary_string("=== Summary ==="));
//! println!("{model}");
//! ```

pub mod error;
pub mod dataset;
pub mod classifier;
pub mod tree;
pub mod evaluation;
pub mod research;
pub mod prelude;

mod common;


pub use error::TreeError;

pub use dataset::{
    Attribute,
    ClassCounts,
    Dataset,
    DatasetReader,
    FeatureCatalog,
    Instance,
};

pub use classifier::Classifier;

pub use tree::{
    DecisionTreeBuilder,
    DecisionTreeModel,
    Node,
    Splitter,
    SplitScore,
};

pub use evaluation::{
    evaluate,
    ClassMetrics,
    ConfusionMatrix,
    EvaluationResult,
};

pub use research::{
    cross_validate,
    CrossValidation,
    CrossValidationResult,
    Experiment,
    ExperimentConfig,
    ExperimentReport,
    HoldoutSplit,
};
