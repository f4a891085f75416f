//! Runs the whole experiment: holdout models, cross validation,
//! and their comparison.
use serde::{Serialize, Deserialize};
use tracing::{info, instrument};

use std::fmt;

use crate::TreeError;
use crate::common::checker;
use crate::dataset::Dataset;
use crate::evaluation::{evaluate, EvaluationResult};
use crate::tree::{DecisionTreeBuilder, DecisionTreeModel};
use super::{
    cross_validation::{CrossValidation, CrossValidationResult},
    holdout::HoldoutSplit,
};


/// A named train/test split of the experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldoutConfig {
    /// Name of the model trained on this split, e.g. `M1`.
    pub name: String,
    /// Fraction of the instances used for training.
    pub train_fraction: f64,
    /// Seed of the shuffle.
    pub seed: u64,
}


impl HoldoutConfig {
    /// Construct a named split.
    pub fn new<S: ToString>(name: S, train_fraction: f64, seed: u64) -> Self {
        Self { name: name.to_string(), train_fraction, seed }
    }
}


/// Parameters of an [`Experiment`].
/// Missing fields take their default values when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// The holdout splits, each producing one model.
    pub holdouts: Vec<HoldoutConfig>,
    /// Number of cross validation folds.
    pub n_folds: usize,
    /// Seed of the cross validation shuffle.
    pub cv_seed: u64,
    /// Whether the cross validation folds are stratified.
    pub stratified: bool,
    /// Confidence factor of the pruning.
    pub confidence: f64,
    /// Minimum number of instances a node needs to be split.
    pub min_leaf_size: usize,
    /// Whether the trees are pruned.
    pub pruning: bool,
}


impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            holdouts: vec![
                HoldoutConfig::new("M1", 0.70, 1),
                HoldoutConfig::new("M2", 0.50, 2),
            ],
            n_folds: 10,
            cv_seed: 1,
            stratified: true,
            confidence: 0.25,
            min_leaf_size: 2,
            pruning: true,
        }
    }
}


impl ExperimentConfig {
    /// Decodes a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, TreeError> {
        Ok(serde_json::from_str(json)?)
    }


    /// Returns the tree builder described by this configuration.
    pub fn builder(&self) -> DecisionTreeBuilder {
        DecisionTreeBuilder::new()
            .confidence(self.confidence)
            .min_leaf_size(self.min_leaf_size)
            .pruning(self.pruning)
    }


    /// Returns the cross validation described by this configuration.
    pub fn cross_validation(&self) -> CrossValidation {
        CrossValidation::new(self.n_folds)
            .seed(self.cv_seed)
            .stratified(self.stratified)
            .builder(self.builder())
    }


    fn validate(&self, n_instances: usize) -> Result<(), TreeError> {
        checker::check_confidence(self.confidence)?;
        checker::check_min_leaf_size(self.min_leaf_size)?;
        checker::check_folds(self.n_folds, n_instances)?;
        for holdout in self.holdouts.iter() {
            checker::check_train_fraction(holdout.train_fraction)?;
        }
        Ok(())
    }
}


/// A model trained on a holdout split and its evaluation
/// on the held-out part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldoutOutcome {
    /// The split.
    pub config: HoldoutConfig,
    /// Number of training instances.
    pub n_train: usize,
    /// Number of test instances.
    pub n_test: usize,
    /// The trained model.
    pub model: DecisionTreeModel,
    /// Evaluation on the test instances.
    pub evaluation: EvaluationResult,
}


impl HoldoutOutcome {
    /// Returns the header of this outcome, e.g.
    /// `M1 (70% train / 30% test)`.
    pub fn title(&self) -> String {
        let train = (self.config.train_fraction * 100f64).round();
        format!(
            "{} ({train}% train / {test}% test)",
            self.config.name,
            test = 100f64 - train,
        )
    }
}


/// Trains and evaluates decision trees on a dataset
/// as configured by an [`ExperimentConfig`].
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
/// let report = Experiment::new(ExperimentConfig::default())
///     .run(&data)
///     .unwrap();
/// println!("{report}");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    config: ExperimentConfig,
}


impl Experiment {
    /// Construct an experiment.
    pub fn new(config: ExperimentConfig) -> Self {
        Self { config }
    }


    /// Returns the configuration.
    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }


    /// Runs every holdout split, then the cross validation.
    ///
    /// # Errors
    /// Any configuration error is reported before training starts.
    #[instrument(
        skip_all,
        fields(
            relation = data.catalog().relation(),
            n_instances = data.len(),
        )
    )]
    pub fn run(&self, data: &Dataset) -> Result<ExperimentReport, TreeError> {
        self.config.validate(data.len())?;
        let builder = self.config.builder();

        let holdouts = self.config.holdouts.iter()
            .map(|holdout| -> Result<_, TreeError> {
                let (train, test) = HoldoutSplit::new(holdout.train_fraction)
                    .seed(holdout.seed)
                    .split(data)?;
                let model = builder.build(&train)?;
                let evaluation = evaluate(&model, &test)?;
                info!(
                    model = holdout.name.as_str(),
                    accuracy = evaluation.accuracy(),
                    weighted_f1 = evaluation.weighted_f1(),
                    "holdout model evaluated"
                );
                Ok(HoldoutOutcome {
                    config: holdout.clone(),
                    n_train: train.len(),
                    n_test: test.len(),
                    model,
                    evaluation,
                })
            })
            .collect::<Result<Vec<_>, TreeError>>()?;

        let cross_validation = self.config.cross_validation().run(data)?;

        let catalog = data.catalog();
        let class_distribution = catalog.class_attribute()
            .values()
            .iter()
            .cloned()
            .zip(data.class_counts().as_slice().iter().copied())
            .collect();

        Ok(ExperimentReport {
            relation: catalog.relation().to_string(),
            n_attributes: catalog.n_attributes(),
            n_instances: data.len(),
            class_index: catalog.class_index(),
            class_distribution,
            holdouts,
            cross_validation,
        })
    }
}


/// Everything an [`Experiment`] produced.
/// The `Display` implementation renders the full text report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    /// Relation name of the dataset.
    pub relation: String,
    /// Number of attributes, the class attribute included.
    pub n_attributes: usize,
    /// Number of instances.
    pub n_instances: usize,
    /// Index of the class attribute.
    pub class_index: usize,
    /// `(class label, count)` pairs, in class order.
    pub class_distribution: Vec<(String, usize)>,
    /// The holdout models, in configuration order.
    pub holdouts: Vec<HoldoutOutcome>,
    /// The cross validation result.
    pub cross_validation: CrossValidationResult,
}


impl ExperimentReport {
    /// Returns the dataset summary and its class distribution.
    pub fn dataset_string(&self) -> String {
        let mut out = format!("=== {} Dataset Summary ===\n", self.relation);
        out.push_str(&format!("Number of attributes: {}\n", self.n_attributes));
        out.push_str(&format!("Number of instances : {}\n", self.n_instances));
        out.push_str(&format!("Class index         : {}\n", self.class_index));
        out.push('\n');
        out.push_str("=== Class Distribution ===\n");
        for (label, count) in self.class_distribution.iter() {
            let pct = *count as f64 / self.n_instances as f64 * 100f64;
            out.push_str(&format!("  {label}: {count} ({pct:.2}%)\n"));
        }
        out
    }


    /// Returns one line per model with its accuracy (percent)
    /// and weighted F1, closed by the cross validation line.
    pub fn comparison_string(&self) -> String {
        let mut out = String::from("=== Comparison ===\n");
        for holdout in self.holdouts.iter() {
            let name = format!(
                "{} - {}/{}",
                holdout.config.name,
                (holdout.config.train_fraction * 100f64).round(),
                100f64 - (holdout.config.train_fraction * 100f64).round(),
            );
            out.push_str(&comparison_line(&name, &holdout.evaluation));
        }
        let name = format!("{}-Fold CV", self.cross_validation.n_folds());
        out.push_str(&comparison_line(&name, &self.cross_validation.evaluation));
        out
    }


    /// Returns the holdout model with the highest test accuracy.
    /// Ties go to the model configured first.
    pub fn best_holdout(&self) -> Option<&HoldoutOutcome> {
        let mut best: Option<&HoldoutOutcome> = None;
        for holdout in self.holdouts.iter() {
            let better = best.map_or(true, |b| {
                holdout.evaluation.accuracy() > b.evaluation.accuracy()
            });
            if better { best = Some(holdout); }
        }
        best
    }
}


fn comparison_line(name: &str, evaluation: &EvaluationResult) -> String {
    format!(
        "{name:<20}: Accuracy {:.2} | F1: {:.4}\n",
        evaluation.pct_correct(),
        evaluation.weighted_f1(),
    )
}


impl fmt::Display for ExperimentReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.dataset_string())?;

        for holdout in self.holdouts.iter() {
            let name = &holdout.config.name;
            let eval = &holdout.evaluation;
            writeln!(f, "=== Model {} ===", holdout.title())?;
            writeln!(f, "{name} Accuracy (%): {:.2}", eval.pct_correct())?;
            writeln!(f, "{name} F1-Score    : {:.4}", eval.weighted_f1())?;
            writeln!(f)?;
            writeln!(f, "{}", eval.summary_string(&format!("=== {name} Summary ===")))?;
            writeln!(f, "{}", eval.class_details_string(
                &format!("=== {name} Detailed Accuracy By Class ===")
            ))?;
            writeln!(f, "{}", eval.matrix_string(
                &format!("=== {name} Confusion Matrix ===")
            ))?;
        }

        let cv = &self.cross_validation;
        writeln!(f, "=== {}-Fold CV ===", cv.n_folds())?;
        writeln!(f, "Accuracy: {:.4}", cv.evaluation.pct_correct())?;
        writeln!(f, "F1-Score: {:.4}", cv.evaluation.weighted_f1())?;
        writeln!(f)?;

        writeln!(f, "{}", self.comparison_string())?;

        for holdout in self.holdouts.iter() {
            let name = &holdout.config.name;
            writeln!(f, "=== Decision Tree for {name} (Textual Representation) ===")?;
            writeln!(f, "{}", holdout.model)?;
            writeln!(f)?;
            writeln!(f, "=== Decision Tree for {name} (DOT Format) ===")?;
            writeln!(f, "{}", holdout.model.to_dot())?;
        }

        Ok(())
    }
}
