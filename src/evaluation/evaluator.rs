//! Evaluation of a trained model on a labelled dataset.
use serde::{Serialize, Deserialize};
use tracing::{debug, instrument};

use crate::{Classifier, TreeError};
use crate::dataset::Dataset;
use crate::tree::DecisionTreeModel;
use super::confusion::ConfusionMatrix;


/// Per-class metrics derived from a confusion matrix.
/// A ratio whose denominator is zero is reported as `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    /// The class value.
    pub class: usize,
    /// The class label.
    pub label: String,
    /// TP / (TP + FN), the same as the recall.
    pub tp_rate: f64,
    /// FP / (FP + TN).
    pub fp_rate: f64,
    /// TP / (TP + FP).
    pub precision: f64,
    /// TP / (TP + FN).
    pub recall: f64,
    /// Harmonic mean of the precision and recall.
    pub f1: f64,
    /// Number of instances of this class.
    pub support: usize,
}


/// The outcome of an evaluation:
/// a confusion matrix plus the metrics derived from it.
///
/// On an empty dataset every cell is zero and the aggregate
/// metrics ([`accuracy`](Self::accuracy), [`kappa`](Self::kappa),
/// and the weighted averages) are `NaN`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    matrix: ConfusionMatrix,
    labels: Vec<String>,
}


/// Evaluates `model` on every instance of `data`.
///
/// # Errors
/// Returns [`TreeError::CatalogMismatch`] if `data` is described
/// by another catalog than the training data of `model`.
#[instrument(
    skip_all,
    fields(
        relation = data.catalog().relation(),
        n_instances = data.len(),
    )
)]
pub fn evaluate(model: &DecisionTreeModel, data: &Dataset)
    -> Result<EvaluationResult, TreeError>
{
    model.check_catalog(data.catalog())?;

    let n_classes = data.catalog().n_classes();
    let mut matrix = ConfusionMatrix::new(n_classes);
    for (instance, actual) in data.iter() {
        matrix.add(actual, model.predict(instance));
    }

    let result = EvaluationResult::from_matrix(matrix, class_labels(data));
    debug!(
        correct = result.correct(),
        accuracy = result.accuracy(),
        "evaluated the model"
    );
    Ok(result)
}


/// Returns the class labels of `data`, in class order.
pub(crate) fn class_labels(data: &Dataset) -> Vec<String> {
    data.catalog()
        .class_attribute()
        .values()
        .to_vec()
}


impl EvaluationResult {
    /// Wraps a confusion matrix.
    /// `labels[c]` names class `c`.
    pub fn from_matrix(matrix: ConfusionMatrix, labels: Vec<String>) -> Self {
        Self { matrix, labels }
    }


    /// Returns the confusion matrix.
    pub fn confusion_matrix(&self) -> &ConfusionMatrix {
        &self.matrix
    }


    /// Returns the class labels.
    pub fn class_labels(&self) -> &[String] {
        &self.labels[..]
    }


    /// Returns the number of evaluated instances.
    pub fn n_instances(&self) -> usize {
        self.matrix.total()
    }


    /// Returns the number of correctly classified instances.
    pub fn correct(&self) -> usize {
        self.matrix.correct()
    }


    /// Returns the number of misclassified instances.
    pub fn incorrect(&self) -> usize {
        self.n_instances() - self.correct()
    }


    /// Fraction of correctly classified instances.
    pub fn accuracy(&self) -> f64 {
        let total = self.n_instances();
        if total == 0 { return f64::NAN; }
        self.correct() as f64 / total as f64
    }


    /// Fraction of misclassified instances.
    pub fn error_rate(&self) -> f64 {
        1f64 - self.accuracy()
    }


    /// Percentage of correctly classified instances.
    pub fn pct_correct(&self) -> f64 {
        self.accuracy() * 100f64
    }


    /// Percentage of misclassified instances.
    pub fn pct_incorrect(&self) -> f64 {
        self.error_rate() * 100f64
    }


    /// Cohen's kappa statistic.
    pub fn kappa(&self) -> f64 {
        let total = self.n_instances();
        if total == 0 { return f64::NAN; }
        let total = total as f64;

        let n_classes = self.matrix.n_classes();
        let chance = (0..n_classes)
            .map(|c| {
                let row = self.matrix.actual_total(c) as f64;
                let col = self.matrix.predicted_total(c) as f64;
                row * col
            })
            .sum::<f64>()
            / (total * total);
        let observed = self.correct() as f64 / total;

        if chance < 1f64 {
            (observed - chance) / (1f64 - chance)
        } else {
            1f64
        }
    }


    /// Per-class metrics, in class order.
    pub fn class_metrics(&self) -> Vec<ClassMetrics> {
        let n_classes = self.matrix.n_classes();
        let total = self.n_instances();

        (0..n_classes)
            .map(|c| {
                let tp = self.matrix.get(c, c);
                let support = self.matrix.actual_total(c);
                let predicted = self.matrix.predicted_total(c);
                let fp = predicted - tp;
                let negatives = total - support;

                let precision = ratio(tp, predicted);
                let recall = ratio(tp, support);
                let f1 = if precision + recall == 0f64 {
                    0f64
                } else {
                    2f64 * precision * recall / (precision + recall)
                };

                ClassMetrics {
                    class: c,
                    label: self.labels.get(c).cloned().unwrap_or_default(),
                    tp_rate: recall,
                    fp_rate: ratio(fp, negatives),
                    precision,
                    recall,
                    f1,
                    support,
                }
            })
            .collect()
    }


    /// F1 averaged over the classes, weighted by their support.
    pub fn weighted_f1(&self) -> f64 {
        self.weighted(|m| m.f1)
    }


    /// Precision averaged over the classes, weighted by their support.
    pub fn weighted_precision(&self) -> f64 {
        self.weighted(|m| m.precision)
    }


    /// Recall averaged over the classes, weighted by their support.
    pub fn weighted_recall(&self) -> f64 {
        self.weighted(|m| m.recall)
    }


    /// FP rate averaged over the classes, weighted by their support.
    pub fn weighted_fp_rate(&self) -> f64 {
        self.weighted(|m| m.fp_rate)
    }


    fn weighted<F>(&self, metric: F) -> f64
        where F: Fn(&ClassMetrics) -> f64
    {
        let total = self.n_instances();
        if total == 0 { return f64::NAN; }
        let total = total as f64;

        self.class_metrics()
            .iter()
            .map(|m| m.support as f64 / total * metric(m))
            .sum()
    }
}


#[inline]
fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0f64 } else { num as f64 / den as f64 }
}
