//! Text reports of an [`EvaluationResult`].
use super::evaluator::EvaluationResult;


impl EvaluationResult {
    /// Returns the summary block: correct and incorrect counts with
    /// percentages, the kappa statistic, and the number of instances.
    ///
    /// ```text
    /// === Summary ===
    ///
    /// Correctly Classified Instances                 12      100.0000 %
    /// Incorrectly Classified Instances                0        0.0000 %
    /// Kappa statistic                            1.0000
    /// Total Number of Instances                      12
    /// ```
    pub fn summary_string(&self, title: &str) -> String {
        let accuracy = self.pct_correct();
        let error = self.pct_incorrect();
        let mut out = format!("{title}\n\n");
        out.push_str(&format!(
            "{:<41}{:>9}{:>14.4} %\n",
            "Correctly Classified Instances", self.correct(), accuracy,
        ));
        out.push_str(&format!(
            "{:<41}{:>9}{:>14.4} %\n",
            "Incorrectly Classified Instances", self.incorrect(), error,
        ));
        out.push_str(&format!(
            "{:<41}{:>9.4}\n",
            "Kappa statistic", self.kappa(),
        ));
        out.push_str(&format!(
            "{:<41}{:>9}\n",
            "Total Number of Instances", self.n_instances(),
        ));
        out
    }


    /// Returns the per-class table of TP rate, FP rate, precision,
    /// recall, and F-measure, closed by the support-weighted averages.
    pub fn class_details_string(&self, title: &str) -> String {
        let mut out = format!("{title}\n\n");
        out.push_str(&format!(
            "{:<17}{:<9}{:<9}{:<11}{:<9}{:<11}{}\n",
            "", "TP Rate", "FP Rate", "Precision", "Recall", "F-Measure", "Class",
        ));
        for m in self.class_metrics() {
            out.push_str(&format!(
                "{:<17}{:<9.3}{:<9.3}{:<11.3}{:<9.3}{:<11.3}{}\n",
                "", m.tp_rate, m.fp_rate, m.precision, m.recall, m.f1, m.label,
            ));
        }
        out.push_str(&format!(
            "{:<17}{:<9.3}{:<9.3}{:<11.3}{:<9.3}{:<11.3}\n",
            "Weighted Avg.",
            self.weighted_recall(),
            self.weighted_fp_rate(),
            self.weighted_precision(),
            self.weighted_recall(),
            self.weighted_f1(),
        ));
        out
    }


    /// Returns the confusion matrix with lettered columns
    /// and a legend mapping each letter to its class label.
    pub fn matrix_string(&self, title: &str) -> String {
        format!("{title}\n\n{}", self.confusion_matrix().render(self.class_labels()))
    }
}
