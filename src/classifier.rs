//! The core trait of the trained models in this library.
//!
//! A classifier maps an [`Instance`] to a class value,
//! i.e., an index into the vocabulary of the class attribute.
use crate::dataset::{ClassCounts, Dataset, Instance};


/// A trait that defines the prediction interface
/// of a trained model.
pub trait Classifier {
    /// Predicts the class value of the given instance.
    fn predict(&self, instance: &Instance) -> usize;


    /// Returns the training class distribution
    /// of the node that decides the prediction for `instance`.
    fn class_distribution(&self, instance: &Instance) -> &ClassCounts;


    /// Predicts the class values of all instances in `data`,
    /// in view order.
    fn predict_all(&self, data: &Dataset) -> Vec<usize> {
        data.iter()
            .map(|(instance, _)| self.predict(instance))
            .collect()
    }
}
