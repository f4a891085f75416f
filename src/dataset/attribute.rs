use serde::{Serialize, Deserialize};

use std::fmt;


/// A categorical attribute: a name and a fixed, ordered vocabulary.
/// Values are referred to by their position in the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    index: usize,
    values: Vec<String>,
}


impl Attribute {
    /// Construct a new attribute named `name` with the vocabulary `values`.
    /// The index is assigned by [`FeatureCatalog`](super::FeatureCatalog).
    pub fn new<S, I, T>(name: S, values: I) -> Self
        where S: ToString,
              I: IntoIterator<Item = T>,
              T: ToString,
    {
        let values = values.into_iter()
            .map(|v| v.to_string())
            .collect();
        Self { name: name.to_string(), index: 0, values, }
    }


    /// Returns the attribute name.
    pub fn name(&self) -> &str {
        &self.name
    }


    /// Returns the position of this attribute in its catalog.
    pub fn index(&self) -> usize {
        self.index
    }


    pub(super) fn set_index(&mut self, index: usize) {
        self.index = index;
    }


    /// Returns the vocabulary.
    pub fn values(&self) -> &[String] {
        &self.values[..]
    }


    /// Returns the number of values in the vocabulary.
    pub fn n_values(&self) -> usize {
        self.values.len()
    }


    /// Returns the label of the `ix`-th value.
    pub fn value(&self, ix: usize) -> Option<&str> {
        self.values.get(ix).map(|v| v.as_str())
    }


    /// Returns the vocabulary index of `label`.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.values.iter().position(|v| v == label)
    }
}


impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@attribute {} {{{}}}", self.name, self.values.join(", "))
    }
}
