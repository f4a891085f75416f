use serde::{Serialize, Deserialize};

use crate::TreeError;
use super::catalog::FeatureCatalog;


/// Label that marks a missing value.
pub const MISSING: &str = "?";


/// One row of a dataset.
/// `values[i]` is the vocabulary index of the `i`-th catalog attribute,
/// or `None` if the value is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    values: Vec<Option<usize>>,
}


impl Instance {
    /// Construct an instance from raw vocabulary indices.
    /// The values are checked when the instance joins a
    /// [`Dataset`](super::Dataset).
    pub fn new(values: Vec<Option<usize>>) -> Self {
        Self { values }
    }


    /// Construct an instance from value labels.
    /// The label `"?"` marks a missing value.
    /// `row` is only used for error reporting.
    pub fn from_labels<S>(
        catalog: &FeatureCatalog,
        labels: &[S],
        row: usize,
    ) -> Result<Self, TreeError>
        where S: AsRef<str>
    {
        let expected = catalog.n_attributes();
        if labels.len() != expected {
            return Err(TreeError::InstanceLength {
                row, expected, got: labels.len(),
            });
        }

        let values = catalog.attributes()
            .iter()
            .zip(labels)
            .map(|(attr, label)| {
                let label = label.as_ref();
                if label == MISSING { return Ok(None); }
                attr.index_of(label)
                    .map(Some)
                    .ok_or_else(|| TreeError::ValueOutOfVocabulary {
                        row,
                        attribute: attr.name().to_string(),
                        value: label.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { values })
    }


    /// Returns the value of attribute `attribute`,
    /// `None` if it is missing.
    #[inline]
    pub fn value(&self, attribute: usize) -> Option<usize> {
        self.values.get(attribute).copied().flatten()
    }


    /// Returns `true` if the value of `attribute` is missing.
    #[inline]
    pub fn is_missing(&self, attribute: usize) -> bool {
        self.value(attribute).is_none()
    }


    /// Returns all the values.
    pub fn values(&self) -> &[Option<usize>] {
        &self.values[..]
    }


    /// Returns the number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }


    /// Returns `true` if the instance has no value.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
