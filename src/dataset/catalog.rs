use serde::{Serialize, Deserialize};

use std::collections::HashSet;

use crate::TreeError;
use super::attribute::Attribute;


/// Static metadata of a dataset:
/// the attributes, their vocabularies, and which one is the class.
/// A catalog is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureCatalog {
    relation: String,
    attributes: Vec<Attribute>,
    class_index: usize,
}


impl FeatureCatalog {
    /// Construct a catalog whose class attribute is `attributes[class_index]`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`TreeError::ClassIndexOutOfRange`] | `class_index >= attributes.len()` |
    /// | [`TreeError::EmptyVocabulary`] | an attribute has no values |
    /// | [`TreeError::DuplicateAttribute`] | two attributes share a name |
    pub fn new<S: ToString>(
        relation: S,
        attributes: Vec<Attribute>,
        class_index: usize,
    ) -> Result<Self, TreeError>
    {
        let n_attributes = attributes.len();
        if class_index >= n_attributes {
            return Err(TreeError::ClassIndexOutOfRange {
                class_index, n_attributes,
            });
        }

        let mut names = HashSet::new();
        for attr in attributes.iter() {
            if attr.n_values() == 0 {
                return Err(TreeError::EmptyVocabulary {
                    name: attr.name().to_string(),
                });
            }
            if !names.insert(attr.name()) {
                return Err(TreeError::DuplicateAttribute {
                    name: attr.name().to_string(),
                });
            }
        }

        let attributes = attributes.into_iter()
            .enumerate()
            .map(|(i, mut attr)| {
                attr.set_index(i);
                attr
            })
            .collect();

        Ok(Self { relation: relation.to_string(), attributes, class_index, })
    }


    /// Construct a catalog whose class attribute is named `class`.
    pub fn with_class_name<S, T>(
        relation: S,
        attributes: Vec<Attribute>,
        class: T,
    ) -> Result<Self, TreeError>
        where S: ToString,
              T: AsRef<str>,
    {
        let class = class.as_ref();
        let class_index = attributes.iter()
            .position(|attr| attr.name() == class)
            .ok_or_else(|| TreeError::UnknownAttribute {
                name: class.to_string(),
            })?;
        Self::new(relation, attributes, class_index)
    }


    /// Returns the relation name.
    pub fn relation(&self) -> &str {
        &self.relation
    }


    /// Returns all attributes, the class attribute included.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes[..]
    }


    /// Returns the `ix`-th attribute.
    pub fn attribute(&self, ix: usize) -> Option<&Attribute> {
        self.attributes.get(ix)
    }


    /// Returns the number of attributes, the class attribute included.
    pub fn n_attributes(&self) -> usize {
        self.attributes.len()
    }


    /// Returns the index of the class attribute.
    pub fn class_index(&self) -> usize {
        self.class_index
    }


    /// Returns the class attribute.
    pub fn class_attribute(&self) -> &Attribute {
        &self.attributes[self.class_index]
    }


    /// Returns the number of class values.
    pub fn n_classes(&self) -> usize {
        self.class_attribute().n_values()
    }


    /// Returns the label of class `class`, or `"?"` if it does not exist.
    pub fn class_label(&self, class: usize) -> &str {
        self.class_attribute().value(class).unwrap_or("?")
    }


    /// Returns the index of the attribute named `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|attr| attr.name() == name)
    }


    /// Iterates over the non-class attributes.
    pub fn predictors(&self) -> impl Iterator<Item = &Attribute> {
        let class_index = self.class_index;
        self.attributes.iter()
            .filter(move |attr| attr.index() != class_index)
    }
}
