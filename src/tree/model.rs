//! Defines the trained decision tree.
use serde::{Serialize, Deserialize};

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::{Classifier, TreeError};
use crate::dataset::{ClassCounts, FeatureCatalog, Instance};
use super::node::Node;
use super::prune;


/// A trained decision tree.
/// The model owns its root node and shares the catalog
/// of the data it was grown on, so that it can name attributes
/// and classes and reject data described differently.
///
/// A model is immutable once built, hence it can be shared
/// across threads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTreeModel {
    catalog: Arc<FeatureCatalog>,
    root: Node,
}


impl DecisionTreeModel {
    #[inline]
    pub(crate) fn new(catalog: Arc<FeatureCatalog>, root: Node) -> Self {
        Self { catalog, root }
    }


    /// Returns the root node.
    pub fn root(&self) -> &Node {
        &self.root
    }


    /// Returns the catalog of the training data.
    pub fn catalog(&self) -> &FeatureCatalog {
        &self.catalog
    }


    /// Returns the number of leaves.
    pub fn num_leaves(&self) -> usize {
        self.root.num_leaves()
    }


    /// Returns the number of nodes.
    pub fn size(&self) -> usize {
        self.root.size()
    }


    /// Returns the depth of the tree.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }


    /// Returns the class label predicted for `instance`.
    pub fn predict_label(&self, instance: &Instance) -> &str {
        self.catalog.class_label(self.predict(instance))
    }


    /// Checks that `catalog` describes the same attributes,
    /// vocabularies, and class as the training catalog.
    ///
    /// # Errors
    /// Returns [`TreeError::CatalogMismatch`] otherwise.
    pub fn check_catalog(&self, catalog: &FeatureCatalog)
        -> Result<(), TreeError>
    {
        let same = self.catalog.class_index() == catalog.class_index()
            && self.catalog.attributes() == catalog.attributes();
        if same {
            Ok(())
        } else {
            Err(TreeError::CatalogMismatch {
                model: self.catalog.relation().to_string(),
                dataset: catalog.relation().to_string(),
            })
        }
    }


    /// Returns the pessimistic number of errors of this tree
    /// on its training data, summed over the leaves,
    /// at the pruning confidence `confidence`.
    /// Pruning at `confidence` never increases this value.
    pub fn estimated_errors(&self, confidence: f64) -> f64 {
        prune::leaf_estimate(&self.root, confidence)
    }


    /// Encodes the model as a JSON string.
    pub fn to_json(&self) -> Result<String, TreeError> {
        Ok(serde_json::to_string(self)?)
    }


    /// Decodes a model from a JSON string
    /// produced by [`DecisionTreeModel::to_json`].
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`TreeError::Serialize`] | `json` is not a model document |
    /// | catalog errors | see [`FeatureCatalog::new`] |
    /// | [`TreeError::InvalidModel`] | the tree does not fit the catalog |
    pub fn from_json(json: &str) -> Result<Self, TreeError> {
        let Self { catalog, root } = serde_json::from_str(json)?;
        let catalog = FeatureCatalog::new(
            catalog.relation(),
            catalog.attributes().to_vec(),
            catalog.class_index(),
        )?;
        check_node(&root, &catalog)?;
        Ok(Self::new(Arc::new(catalog), root))
    }


    /// Writes the model to `path` as JSON.
    pub fn save<P>(&self, path: P) -> Result<(), TreeError>
        where P: AsRef<Path>
    {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json)
            .map_err(|source| TreeError::Io {
                path: path.to_path_buf(), source,
            })
    }


    /// Reads a model written by [`DecisionTreeModel::save`].
    pub fn load<P>(path: P) -> Result<Self, TreeError>
        where P: AsRef<Path>
    {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|source| TreeError::Io {
                path: path.to_path_buf(), source,
            })?;
        Self::from_json(&json)
    }
}


/// Checks that every node of `node` can be read through `catalog`.
fn check_node(node: &Node, catalog: &FeatureCatalog)
    -> Result<(), TreeError>
{
    let n_classes = catalog.n_classes();
    if node.counts().n_classes() != n_classes {
        return Err(invalid(format!(
            "a node counts {} classes, the catalog has {n_classes}",
            node.counts().n_classes(),
        )));
    }

    match node {
        Node::Leaf { class, .. } => {
            if *class >= n_classes {
                return Err(invalid(format!(
                    "leaf class {class} is out of the class vocabulary",
                )));
            }
            Ok(())
        },
        Node::Split { attribute, children, .. } => {
            if *attribute == catalog.class_index() {
                return Err(invalid("a node splits on the class".to_string()));
            }
            let attr = catalog.attribute(*attribute)
                .ok_or_else(|| invalid(format!(
                    "split attribute {attribute} does not exist",
                )))?;
            if children.len() != attr.n_values() {
                return Err(invalid(format!(
                    "split on `{}` has {} children for {} values",
                    attr.name(), children.len(), attr.n_values(),
                )));
            }
            children.iter()
                .try_for_each(|child| check_node(child, catalog))
        },
    }
}


#[inline]
fn invalid(reason: String) -> TreeError {
    TreeError::InvalidModel { reason }
}


impl Classifier for DecisionTreeModel {
    #[inline]
    fn predict(&self, instance: &Instance) -> usize {
        self.root.predict(instance)
    }


    #[inline]
    fn class_distribution(&self, instance: &Instance) -> &ClassCounts {
        self.root.class_distribution(instance)
    }
}
