//! Human-readable renderings of a trained tree:
//! an indented text form and a Graphviz DOT graph.
//!
//! A leaf is written as `class (n)` or, if some of the `n` training
//! instances it covers belong to other classes, `class (n/e)`
//! where `e` is the number of those instances.
use std::fmt;
use std::fs;
use std::path::Path;

use crate::TreeError;
use crate::dataset::FeatureCatalog;
use super::{
    model::DecisionTreeModel,
    node::Node,
};


const INDENT: &str = "|   ";


impl DecisionTreeModel {
    /// Renders the tree as indented text, one branch per line.
    ///
    /// ```text
    /// outlook = sunny
    /// |   humidity = high: no (3)
    /// |   humidity = normal: yes (2)
    /// outlook = overcast: yes (4)
    /// ```
    pub fn to_text(&self) -> String {
        self.root().text_lines(self.catalog(), 0).join("\n")
    }


    /// Renders the tree as a Graphviz digraph.
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph DecisionTree {\n");
        let (info, _) = self.root().to_dot_info(self.catalog(), 0);
        info.into_iter()
            .for_each(|row| dot.push_str(&row));
        dot.push_str("}\n");
        dot
    }


    /// Write the current decision tree to dot file.
    pub fn to_dot_file<P>(&self, path: P) -> Result<(), TreeError>
        where P: AsRef<Path>
    {
        let path = path.as_ref();
        fs::write(path, self.to_dot())
            .map_err(|source| TreeError::Io {
                path: path.to_path_buf(), source,
            })
    }
}


impl fmt::Display for DecisionTreeModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let title = format!("Decision tree of `{}`", self.catalog().relation());
        writeln!(f, "{title}")?;
        writeln!(f, "{}", "-".repeat(title.len()))?;
        writeln!(f)?;
        writeln!(f, "{}", self.to_text())?;
        writeln!(f)?;
        writeln!(f, "Number of Leaves  : \t{}", self.num_leaves())?;
        writeln!(f)?;
        write!(f, "Size of the tree : \t{}", self.size())
    }
}


impl Node {
    fn text_lines(&self, catalog: &FeatureCatalog, depth: usize)
        -> Vec<String>
    {
        let (attribute, children) = match self {
            Node::Leaf { .. } => {
                return vec![format!(": {}", self.leaf_label(catalog))];
            },
            Node::Split { attribute, children, .. } => (*attribute, children),
        };

        let prefix = INDENT.repeat(depth);
        let mut lines = Vec::new();
        for (v, child) in children.iter().enumerate() {
            let head = format!(
                "{prefix}{name} = {value}",
                name = attribute_name(catalog, attribute),
                value = value_label(catalog, attribute, v),
            );
            if child.is_leaf() {
                lines.push(format!("{head}: {}", child.leaf_label(catalog)));
            } else {
                lines.push(head);
                lines.extend(child.text_lines(catalog, depth + 1));
            }
        }
        lines
    }


    pub(super) fn to_dot_info(&self, catalog: &FeatureCatalog, id: usize)
        -> (Vec<String>, usize)
    {
        match self {
            Node::Split { attribute, children, .. } => {
                let mut info = vec![format!(
                    "N{id} [label=\"{name}\" ]\n",
                    name = escape(attribute_name(catalog, *attribute)),
                )];

                let mut next_id = id + 1;
                for (v, child) in children.iter().enumerate() {
                    info.push(format!(
                        "N{id}->N{next_id} [label=\"= {value}\"]\n",
                        value = escape(value_label(catalog, *attribute, v)),
                    ));
                    let (mut child_info, ret_id) = child.to_dot_info(catalog, next_id);
                    info.append(&mut child_info);
                    next_id = ret_id;
                }

                (info, next_id)
            },
            Node::Leaf { .. } => {
                let info = format!(
                    "N{id} [label=\"{label}\" shape=box style=filled ]\n",
                    label = escape(&self.leaf_label(catalog)),
                );
                (vec![info], id + 1)
            },
        }
    }


    fn leaf_label(&self, catalog: &FeatureCatalog) -> String {
        let class = self.prediction();
        let counts = self.counts();
        let n = counts.total();
        let errors = n - counts.get(class);
        let label = catalog.class_label(class);
        if errors == 0 {
            format!("{label} ({n})")
        } else {
            format!("{label} ({n}/{errors})")
        }
    }
}


fn attribute_name(catalog: &FeatureCatalog, attribute: usize) -> &str {
    catalog.attribute(attribute)
        .map(|attr| attr.name())
        .unwrap_or("?")
}


fn value_label(catalog: &FeatureCatalog, attribute: usize, value: usize)
    -> &str
{
    catalog.attribute(attribute)
        .and_then(|attr| attr.value(value))
        .unwrap_or("?")
}


fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
