use tracing::debug;

use std::fs;
use std::path::Path;

use crate::TreeError;
use super::{
    attribute::Attribute,
    catalog::FeatureCatalog,
    dataset_struct::Dataset,
    instance::Instance,
};


/// A struct that returns [`Dataset`].
/// Using this struct, one can read a nominal ARFF file to [`Dataset`].
/// # Example
/// The following code reads an ARFF file whose class attribute
/// is named `class`.
/// ```no_run
/// use minitrees::DatasetReader;
/// let dataset = DatasetReader::default()
///     .file("/path/to/car.arff")
///     .class_attribute("class")
///     .read()
///     .unwrap();
/// ```
pub struct DatasetReader<P, S> {
    file: Option<P>,
    class: Option<S>,
}


impl<P, S> Default for DatasetReader<P, S> {
    fn default() -> Self {
        Self { file: None, class: None, }
    }
}


impl<P, S> DatasetReader<P, S>
    where P: AsRef<Path>
{
    /// Set the file name.
    pub fn file(mut self, file: P) -> Self {
        self.file = Some(file);
        self
    }
}


impl<P, S> DatasetReader<P, S>
    where S: AsRef<str>
{
    /// Set the attribute used as the class.
    /// By default, the last attribute is the class.
    pub fn class_attribute(mut self, name: S) -> Self {
        self.class = Some(name);
        self
    }
}


impl<P, S> DatasetReader<P, S>
    where P: AsRef<Path>,
          S: AsRef<str>
{
    /// Reads the file based on the arguments.
    /// This method consumes `self.`
    pub fn read(self) -> Result<Dataset, TreeError> {
        let file = self.file.ok_or_else(|| TreeError::Parse {
            line: 0,
            reason: "the ARFF file name is not set".to_string(),
        })?;
        let path = file.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|source| TreeError::Io {
                path: path.to_path_buf(), source,
            })?;
        let class = self.class.as_ref().map(|c| c.as_ref());
        Dataset::from_arff_str(&text, class)
    }
}


impl Dataset {
    /// Parse a nominal ARFF document.
    /// `class` names the class attribute; `None` selects the last one.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`TreeError::Parse`] | malformed header or data line |
    /// | [`TreeError::UnsupportedAttribute`] | a non-nominal attribute |
    /// | [`TreeError::UnknownAttribute`] | `class` is not declared |
    /// | data validation errors | see [`Dataset::new`] |
    pub fn from_arff_str(text: &str, class: Option<&str>)
        -> Result<Self, TreeError>
    {
        let mut relation = String::new();
        let mut attributes = Vec::new();
        let mut rows = Vec::new();
        let mut in_data = false;

        for (ix, raw) in text.lines().enumerate() {
            let line_no = ix + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('%') { continue; }

            if in_data {
                if line.starts_with('{') {
                    return Err(TreeError::Parse {
                        line: line_no,
                        reason: "sparse data lines are not supported".to_string(),
                    });
                }
                rows.push(split_fields(line, line_no)?);
                continue;
            }

            let (keyword, rest) = split_keyword(line);
            match keyword.to_ascii_lowercase().as_str() {
                "@relation" => {
                    relation = unquote(rest).to_string();
                },
                "@attribute" => {
                    attributes.push(parse_attribute(rest, line_no)?);
                },
                "@data" => {
                    in_data = true;
                },
                _ => {
                    return Err(TreeError::Parse {
                        line: line_no,
                        reason: format!("unexpected header line `{line}`"),
                    });
                },
            }
        }

        if attributes.is_empty() {
            return Err(TreeError::Parse {
                line: 0,
                reason: "no attribute is declared".to_string(),
            });
        }

        let catalog = match class {
            Some(name) => {
                FeatureCatalog::with_class_name(relation, attributes, name)?
            },
            None => {
                let class_index = attributes.len() - 1;
                FeatureCatalog::new(relation, attributes, class_index)?
            },
        };

        let instances = rows.iter()
            .enumerate()
            .map(|(row, fields)| Instance::from_labels(&catalog, fields, row))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            relation = catalog.relation(),
            n_attributes = catalog.n_attributes(),
            n_instances = instances.len(),
            "parsed ARFF document"
        );

        Dataset::new(catalog, instances)
    }
}


/// Split `@keyword rest` into the keyword and the trimmed rest.
fn split_keyword(line: &str) -> (&str, &str) {
    match line.find(char::is_whitespace) {
        Some(pos) => (&line[..pos], line[pos..].trim()),
        None => (line, ""),
    }
}


/// Parse the part after `@attribute`, i.e., `name {v1, v2, ...}`.
fn parse_attribute(rest: &str, line: usize) -> Result<Attribute, TreeError> {
    let (name, tail) = match rest.chars().next() {
        Some(q @ ('\'' | '"')) => {
            let end = rest[1..].find(q)
                .ok_or_else(|| TreeError::Parse {
                    line,
                    reason: "unterminated attribute name".to_string(),
                })?;
            (&rest[1..end + 1], rest[end + 2..].trim())
        },
        Some(_) => split_keyword(rest),
        None => {
            return Err(TreeError::Parse {
                line,
                reason: "attribute declaration without a name".to_string(),
            });
        },
    };

    if !(tail.starts_with('{') && tail.ends_with('}')) {
        let kind = tail.split_whitespace()
            .next()
            .unwrap_or("")
            .to_string();
        return Err(TreeError::UnsupportedAttribute {
            name: name.to_string(), kind,
        });
    }

    let values = split_fields(&tail[1..tail.len() - 1], line)?
        .into_iter()
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>();

    Ok(Attribute::new(name, values))
}


/// Removes one pair of matching `'` or `"` around `token`.
fn unquote(token: &str) -> &str {
    ['\'', '"'].into_iter()
        .find_map(|q| token.strip_prefix(q)?.strip_suffix(q))
        .unwrap_or(token)
}


/// Splits a comma-separated ARFF line into its values.
/// A value may be quoted with `'` or `"`; the quotes are dropped,
/// commas inside them are kept, and `\` escapes the next character.
fn split_fields(line: &str, line_no: usize)
    -> Result<Vec<String>, TreeError>
{
    let parse_error = |reason: &str| TreeError::Parse {
        line: line_no, reason: reason.to_string(),
    };

    let mut fields = Vec::new();
    let mut chars = line.chars().peekable();
    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        let field = match chars.peek().copied() {
            Some(q @ ('\'' | '"')) => {
                chars.next();
                let mut field = String::new();
                loop {
                    match chars.next() {
                        Some('\\') => match chars.next() {
                            Some(c) => field.push(c),
                            None => return Err(parse_error("unterminated quoted value")),
                        },
                        Some(c) if c == q => break,
                        Some(c) => field.push(c),
                        None => return Err(parse_error("unterminated quoted value")),
                    }
                }
                while chars.next_if(|c| c.is_whitespace()).is_some() {}
                if !matches!(chars.peek(), None | Some(',')) {
                    return Err(parse_error("unexpected text after a quoted value"));
                }
                field
            },
            _ => {
                let mut field = String::new();
                while let Some(c) = chars.next_if(|&c| c != ',') {
                    field.push(c);
                }
                field.trim_end().to_string()
            },
        };
        fields.push(field);

        // Consumes the separator, if any.
        if chars.next().is_none() { break; }
    }
    Ok(fields)
}


#[cfg(test)]
mod tests {
    use super::*;

    const TOY: &str = "\
% a comment
@relation 'toy data'

@attribute A {x, y}
@attribute 'B b' {'p 1', q}
@attribute class {yes,no}

@data
x,'p 1',yes
y,q,no
?,q,no
";

    #[test]
    fn parses_nominal_document() {
        let data = Dataset::from_arff_str(TOY, None).unwrap();
        let catalog = data.catalog();
        assert_eq!(catalog.relation(), "toy data");
        assert_eq!(catalog.n_attributes(), 3);
        assert_eq!(catalog.class_index(), 2);
        assert_eq!(catalog.attribute(1).unwrap().name(), "B b");
        assert_eq!(catalog.attribute(1).unwrap().values(), &["p 1", "q"]);
        assert_eq!(data.len(), 3);
        assert_eq!(data.target(), vec![0, 1, 1]);
        assert!(data.instance(2).is_missing(0));
    }

    #[test]
    fn class_attribute_by_name() {
        let err = Dataset::from_arff_str(TOY, Some("A")).unwrap_err();
        // The third row has a missing value for `A`.
        assert!(matches!(err, TreeError::MissingClass { row: 2 }));
    }

    #[test]
    fn rejects_numeric_attributes() {
        let text = "@relation r\n@attribute t numeric\n@attribute c {a}\n@data\n";
        let err = Dataset::from_arff_str(text, None).unwrap_err();
        match err {
            TreeError::UnsupportedAttribute { name, kind } => {
                assert_eq!(name, "t");
                assert_eq!(kind, "numeric");
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_values_outside_vocabulary() {
        let text = "@relation r\n@attribute a {u, v}\n@attribute c {k}\n@data\nw,k\n";
        let err = Dataset::from_arff_str(text, None).unwrap_err();
        assert!(matches!(err, TreeError::ValueOutOfVocabulary { row: 0, .. }));
    }

    #[test]
    fn quoted_values_keep_their_commas() {
        let line = r#"'sunny', hot ,"high, very",'it\'s',no"#;
        let fields = split_fields(line, 1).unwrap();
        assert_eq!(fields, vec!["sunny", "hot", "high, very", "it's", "no"]);

        assert_eq!(unquote("'weather'"), "weather");
        assert_eq!(unquote("\"weather'"), "\"weather'");
        assert_eq!(unquote("'"), "'");
    }

    #[test]
    fn unterminated_quote_is_a_parse_error() {
        let err = split_fields("sunny,'hot", 7).unwrap_err();
        assert!(matches!(err, TreeError::Parse { line: 7, .. }));

        let err = split_fields("'sunny' x,hot", 3).unwrap_err();
        assert!(matches!(err, TreeError::Parse { line: 3, .. }));

        let text = "@relation r\n@attribute a {u, v}\n@attribute c {k}\n@data\n'u,k\n";
        let err = Dataset::from_arff_str(text, None).unwrap_err();
        assert!(matches!(err, TreeError::Parse { line: 5, .. }));
    }
}
