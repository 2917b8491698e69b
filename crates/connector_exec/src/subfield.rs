//! Subfield paths used to prune nested columns.

use std::fmt;

use connector_error::{ConnectorError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathElement {
    /// `.name`
    NestedField(String),
    /// `[42]`
    LongSubscript(i64),
    /// `["key"]`
    StringSubscript(String),
    /// `[*]`
    AllSubscripts,
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NestedField(name) => write!(f, ".{name}"),
            Self::LongSubscript(idx) => write!(f, "[{idx}]"),
            Self::StringSubscript(key) => write!(f, "[\"{}\"]", key.replace('"', "\\\"")),
            Self::AllSubscripts => write!(f, "[*]"),
        }
    }
}

/// A root column and a (possibly empty) path into it, e.g.
/// `info.address["home"].zip`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subfield {
    pub root: String,
    pub path: Vec<PathElement>,
}

impl Subfield {
    pub fn new(root: impl Into<String>) -> Self {
        Subfield {
            root: root.into(),
            path: Vec::new(),
        }
    }

    pub fn parse(path: &str) -> Result<Self> {
        let invalid = |reason: &str| ConnectorError::InvalidSubfield {
            path: path.to_string(),
            reason: reason.to_string(),
        };

        let mut chars = path.char_indices().peekable();
        let root_end = path.find(['.', '[']).unwrap_or(path.len());
        let root = &path[..root_end];
        if root.is_empty() {
            return Err(invalid("missing root column name"));
        }
        while chars.peek().is_some_and(|(idx, _)| *idx < root_end) {
            chars.next();
        }

        let mut elements = Vec::new();
        while let Some((start, c)) = chars.next() {
            match c {
                '.' => {
                    let mut name = String::new();
                    while let Some((_, c)) = chars.peek() {
                        if *c == '.' || *c == '[' {
                            break;
                        }
                        name.push(*c);
                        chars.next();
                    }
                    if name.is_empty() {
                        return Err(invalid(&format!("empty field name at position {start}")));
                    }
                    elements.push(PathElement::NestedField(name));
                }
                '[' => {
                    let element = match chars.peek() {
                        Some((_, '"')) => {
                            chars.next();
                            let mut key = String::new();
                            loop {
                                match chars.next() {
                                    Some((_, '\\')) => match chars.next() {
                                        Some((_, c)) => key.push(c),
                                        None => return Err(invalid("unterminated string subscript")),
                                    },
                                    Some((_, '"')) => break,
                                    Some((_, c)) => key.push(c),
                                    None => return Err(invalid("unterminated string subscript")),
                                }
                            }
                            PathElement::StringSubscript(key)
                        }
                        Some((_, '*')) => {
                            chars.next();
                            PathElement::AllSubscripts
                        }
                        _ => {
                            let mut digits = String::new();
                            while let Some((_, c)) = chars.peek() {
                                if *c == ']' {
                                    break;
                                }
                                digits.push(*c);
                                chars.next();
                            }
                            let idx = digits.trim().parse::<i64>().map_err(|_| {
                                invalid(&format!("invalid subscript '{digits}' at position {start}"))
                            })?;
                            PathElement::LongSubscript(idx)
                        }
                    };
                    match chars.next() {
                        Some((_, ']')) => (),
                        _ => return Err(invalid(&format!("unclosed subscript at position {start}"))),
                    }
                    elements.push(element);
                }
                other => {
                    return Err(invalid(&format!("unexpected '{other}' at position {start}")));
                }
            }
        }

        Ok(Subfield {
            root: root.to_string(),
            path: elements,
        })
    }
}

impl fmt::Display for Subfield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)?;
        for element in &self.path {
            write!(f, "{element}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_root_only() {
        assert_eq!(Subfield::new("c1"), Subfield::parse("c1").unwrap());
    }

    #[test]
    fn parse_nested_path() {
        let subfield = Subfield::parse(r#"info.address["home"].zips[2][*]"#).unwrap();
        assert_eq!("info", subfield.root);
        assert_eq!(
            vec![
                PathElement::NestedField("address".to_string()),
                PathElement::StringSubscript("home".to_string()),
                PathElement::NestedField("zips".to_string()),
                PathElement::LongSubscript(2),
                PathElement::AllSubscripts,
            ],
            subfield.path
        );
    }

    #[test]
    fn display_matches_input() {
        for path in ["a", "a.b.c", r#"a["k"].b"#, "a[-1][*]"] {
            assert_eq!(path, Subfield::parse(path).unwrap().to_string());
        }
    }

    #[test]
    fn invalid_paths() {
        for path in ["", ".a", "a..b", "a[", "a[x]", r#"a["k]"#, "a[1"] {
            let err = Subfield::parse(path).unwrap_err();
            assert!(
                matches!(err, ConnectorError::InvalidSubfield { .. }),
                "path: {path}, err: {err}"
            );
        }
    }
}
