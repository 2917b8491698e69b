//! Errors produced while translating coordinator protocol objects into
//! execution objects.

use std::fmt;

pub type Result<T, E = ConnectorError> = std::result::Result<T, E>;

/// The kind of protocol object a translation was asked to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    Split,
    ColumnHandle,
    TableHandle,
    TableLayoutHandle,
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Split => write!(f, "split"),
            Self::ColumnHandle => write!(f, "column handle"),
            Self::TableHandle => write!(f, "table handle"),
            Self::TableLayoutHandle => write!(f, "table layout handle"),
        }
    }
}

/// Broad classification of an error, used by callers to decide how to report
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A bug in the caller or in this crate, e.g. a request routed to the wrong
    /// connector.
    Internal,
    /// Something the user has to fix in their table definition or catalog
    /// configuration.
    User,
    /// Malformed input that will fail identically on retry.
    InvalidInput,
}

#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    #[error("Unexpected {kind} type {type_tag}")]
    UnexpectedVariant { kind: HandleKind, type_tag: String },

    #[error("{}", format_type_parse(.column.as_deref(), .type_string, .reason))]
    TypeParse {
        column: Option<String>,
        type_string: String,
        reason: String,
    },

    #[error(
        "Table {table} has a regular column declared after a partition column. \
         Native execution requires all partition columns to be declared after all \
         regular columns; recreate the table with its partition columns moved to \
         the end of the column list"
    )]
    SchemaLayout { table: String },

    #[error("Invalid subfield path '{path}': {reason}")]
    InvalidSubfield { path: String, reason: String },

    #[error("Invalid split: {reason}")]
    InvalidSplit { reason: String },

    #[error("Invalid expression {expr}: {reason}")]
    InvalidExpression { expr: String, reason: String },

    #[error("Invalid partition value '{value}': {reason}")]
    InvalidPartitionValue { value: String, reason: String },

    #[error("Invalid configuration for catalog '{catalog}': {reason}")]
    InvalidCatalog { catalog: String, reason: String },

    #[error("Failed to read catalog configuration {path}: {source}")]
    CatalogIo {
        path: String,
        source: std::io::Error,
    },

    #[error("No connector factory registered for connector '{0}'")]
    UnknownConnector(String),

    #[error("No connector registered for catalog '{0}'")]
    UnknownCatalog(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_type_parse(column: Option<&str>, type_string: &str, reason: &str) -> String {
    match column {
        Some(column) => {
            format!("Failed to parse type '{type_string}' for column '{column}': {reason}")
        }
        None => format!("Failed to parse type '{type_string}': {reason}"),
    }
}

impl ConnectorError {
    pub fn unexpected_variant(kind: HandleKind, type_tag: impl Into<String>) -> Self {
        ConnectorError::UnexpectedVariant {
            kind,
            type_tag: type_tag.into(),
        }
    }

    pub fn type_parse(type_string: impl Into<String>, reason: impl Into<String>) -> Self {
        ConnectorError::TypeParse {
            column: None,
            type_string: type_string.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_split(reason: impl Into<String>) -> Self {
        ConnectorError::InvalidSplit {
            reason: reason.into(),
        }
    }

    /// Attach a column name to a type parse error. Other errors are returned
    /// unchanged.
    pub fn with_column(self, name: &str) -> Self {
        match self {
            ConnectorError::TypeParse {
                column: None,
                type_string,
                reason,
            } => ConnectorError::TypeParse {
                column: Some(name.to_string()),
                type_string,
                reason,
            },
            other => other,
        }
    }

    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnexpectedVariant { .. } | Self::UnknownConnector(_) | Self::UnknownCatalog(_) => {
                ErrorKind::Internal
            }
            Self::SchemaLayout { .. } | Self::InvalidCatalog { .. } | Self::CatalogIo { .. } => {
                ErrorKind::User
            }
            Self::TypeParse { .. }
            | Self::InvalidSubfield { .. }
            | Self::InvalidSplit { .. }
            | Self::InvalidExpression { .. }
            | Self::InvalidPartitionValue { .. }
            | Self::Json(_) => ErrorKind::InvalidInput,
        }
    }

    pub const fn is_user_error(&self) -> bool {
        matches!(self.kind(), ErrorKind::User)
    }
}

/// Extension trait for attaching column context to results.
pub trait ResultExt<T> {
    fn for_column(self, name: &str) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn for_column(self, name: &str) -> Result<T> {
        self.map_err(|e| e.with_column(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_variant_names_type_tag() {
        let err = ConnectorError::unexpected_variant(HandleKind::Split, "hive");
        assert_eq!("Unexpected split type hive", err.to_string());
        assert_eq!(ErrorKind::Internal, err.kind());
    }

    #[test]
    fn type_parse_with_column() {
        let err = ConnectorError::type_parse("varchar(", "unexpected end of input");
        assert_eq!(
            "Failed to parse type 'varchar(': unexpected end of input",
            err.to_string()
        );

        let err = err.with_column("c1");
        assert_eq!(
            "Failed to parse type 'varchar(' for column 'c1': unexpected end of input",
            err.to_string()
        );
        assert_eq!(ErrorKind::InvalidInput, err.kind());
    }

    #[test]
    fn with_column_keeps_first_column() {
        let err = ConnectorError::type_parse("blob", "unknown type")
            .with_column("inner")
            .with_column("outer");
        match err {
            ConnectorError::TypeParse { column, .. } => assert_eq!(Some("inner".to_string()), column),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn schema_layout_is_user_error() {
        let err = ConnectorError::SchemaLayout {
            table: "sales.orders".to_string(),
        };
        assert!(err.is_user_error());
        assert!(err.to_string().contains("sales.orders"));
        assert!(err.to_string().contains("partition columns"));
    }

    #[test]
    fn for_column_leaves_other_errors() {
        let res: Result<()> = Err(ConnectorError::invalid_split("negative start"));
        let err = res.for_column("c1").unwrap_err();
        assert!(matches!(err, ConnectorError::InvalidSplit { .. }));
    }
}
