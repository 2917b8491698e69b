//! Resolution of a split's data file path.

use connector_error::{ConnectorError, Result};
use percent_encoding::percent_decode_str;

/// Returns true if `path` is already absolute and shouldn't be joined with
/// the table location.
fn is_absolute(path: &str) -> bool {
    path.contains("://") || path.starts_with("file:/")
}

/// Build the full, decoded path of a data file.
///
/// `file_path` is either an absolute URI or relative to `table_location`.
/// Delta may store file paths percent encoded, e.g. partition directories
/// containing spaces.
pub fn resolve(table_location: &str, file_path: &str) -> Result<String> {
    let full_path = if is_absolute(file_path) {
        file_path.to_string()
    } else {
        let location = table_location.strip_suffix('/').unwrap_or(table_location);
        if file_path.is_empty() || file_path.starts_with('/') {
            format!("{location}{file_path}")
        } else {
            format!("{location}/{file_path}")
        }
    };

    let decoded = percent_decode_str(&full_path).decode_utf8().map_err(|e| {
        ConnectorError::invalid_split(format!(
            "file path '{full_path}' is not valid UTF-8 after decoding: {e}"
        ))
    })?;

    Ok(decoded.into_owned())
}
