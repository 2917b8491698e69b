//! Catalog configuration.
//!
//! A catalog is configured by a properties file named after the catalog, e.g.
//! `etc/catalog/lake.properties`, which must set `connector.name`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use connector_error::{ConnectorError, Result};
use tracing::{debug, info};

pub const CONNECTOR_NAME_PROPERTY: &str = "connector.name";

const PROPERTIES_EXTENSION: &str = "properties";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogProperties {
    pub catalog_name: String,
    pub connector_name: String,
    /// Connector properties, excluding `connector.name`.
    pub properties: BTreeMap<String, String>,
}

impl CatalogProperties {
    /// Parse properties text for the given catalog.
    pub fn parse(catalog_name: impl Into<String>, text: &str) -> Result<Self> {
        let catalog_name = catalog_name.into();
        let mut properties = parse_properties(text);

        let connector_name = properties.remove(CONNECTOR_NAME_PROPERTY).ok_or_else(|| {
            ConnectorError::InvalidCatalog {
                catalog: catalog_name.clone(),
                reason: format!("missing '{CONNECTOR_NAME_PROPERTY}'"),
            }
        })?;
        if connector_name.is_empty() {
            return Err(ConnectorError::InvalidCatalog {
                catalog: catalog_name,
                reason: format!("'{CONNECTOR_NAME_PROPERTY}' is empty"),
            });
        }

        Ok(CatalogProperties {
            catalog_name,
            connector_name,
            properties,
        })
    }

    /// Read a catalog properties file. The catalog is named after the file
    /// stem.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let catalog_name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| ConnectorError::InvalidCatalog {
                catalog: path.display().to_string(),
                reason: "file name is not a valid catalog name".to_string(),
            })?;

        let text = fs::read_to_string(path).map_err(|source| ConnectorError::CatalogIo {
            path: path.display().to_string(),
            source,
        })?;

        Self::parse(catalog_name, &text)
    }

    /// Read every `*.properties` file in a directory, skipping disabled
    /// catalogs. Catalogs are returned sorted by name.
    pub fn load_dir(dir: impl AsRef<Path>, disabled: &[&str]) -> Result<Vec<Self>> {
        let dir = dir.as_ref();
        let io_err = |source| ConnectorError::CatalogIo {
            path: dir.display().to_string(),
            source,
        };

        let mut catalogs = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if !path.is_file()
                || path.extension().and_then(|ext| ext.to_str()) != Some(PROPERTIES_EXTENSION)
            {
                continue;
            }

            let catalog = Self::from_file(&path)?;
            if disabled.contains(&catalog.catalog_name.as_str()) {
                info!(catalog = %catalog.catalog_name, "skipping disabled catalog");
                continue;
            }

            debug!(catalog = %catalog.catalog_name, connector = %catalog.connector_name, "loaded catalog properties");
            catalogs.push(catalog);
        }

        catalogs.sort_by(|a, b| a.catalog_name.cmp(&b.catalog_name));
        Ok(catalogs)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

/// Parse Java style properties.
///
/// Supports `key=value`, `key: value` and `key value` separators, `#` and `!`
/// comments, and lines continued with a trailing backslash. Later keys
/// override earlier ones.
fn parse_properties(text: &str) -> BTreeMap<String, String> {
    let mut properties = BTreeMap::new();
    let mut lines = text.lines();

    while let Some(line) = lines.next() {
        let line = line.trim_start();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let mut logical = line.to_string();
        while logical.ends_with('\\') && !logical.ends_with("\\\\") {
            logical.pop();
            match lines.next() {
                Some(next) => logical.push_str(next.trim_start()),
                None => break,
            }
        }

        let sep = logical
            .find(['=', ':'])
            .into_iter()
            .chain(logical.find(char::is_whitespace))
            .min();

        let (key, value) = match sep {
            Some(idx) => {
                let key = &logical[..idx];
                let rest = logical[idx..].trim_start();
                let rest = rest
                    .strip_prefix(['=', ':'])
                    .map(str::trim_start)
                    .unwrap_or(rest);
                (key, rest)
            }
            None => (logical.as_str(), ""),
        };

        properties.insert(key.to_string(), value.trim_end().to_string());
    }

    properties
}
