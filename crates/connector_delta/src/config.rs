use connector_error::{ConnectorError, Result};
use connector_exec::catalog::CatalogProperties;
use tracing::debug;

use crate::DELTA_CONNECTOR_NAME;

/// Worker side configuration of a Delta catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeltaConnectorConfig {
    pub catalog_name: String,
}

impl DeltaConnectorConfig {
    pub fn try_from_catalog(catalog: &CatalogProperties) -> Result<Self> {
        if catalog.connector_name != DELTA_CONNECTOR_NAME {
            return Err(ConnectorError::InvalidCatalog {
                catalog: catalog.catalog_name.clone(),
                reason: format!(
                    "expected connector '{DELTA_CONNECTOR_NAME}', got '{}'",
                    catalog.connector_name
                ),
            });
        }

        // Everything else configures the coordinator (metastore, pushdown
        // flags, etc).
        for key in catalog.properties.keys() {
            debug!(catalog = %catalog.catalog_name, %key, "ignoring catalog property");
        }

        Ok(DeltaConnectorConfig {
            catalog_name: catalog.catalog_name.clone(),
        })
    }
}
