use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use connector_error::{ConnectorError, Result};
use connector_protocol::{
    ColumnHandle,
    ConnectorProtocol,
    ConnectorSplit,
    SplitContext,
    TableHandle,
};
use tracing::{info, trace, warn};

use crate::catalog::CatalogProperties;
use crate::connector::PrestoToExecConnector;
use crate::expr::ExprConverter;
use crate::hive::{HiveColumnHandle, HiveConnectorSplit, HiveTableHandle};
use crate::type_parser::TypeParser;

/// Creates connectors for catalogs configured with a given connector name.
pub trait ConnectorFactory: Debug + Send + Sync {
    /// Connector name as set by `connector.name` in catalog properties.
    fn name(&self) -> &str;

    fn create(&self, catalog: &CatalogProperties) -> Result<Arc<dyn PrestoToExecConnector>>;
}

/// Connector factories by connector name, and the connectors created from them
/// by catalog name.
#[derive(Debug, Default)]
pub struct ConnectorRegistry {
    factories: HashMap<String, Box<dyn ConnectorFactory>>,
    connectors: HashMap<String, Arc<dyn PrestoToExecConnector>>,
}

impl ConnectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_factory(mut self, factory: Box<dyn ConnectorFactory>) -> Self {
        self.register_factory(factory);
        self
    }

    /// Register a factory, replacing any factory with the same name.
    pub fn register_factory(&mut self, factory: Box<dyn ConnectorFactory>) {
        let name = factory.name().to_string();
        if self.factories.insert(name.clone(), factory).is_some() {
            warn!(connector = %name, "replaced existing connector factory");
        }
    }

    /// Create a connector for a catalog, replacing any existing connector for
    /// that catalog.
    pub fn add_catalog(&mut self, catalog: &CatalogProperties) -> Result<()> {
        let factory = self
            .factories
            .get(&catalog.connector_name)
            .ok_or_else(|| ConnectorError::UnknownConnector(catalog.connector_name.clone()))?;

        let connector = factory.create(catalog)?;
        info!(catalog = %catalog.catalog_name, connector = %catalog.connector_name, "added catalog");
        self.connectors.insert(catalog.catalog_name.clone(), connector);

        Ok(())
    }

    pub fn connector(&self, catalog_id: &str) -> Result<&dyn PrestoToExecConnector> {
        self.connectors
            .get(catalog_id)
            .map(|c| c.as_ref())
            .ok_or_else(|| ConnectorError::UnknownCatalog(catalog_id.to_string()))
    }

    pub fn catalogs(&self) -> impl Iterator<Item = &str> {
        self.connectors.keys().map(String::as_str)
    }

    pub fn to_exec_split(
        &self,
        catalog_id: &str,
        split: &ConnectorSplit,
        split_context: &SplitContext,
    ) -> Result<HiveConnectorSplit> {
        trace!(%catalog_id, type_tag = %split.type_tag(), "dispatching split");
        self.connector(catalog_id)?
            .to_exec_split(catalog_id, split, split_context)
    }

    pub fn to_exec_column_handle(
        &self,
        catalog_id: &str,
        column: &ColumnHandle,
        type_parser: &TypeParser,
    ) -> Result<HiveColumnHandle> {
        trace!(%catalog_id, type_tag = %column.type_tag(), "dispatching column handle");
        self.connector(catalog_id)?
            .to_exec_column_handle(column, type_parser)
    }

    /// Translate a table handle using the connector of the catalog named by the
    /// handle's connector id.
    pub fn to_exec_table_handle(
        &self,
        table: &TableHandle,
        expr_converter: &dyn ExprConverter,
        type_parser: &TypeParser,
    ) -> Result<HiveTableHandle> {
        trace!(catalog_id = %table.connector_id, type_tag = %table.connector_handle.type_tag(), "dispatching table handle");
        self.connector(&table.connector_id)?
            .to_exec_table_handle(table, expr_converter, type_parser)
    }

    pub fn connector_protocol(&self, catalog_id: &str) -> Result<Box<dyn ConnectorProtocol>> {
        Ok(self.connector(catalog_id)?.create_connector_protocol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct NamedFactory {
        name: &'static str,
        fails: bool,
    }

    impl ConnectorFactory for NamedFactory {
        fn name(&self) -> &str {
            self.name
        }

        fn create(&self, catalog: &CatalogProperties) -> Result<Arc<dyn PrestoToExecConnector>> {
            Err(ConnectorError::InvalidCatalog {
                catalog: catalog.catalog_name.clone(),
                reason: if self.fails { "fails" } else { "replaced" }.to_string(),
            })
        }
    }

    fn catalog(connector: &str) -> CatalogProperties {
        CatalogProperties::parse("lake", &format!("connector.name={connector}\n")).unwrap()
    }

    #[test]
    fn unknown_connector() {
        let mut registry = ConnectorRegistry::new();
        let err = registry.add_catalog(&catalog("delta")).unwrap_err();
        assert!(matches!(err, ConnectorError::UnknownConnector(name) if name == "delta"));
    }

    #[test]
    fn unknown_catalog() {
        let registry = ConnectorRegistry::new();
        let err = registry.connector("lake").unwrap_err();
        assert!(matches!(err, ConnectorError::UnknownCatalog(name) if name == "lake"));
        assert_eq!(0, registry.catalogs().count());
    }

    #[test]
    fn duplicate_factory_replaces() {
        let mut registry = ConnectorRegistry::new()
            .with_factory(Box::new(NamedFactory {
                name: "delta",
                fails: true,
            }))
            .with_factory(Box::new(NamedFactory {
                name: "delta",
                fails: false,
            }));

        let err = registry.add_catalog(&catalog("delta")).unwrap_err();
        assert!(err.to_string().contains("replaced"), "{err}");
    }
}
