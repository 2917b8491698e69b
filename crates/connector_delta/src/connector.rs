use std::sync::Arc;

use connector_error::Result;
use connector_exec::catalog::CatalogProperties;
use connector_exec::connector::PrestoToExecConnector;
use connector_exec::expr::ExprConverter;
use connector_exec::hive::{HiveColumnHandle, HiveConnectorSplit, HiveTableHandle};
use connector_exec::registry::ConnectorFactory;
use connector_exec::type_parser::TypeParser;
use connector_protocol::{
    ColumnHandle,
    ConnectorProtocol,
    ConnectorSplit,
    SplitContext,
    TableHandle,
};

use crate::DELTA_CONNECTOR_NAME;
use crate::config::DeltaConnectorConfig;
use crate::protocol::DeltaConnectorProtocol;
use crate::pushdown::{DisabledPushdown, FilterPushdown};
use crate::{column, split, table};

/// Translates Delta splits and handles into Hive execution objects.
#[derive(Debug)]
pub struct DeltaPrestoToExecConnector {
    config: DeltaConnectorConfig,
    pushdown: Box<dyn FilterPushdown>,
}

impl DeltaPrestoToExecConnector {
    pub fn new(config: DeltaConnectorConfig) -> Self {
        Self::with_pushdown(config, Box::new(DisabledPushdown))
    }

    pub fn with_pushdown(config: DeltaConnectorConfig, pushdown: Box<dyn FilterPushdown>) -> Self {
        DeltaPrestoToExecConnector { config, pushdown }
    }

    pub fn config(&self) -> &DeltaConnectorConfig {
        &self.config
    }
}

impl PrestoToExecConnector for DeltaPrestoToExecConnector {
    fn connector_name(&self) -> &str {
        DELTA_CONNECTOR_NAME
    }

    fn to_exec_split(
        &self,
        catalog_id: &str,
        split: &ConnectorSplit,
        split_context: &SplitContext,
    ) -> Result<HiveConnectorSplit> {
        split::to_exec_split(catalog_id, split, split_context)
    }

    fn to_exec_column_handle(
        &self,
        column: &ColumnHandle,
        type_parser: &TypeParser,
    ) -> Result<HiveColumnHandle> {
        column::to_exec_column_handle(column, type_parser)
    }

    fn to_exec_table_handle(
        &self,
        table: &TableHandle,
        expr_converter: &dyn ExprConverter,
        type_parser: &TypeParser,
    ) -> Result<HiveTableHandle> {
        table::to_exec_table_handle(table, self.pushdown.as_ref(), expr_converter, type_parser)
    }

    fn create_connector_protocol(&self) -> Box<dyn ConnectorProtocol> {
        Box::new(DeltaConnectorProtocol)
    }
}

/// Creates Delta connectors for catalogs with `connector.name=delta`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeltaConnectorFactory;

impl ConnectorFactory for DeltaConnectorFactory {
    fn name(&self) -> &str {
        DELTA_CONNECTOR_NAME
    }

    fn create(&self, catalog: &CatalogProperties) -> Result<Arc<dyn PrestoToExecConnector>> {
        let config = DeltaConnectorConfig::try_from_catalog(catalog)?;
        Ok(Arc::new(DeltaPrestoToExecConnector::new(config)))
    }
}
