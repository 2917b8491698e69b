use std::fmt::Debug;

use connector_error::Result;
use connector_protocol::{ColumnHandle, ConnectorProtocol, ConnectorSplit, SplitContext, TableHandle};

use crate::expr::ExprConverter;
use crate::hive::{HiveColumnHandle, HiveConnectorSplit, HiveTableHandle};
use crate::type_parser::TypeParser;

/// Translates one connector's coordinator protocol objects into execution
/// objects.
///
/// Implementations must be stateless between calls, a single instance serves
/// every query on the worker.
pub trait PrestoToExecConnector: Debug + Send + Sync {
    /// Name the connector is registered under, e.g. `delta`.
    fn connector_name(&self) -> &str;

    fn to_exec_split(
        &self,
        catalog_id: &str,
        split: &ConnectorSplit,
        split_context: &SplitContext,
    ) -> Result<HiveConnectorSplit>;

    fn to_exec_column_handle(
        &self,
        column: &ColumnHandle,
        type_parser: &TypeParser,
    ) -> Result<HiveColumnHandle>;

    fn to_exec_table_handle(
        &self,
        table: &TableHandle,
        expr_converter: &dyn ExprConverter,
        type_parser: &TypeParser,
    ) -> Result<HiveTableHandle>;

    /// Protocol used to decode this connector's JSON handles.
    fn create_connector_protocol(&self) -> Box<dyn ConnectorProtocol>;
}
