use std::collections::HashMap;

use connector_error::{ConnectorError, HandleKind, Result};
use connector_exec::expr::ExprConverter;
use connector_exec::hive::HiveTableHandle;
use connector_exec::type_parser::TypeParser;
use connector_protocol::{ConnectorTableHandle, ConnectorTableLayoutHandle, TableHandle};
use tracing::trace;

use crate::column::table_column;
use crate::pushdown::FilterPushdown;
use crate::{data_columns, layout};

pub fn to_exec_table_handle(
    table: &TableHandle,
    pushdown: &dyn FilterPushdown,
    expr_converter: &dyn ExprConverter,
    type_parser: &TypeParser,
) -> Result<HiveTableHandle> {
    let delta_handle = match &table.connector_handle {
        ConnectorTableHandle::Delta(handle) => handle,
        other => {
            return Err(ConnectorError::unexpected_variant(
                HandleKind::TableHandle,
                other.type_tag(),
            ));
        }
    };

    let delta_layout = match &table.connector_table_layout {
        None => None,
        Some(ConnectorTableLayoutHandle::Delta(layout)) => Some(layout),
        Some(other) => {
            return Err(ConnectorError::unexpected_variant(
                HandleKind::TableLayoutHandle,
                other.type_tag(),
            ));
        }
    };

    let delta_table = &delta_handle.delta_table;
    let table_name = format!("{}.{}", delta_table.schema_name, delta_table.table_name);

    let column_handles = delta_table
        .columns
        .iter()
        .map(|column| table_column(column, type_parser))
        .collect::<Result<Vec<_>>>()?;

    layout::validate(&table_name, &column_handles)?;
    let data_columns = data_columns::build(&column_handles);

    let pushdown = pushdown.pushdown(delta_layout, expr_converter)?;

    trace!(%table_name, columns = column_handles.len(), "translated delta table handle");

    Ok(HiveTableHandle {
        catalog_id: table.connector_id.clone(),
        table_name,
        filter_pushdown_enabled: pushdown.enabled,
        subfield_filters: pushdown.subfield_filters,
        remaining_filter: pushdown.remaining_filter,
        data_columns,
        table_parameters: HashMap::new(),
        column_handles,
    })
}
