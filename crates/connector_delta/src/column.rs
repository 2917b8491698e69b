use connector_error::{ConnectorError, HandleKind, Result};
use connector_exec::hive::{ColumnType, HiveColumnHandle};
use connector_exec::subfield::Subfield;
use connector_exec::type_parser::TypeParser;
use connector_protocol::ColumnHandle;
use connector_protocol::delta::{DeltaColumn, DeltaColumnHandle, DeltaColumnType};
use tracing::trace;

use crate::types::{column_parse_parameters, resolve_column_type};

pub fn to_exec_column_handle(
    column: &ColumnHandle,
    type_parser: &TypeParser,
) -> Result<HiveColumnHandle> {
    match column {
        ColumnHandle::Delta(column) => delta_column_handle(column, type_parser),
        other => Err(ConnectorError::unexpected_variant(
            HandleKind::ColumnHandle,
            other.type_tag(),
        )),
    }
}

/// Translate a list of Delta column handles.
pub fn to_hive_columns(
    columns: &[DeltaColumnHandle],
    type_parser: &TypeParser,
) -> Result<Vec<HiveColumnHandle>> {
    columns
        .iter()
        .map(|column| delta_column_handle(column, type_parser))
        .collect()
}

pub fn delta_column_handle(
    column: &DeltaColumnHandle,
    type_parser: &TypeParser,
) -> Result<HiveColumnHandle> {
    let is_partition = column.column_type == DeltaColumnType::Partition;
    let required_subfields = match &column.subfield {
        Some(path) => vec![Subfield::parse(path)?],
        None => Vec::new(),
    };

    let handle = hive_column(
        &column.name,
        &column.data_type,
        is_partition,
        required_subfields,
        type_parser,
    )?;
    trace!(?handle, "translated delta column handle");

    Ok(handle)
}

/// Translate a column declared in the table's metadata.
pub fn table_column(column: &DeltaColumn, type_parser: &TypeParser) -> Result<HiveColumnHandle> {
    hive_column(
        &column.name,
        &column.data_type,
        column.partition,
        Vec::new(),
        type_parser,
    )
}

fn hive_column(
    name: &str,
    type_string: &str,
    is_partition: bool,
    required_subfields: Vec<Subfield>,
    type_parser: &TypeParser,
) -> Result<HiveColumnHandle> {
    let datatype = resolve_column_type(type_parser, name, type_string)?;
    let column_parse_parameters = column_parse_parameters(&datatype, is_partition);
    let column_type = if is_partition {
        ColumnType::PartitionKey
    } else {
        ColumnType::Regular
    };

    Ok(HiveColumnHandle {
        name: name.to_string(),
        hive_type: Some(datatype.clone()),
        datatype,
        column_type,
        required_subfields,
        column_parse_parameters,
    })
}
