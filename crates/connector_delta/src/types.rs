//! Mapping of Delta column type signatures to execution types.

use connector_error::{Result, ResultExt};
use connector_exec::datatype::DataType;
use connector_exec::hive::{ColumnParseParameters, PartitionDateValueFormat};
use connector_exec::type_parser::TypeParser;

/// Encoding of date partition values in the Delta log.
pub const PARTITION_DATE_VALUE_FORMAT: PartitionDateValueFormat = PartitionDateValueFormat::Iso8601;

pub fn resolve_type(type_parser: &TypeParser, type_string: &str) -> Result<DataType> {
    type_parser.parse(type_string)
}

/// Resolve the type of a named column, attaching the column name to any parse
/// error.
pub fn resolve_column_type(
    type_parser: &TypeParser,
    column: &str,
    type_string: &str,
) -> Result<DataType> {
    resolve_type(type_parser, type_string).for_column(column)
}

pub fn is_date_type(datatype: &DataType) -> bool {
    datatype.is_date()
}

/// Parse parameters for a column of the given type.
///
/// Only date partition columns need any, their values come from partition
/// strings rather than the data file.
pub fn column_parse_parameters(datatype: &DataType, is_partition: bool) -> ColumnParseParameters {
    ColumnParseParameters {
        partition_date_value_format: (is_partition && is_date_type(datatype))
            .then_some(PARTITION_DATE_VALUE_FORMAT),
    }
}
