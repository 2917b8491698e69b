use std::collections::HashMap;

use crate::datatype::Schema;
use crate::expr::{Filter, TypedExpr};
use crate::hive::column::HiveColumnHandle;
use crate::subfield::Subfield;

#[derive(Debug, Clone, PartialEq)]
pub struct HiveTableHandle {
    pub catalog_id: String,
    /// Fully qualified name, `schema.table`.
    pub table_name: String,
    pub filter_pushdown_enabled: bool,
    /// Filters evaluated by the reader, keyed by the subfield they apply to.
    pub subfield_filters: Vec<(Subfield, Filter)>,
    /// Filter evaluated after reading when it can't be split into subfield
    /// filters.
    pub remaining_filter: Option<TypedExpr>,
    /// Row type of the scan. `None` when the table has no columns.
    pub data_columns: Option<Schema>,
    pub table_parameters: HashMap<String, String>,
    pub column_handles: Vec<HiveColumnHandle>,
}

impl HiveTableHandle {
    pub fn partition_columns(&self) -> impl Iterator<Item = &HiveColumnHandle> {
        self.column_handles.iter().filter(|c| c.is_partition_key())
    }
}
