//! Split, column and table handles read by the Hive-compatible scan.
//!
//! Table formats laid out as Hive-style directories of data files (Hive
//! itself, Delta) share these types.

pub mod column;
pub mod split;
pub mod table;

pub use column::{
    ColumnParseParameters,
    ColumnType,
    HiveColumnHandle,
    PartitionDateValueFormat,
};
pub use split::{FileFormat, HiveConnectorSplit, SplitAffinity};
pub use table::HiveTableHandle;
