use std::collections::HashMap;
use std::fmt;

/// Name of the synthesized column holding a split's file path.
pub const PATH_COLUMN_NAME: &str = "$path";
/// Name of the synthesized column holding a split's file size.
pub const FILE_SIZE_COLUMN_NAME: &str = "$file_size";

/// Custom split info key naming the table format that produced the split.
pub const TABLE_FORMAT_KEY: &str = "table_format";
pub const SCHEMA_KEY: &str = "schema";
pub const TABLE_KEY: &str = "table";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Parquet,
    Orc,
    Dwrf,
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parquet => write!(f, "parquet"),
            Self::Orc => write!(f, "orc"),
            Self::Dwrf => write!(f, "dwrf"),
        }
    }
}

/// How strongly a split prefers to run on the nodes holding its data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SplitAffinity {
    Hard,
    Soft,
    #[default]
    NoPreference,
}

/// A byte range of a single data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiveConnectorSplit {
    pub catalog_id: String,
    /// Absolute, decoded file path.
    pub file_path: String,
    pub file_format: FileFormat,
    pub start: u64,
    pub length: u64,
    pub file_size: u64,
    /// Partition key values by column name. `None` is NULL.
    pub partition_keys: HashMap<String, Option<String>>,
    pub custom_split_info: HashMap<String, String>,
    /// Values for synthesized columns, keyed by column name.
    pub info_columns: HashMap<String, String>,
    pub cacheable: bool,
    pub affinity: SplitAffinity,
}

impl HiveConnectorSplit {
    /// Exclusive end of the byte range.
    pub const fn end(&self) -> u64 {
        self.start + self.length
    }
}
