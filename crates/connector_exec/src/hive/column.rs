use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use connector_error::{ConnectorError, Result};

use crate::datatype::DataType;
use crate::subfield::Subfield;

/// Days between 0001-01-01 and 1970-01-01.
pub const EPOCH_DAYS_FROM_CE: i32 = 719_163;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Column read from the data file.
    Regular,
    /// Column whose value comes from the split's partition keys.
    PartitionKey,
    /// Column computed by the reader, e.g. `$path`.
    Synthesized,
}

/// How the raw string value of a date partition key is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartitionDateValueFormat {
    /// `YYYY-MM-DD`
    Iso8601,
    /// Integer number of days since 1970-01-01.
    DaysSinceEpoch,
}

impl PartitionDateValueFormat {
    /// Decode a raw partition value into days since the Unix epoch.
    ///
    /// Missing and empty values are NULL.
    pub fn decode(&self, raw: Option<&str>) -> Result<Option<i32>> {
        let raw = match raw {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(None),
        };

        let invalid = |reason: String| ConnectorError::InvalidPartitionValue {
            value: raw.to_string(),
            reason,
        };

        match self {
            Self::Iso8601 => {
                let date = NaiveDate::from_str(raw)
                    .map_err(|e| invalid(format!("not an ISO-8601 date: {e}")))?;
                Ok(Some(date.num_days_from_ce() - EPOCH_DAYS_FROM_CE))
            }
            Self::DaysSinceEpoch => {
                let days = raw
                    .parse::<i32>()
                    .map_err(|e| invalid(format!("not a day count: {e}")))?;
                Ok(Some(days))
            }
        }
    }
}

/// Reader hints for decoding a column's values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ColumnParseParameters {
    pub partition_date_value_format: Option<PartitionDateValueFormat>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HiveColumnHandle {
    pub name: String,
    pub datatype: DataType,
    /// Type as known to the metastore. Takes precedence over `datatype` when
    /// building the scan's row type.
    pub hive_type: Option<DataType>,
    pub column_type: ColumnType,
    /// Subfields the query actually reads. Empty means the whole column.
    pub required_subfields: Vec<Subfield>,
    pub column_parse_parameters: ColumnParseParameters,
}

impl HiveColumnHandle {
    pub const fn is_partition_key(&self) -> bool {
        matches!(self.column_type, ColumnType::PartitionKey)
    }

    /// Type used for the scan's row type.
    pub fn scan_type(&self) -> &DataType {
        self.hive_type.as_ref().unwrap_or(&self.datatype)
    }
}
