//! Delta Lake protocol objects.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// How the scheduler should place a split on workers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeSelectionStrategy {
    HardAffinity,
    SoftAffinity,
    #[default]
    NoPreference,
    /// A strategy this build doesn't know about.
    #[serde(other)]
    Unrecognized,
}

/// A single data file (or byte range of one) of a Delta table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeltaSplit {
    pub connector_id: String,
    pub schema_name: String,
    pub table_name: String,
    /// Root of the table, either a URI or a directory path.
    pub table_location: String,
    /// Absolute URI, or a path relative to `table_location`. May be percent
    /// encoded.
    pub file_path: String,
    pub start: i64,
    pub length: i64,
    pub file_size: i64,
    /// Partition values as written in the Delta log, keyed by column name.
    ///
    /// Delta serializes NULL partition values as empty strings (or JSON null,
    /// which is read as an empty string here).
    #[serde(default, deserialize_with = "deserialize_partition_values")]
    pub partition_values: IndexMap<String, String>,
    #[serde(default)]
    pub node_selection_strategy: NodeSelectionStrategy,
}

fn deserialize_partition_values<'de, D>(deserializer: D) -> Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = IndexMap::<String, Option<String>>::deserialize(deserializer)?;
    Ok(values
        .into_iter()
        .map(|(name, value)| (name, value.unwrap_or_default()))
        .collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeltaColumnType {
    Regular,
    Partition,
    Subfield,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeltaColumnHandle {
    pub name: String,
    /// Type signature, e.g. `bigint` or `row(a varchar, b array(integer))`.
    pub data_type: String,
    pub column_type: DeltaColumnType,
    /// Dereferenced subfield path, e.g. `info.address.zip`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subfield: Option<String>,
}

/// A column as declared in the table's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    pub partition: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeltaTable {
    pub schema_name: String,
    pub table_name: String,
    pub table_location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_id: Option<i64>,
    /// Columns in declared order.
    pub columns: Vec<DeltaColumn>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeltaTableHandle {
    pub connector_id: String,
    pub delta_table: DeltaTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeltaTableLayoutHandle {
    pub table: DeltaTableHandle,
    /// Tuple domain over partition and regular columns, kept as raw JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicate: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicate_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn deserialize_split() {
        let value = json!({
            "connectorId": "delta",
            "schemaName": "sales",
            "tableName": "orders",
            "tableLocation": "s3://bucket/orders/",
            "filePath": "ds=2024-01-01/part-0001.parquet",
            "start": 0,
            "length": 1024,
            "fileSize": 4096,
            "partitionValues": {"ds": "2024-01-01", "region": null},
            "nodeSelectionStrategy": "SOFT_AFFINITY",
        });

        let split: DeltaSplit = serde_json::from_value(value).unwrap();
        assert_eq!("orders", split.table_name);
        assert_eq!(NodeSelectionStrategy::SoftAffinity, split.node_selection_strategy);

        let values: Vec<_> = split
            .partition_values
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(vec![("ds", "2024-01-01"), ("region", "")], values);
    }

    #[test]
    fn unknown_node_selection_strategy() {
        let strategy: NodeSelectionStrategy =
            serde_json::from_value(json!("ROUND_ROBIN_ISH")).unwrap();
        assert_eq!(NodeSelectionStrategy::Unrecognized, strategy);
    }

    #[test]
    fn defaults_for_missing_fields() {
        let value = json!({
            "connectorId": "delta",
            "schemaName": "s",
            "tableName": "t",
            "tableLocation": "/data/t",
            "filePath": "part.parquet",
            "start": 0,
            "length": 10,
            "fileSize": 10,
        });

        let split: DeltaSplit = serde_json::from_value(value).unwrap();
        assert!(split.partition_values.is_empty());
        assert_eq!(NodeSelectionStrategy::NoPreference, split.node_selection_strategy);
    }

    #[test]
    fn deserialize_table_columns_in_declared_order() {
        let value = json!({
            "schemaName": "s",
            "tableName": "t",
            "tableLocation": "/data/t",
            "columns": [
                {"name": "b", "type": "bigint", "partition": false},
                {"name": "a", "type": "varchar", "partition": true},
            ],
        });

        let table: DeltaTable = serde_json::from_value(value).unwrap();
        let names: Vec<_> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(vec!["b", "a"], names);
        assert!(table.columns[1].partition);
        assert_eq!(None, table.snapshot_id);
    }
}
