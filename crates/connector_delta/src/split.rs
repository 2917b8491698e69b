use std::collections::HashMap;

use connector_error::{ConnectorError, HandleKind, Result};
use connector_exec::hive::split::{
    FILE_SIZE_COLUMN_NAME,
    PATH_COLUMN_NAME,
    SCHEMA_KEY,
    TABLE_FORMAT_KEY,
    TABLE_KEY,
};
use connector_exec::hive::{FileFormat, HiveConnectorSplit, SplitAffinity};
use connector_protocol::delta::{DeltaSplit, NodeSelectionStrategy};
use connector_protocol::{ConnectorSplit, SplitContext};
use tracing::{trace, warn};

use crate::partition::to_partition_keys;
use crate::path;

/// Table format reported in a split's custom info.
pub const DELTA_TABLE_FORMAT: &str = "hive-delta";

/// Delta tables are always stored as parquet.
pub const DELTA_FILE_FORMAT: FileFormat = FileFormat::Parquet;

pub fn to_exec_split(
    catalog_id: &str,
    split: &ConnectorSplit,
    split_context: &SplitContext,
) -> Result<HiveConnectorSplit> {
    match split {
        ConnectorSplit::Delta(split) => delta_split(catalog_id, split, split_context),
        other => Err(ConnectorError::unexpected_variant(
            HandleKind::Split,
            other.type_tag(),
        )),
    }
}

fn delta_split(
    catalog_id: &str,
    split: &DeltaSplit,
    split_context: &SplitContext,
) -> Result<HiveConnectorSplit> {
    let start = non_negative("start", split.start)?;
    let length = non_negative("length", split.length)?;
    let file_size = non_negative("fileSize", split.file_size)?;

    let file_path = path::resolve(&split.table_location, &split.file_path)?;

    let custom_split_info = HashMap::from([
        (TABLE_FORMAT_KEY.to_string(), DELTA_TABLE_FORMAT.to_string()),
        (SCHEMA_KEY.to_string(), split.schema_name.clone()),
        (TABLE_KEY.to_string(), split.table_name.clone()),
    ]);

    let info_columns = HashMap::from([
        (PATH_COLUMN_NAME.to_string(), file_path.clone()),
        (FILE_SIZE_COLUMN_NAME.to_string(), file_size.to_string()),
    ]);

    let exec_split = HiveConnectorSplit {
        catalog_id: catalog_id.to_string(),
        file_path,
        file_format: DELTA_FILE_FORMAT,
        start,
        length,
        file_size,
        partition_keys: to_partition_keys(&split.partition_values),
        custom_split_info,
        info_columns,
        cacheable: split_context.cacheable,
        affinity: split_affinity(split.node_selection_strategy),
    };
    trace!(?exec_split, "translated delta split");

    Ok(exec_split)
}

fn non_negative(field: &str, value: i64) -> Result<u64> {
    u64::try_from(value)
        .map_err(|_| ConnectorError::invalid_split(format!("{field} is negative: {value}")))
}

fn split_affinity(strategy: NodeSelectionStrategy) -> SplitAffinity {
    match strategy {
        NodeSelectionStrategy::HardAffinity => SplitAffinity::Hard,
        NodeSelectionStrategy::SoftAffinity => SplitAffinity::Soft,
        NodeSelectionStrategy::NoPreference => SplitAffinity::NoPreference,
        NodeSelectionStrategy::Unrecognized => {
            warn!("unrecognized node selection strategy, using soft affinity");
            SplitAffinity::Soft
        }
    }
}

#[cfg(test)]
mod tests {
    use connector_protocol::OpaqueHandle;
    use serde_json::json;

    use super::*;

    fn split() -> DeltaSplit {
        serde_json::from_value(json!({
            "connectorId": "delta",
            "schemaName": "sales",
            "tableName": "orders",
            "tableLocation": "s3://bucket/orders/",
            "filePath": "ds=2024-01-01/part%2000.parquet",
            "start": 128,
            "length": 1024,
            "fileSize": 4096,
            "partitionValues": {"ds": "2024-01-01", "region": ""},
            "nodeSelectionStrategy": "HARD_AFFINITY",
        }))
        .unwrap()
    }

    fn translate(split: DeltaSplit, cacheable: bool) -> Result<HiveConnectorSplit> {
        to_exec_split(
            "lake",
            &ConnectorSplit::Delta(split),
            &SplitContext { cacheable },
        )
    }

    #[test]
    fn translate_split() {
        let exec = translate(split(), true).unwrap();

        assert_eq!("lake", exec.catalog_id);
        assert_eq!("s3://bucket/orders/ds=2024-01-01/part 00.parquet", exec.file_path);
        assert_eq!(FileFormat::Parquet, exec.file_format);
        assert_eq!((128, 1024, 4096), (exec.start, exec.length, exec.file_size));
        assert_eq!(1152, exec.end());
        assert!(exec.cacheable);
        assert_eq!(SplitAffinity::Hard, exec.affinity);

        assert_eq!(Some(&Some("2024-01-01".to_string())), exec.partition_keys.get("ds"));
        assert_eq!(Some(&None), exec.partition_keys.get("region"));

        assert_eq!("hive-delta", exec.custom_split_info[TABLE_FORMAT_KEY]);
        assert_eq!("sales", exec.custom_split_info[SCHEMA_KEY]);
        assert_eq!("orders", exec.custom_split_info[TABLE_KEY]);

        assert_eq!(exec.file_path, exec.info_columns[PATH_COLUMN_NAME]);
        assert_eq!("4096", exec.info_columns[FILE_SIZE_COLUMN_NAME]);
    }

    #[test]
    fn affinity_mapping() {
        let cases = [
            (NodeSelectionStrategy::HardAffinity, SplitAffinity::Hard),
            (NodeSelectionStrategy::SoftAffinity, SplitAffinity::Soft),
            (NodeSelectionStrategy::NoPreference, SplitAffinity::NoPreference),
            (NodeSelectionStrategy::Unrecognized, SplitAffinity::Soft),
        ];
        for (strategy, expected) in cases {
            let mut split = split();
            split.node_selection_strategy = strategy;
            assert_eq!(expected, translate(split, false).unwrap().affinity);
        }
    }

    #[test]
    fn always_parquet() {
        let mut split = split();
        split.file_path = "part.orc".to_string();
        assert_eq!(FileFormat::Parquet, translate(split, false).unwrap().file_format);
    }

    #[test]
    fn negative_ranges() {
        let mut negative_start = split();
        negative_start.start = -1;
        let mut negative_length = split();
        negative_length.length = -5;
        let mut negative_size = split();
        negative_size.file_size = -1;
        let mut largest = split();
        largest.start = i64::MAX;
        largest.length = i64::MAX;

        for split in [negative_start, negative_length, negative_size] {
            let err = translate(split, false).unwrap_err();
            assert!(matches!(err, ConnectorError::InvalidSplit { .. }), "{err}");
        }

        let exec = translate(largest, false).unwrap();
        assert_eq!(u64::MAX - 1, exec.end());
    }

    #[test]
    fn foreign_split_is_unexpected() {
        let split = ConnectorSplit::Other(OpaqueHandle {
            type_tag: "hive".to_string(),
            value: json!({"@type": "hive"}),
        });
        let err = to_exec_split("lake", &split, &SplitContext::default()).unwrap_err();
        assert_eq!("Unexpected split type hive", err.to_string());
    }
}
