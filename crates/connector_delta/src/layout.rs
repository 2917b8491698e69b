use connector_error::{ConnectorError, Result};
use connector_exec::hive::HiveColumnHandle;

/// Check that no regular column is declared after a partition column.
///
/// The scan expects the row type to be all regular columns followed by all
/// partition columns.
pub fn validate(table_name: &str, columns: &[HiveColumnHandle]) -> Result<()> {
    let Some(first_partition) = columns.iter().position(|c| c.is_partition_key()) else {
        return Ok(());
    };

    if columns[first_partition..].iter().any(|c| !c.is_partition_key()) {
        return Err(ConnectorError::SchemaLayout {
            table: table_name.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use connector_exec::datatype::DataType;
    use connector_exec::hive::{ColumnParseParameters, ColumnType};

    use super::*;

    pub(crate) fn column(name: &str, datatype: DataType, partition: bool) -> HiveColumnHandle {
        HiveColumnHandle {
            name: name.to_string(),
            hive_type: Some(datatype.clone()),
            datatype,
            column_type: if partition {
                ColumnType::PartitionKey
            } else {
                ColumnType::Regular
            },
            required_subfields: Vec::new(),
            column_parse_parameters: ColumnParseParameters::default(),
        }
    }

    fn layout(partitions: &[bool]) -> Vec<HiveColumnHandle> {
        partitions
            .iter()
            .enumerate()
            .map(|(idx, partition)| column(&format!("c{idx}"), DataType::Int32, *partition))
            .collect()
    }

    #[test]
    fn valid_layouts() {
        for partitions in [
            vec![],
            vec![false],
            vec![true],
            vec![false, false, true, true],
            vec![true, true],
        ] {
            validate("s.t", &layout(&partitions)).unwrap();
        }
    }

    #[test]
    fn regular_after_partition() {
        for partitions in [vec![false, true, false], vec![true, false], vec![true, true, false]] {
            let err = validate("sales.orders", &layout(&partitions)).unwrap_err();
            assert!(err.is_user_error());
            assert!(err.to_string().contains("sales.orders"), "{err}");
        }
    }
}
