use connector_exec::datatype::{DataType, Field, ListTypeMeta, MapTypeMeta, Schema, StructTypeMeta};
use connector_exec::hive::HiveColumnHandle;

/// Build the scan's row type: regular columns first, then partition columns,
/// each in declared order. Field names are lowercased at every nesting level.
///
/// Returns `None` if there are no columns.
pub fn build(columns: &[HiveColumnHandle]) -> Option<Schema> {
    if columns.is_empty() {
        return None;
    }

    let (partitions, regular): (Vec<_>, Vec<_>) =
        columns.iter().partition(|c| c.is_partition_key());

    let fields = regular
        .into_iter()
        .chain(partitions)
        .map(|c| Field::new(c.name.to_lowercase(), lowercase_field_names(c.scan_type())));

    Some(Schema::new(fields))
}

fn lowercase_field_names(datatype: &DataType) -> DataType {
    match datatype {
        DataType::Struct(meta) => DataType::Struct(StructTypeMeta {
            fields: meta
                .fields
                .iter()
                .map(|f| Field::new(f.name.to_lowercase(), lowercase_field_names(&f.datatype)))
                .collect(),
        }),
        DataType::List(meta) => DataType::List(ListTypeMeta::new(lowercase_field_names(&meta.datatype))),
        DataType::Map(meta) => DataType::Map(MapTypeMeta::new(
            lowercase_field_names(&meta.key),
            lowercase_field_names(&meta.value),
        )),
        other => other.clone(),
    }
}
