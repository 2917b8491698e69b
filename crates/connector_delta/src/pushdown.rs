use std::fmt::Debug;

use connector_error::Result;
use connector_exec::expr::{ExprConverter, Filter, TypedExpr};
use connector_exec::subfield::Subfield;
use connector_protocol::delta::DeltaTableLayoutHandle;
use tracing::debug;

/// Filters handed to the scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pushdown {
    pub enabled: bool,
    pub subfield_filters: Vec<(Subfield, Filter)>,
    pub remaining_filter: Option<TypedExpr>,
}

/// Decides which parts of a layout's predicate the scan evaluates.
pub trait FilterPushdown: Debug + Send + Sync {
    fn pushdown(
        &self,
        layout: Option<&DeltaTableLayoutHandle>,
        expr_converter: &dyn ExprConverter,
    ) -> Result<Pushdown>;
}

/// Pushes nothing into the scan. Predicates are evaluated by the engine
/// above the scan.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledPushdown;

impl FilterPushdown for DisabledPushdown {
    fn pushdown(
        &self,
        layout: Option<&DeltaTableLayoutHandle>,
        _expr_converter: &dyn ExprConverter,
    ) -> Result<Pushdown> {
        let with_predicate =
            layout.filter(|l| l.predicate.is_some() || l.predicate_text.is_some());
        if let Some(layout) = with_predicate {
            let table = &layout.table.delta_table;
            debug!(
                schema = %table.schema_name,
                table = %table.table_name,
                predicate = layout.predicate_text.as_deref().unwrap_or_default(),
                "filter pushdown disabled, predicate left to the engine"
            );
        }

        Ok(Pushdown::default())
    }
}

#[cfg(test)]
mod tests {
    use connector_exec::expr::JsonExprConverter;
    use serde_json::json;

    use super::*;

    #[test]
    fn disabled_ignores_predicate() {
        logutil::init_test();

        let layout: DeltaTableLayoutHandle = serde_json::from_value(json!({
            "table": {
                "connectorId": "delta",
                "deltaTable": {
                    "schemaName": "s",
                    "tableName": "t",
                    "tableLocation": "/data/t",
                    "columns": [],
                },
            },
            "predicate": {"columnDomains": []},
            "predicateText": "c1 > 10",
        }))
        .unwrap();

        let converter = JsonExprConverter::default();
        let pushdown = DisabledPushdown.pushdown(Some(&layout), &converter).unwrap();
        assert_eq!(Pushdown::default(), pushdown);
        assert!(!pushdown.enabled);

        let pushdown = DisabledPushdown.pushdown(None, &converter).unwrap();
        assert_eq!(Pushdown::default(), pushdown);
    }
}
