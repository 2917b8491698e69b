use connector_error::{ConnectorError, HandleKind, Result};
use connector_protocol::{
    ColumnHandle,
    ConnectorProtocol,
    ConnectorSplit,
    ConnectorTableHandle,
    ConnectorTableLayoutHandle,
    DELTA_TYPE_TAG,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// JSON (de)serialization of Delta protocol objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeltaConnectorProtocol;

impl DeltaConnectorProtocol {
    fn decode<T: DeserializeOwned>(
        json: &str,
        kind: HandleKind,
        type_tag: impl Fn(&T) -> &str,
    ) -> Result<T> {
        let handle: T = serde_json::from_str(json)?;
        let tag = type_tag(&handle);
        if tag != DELTA_TYPE_TAG {
            return Err(ConnectorError::unexpected_variant(kind, tag));
        }
        Ok(handle)
    }

    fn encode<T: Serialize>(handle: &T, kind: HandleKind, type_tag: &str) -> Result<String> {
        if type_tag != DELTA_TYPE_TAG {
            return Err(ConnectorError::unexpected_variant(kind, type_tag));
        }
        Ok(serde_json::to_string(handle)?)
    }
}

impl ConnectorProtocol for DeltaConnectorProtocol {
    fn type_tag(&self) -> &'static str {
        DELTA_TYPE_TAG
    }

    fn split_from_json(&self, json: &str) -> Result<ConnectorSplit> {
        Self::decode(json, HandleKind::Split, ConnectorSplit::type_tag)
    }

    fn column_handle_from_json(&self, json: &str) -> Result<ColumnHandle> {
        Self::decode(json, HandleKind::ColumnHandle, ColumnHandle::type_tag)
    }

    fn table_handle_from_json(&self, json: &str) -> Result<ConnectorTableHandle> {
        Self::decode(json, HandleKind::TableHandle, ConnectorTableHandle::type_tag)
    }

    fn table_layout_handle_from_json(&self, json: &str) -> Result<ConnectorTableLayoutHandle> {
        Self::decode(
            json,
            HandleKind::TableLayoutHandle,
            ConnectorTableLayoutHandle::type_tag,
        )
    }

    fn split_to_json(&self, split: &ConnectorSplit) -> Result<String> {
        Self::encode(split, HandleKind::Split, split.type_tag())
    }

    fn column_handle_to_json(&self, column: &ColumnHandle) -> Result<String> {
        Self::encode(column, HandleKind::ColumnHandle, column.type_tag())
    }

    fn table_handle_to_json(&self, table: &ConnectorTableHandle) -> Result<String> {
        Self::encode(table, HandleKind::TableHandle, table.type_tag())
    }
}
