//! Protocol objects sent by the coordinator to workers.
//!
//! Connector specific handles are serialized as JSON objects carrying an
//! `@type` field naming the connector they belong to. Handles for connectors
//! this crate knows about deserialize into typed variants, everything else is
//! kept as an [`OpaqueHandle`] so a misrouted request can still be reported by
//! its type tag.

pub mod delta;
pub mod handle;

use std::fmt::Debug;

use connector_error::Result;
use serde::{Deserialize, Serialize};

pub use handle::{
    ColumnHandle,
    ConnectorSplit,
    ConnectorTableHandle,
    ConnectorTableLayoutHandle,
    OpaqueHandle,
    TYPE_TAG_FIELD,
};

/// Type tag used by the Delta connector.
pub const DELTA_TYPE_TAG: &str = "delta";

/// A table handle as scheduled by the coordinator, wrapping the connector
/// specific handle and, once a layout has been picked, its layout handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableHandle {
    pub connector_id: String,
    pub connector_handle: ConnectorTableHandle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector_table_layout: Option<ConnectorTableLayoutHandle>,
}

/// Execution context accompanying a split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitContext {
    /// Whether data read for this split may be cached by the worker.
    #[serde(default)]
    pub cacheable: bool,
}

/// (De)serialization of one connector's protocol objects.
///
/// Implementations only accept objects tagged with their own
/// [`type_tag`](ConnectorProtocol::type_tag).
pub trait ConnectorProtocol: Debug + Send + Sync {
    fn type_tag(&self) -> &'static str;

    fn split_from_json(&self, json: &str) -> Result<ConnectorSplit>;
    fn column_handle_from_json(&self, json: &str) -> Result<ColumnHandle>;
    fn table_handle_from_json(&self, json: &str) -> Result<ConnectorTableHandle>;
    fn table_layout_handle_from_json(&self, json: &str) -> Result<ConnectorTableLayoutHandle>;

    fn split_to_json(&self, split: &ConnectorSplit) -> Result<String>;
    fn column_handle_to_json(&self, column: &ColumnHandle) -> Result<String>;
    fn table_handle_to_json(&self, table: &ConnectorTableHandle) -> Result<String>;
}
