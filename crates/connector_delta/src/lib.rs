//! Delta Lake connector for native execution.
//!
//! Translates the coordinator's Delta splits, column handles and table handles
//! into the Hive split and handle types read by the scan. Table metadata has
//! already been resolved by the coordinator, nothing here touches storage.

pub mod column;
pub mod config;
pub mod connector;
pub mod data_columns;
pub mod layout;
pub mod partition;
pub mod path;
pub mod protocol;
pub mod pushdown;
pub mod split;
pub mod table;
pub mod types;

pub use connector::{DeltaConnectorFactory, DeltaPrestoToExecConnector};
pub use protocol::DeltaConnectorProtocol;

/// Name Delta catalogs set as `connector.name`.
pub const DELTA_CONNECTOR_NAME: &str = "delta";
