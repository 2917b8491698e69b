//! Execution side representation of connector objects.
//!
//! Connectors translate coordinator protocol objects (see
//! `connector_protocol`) into the types in this crate. Splits, column handles
//! and table handles are shared across table formats; a connector picks the
//! implementation matching its storage layout.

pub mod catalog;
pub mod connector;
pub mod datatype;
pub mod expr;
pub mod hive;
pub mod registry;
pub mod subfield;
pub mod type_parser;
