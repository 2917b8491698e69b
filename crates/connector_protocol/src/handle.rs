use serde::de::{self, Deserializer};
use serde::ser::{self, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::DELTA_TYPE_TAG;
use crate::delta::{DeltaColumnHandle, DeltaSplit, DeltaTableHandle, DeltaTableLayoutHandle};

/// Name of the JSON field holding the connector type tag.
pub const TYPE_TAG_FIELD: &str = "@type";

/// A handle belonging to a connector without typed protocol objects in this
/// crate.
#[derive(Debug, Clone, PartialEq)]
pub struct OpaqueHandle {
    pub type_tag: String,
    /// The full JSON object, including the type tag.
    pub value: Value,
}

fn serialize_tagged<T, S>(type_tag: &str, inner: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    let fields = match serde_json::to_value(inner).map_err(ser::Error::custom)? {
        Value::Object(fields) => fields,
        other => {
            return Err(ser::Error::custom(format!(
                "expected handle to serialize to an object, got {other}"
            )));
        }
    };

    // Tag goes first, matching what the coordinator emits.
    let mut tagged = Map::with_capacity(fields.len() + 1);
    tagged.insert(TYPE_TAG_FIELD.to_string(), Value::String(type_tag.to_string()));
    tagged.extend(fields);

    Value::Object(tagged).serialize(serializer)
}

fn deserialize_tagged<'de, D>(deserializer: D) -> Result<(String, Value), D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let type_tag = value
        .get(TYPE_TAG_FIELD)
        .and_then(Value::as_str)
        .ok_or_else(|| de::Error::missing_field(TYPE_TAG_FIELD))?
        .to_string();

    Ok((type_tag, value))
}

macro_rules! tagged_handle {
    ($(#[$meta:meta])* $name:ident, $delta:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub enum $name {
            Delta($delta),
            Other(OpaqueHandle),
        }

        impl $name {
            /// The connector type tag of this handle.
            pub fn type_tag(&self) -> &str {
                match self {
                    Self::Delta(_) => DELTA_TYPE_TAG,
                    Self::Other(other) => &other.type_tag,
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                match self {
                    Self::Delta(inner) => serialize_tagged(DELTA_TYPE_TAG, inner, serializer),
                    Self::Other(other) => other.value.serialize(serializer),
                }
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let (type_tag, value) = deserialize_tagged(deserializer)?;
                if type_tag == DELTA_TYPE_TAG {
                    serde_json::from_value(value)
                        .map(Self::Delta)
                        .map_err(de::Error::custom)
                } else {
                    Ok(Self::Other(OpaqueHandle { type_tag, value }))
                }
            }
        }
    };
}

tagged_handle!(
    /// A unit of work for a single connector.
    ConnectorSplit,
    DeltaSplit
);

tagged_handle!(
    /// Reference to a single column as understood by a connector.
    ColumnHandle,
    DeltaColumnHandle
);

tagged_handle!(
    /// Connector specific part of a table handle.
    ConnectorTableHandle,
    DeltaTableHandle
);

tagged_handle!(
    /// Connector specific layout picked for a table during planning.
    ConnectorTableLayoutHandle,
    DeltaTableLayoutHandle
);
