use std::fmt;

/// Max precision of a decimal.
pub const DECIMAL_MAX_PRECISION: u8 = 38;

/// Metadata associated with decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecimalTypeMeta {
    pub precision: u8,
    pub scale: u8,
}

impl DecimalTypeMeta {
    pub const fn new(precision: u8, scale: u8) -> Self {
        DecimalTypeMeta { precision, scale }
    }
}

/// Metadata associated with lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListTypeMeta {
    pub datatype: Box<DataType>,
}

impl ListTypeMeta {
    pub fn new(element: DataType) -> Self {
        ListTypeMeta {
            datatype: Box::new(element),
        }
    }
}

/// Metadata associated with maps.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MapTypeMeta {
    pub key: Box<DataType>,
    pub value: Box<DataType>,
}

impl MapTypeMeta {
    pub fn new(key: DataType, value: DataType) -> Self {
        MapTypeMeta {
            key: Box::new(key),
            value: Box::new(value),
        }
    }
}

/// Metadata associated with structs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructTypeMeta {
    pub fields: Vec<Field>,
}

/// Types understood by the execution engine.
///
/// Character types don't carry a length, `varchar(10)` and `char(3)` both end
/// up as `Utf8`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Type of a constant NULL.
    Unknown,
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Decimal(DecimalTypeMeta),
    Utf8,
    Binary,
    /// Days since epoch.
    Date,
    /// Timestamp with millisecond precision, no time zone.
    Timestamp,
    /// Timestamp with millisecond precision and a time zone.
    TimestampTz,
    /// A list of values all of the same type.
    List(ListTypeMeta),
    Map(MapTypeMeta),
    /// A struct of named fields, possibly of different types.
    Struct(StructTypeMeta),
}

impl DataType {
    pub const fn is_date(&self) -> bool {
        matches!(self, DataType::Date)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "Unknown"),
            Self::Boolean => write!(f, "Boolean"),
            Self::Int8 => write!(f, "Int8"),
            Self::Int16 => write!(f, "Int16"),
            Self::Int32 => write!(f, "Int32"),
            Self::Int64 => write!(f, "Int64"),
            Self::Float32 => write!(f, "Float32"),
            Self::Float64 => write!(f, "Float64"),
            Self::Decimal(meta) => write!(f, "Decimal({},{})", meta.precision, meta.scale),
            Self::Utf8 => write!(f, "Utf8"),
            Self::Binary => write!(f, "Binary"),
            Self::Date => write!(f, "Date"),
            Self::Timestamp => write!(f, "Timestamp"),
            Self::TimestampTz => write!(f, "Timestamp with time zone"),
            Self::List(meta) => write!(f, "List[{}]", meta.datatype),
            Self::Map(meta) => write!(f, "Map<{}, {}>", meta.key, meta.value),
            Self::Struct(meta) => {
                write!(
                    f,
                    "Struct {{{}}}",
                    meta.fields
                        .iter()
                        .map(|field| format!("{}: {}", field.name, field.datatype))
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: String,
    pub datatype: DataType,
}

impl Field {
    pub fn new(name: impl Into<String>, datatype: DataType) -> Self {
        Field {
            name: name.into(),
            datatype,
        }
    }
}

/// Row type of a table or scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Schema {
    pub fields: Vec<Field>,
}

impl Schema {
    pub fn new(fields: impl IntoIterator<Item = Field>) -> Self {
        Schema {
            fields: fields.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}
