//! Runtime (in-memory) types that mappings are resolved for

use serde::{Deserialize, Serialize};

/// An application-side type, the key of the runtime-type mapping table
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RuntimeType {
    /// Boolean
    Bool,
    /// Unsigned byte; stored as `smallint`
    U8,
    /// 16-bit integer
    I16,
    /// 32-bit integer
    I32,
    /// 64-bit integer
    I64,
    /// 32-bit float
    F32,
    /// 64-bit float
    F64,
    /// Fixed-point decimal
    Decimal,
    /// Text
    String,
    /// Byte buffer
    Bytes,
    /// UUID
    Uuid,
    /// Calendar date
    Date,
    /// Time of day
    Time,
    /// Timestamp; without an offset unless mapped to `timestamptz`
    DateTime,
    /// Timestamp with a UTC offset
    DateTimeOffset,
    /// Duration
    TimeSpan,
    /// JSON document
    Json,
    /// IP address with optional prefix length
    IpAddr,
    /// 6-byte hardware address
    MacAddr,
    /// Bit string
    BitString,
    /// Key/value string map
    Hstore,
    /// Native 2D point
    Point,
    /// Spatial geometry
    Geometry,
    /// Interval over an element type
    Range(Box<RuntimeType>),
    /// Single-dimension array
    Array(Box<RuntimeType>),
    /// Array with more than one dimension
    MultiArray {
        element: Box<RuntimeType>,
        rank: u8,
    },
    /// Growable list with one generic parameter
    List(Box<RuntimeType>),
    /// Application-defined type with no built-in mapping
    Named(String),
}

impl RuntimeType {
    /// `Range<element>`
    pub fn range(element: RuntimeType) -> Self {
        RuntimeType::Range(Box::new(element))
    }

    /// `element[]`
    pub fn array(element: RuntimeType) -> Self {
        RuntimeType::Array(Box::new(element))
    }

    /// `List<element>`
    pub fn list(element: RuntimeType) -> Self {
        RuntimeType::List(Box::new(element))
    }

    /// Returns true for `Range<_>`
    pub fn is_range(&self) -> bool {
        matches!(self, RuntimeType::Range(_))
    }

    /// Returns true for any array or list shape, including multi-dimensional
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            RuntimeType::Array(_) | RuntimeType::MultiArray { .. } | RuntimeType::List(_)
        )
    }

    /// Element type of a range
    pub fn range_element(&self) -> Option<&RuntimeType> {
        match self {
            RuntimeType::Range(element) => Some(element),
            _ => None,
        }
    }

    /// Element type of a single-dimension array or list
    ///
    /// Multi-dimensional arrays have no single element type here; callers
    /// treat them as an unsupported shape.
    pub fn collection_element(&self) -> Option<&RuntimeType> {
        match self {
            RuntimeType::Array(element) | RuntimeType::List(element) => Some(element),
            _ => None,
        }
    }

    /// Returns true for date and time types
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            RuntimeType::Date
                | RuntimeType::Time
                | RuntimeType::DateTime
                | RuntimeType::DateTimeOffset
                | RuntimeType::TimeSpan
        )
    }

    /// Returns true for integer, float and decimal types
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            RuntimeType::U8
                | RuntimeType::I16
                | RuntimeType::I32
                | RuntimeType::I64
                | RuntimeType::F32
                | RuntimeType::F64
                | RuntimeType::Decimal
        )
    }
}

impl std::fmt::Display for RuntimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeType::Bool => write!(f, "bool"),
            RuntimeType::U8 => write!(f, "u8"),
            RuntimeType::I16 => write!(f, "i16"),
            RuntimeType::I32 => write!(f, "i32"),
            RuntimeType::I64 => write!(f, "i64"),
            RuntimeType::F32 => write!(f, "f32"),
            RuntimeType::F64 => write!(f, "f64"),
            RuntimeType::Decimal => write!(f, "Decimal"),
            RuntimeType::String => write!(f, "String"),
            RuntimeType::Bytes => write!(f, "Bytes"),
            RuntimeType::Uuid => write!(f, "Uuid"),
            RuntimeType::Date => write!(f, "Date"),
            RuntimeType::Time => write!(f, "Time"),
            RuntimeType::DateTime => write!(f, "DateTime"),
            RuntimeType::DateTimeOffset => write!(f, "DateTimeOffset"),
            RuntimeType::TimeSpan => write!(f, "TimeSpan"),
            RuntimeType::Json => write!(f, "Json"),
            RuntimeType::IpAddr => write!(f, "IpAddr"),
            RuntimeType::MacAddr => write!(f, "MacAddr"),
            RuntimeType::BitString => write!(f, "BitString"),
            RuntimeType::Hstore => write!(f, "Hstore"),
            RuntimeType::Point => write!(f, "Point"),
            RuntimeType::Geometry => write!(f, "Geometry"),
            RuntimeType::Range(element) => write!(f, "Range<{element}>"),
            RuntimeType::Array(element) => write!(f, "{element}[]"),
            RuntimeType::MultiArray { element, rank } => {
                write!(f, "{element}[{}]", ",".repeat(usize::from(rank.saturating_sub(1))))
            }
            RuntimeType::List(element) => write!(f, "List<{element}>"),
            RuntimeType::Named(name) => write!(f, "{name}"),
        }
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
