//! In-memory values handed to literal rendering and parameter coercion

use crate::range::Interval;
use crate::types::RuntimeType;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::IpAddr;

/// A runtime value
///
/// Floats compare and hash by bit pattern so values can key caches and
/// participate in structurally-compared expression trees.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    U8(u8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Decimal(Decimal),
    Text(String),
    Bytes(Vec<u8>),
    Uuid(uuid::Uuid),
    Date(NaiveDate),
    Time(NaiveTime),
    /// Timestamp without an offset
    Timestamp(NaiveDateTime),
    /// Timestamp with a UTC offset
    TimestampTz(DateTime<FixedOffset>),
    Interval(TimeDelta),
    Json(serde_json::Value),
    Inet {
        addr: IpAddr,
        prefix: Option<u8>,
    },
    MacAddr([u8; 6]),
    Bits(Vec<bool>),
    Hstore(BTreeMap<String, Option<String>>),
    Point {
        x: f64,
        y: f64,
    },
    /// Geometry as well-known text with an optional SRID
    Geometry {
        wkt: String,
        srid: Option<i32>,
    },
    Range(Box<Interval<Value>>),
    Array(Vec<Value>),
}

impl Value {
    /// Wrap an interval of values
    pub fn range(interval: Interval<Value>) -> Self {
        Value::Range(Box::new(interval))
    }

    /// Returns true for `NULL`
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the value's variant, for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::U8(_) => "u8",
            Value::I16(_) => "i16",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Decimal(_) => "decimal",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Uuid(_) => "uuid",
            Value::Date(_) => "date",
            Value::Time(_) => "time",
            Value::Timestamp(_) => "timestamp",
            Value::TimestampTz(_) => "timestamptz",
            Value::Interval(_) => "interval",
            Value::Json(_) => "json",
            Value::Inet { .. } => "inet",
            Value::MacAddr(_) => "macaddr",
            Value::Bits(_) => "bits",
            Value::Hstore(_) => "hstore",
            Value::Point { .. } => "point",
            Value::Geometry { .. } => "geometry",
            Value::Range(_) => "range",
            Value::Array(_) => "array",
        }
    }

    /// The runtime type a value of this shape naturally maps from
    ///
    /// `None` for `NULL` and for arrays or ranges whose element type cannot be
    /// inferred (all-null arrays, unbounded or empty ranges).
    pub fn natural_type(&self) -> Option<RuntimeType> {
        let ty = match self {
            Value::Null => return None,
            Value::Bool(_) => RuntimeType::Bool,
            Value::U8(_) => RuntimeType::U8,
            Value::I16(_) => RuntimeType::I16,
            Value::I32(_) => RuntimeType::I32,
            Value::I64(_) => RuntimeType::I64,
            Value::F32(_) => RuntimeType::F32,
            Value::F64(_) => RuntimeType::F64,
            Value::Decimal(_) => RuntimeType::Decimal,
            Value::Text(_) => RuntimeType::String,
            Value::Bytes(_) => RuntimeType::Bytes,
            Value::Uuid(_) => RuntimeType::Uuid,
            Value::Date(_) => RuntimeType::Date,
            Value::Time(_) => RuntimeType::Time,
            Value::Timestamp(_) => RuntimeType::DateTime,
            Value::TimestampTz(_) => RuntimeType::DateTimeOffset,
            Value::Interval(_) => RuntimeType::TimeSpan,
            Value::Json(_) => RuntimeType::Json,
            Value::Inet { .. } => RuntimeType::IpAddr,
            Value::MacAddr(_) => RuntimeType::MacAddr,
            Value::Bits(_) => RuntimeType::BitString,
            Value::Hstore(_) => RuntimeType::Hstore,
            Value::Point { .. } => RuntimeType::Point,
            Value::Geometry { .. } => RuntimeType::Geometry,
            Value::Range(interval) => {
                let element = interval
                    .lower_bound()
                    .or(interval.upper_bound())
                    .and_then(Value::natural_type)?;
                RuntimeType::range(element)
            }
            Value::Array(items) => {
                let element = items.iter().find_map(Value::natural_type)?;
                RuntimeType::array(element)
            }
        };
        Some(ty)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::U8(a), Value::U8(b)) => a == b,
            (Value::I16(a), Value::I16(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::F32(a), Value::F32(b)) => a.to_bits() == b.to_bits(),
            (Value::F64(a), Value::F64(b)) => a.to_bits() == b.to_bits(),
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Uuid(a), Value::Uuid(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Time(a), Value::Time(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (Value::TimestampTz(a), Value::TimestampTz(b)) => {
                a == b && a.offset() == b.offset()
            }
            (Value::Interval(a), Value::Interval(b)) => a == b,
            (Value::Json(a), Value::Json(b)) => a == b,
            (
                Value::Inet {
                    addr: a,
                    prefix: ap,
                },
                Value::Inet {
                    addr: b,
                    prefix: bp,
                },
            ) => a == b && ap == bp,
            (Value::MacAddr(a), Value::MacAddr(b)) => a == b,
            (Value::Bits(a), Value::Bits(b)) => a == b,
            (Value::Hstore(a), Value::Hstore(b)) => a == b,
            (Value::Point { x: ax, y: ay }, Value::Point { x: bx, y: by }) => {
                ax.to_bits() == bx.to_bits() && ay.to_bits() == by.to_bits()
            }
            (
                Value::Geometry {
                    wkt: a,
                    srid: asrid,
                },
                Value::Geometry {
                    wkt: b,
                    srid: bsrid,
                },
            ) => a == b && asrid == bsrid,
            (Value::Range(a), Value::Range(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Bool(v) => v.hash(state),
            Value::U8(v) => v.hash(state),
            Value::I16(v) => v.hash(state),
            Value::I32(v) => v.hash(state),
            Value::I64(v) => v.hash(state),
            Value::F32(v) => v.to_bits().hash(state),
            Value::F64(v) => v.to_bits().hash(state),
            Value::Decimal(v) => v.hash(state),
            Value::Text(v) => v.hash(state),
            Value::Bytes(v) => v.hash(state),
            Value::Uuid(v) => v.hash(state),
            Value::Date(v) => v.hash(state),
            Value::Time(v) => v.hash(state),
            Value::Timestamp(v) => v.hash(state),
            Value::TimestampTz(v) => {
                v.hash(state);
                v.offset().local_minus_utc().hash(state);
            }
            Value::Interval(v) => v.hash(state),
            Value::Json(v) => v.to_string().hash(state),
            Value::Inet { addr, prefix } => {
                addr.hash(state);
                prefix.hash(state);
            }
            Value::MacAddr(v) => v.hash(state),
            Value::Bits(v) => v.hash(state),
            Value::Hstore(v) => v.hash(state),
            Value::Point { x, y } => {
                x.to_bits().hash(state);
                y.to_bits().hash(state);
            }
            Value::Geometry { wkt, srid } => {
                wkt.hash(state);
                srid.hash(state);
            }
            Value::Range(v) => v.hash(state),
            Value::Array(v) => v.hash(state),
        }
    }
}

/// Plain text form, as a value would print in a range or array literal body
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::U8(v) => write!(f, "{v}"),
            Value::I16(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::F32(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
            Value::Decimal(v) => write!(f, "{v}"),
            Value::Text(v) => write!(f, "{v}"),
            Value::Bytes(v) => {
                write!(f, "\\x")?;
                v.iter().try_for_each(|b| write!(f, "{b:02x}"))
            }
            Value::Uuid(v) => write!(f, "{v}"),
            Value::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
            Value::Time(v) => write!(f, "{}", v.format("%H:%M:%S%.f")),
            Value::Timestamp(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M:%S%.f")),
            Value::TimestampTz(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M:%S%.f%:z")),
            Value::Interval(v) => write!(f, "{}", format_time_delta(v)),
            Value::Json(v) => write!(f, "{v}"),
            Value::Inet { addr, prefix } => match prefix {
                Some(p) => write!(f, "{addr}/{p}"),
                None => write!(f, "{addr}"),
            },
            Value::MacAddr(b) => write!(
                f,
                "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
                b[0], b[1], b[2], b[3], b[4], b[5]
            ),
            Value::Bits(bits) => bits
                .iter()
                .try_for_each(|b| write!(f, "{}", if *b { '1' } else { '0' })),
            Value::Hstore(map) => {
                let pairs: Vec<String> = map
                    .iter()
                    .map(|(k, v)| match v {
                        Some(v) => format!("\"{k}\"=>\"{v}\""),
                        None => format!("\"{k}\"=>NULL"),
                    })
                    .collect();
                write!(f, "{}", pairs.join(","))
            }
            Value::Point { x, y } => write!(f, "({x},{y})"),
            Value::Geometry { wkt, srid } => match srid {
                Some(srid) => write!(f, "SRID={srid};{wkt}"),
                None => write!(f, "{wkt}"),
            },
            Value::Range(interval) => write!(f, "{interval}"),
            Value::Array(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "{{{}}}", parts.join(","))
            }
        }
    }
}

/// `1 day 02:03:04.5` style duration text accepted by the backend's interval input
pub fn format_time_delta(delta: &TimeDelta) -> String {
    let negative = *delta < TimeDelta::zero();
    let abs = delta.abs();
    let days = abs.num_days();
    let rest = abs - TimeDelta::days(days);
    let secs = rest.num_seconds();
    let micros = rest.subsec_nanos() / 1_000;
    let sign = if negative { "-" } else { "" };

    let mut clock = format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60);
    if micros > 0 {
        clock.push_str(format!(".{micros:06}").trim_end_matches('0'));
    }
    match days {
        0 => format!("{sign}{clock}"),
        1 => format!("{sign}1 day {sign}{clock}"),
        _ => format!("{sign}{days} days {sign}{clock}"),
    }
}

macro_rules! impl_from {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$source> for Value {
                fn from(v: $source) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    u8 => U8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    Decimal => Decimal,
    String => Text,
    Vec<u8> => Bytes,
    uuid::Uuid => Uuid,
    NaiveDate => Date,
    NaiveTime => Time,
    NaiveDateTime => Timestamp,
    DateTime<FixedOffset> => TimestampTz,
    TimeDelta => Interval,
    serde_json::Value => Json,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
#[path = "value_test.rs"]
mod tests;
