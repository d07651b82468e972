//! Parameter value coercion

use super::{MappingKind, TypeMapping};
use crate::error::MappingResult;
use chrono::Utc;
use pgr_core::Value;
use rust_decimal::Decimal;

fn integer_of(value: &Value) -> Option<i64> {
    match value {
        Value::U8(v) => Some(i64::from(*v)),
        Value::I16(v) => Some(i64::from(*v)),
        Value::I32(v) => Some(i64::from(*v)),
        Value::I64(v) => Some(*v),
        _ => None,
    }
}

impl TypeMapping {
    /// Integer value checked against this descriptor's integer width
    pub(crate) fn coerce_integer(&self, value: &Value) -> MappingResult<i64> {
        let n = integer_of(value).ok_or_else(|| self.mismatch(value))?;
        let fits = match self.kind {
            MappingKind::Int2 => i16::try_from(n).is_ok(),
            MappingKind::Int4 => i32::try_from(n).is_ok(),
            _ => true,
        };
        if fits {
            Ok(n)
        } else {
            Err(self.mismatch(value))
        }
    }

    pub(crate) fn coerce_decimal(&self, value: &Value) -> MappingResult<Decimal> {
        match value {
            Value::Decimal(d) => Ok(*d),
            other => integer_of(other)
                .map(Decimal::from)
                .ok_or_else(|| self.mismatch(other)),
        }
    }

    /// Convert `value` into what the backend expects for a parameter of this
    /// descriptor's store type
    ///
    /// Integers widen to the column width, offset timestamps normalize to
    /// UTC, JSON text parses into a document, and arrays and ranges coerce
    /// element by element. Values of any other shape are rejected.
    pub fn coerce_parameter(&self, value: Value) -> MappingResult<Value> {
        if value.is_null() {
            return Ok(Value::Null);
        }

        let coerced = match (&self.kind, value) {
            (MappingKind::Int2, v) => {
                let n = self.coerce_integer(&v)?;
                i16::try_from(n).map(Value::I16).map_err(|_| self.mismatch(&v))?
            }
            (MappingKind::Int4, v) => {
                let n = self.coerce_integer(&v)?;
                i32::try_from(n).map(Value::I32).map_err(|_| self.mismatch(&v))?
            }
            (MappingKind::Int8, v) => Value::I64(self.coerce_integer(&v)?),
            (MappingKind::Float4, v @ Value::F32(_)) => v,
            (MappingKind::Float8, Value::F32(f)) => Value::F64(f64::from(f)),
            (MappingKind::Float8, v @ Value::F64(_)) => v,
            (MappingKind::Numeric | MappingKind::Money, v) => {
                Value::Decimal(self.coerce_decimal(&v)?)
            }

            (MappingKind::TimestampTz, Value::TimestampTz(dt)) => {
                Value::TimestampTz(dt.with_timezone(&Utc).fixed_offset())
            }
            (MappingKind::TimestampTz, Value::Timestamp(naive)) => {
                Value::TimestampTz(naive.and_utc().fixed_offset())
            }

            (MappingKind::Json | MappingKind::Jsonb, Value::Text(s)) => {
                match serde_json::from_str(&s) {
                    Ok(doc) => Value::Json(doc),
                    Err(_) => return Err(self.mismatch(&Value::Text(s))),
                }
            }

            (MappingKind::Range { element }, Value::Range(interval)) => {
                let coerced = (*interval).try_map(|bound| element.coerce_parameter(bound))?;
                Value::range(coerced)
            }
            (MappingKind::Array { element }, Value::Array(items)) => Value::Array(
                items
                    .into_iter()
                    .map(|item| element.coerce_parameter(item))
                    .collect::<MappingResult<Vec<_>>>()?,
            ),

            (kind, v) if Self::carries(kind, &v) => v,
            (_, v) => return Err(self.mismatch(&v)),
        };
        Ok(coerced)
    }

    /// Values passed through unchanged
    fn carries(kind: &MappingKind, value: &Value) -> bool {
        matches!(
            (kind, value),
            (MappingKind::Bool, Value::Bool(_))
                | (
                    MappingKind::Text
                        | MappingKind::VarChar
                        | MappingKind::Char
                        | MappingKind::Citext
                        | MappingKind::Xml,
                    Value::Text(_)
                )
                | (MappingKind::Json | MappingKind::Jsonb, Value::Json(_))
                | (MappingKind::Bytea, Value::Bytes(_))
                | (MappingKind::Uuid, Value::Uuid(_))
                | (MappingKind::Date, Value::Date(_))
                | (MappingKind::Time, Value::Time(_))
                | (MappingKind::Timestamp, Value::Timestamp(_))
                | (MappingKind::Interval, Value::Interval(_))
                | (MappingKind::Inet | MappingKind::Cidr, Value::Inet { .. })
                | (MappingKind::MacAddr, Value::MacAddr(_))
                | (MappingKind::Bit | MappingKind::VarBit, Value::Bits(_))
                | (MappingKind::Hstore, Value::Hstore(_))
                | (MappingKind::Point, Value::Point { .. })
                | (MappingKind::LegacyGeometry, Value::Geometry { .. })
        )
    }
}
