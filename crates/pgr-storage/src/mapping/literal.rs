//! SQL literal rendering

use super::{MappingKind, TypeMapping};
use crate::error::{MappingError, MappingResult};
use pgr_core::value::format_time_delta;
use pgr_core::Value;

/// `'...'` with embedded quotes doubled
pub(crate) fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// Range bound text, double-quoted when it holds range syntax characters
fn range_bound_text(value: &Value) -> String {
    let text = value.to_string();
    if text.is_empty() || text.contains([' ', ',', '(', ')', '[', ']', '"', '\\']) {
        format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        text
    }
}

fn float_literal(v: f64, store_type: &str) -> String {
    if v.is_nan() {
        format!("'NaN'::{store_type}")
    } else if v.is_infinite() {
        let sign = if v < 0.0 { "-" } else { "" };
        format!("'{sign}Infinity'::{store_type}")
    } else {
        v.to_string()
    }
}

impl TypeMapping {
    pub(crate) fn mismatch(&self, value: &Value) -> MappingError {
        MappingError::ValueMismatch {
            store_type: self.store_type.clone(),
            value: value.kind_name().to_string(),
        }
    }

    /// Render `value` as a SQL literal of this descriptor's store type
    pub fn generate_sql_literal(&self, value: &Value) -> MappingResult<String> {
        if value.is_null() {
            return Ok("NULL".to_string());
        }

        let literal = match (&self.kind, value) {
            (MappingKind::Bool, Value::Bool(b)) => (if *b { "TRUE" } else { "FALSE" }).to_string(),

            (MappingKind::Int2 | MappingKind::Int4 | MappingKind::Int8, _) => {
                self.coerce_integer(value)?.to_string()
            }
            (MappingKind::Float4, Value::F32(v)) => float_literal(f64::from(*v), &self.store_type),
            (MappingKind::Float8, Value::F32(v)) => float_literal(f64::from(*v), &self.store_type),
            (MappingKind::Float8, Value::F64(v)) => float_literal(*v, &self.store_type),
            (MappingKind::Numeric | MappingKind::Money, _) => {
                self.coerce_decimal(value)?.to_string()
            }

            (
                MappingKind::Text | MappingKind::VarChar | MappingKind::Char | MappingKind::Citext,
                Value::Text(s),
            ) => quote(s),
            (MappingKind::Xml, Value::Text(s)) => format!("XML {}", quote(s)),
            (MappingKind::Json | MappingKind::Jsonb, Value::Json(j)) => {
                format!("{}::{}", quote(&j.to_string()), self.store_type)
            }
            (MappingKind::Json | MappingKind::Jsonb, Value::Text(s)) => {
                format!("{}::{}", quote(s), self.store_type)
            }
            (MappingKind::Bytea, Value::Bytes(_)) => {
                format!("{}::bytea", quote(&value.to_string()))
            }
            (MappingKind::Uuid, Value::Uuid(u)) => format!("{}::uuid", quote(&u.to_string())),

            (MappingKind::Date, Value::Date(_)) => format!("DATE {}", quote(&value.to_string())),
            (MappingKind::Time, Value::Time(_)) => format!("TIME {}", quote(&value.to_string())),
            (MappingKind::Timestamp, Value::Timestamp(_)) => {
                format!("TIMESTAMP {}", quote(&value.to_string()))
            }
            (MappingKind::TimestampTz, Value::TimestampTz(_)) => {
                format!("TIMESTAMPTZ {}", quote(&value.to_string()))
            }
            // offset-less timestamps are taken as UTC
            (MappingKind::TimestampTz, Value::Timestamp(_)) => {
                format!("TIMESTAMPTZ {}", quote(&format!("{value}Z")))
            }
            (MappingKind::Interval, Value::Interval(d)) => {
                format!("INTERVAL {}", quote(&format_time_delta(d)))
            }

            (MappingKind::Inet, Value::Inet { .. }) => {
                format!("INET {}", quote(&value.to_string()))
            }
            (MappingKind::Cidr, Value::Inet { .. }) => {
                format!("CIDR {}", quote(&value.to_string()))
            }
            (MappingKind::MacAddr, Value::MacAddr(_)) => {
                format!("MACADDR {}", quote(&value.to_string()))
            }
            (MappingKind::Bit | MappingKind::VarBit, Value::Bits(_)) => format!("B'{value}'"),
            (MappingKind::Hstore, Value::Hstore(_)) => {
                format!("{}::hstore", quote(&value.to_string()))
            }
            (MappingKind::Point, Value::Point { .. }) => {
                format!("POINT {}", quote(&value.to_string()))
            }
            (MappingKind::LegacyGeometry, Value::Geometry { wkt, srid }) => match srid {
                Some(srid) => format!("ST_GeomFromText({}, {srid})", quote(wkt)),
                None => format!("ST_GeomFromText({})", quote(wkt)),
            },

            (MappingKind::Range { element }, Value::Range(interval)) => {
                // validate every bound against the element type first
                let bounds = [interval.lower_bound(), interval.upper_bound()];
                for bound in bounds.into_iter().flatten() {
                    element.generate_sql_literal(bound)?;
                }
                let body = interval.to_text_with(range_bound_text);
                format!("{}::{}", quote(&body), self.store_type)
            }
            (MappingKind::Array { element }, Value::Array(items)) => {
                if items.is_empty() {
                    format!("'{{}}'::{}", self.store_type)
                } else {
                    let rendered = items
                        .iter()
                        .map(|item| element.generate_sql_literal(item))
                        .collect::<MappingResult<Vec<_>>>()?;
                    format!("ARRAY[{}]::{}", rendered.join(","), self.store_type)
                }
            }

            _ => return Err(self.mismatch(value)),
        };
        Ok(literal)
    }
}
