//! Field value types for domain records.
//!
//! This module defines the [`FieldValue`] enum, the dynamic representation of
//! an attribute of a domain record before it is bridged into an index
//! document. Any value can be rendered as text; see the
//! [`Displayable`](crate::bridge::display::Displayable) impl below.
//!
//! # Supported Types
//!
//! - **Text** - String data
//! - **Integer** - 64-bit signed integers
//! - **UnsignedInteger** - 64-bit unsigned integers above `i64::MAX`
//! - **Float** - 64-bit floating-point numbers
//! - **Boolean** - true/false values
//! - **Binary** - Raw byte data, rendered as lowercase hex
//! - **DateTime** - UTC timestamps, rendered as RFC 3339
//! - **Enum** - The canonical name of an enumerated domain value
//! - **List** - Ordered values
//! - **Map** - Keyed values, rendered in key order
//! - **Null** - Explicit absence; bridges skip it
//!
//! # Examples
//!
//! ```
//! use fieldbridge::bridge::display::to_display_string;
//! use fieldbridge::document::field_value::FieldValue;
//!
//! assert_eq!(to_display_string(&FieldValue::Integer(42)), "42");
//! assert_eq!(to_display_string(&FieldValue::Enum("OPEN".into())), "OPEN");
//!
//! let tags = FieldValue::List(vec!["a".into(), "b".into()]);
//! assert_eq!(to_display_string(&tags), "[a, b]");
//! ```

mod ser;

use std::collections::BTreeMap;
use std::fmt::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bridge::display::Displayable;
use crate::error::Result;

/// Represents the value of one attribute of a domain record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Text value
    Text(String),
    /// Integer value
    Integer(i64),
    /// Unsigned integer value that does not fit in `i64`
    UnsignedInteger(u64),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Boolean(bool),
    /// Binary data
    Binary(Vec<u8>),
    /// DateTime value
    DateTime(DateTime<Utc>),
    /// Canonical name of an enumerated value
    Enum(String),
    /// Ordered collection
    List(Vec<FieldValue>),
    /// Keyed collection
    Map(BTreeMap<String, FieldValue>),
    /// Null value
    Null,
}

impl FieldValue {
    /// Convert to text if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Check if this is the null value.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Convert a JSON value into a field value.
    ///
    /// Strings stay text; no type is inferred from their content. Integers
    /// keep their exact value.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Boolean(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    FieldValue::UnsignedInteger(u)
                } else if let Some(f) = n.as_f64() {
                    FieldValue::Float(f)
                } else {
                    FieldValue::Text(n.to_string())
                }
            }
            Value::String(s) => FieldValue::Text(s),
            Value::Array(items) => {
                FieldValue::List(items.into_iter().map(FieldValue::from_json).collect())
            }
            Value::Object(map) => FieldValue::Map(
                map.into_iter()
                    .map(|(k, v)| (k, FieldValue::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Convert any `serde::Serialize` value into a field value.
    ///
    /// Only `None` becomes [`FieldValue::Null`]. Unit structs and unit enum
    /// variants become [`FieldValue::Enum`] with their name, the unit value
    /// is the empty list, and floats keep their non-finite values. Integers
    /// outside the 64-bit ranges are kept as their decimal text.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        value.serialize(ser::FieldValueSerializer)
    }

    fn write_text(&self, out: &mut String) {
        match self {
            FieldValue::Text(s) | FieldValue::Enum(s) => out.push_str(s),
            FieldValue::Integer(i) => {
                let _ = write!(out, "{i}");
            }
            FieldValue::UnsignedInteger(u) => {
                let _ = write!(out, "{u}");
            }
            FieldValue::Float(f) => {
                let _ = write!(out, "{f}");
            }
            FieldValue::Boolean(b) => {
                let _ = write!(out, "{b}");
            }
            FieldValue::Binary(bytes) => {
                for byte in bytes {
                    let _ = write!(out, "{byte:02x}");
                }
            }
            FieldValue::DateTime(dt) => {
                out.push_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            FieldValue::List(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.write_text(out);
                }
                out.push(']');
            }
            FieldValue::Map(entries) => {
                out.push('{');
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(key);
                    out.push_str(": ");
                    value.write_text(out);
                }
                out.push('}');
            }
            // Only reachable for nested nulls.
            FieldValue::Null => out.push_str("null"),
        }
    }
}

impl Displayable for FieldValue {
    fn to_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    fn is_absent(&self) -> bool {
        self.is_null()
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(value.into())
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(FieldValue::UnsignedInteger(value), FieldValue::Integer)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::DateTime(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_scalar_rendering() {
        assert_eq!(FieldValue::Text("Active".into()).to_text(), "Active");
        assert_eq!(FieldValue::Integer(0).to_text(), "0");
        assert_eq!(FieldValue::Integer(-17).to_text(), "-17");
        assert_eq!(
            FieldValue::Integer(i64::MAX).to_text(),
            "9223372036854775807"
        );
        assert_eq!(FieldValue::Float(1.5).to_text(), "1.5");
        assert_eq!(FieldValue::Float(2.0).to_text(), "2");
        assert_eq!(FieldValue::Float(f64::NAN).to_text(), "NaN");
        assert_eq!(FieldValue::Float(f64::NEG_INFINITY).to_text(), "-inf");
        assert_eq!(FieldValue::Boolean(false).to_text(), "false");
    }

    #[test]
    fn test_binary_rendering() {
        assert_eq!(FieldValue::Binary(vec![0x00, 0xab, 0x10]).to_text(), "00ab10");
        assert_eq!(FieldValue::Binary(vec![]).to_text(), "");
    }

    #[test]
    fn test_datetime_rendering() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
        assert_eq!(FieldValue::DateTime(dt).to_text(), "2024-03-01T08:30:00Z");
    }

    #[test]
    fn test_container_rendering() {
        assert_eq!(FieldValue::List(vec![]).to_text(), "[]");
        assert_eq!(FieldValue::Map(BTreeMap::new()).to_text(), "{}");

        let nested = FieldValue::from_json(json!({
            "z": [1, null, "x"],
            "a": {"inner": true}
        }));
        assert_eq!(nested.to_text(), "{a: {inner: true}, z: [1, null, x]}");
    }

    #[test]
    fn test_null_is_absent() {
        assert!(FieldValue::Null.is_absent());
        assert!(!FieldValue::Text(String::new()).is_absent());
        assert!(!FieldValue::List(vec![FieldValue::Null]).is_absent());
    }

    #[test]
    fn test_from_json() {
        assert_eq!(FieldValue::from_json(json!(null)), FieldValue::Null);
        assert_eq!(FieldValue::from_json(json!(42)), FieldValue::Integer(42));
        assert_eq!(FieldValue::from_json(json!(0.25)), FieldValue::Float(0.25));
        assert_eq!(
            FieldValue::from_json(json!(u64::MAX)),
            FieldValue::UnsignedInteger(u64::MAX)
        );
        assert_eq!(
            FieldValue::from_json(json!(i64::MIN)),
            FieldValue::Integer(i64::MIN)
        );
        assert_eq!(
            FieldValue::from_json(json!("true")),
            FieldValue::Text("true".into())
        );
    }

    #[test]
    fn test_large_integers_keep_their_digits() {
        let max = u64::MAX.to_string();
        assert_eq!(FieldValue::from(u64::MAX).to_text(), max);
        assert_eq!(FieldValue::from_json(json!(u64::MAX)).to_text(), max);
        assert_eq!(FieldValue::from_serialize(&u64::MAX).unwrap().to_text(), max);

        let parsed: Value = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(FieldValue::from_json(parsed).to_text(), max);

        // Values that fit in i64 stay signed whichever way they arrive.
        assert_eq!(FieldValue::from(7u64), FieldValue::Integer(7));
        assert_eq!(FieldValue::from_json(json!(7u64)), FieldValue::Integer(7));
    }

    #[test]
    fn test_from_serialize() {
        #[derive(Serialize)]
        struct Marker;

        #[derive(Serialize)]
        struct Budget {
            amount: u32,
            currency: &'static str,
        }

        #[derive(Serialize)]
        enum Change {
            Rename(String),
            Move { from: u8, to: u8 },
        }

        assert_eq!(FieldValue::from_serialize(&None::<u8>).unwrap(), FieldValue::Null);
        assert_eq!(
            FieldValue::from_serialize(&Some(3u8)).unwrap(),
            FieldValue::Integer(3)
        );
        assert_eq!(
            FieldValue::from_serialize(&Marker).unwrap(),
            FieldValue::Enum("Marker".into())
        );
        assert_eq!(FieldValue::from_serialize(&()).unwrap(), FieldValue::List(vec![]));
        assert_eq!(
            FieldValue::from_serialize(&Budget {
                amount: 12,
                currency: "EUR"
            })
            .unwrap()
            .to_text(),
            "{amount: 12, currency: EUR}"
        );
        assert_eq!(
            FieldValue::from_serialize(&Change::Rename("x".into()))
                .unwrap()
                .to_text(),
            "{Rename: x}"
        );
        assert_eq!(
            FieldValue::from_serialize(&Change::Move { from: 1, to: 2 })
                .unwrap()
                .to_text(),
            "{Move: {from: 1, to: 2}}"
        );
        assert_eq!(
            FieldValue::from_serialize(&(1, "a")).unwrap().to_text(),
            "[1, a]"
        );
        assert_eq!(
            FieldValue::from_serialize(&[None, Some(1)]).unwrap().to_text(),
            "[null, 1]"
        );
    }

    #[test]
    fn test_from_serialize_numeric_edges() {
        let big = i128::from(i64::MIN) - 1;
        assert_eq!(
            FieldValue::from_serialize(&big).unwrap().to_text(),
            big.to_string()
        );
        assert_eq!(
            FieldValue::from_serialize(&i128::MIN).unwrap().to_text(),
            i128::MIN.to_string()
        );
        assert_eq!(
            FieldValue::from_serialize(&u128::MAX).unwrap().to_text(),
            u128::MAX.to_string()
        );
        assert_eq!(
            FieldValue::from_serialize(&(u64::MAX as i128)).unwrap(),
            FieldValue::UnsignedInteger(u64::MAX)
        );
        assert_eq!(FieldValue::from_serialize(&f64::NAN).unwrap().to_text(), "NaN");
        assert_eq!(
            FieldValue::from_serialize(&f64::INFINITY).unwrap().to_text(),
            "inf"
        );
        assert_eq!(
            FieldValue::from_serialize(&f32::NEG_INFINITY).unwrap().to_text(),
            "-inf"
        );
        assert_eq!(FieldValue::from_serialize(&0.1f32).unwrap().to_text(), "0.1");
    }

    #[test]
    fn test_from_option() {
        assert_eq!(FieldValue::from(None::<i64>), FieldValue::Null);
        assert_eq!(FieldValue::from(Some("x")), FieldValue::Text("x".into()));
    }
}
