//! Dynamically typed column values and field conversions.
//!
//! [`Value`] is the currency passed between records and the database
//! client: statement arguments are lists of values, and result rows are
//! scanned into records value by value. [`FieldValue`] is implemented for
//! every Rust type that can back a mapped record field.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::SchemaError;

/// A single SQL value.
///
/// Booleans are stored as integers (`0`/`1`), matching SQLite storage
/// classes.
///
/// # Examples
///
/// ```
/// use neat_core::Value;
///
/// assert_eq!(Value::from(1), Value::Integer(1));
/// assert_eq!(Value::from("John Doe"), Value::Text("John Doe".into()));
/// assert_eq!(Value::from(None::<i64>), Value::Null);
/// assert_eq!(Value::from(true).to_string(), "1");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum Value {
    #[default]
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    /// Name of the storage class, used in conversion diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Integer(_) => "INTEGER",
            Value::Real(_) => "REAL",
            Value::Text(_) => "TEXT",
            Value::Blob(_) => "BLOB",
        }
    }

    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Real(r) => write!(f, "{r}"),
            Value::Text(s) => write!(f, "{s:?}"),
            Value::Blob(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

/// Formats an argument list as `[1, "John Doe"]` for diagnostics.
pub fn format_args_list(args: &[Value]) -> String {
    let parts: Vec<String> = args.iter().map(Value::to_string).collect();
    format!("[{}]", parts.join(", "))
}

/// A value did not match the Rust type of the field it was scanned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected {expected}, found {found}")]
pub struct ValueError {
    pub expected: &'static str,
    pub found: &'static str,
}

impl ValueError {
    fn mismatch(expected: &'static str, value: &Value) -> Self {
        Self {
            expected,
            found: value.kind(),
        }
    }

    /// Attaches the field identifier, producing a [`SchemaError::Conversion`].
    pub fn for_field(self, field: &str) -> SchemaError {
        SchemaError::Conversion {
            field: field.to_string(),
            expected: self.expected,
            found: self.found,
        }
    }
}

/// Conversion between a record field type and [`Value`].
///
/// Non-`Option` types reject `NULL`; wrap a field in `Option<T>` when the
/// column is nullable.
pub trait FieldValue: Sized {
    /// Returns the value to bind for this field.
    fn to_value(&self) -> Value;

    /// Builds the field from a scanned value.
    fn from_value(value: Value) -> Result<Self, ValueError>;
}

macro_rules! integer_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                fn to_value(&self) -> Value {
                    Value::Integer(i64::from(*self))
                }

                fn from_value(value: Value) -> Result<Self, ValueError> {
                    match value {
                        Value::Integer(i) => <$ty>::try_from(i).map_err(|_| ValueError {
                            expected: stringify!($ty),
                            found: "out-of-range INTEGER",
                        }),
                        other => Err(ValueError::mismatch(stringify!($ty), &other)),
                    }
                }
            }

            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Integer(i64::from(v))
                }
            }
        )*
    };
}

integer_field!(i8, i16, i32, i64, u8, u16, u32);

impl FieldValue for bool {
    fn to_value(&self) -> Value {
        Value::Integer(i64::from(*self))
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Integer(i) => Ok(i != 0),
            other => Err(ValueError::mismatch("bool", &other)),
        }
    }
}

impl FieldValue for f64 {
    fn to_value(&self) -> Value {
        Value::Real(*self)
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Real(r) => Ok(r),
            // SQLite hands back whole-number REAL columns as integers.
            Value::Integer(i) => Ok(i as f64),
            other => Err(ValueError::mismatch("f64", &other)),
        }
    }
}

impl FieldValue for f32 {
    fn to_value(&self) -> Value {
        Value::Real(f64::from(*self))
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        f64::from_value(value)
            .map(|r| r as f32)
            .map_err(|e| ValueError {
                expected: "f32",
                ..e
            })
    }
}

impl FieldValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(ValueError::mismatch("String", &other)),
        }
    }
}

impl FieldValue for Vec<u8> {
    fn to_value(&self) -> Value {
        Value::Blob(self.clone())
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Blob(b) => Ok(b),
            Value::Text(s) => Ok(s.into_bytes()),
            other => Err(ValueError::mismatch("Vec<u8>", &other)),
        }
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Real(f64::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_widths() {
        assert_eq!(i32::from_value(Value::Integer(42)), Ok(42));
        assert_eq!(42u16.to_value(), Value::Integer(42));

        let err = u8::from_value(Value::Integer(300)).unwrap_err();
        assert_eq!(err.expected, "u8");
        assert_eq!(err.found, "out-of-range INTEGER");
    }

    #[test]
    fn test_null_rejected_for_plain_types() {
        let err = String::from_value(Value::Null).unwrap_err();
        assert_eq!((err.expected, err.found), ("String", "NULL"));
        assert!(i64::from_value(Value::Null).is_err());
    }

    #[test]
    fn test_option_maps_null() {
        assert_eq!(Option::<String>::from_value(Value::Null), Ok(None));
        assert_eq!(
            Option::<String>::from_value(Value::Text("x".into())),
            Ok(Some("x".to_string()))
        );
        assert_eq!(None::<i64>.to_value(), Value::Null);
    }

    #[test]
    fn test_bool_stored_as_integer() {
        assert_eq!(true.to_value(), Value::Integer(1));
        assert_eq!(bool::from_value(Value::Integer(0)), Ok(false));
        assert!(bool::from_value(Value::Text("true".into())).is_err());
    }

    #[test]
    fn test_real_accepts_integer_storage() {
        assert_eq!(f64::from_value(Value::Integer(3)), Ok(3.0));
        let err = f32::from_value(Value::Text("1.5".into())).unwrap_err();
        assert_eq!(err.expected, "f32");
    }

    #[test]
    fn test_for_field_names_the_field() {
        let text = Value::from("");
        let err = ValueError::mismatch("i64", &text).for_field("id");
        assert_eq!(
            err.to_string(),
            "cannot convert field id: expected i64, found TEXT"
        );
    }

    #[test]
    fn test_format_args_list() {
        let args = vec![Value::from(1), Value::from("John"), Value::Null];
        assert_eq!(format_args_list(&args), r#"[1, "John", NULL]"#);
    }
}
