//! Cell values and column types.
//!
//! Tables store their data in polars columns; [`Value`] is the owned,
//! row-level view of one cell used to build tables and read results back.

use polars::prelude::{AnyValue, DataType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single table cell.
///
/// `Missing` is the distinguished absence marker and maps to a polars null.
/// `NaN` floats are normalized to `Missing` on the way in.
///
/// # Examples
///
/// ```
/// use tabclean::Value;
///
/// assert!(Value::from(f64::NAN).is_missing());
/// assert_eq!(Value::from(3).as_f64(), Some(3.0));
/// assert_eq!(Value::from(None::<&str>), Value::Missing);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Missing,
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Returns `true` for `Missing` and for `NaN` floats.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Missing => true,
            Value::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Returns `true` for non-missing `Int` and `Float` values.
    pub fn is_numeric(&self) -> bool {
        match self {
            Value::Int(_) => true,
            Value::Float(v) => !v.is_nan(),
            _ => false,
        }
    }

    /// Numeric view of the value; `None` for text and missing cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => write!(f, "null"),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) if v.is_nan() => write!(f, "null"),
            Value::Float(v) => write!(f, "{:?}", v),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        if v.is_nan() {
            Value::Missing
        } else {
            Value::Float(v)
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Missing, Into::into)
    }
}

impl From<AnyValue<'_>> for Value {
    fn from(v: AnyValue<'_>) -> Self {
        match v {
            AnyValue::Null => Value::Missing,
            AnyValue::Boolean(b) => Value::Int(i64::from(b)),
            AnyValue::Int8(i) => Value::Int(i64::from(i)),
            AnyValue::Int16(i) => Value::Int(i64::from(i)),
            AnyValue::Int32(i) => Value::Int(i64::from(i)),
            AnyValue::Int64(i) => Value::Int(i),
            AnyValue::UInt8(i) => Value::Int(i64::from(i)),
            AnyValue::UInt16(i) => Value::Int(i64::from(i)),
            AnyValue::UInt32(i) => Value::Int(i64::from(i)),
            AnyValue::UInt64(i) => i64::try_from(i).map_or(Value::Float(i as f64), Value::Int),
            AnyValue::Float32(x) => Value::from(f64::from(x)),
            AnyValue::Float64(x) => Value::from(x),
            AnyValue::String(s) => Value::Text(s.to_string()),
            AnyValue::StringOwned(s) => Value::Text(s.to_string()),
            other => Value::Text(format!("{:?}", other)),
        }
    }
}

/// Column type, derived from the polars dtype of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Any signed or unsigned integer dtype.
    Integer,
    Float,
    Text,
    /// A column that only ever held nulls.
    Null,
    /// Booleans, temporal and nested dtypes.
    Other,
}

impl ColumnType {
    pub fn of(dtype: &DataType) -> Self {
        match dtype {
            DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64 => ColumnType::Integer,
            DataType::Float32 | DataType::Float64 => ColumnType::Float,
            DataType::String => ColumnType::Text,
            DataType::Null => ColumnType::Null,
            _ => ColumnType::Other,
        }
    }

    /// Type a column built from `values` gets, or `None` when numbers and
    /// text are mixed.
    pub fn infer<'a, I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let (mut ints, mut floats, mut texts) = (false, false, false);
        for value in values {
            match value {
                Value::Int(_) => ints = true,
                Value::Float(v) if !v.is_nan() => floats = true,
                Value::Text(_) => texts = true,
                _ => {}
            }
        }

        match (ints || floats, texts) {
            (true, true) => None,
            (false, true) => Some(ColumnType::Text),
            (true, false) if floats => Some(ColumnType::Float),
            (true, false) => Some(ColumnType::Integer),
            (false, false) => Some(ColumnType::Null),
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Text => "text",
            ColumnType::Null => "null",
            ColumnType::Other => "other",
        };
        write!(f, "{}", name)
    }
}
