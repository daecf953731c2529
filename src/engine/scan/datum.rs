use crate::engine::catalog::DataType;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Datum {
    Null,
    Boolean(bool),
    Int4(i32),
    Int8(i64),
    Float4(f32),
    Float8(f64),
    Text(String),
}

pub type Tuple = Vec<Datum>;

impl Datum {
    /// Converts a `_source` value to the column's type. Strings holding
    /// numbers or booleans are accepted since mappings often store them that
    /// way. `None` means the value cannot represent the type.
    pub fn from_json(value: &Value, data_type: DataType) -> Option<Datum> {
        if value.is_null() {
            return Some(Datum::Null);
        }
        match data_type {
            DataType::Text => Some(Datum::Text(match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })),
            DataType::Boolean => match value {
                Value::Bool(b) => Some(Datum::Boolean(*b)),
                Value::String(s) => s.parse().ok().map(Datum::Boolean),
                _ => None,
            },
            DataType::Int8 => as_i64(value).map(Datum::Int8),
            DataType::Int4 => as_i64(value)
                .and_then(|n| i32::try_from(n).ok())
                .map(Datum::Int4),
            DataType::Float8 => as_f64(value).map(Datum::Float8),
            DataType::Float4 => as_f64(value).map(|f| Datum::Float4(f as f32)),
        }
    }

    /// Same conversion for hit metadata such as `_id`, which is always a string.
    pub fn from_text(raw: &str, data_type: DataType) -> Option<Datum> {
        match data_type {
            DataType::Text => Some(Datum::Text(raw.to_string())),
            _ => Datum::from_json(&Value::String(raw.to_string()), data_type),
        }
    }
}

fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
