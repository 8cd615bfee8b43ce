//! Conversion between [`Value`] trees and host-side plain data.
//!
//! `PlainData` has no callable variant, so host closures can only enter the
//! script as an explicit [`JSFunction`](crate::js_function::JSFunction).

use indexmap::IndexMap;

use crate::error::ScriptError;
use crate::js_array::JSArray;
use crate::js_object::{new_global_record, JSRecord};
use crate::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum PlainData {
    Null,
    Undefined,
    Boolean(bool),
    Number(f64),
    String(String),
    Array(Vec<PlainData>),
    Object(IndexMap<String, PlainData>),
}

pub fn create_value(source: &PlainData) -> Value {
    match source {
        PlainData::Null => Value::Null,
        PlainData::Undefined => Value::Undefined,
        PlainData::Boolean(b) => Value::Boolean(*b),
        PlainData::Number(n) => Value::Number(*n),
        PlainData::String(s) => Value::String(s.clone()),
        PlainData::Array(items) => Value::Array(JSArray::new(items.iter().map(create_value).collect())),
        PlainData::Object(entries) => Value::Record(create_record(entries)),
    }
}

/// Keys are stored as given; `__proto__` and friends are ordinary entries.
pub fn create_record(source: &IndexMap<String, PlainData>) -> JSRecord {
    let record = JSRecord::new();
    for (key, value) in source {
        record.insert(key.clone(), create_value(value));
    }
    record
}

/// `self` and `globalThis` entries of `source` are ignored.
pub fn create_global_record(source: &IndexMap<String, PlainData>) -> JSRecord {
    new_global_record(Some(&create_record(source)))
}

impl Value {
    /// Lossy projection back to plain data. Functions cannot be projected.
    pub fn to_plain_data(&self) -> Result<PlainData, ScriptError> {
        match self {
            Value::Null => Ok(PlainData::Null),
            Value::Undefined => Ok(PlainData::Undefined),
            Value::Boolean(b) => Ok(PlainData::Boolean(*b)),
            Value::Number(n) => Ok(PlainData::Number(*n)),
            Value::String(s) => Ok(PlainData::String(s.clone())),
            Value::Array(array) => array
                .to_vec()
                .iter()
                .map(Value::to_plain_data)
                .collect::<Result<Vec<_>, _>>()
                .map(PlainData::Array),
            Value::Record(record) => {
                let mut entries = IndexMap::with_capacity(record.len());
                for (key, value) in record.entries() {
                    entries.insert(key, value.to_plain_data()?);
                }
                Ok(PlainData::Object(entries))
            }
            Value::Function(_) => Err(ScriptError::type_error(
                "Function cannot be converted to plain data",
                None,
            )),
        }
    }
}

impl From<serde_json::Value> for PlainData {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => PlainData::Null,
            serde_json::Value::Bool(b) => PlainData::Boolean(b),
            serde_json::Value::Number(n) => PlainData::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => PlainData::String(s),
            serde_json::Value::Array(items) => PlainData::Array(items.into_iter().map(PlainData::from).collect()),
            serde_json::Value::Object(map) => {
                PlainData::Object(map.into_iter().map(|(key, value)| (key, PlainData::from(value))).collect())
            }
        }
    }
}

// 2^53, the end of the exactly representable integer range
const MAX_SAFE_MAGNITUDE: f64 = 9_007_199_254_740_992.0;

fn number_to_json(n: f64) -> serde_json::Value {
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_MAGNITUDE {
        return serde_json::Value::from(n as i64);
    }
    serde_json::Number::from_f64(n)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

impl PlainData {
    /// JSON rendering with `JSON.stringify` conventions: undefined members are
    /// omitted, undefined array items and non-finite numbers become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            PlainData::Null | PlainData::Undefined => serde_json::Value::Null,
            PlainData::Boolean(b) => serde_json::Value::Bool(*b),
            PlainData::Number(n) => number_to_json(*n),
            PlainData::String(s) => serde_json::Value::String(s.clone()),
            PlainData::Array(items) => serde_json::Value::Array(items.iter().map(PlainData::to_json).collect()),
            PlainData::Object(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .filter(|(_, value)| !matches!(value, PlainData::Undefined))
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }
}
