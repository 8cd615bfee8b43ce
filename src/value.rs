use std::fmt;

use crate::error::ScriptError;
use crate::js_array::JSArray;
use crate::js_function::JSFunction;
use crate::js_number::number_to_string;
use crate::js_object::JSRecord;
use crate::js_primitive;
use crate::operators::Primitive;
use crate::range::Range;

/// Variant tags, as reported in error messages.
pub mod type_tag {
    pub const BOOLEAN: &str = "Boolean";
    pub const NUMBER: &str = "Number";
    pub const STRING: &str = "String";
    pub const ARRAY: &str = "Array";
    pub const RECORD: &str = "Record";
    pub const FUNCTION: &str = "Function";
}

/// A runtime value.
///
/// `Array`, `Record` and `Function` are shared handles: cloning a `Value` aliases the
/// same instance, and strict equality compares them by identity.
#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Undefined,
    Boolean(bool),
    Number(f64),
    String(String),
    Array(JSArray),
    Record(JSRecord),
    Function(JSFunction),
}

/// A property key after narrowing to string-or-number.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKey {
    String(String),
    Number(f64),
}

impl PropertyKey {
    /// Only `String` and `Number` values name properties; anything else yields `None`.
    pub fn try_from_value(value: &Value) -> Option<PropertyKey> {
        match value {
            Value::String(s) => Some(PropertyKey::String(s.clone())),
            Value::Number(n) => Some(PropertyKey::Number(*n)),
            _ => None,
        }
    }

    pub fn to_key_string(&self) -> String {
        match self {
            PropertyKey::String(s) => s.clone(),
            PropertyKey::Number(n) => number_to_string(*n),
        }
    }
}

impl From<String> for PropertyKey {
    fn from(s: String) -> Self {
        PropertyKey::String(s)
    }
}

impl From<f64> for PropertyKey {
    fn from(n: f64) -> Self {
        PropertyKey::Number(n)
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_key_string())
    }
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Undefined => "undefined",
            Value::Boolean(_) => type_tag::BOOLEAN,
            Value::Number(_) => type_tag::NUMBER,
            Value::String(_) => type_tag::STRING,
            Value::Array(_) => type_tag::ARRAY,
            Value::Record(_) => type_tag::RECORD,
            Value::Function(_) => type_tag::FUNCTION,
        }
    }

    pub fn is_null_or_undefined(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    /// Boolean, Number and String carry a raw host payload.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Value::Boolean(_) | Value::Number(_) | Value::String(_))
    }

    /// Member read, `value[property]`.
    pub fn get(&self, property: &Value, range: Option<Range>) -> Result<Value, ScriptError> {
        match self {
            Value::Null | Value::Undefined => Err(ScriptError::type_error(
                format!("Cannot read properties of {}", self.type_name()),
                range,
            )),
            Value::Boolean(b) => js_primitive::get_boolean_member(*b, property, range),
            Value::Number(n) => js_primitive::get_number_member(*n, property, range),
            Value::String(s) => js_primitive::get_string_member(s, property, range),
            Value::Array(array) => array.get(property, range),
            Value::Record(record) => record.get(property, range),
            Value::Function(function) => function.get(property, range),
        }
    }

    /// Member write, `value[property] = new_value`.
    pub fn set(&self, property: &Value, new_value: Value, range: Option<Range>) -> Result<(), ScriptError> {
        match self {
            Value::Null | Value::Undefined => Err(ScriptError::type_error(
                format!("Cannot set properties of {}", self.type_name()),
                range,
            )),
            Value::Boolean(_) | Value::Number(_) | Value::String(_) => Err(ScriptError::type_error(
                format!("You cannot set any value to {}", self.type_name()),
                range,
            )),
            Value::Array(array) => array.set(property, new_value, range),
            Value::Record(record) => record.set(property, new_value, range),
            Value::Function(function) => function.set(property, new_value, range),
        }
    }

    /// `None` for null and undefined, which are never coerced.
    pub fn to_primitive_as_string(&self) -> Option<String> {
        match self {
            Value::Null | Value::Undefined => None,
            Value::Boolean(b) => Some(b.to_string()),
            Value::Number(n) => Some(number_to_string(*n)),
            Value::String(s) => Some(s.clone()),
            Value::Array(array) => Some(array.to_primitive_as_string()),
            Value::Record(record) => Some(record.to_primitive_as_string()),
            Value::Function(function) => Some(function.to_primitive_as_string()),
        }
    }

    pub fn to_primitive_as_number(&self) -> Option<f64> {
        match self {
            Value::Null | Value::Undefined => None,
            Value::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Number(n) => Some(*n),
            Value::String(s) => Some(crate::js_number::string_to_number(s)),
            Value::Array(array) => Some(array.to_primitive_as_number()),
            Value::Record(record) => Some(record.to_primitive_as_number()),
            Value::Function(function) => Some(function.to_primitive_as_number()),
        }
    }

    /// The variant's own default-hint conversion, if it defines one.
    pub fn to_primitive_as_default(&self) -> Option<Primitive> {
        match self {
            Value::String(s) => Some(Primitive::String(s.clone())),
            Value::Record(record) => record.to_primitive_as_default(),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<JSArray> for Value {
    fn from(array: JSArray) -> Self {
        Value::Array(array)
    }
}

impl From<JSRecord> for Value {
    fn from(record: JSRecord) -> Self {
        Value::Record(record)
    }
}

impl From<JSFunction> for Value {
    fn from(function: JSFunction) -> Self {
        Value::Function(function)
    }
}
