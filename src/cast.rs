//! Narrowing of a [`Value`] to one of several expected shapes.
//!
//! ```ignore
//! let key: PropertyKey = begin_cast(&property).add_string().add_number().cast(range)?;
//! ```
//!
//! Each `add_*` step records its label whether or not it matched, so a failed
//! [`Caster::cast`] can report every shape that would have been accepted.

use crate::error::ScriptError;
use crate::js_array::JSArray;
use crate::js_function::JSFunction;
use crate::js_object::JSRecord;
use crate::range::Range;
use crate::value::{PropertyKey, Value};

/// Narrowed form of `Value::Null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsNull;

/// Narrowed form of `Value::Undefined`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsUndefined;

/// The general narrowing target: any shape a caster can accept.
#[derive(Debug, Clone)]
pub enum Cast {
    Array(JSArray),
    Boolean(bool),
    Function(JSFunction),
    Null,
    Number(f64),
    Object(JSRecord),
    String(String),
    Undefined,
}

pub struct Caster<'a, T> {
    source: &'a Value,
    attempted: Vec<&'static str>,
    narrowed: Option<T>,
}

pub fn begin_cast<T>(source: &Value) -> Caster<'_, T> {
    Caster {
        source,
        attempted: Vec::new(),
        narrowed: None,
    }
}

impl<'a, T> Caster<'a, T> {
    fn attempt(mut self, label: &'static str, extract: impl FnOnce(&Value) -> Option<T>) -> Self {
        self.attempted.push(label);
        if self.narrowed.is_none() {
            self.narrowed = extract(self.source);
        }
        self
    }

    pub fn add_array(self) -> Self
    where
        T: From<JSArray>,
    {
        self.attempt("array", |v| match v {
            Value::Array(array) => Some(T::from(array.clone())),
            _ => None,
        })
    }

    pub fn add_boolean(self) -> Self
    where
        T: From<bool>,
    {
        self.attempt("boolean", |v| match v {
            Value::Boolean(b) => Some(T::from(*b)),
            _ => None,
        })
    }

    pub fn add_function(self) -> Self
    where
        T: From<JSFunction>,
    {
        self.attempt("function", |v| match v {
            Value::Function(function) => Some(T::from(function.clone())),
            _ => None,
        })
    }

    pub fn add_null(self) -> Self
    where
        T: From<IsNull>,
    {
        self.attempt("null", |v| match v {
            Value::Null => Some(T::from(IsNull)),
            _ => None,
        })
    }

    pub fn add_number(self) -> Self
    where
        T: From<f64>,
    {
        self.attempt("number", |v| match v {
            Value::Number(n) => Some(T::from(*n)),
            _ => None,
        })
    }

    pub fn add_object(self) -> Self
    where
        T: From<JSRecord>,
    {
        self.attempt("object", |v| match v {
            Value::Record(record) => Some(T::from(record.clone())),
            _ => None,
        })
    }

    pub fn add_string(self) -> Self
    where
        T: From<String>,
    {
        self.attempt("string", |v| match v {
            Value::String(s) => Some(T::from(s.clone())),
            _ => None,
        })
    }

    pub fn add_undefined(self) -> Self
    where
        T: From<IsUndefined>,
    {
        self.attempt("undefined", |v| match v {
            Value::Undefined => Some(T::from(IsUndefined)),
            _ => None,
        })
    }

    pub fn cast(self, range: Option<Range>) -> Result<T, ScriptError> {
        match self.narrowed {
            Some(value) => Ok(value),
            None => Err(ScriptError::type_error(
                format!(
                    "Expected type: [{}], Actual type: {}",
                    self.attempted.join(", "),
                    self.source.type_name()
                ),
                range,
            )),
        }
    }
}

/// The key-narrowing every Record, Array and Function member access goes through.
pub fn cast_property_key(property: &Value, range: Option<Range>) -> Result<PropertyKey, ScriptError> {
    begin_cast(property).add_string().add_number().cast(range)
}

impl From<IsUndefined> for Option<f64> {
    fn from(_: IsUndefined) -> Self {
        None
    }
}

impl From<JSArray> for Cast {
    fn from(array: JSArray) -> Self {
        Cast::Array(array)
    }
}

impl From<bool> for Cast {
    fn from(b: bool) -> Self {
        Cast::Boolean(b)
    }
}

impl From<JSFunction> for Cast {
    fn from(function: JSFunction) -> Self {
        Cast::Function(function)
    }
}

impl From<IsNull> for Cast {
    fn from(_: IsNull) -> Self {
        Cast::Null
    }
}

impl From<f64> for Cast {
    fn from(n: f64) -> Self {
        Cast::Number(n)
    }
}

impl From<JSRecord> for Cast {
    fn from(record: JSRecord) -> Self {
        Cast::Object(record)
    }
}

impl From<String> for Cast {
    fn from(s: String) -> Self {
        Cast::String(s)
    }
}

impl From<IsUndefined> for Cast {
    fn from(_: IsUndefined) -> Self {
        Cast::Undefined
    }
}
