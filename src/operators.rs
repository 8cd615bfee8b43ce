//! Coercion and comparison: ToPrimitive, strict and loose equality, truthiness,
//! and the comparator plumbing the evaluator builds its operators from.

use crate::js_number::{number_to_string, string_to_number};
use crate::value::Value;

/// Conversion preference passed to [`to_primitive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    Default,
    String,
    Number,
}

/// A raw host payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Null,
    Undefined,
    Boolean(bool),
    Number(f64),
    String(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum NumberOrString {
    Number(f64),
    String(String),
}

impl Primitive {
    pub fn to_number(&self) -> f64 {
        match self {
            Primitive::Null => 0.0,
            Primitive::Undefined => f64::NAN,
            Primitive::Boolean(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Primitive::Number(n) => *n,
            Primitive::String(s) => string_to_number(s),
        }
    }

    pub fn to_display_string(&self) -> String {
        match self {
            Primitive::Null => "null".to_string(),
            Primitive::Undefined => "undefined".to_string(),
            Primitive::Boolean(b) => b.to_string(),
            Primitive::Number(n) => number_to_string(*n),
            Primitive::String(s) => s.clone(),
        }
    }
}

fn raw_payload(value: &Value) -> Option<Primitive> {
    match value {
        Value::Boolean(b) => Some(Primitive::Boolean(*b)),
        Value::Number(n) => Some(Primitive::Number(*n)),
        Value::String(s) => Some(Primitive::String(s.clone())),
        _ => None,
    }
}

/// Null and undefined pass through unconverted.
pub fn to_primitive(value: &Value, hint: Hint) -> Primitive {
    match value {
        Value::Null => return Primitive::Null,
        Value::Undefined => return Primitive::Undefined,
        _ => {}
    }
    let as_number = |value: &Value| Primitive::Number(value.to_primitive_as_number().unwrap_or(f64::NAN));
    match hint {
        Hint::String => Primitive::String(value.to_primitive_as_string().unwrap_or_default()),
        Hint::Number => as_number(value),
        Hint::Default => value.to_primitive_as_default().unwrap_or_else(|| as_number(value)),
    }
}

/// Strict equality (`===`).
pub fn eqeqeq(x: &Value, y: &Value) -> bool {
    match (x, y) {
        (Value::Null, Value::Null) | (Value::Undefined, Value::Undefined) => true,
        (Value::Boolean(a), Value::Boolean(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
        (Value::Record(a), Value::Record(b)) => a.ptr_eq(b),
        (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
        _ => false,
    }
}

/// Loose equality (`==`).
pub fn eqeq(x: &Value, y: &Value) -> bool {
    if x.is_null_or_undefined() || y.is_null_or_undefined() {
        return x.is_null_or_undefined() && y.is_null_or_undefined();
    }
    match (raw_payload(x), raw_payload(y)) {
        (Some(a), Some(b)) => loose_equals(&a, &b),
        (Some(a), None) => loose_equals(&a, &to_primitive(y, Hint::Default)),
        (None, Some(b)) => loose_equals(&to_primitive(x, Hint::Default), &b),
        (None, None) => eqeqeq(x, y),
    }
}

/// The host's `==` restricted to raw payloads.
pub fn loose_equals(x: &Primitive, y: &Primitive) -> bool {
    use Primitive::*;
    match (x, y) {
        (Null | Undefined, Null | Undefined) => true,
        (Null | Undefined, _) | (_, Null | Undefined) => false,
        (Boolean(a), Boolean(b)) => a == b,
        (Number(a), Number(b)) => a == b,
        (String(a), String(b)) => a == b,
        (Boolean(_), _) => loose_equals(&Number(x.to_number()), y),
        (_, Boolean(_)) => loose_equals(x, &Number(y.to_number())),
        (Number(a), String(_)) => *a == y.to_number(),
        (String(_), Number(b)) => x.to_number() == *b,
    }
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Undefined => false,
        Value::Boolean(b) => *b,
        Value::Number(n) => *n != 0.0 && !n.is_nan(),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Record(_) | Value::Function(_) => true,
    }
}

fn compare<T, F>(left: &Value, right: &Value, hint: Hint, comparer: F) -> T
where
    F: FnOnce(Primitive, Primitive) -> T,
{
    comparer(to_primitive(left, hint), to_primitive(right, hint))
}

pub fn compare_to_number<F>(left: &Value, right: &Value, hint: Hint, comparer: F) -> Value
where
    F: FnOnce(Primitive, Primitive) -> f64,
{
    Value::Number(compare(left, right, hint, comparer))
}

pub fn compare_to_boolean<F>(left: &Value, right: &Value, hint: Hint, comparer: F) -> Value
where
    F: FnOnce(Primitive, Primitive) -> bool,
{
    Value::Boolean(compare(left, right, hint, comparer))
}

/// Always coerces with the default hint, as `+` does.
pub fn compare_to_number_or_string<F>(left: &Value, right: &Value, comparer: F) -> Value
where
    F: FnOnce(Primitive, Primitive) -> NumberOrString,
{
    match compare(left, right, Hint::Default, comparer) {
        NumberOrString::Number(n) => Value::Number(n),
        NumberOrString::String(s) => Value::String(s),
    }
}

/// The host's `<` on primitives: code-unit order for two strings, numeric
/// otherwise, and false whenever NaN is involved.
pub fn less_than(x: &Primitive, y: &Primitive) -> bool {
    if let (Primitive::String(a), Primitive::String(b)) = (x, y) {
        return a.encode_utf16().lt(b.encode_utf16());
    }
    x.to_number() < y.to_number()
}

/// The host's binary `+` on primitives.
pub fn add(x: Primitive, y: Primitive) -> NumberOrString {
    match (&x, &y) {
        (Primitive::String(_), _) | (_, Primitive::String(_)) => {
            NumberOrString::String(format!("{}{}", x.to_display_string(), y.to_display_string()))
        }
        _ => NumberOrString::Number(x.to_number() + y.to_number()),
    }
}
