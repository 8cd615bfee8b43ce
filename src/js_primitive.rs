use crate::cast::begin_cast;
use crate::error::ScriptError;
use crate::js_function::{FunctionCall, JSFunction};
use crate::js_number::{number_to_fixed, number_to_string_radix};
use crate::range::Range;
use crate::value::{type_tag, PropertyKey, Value};

fn check_not_new(is_new: bool, range: Option<Range>) -> Result<(), ScriptError> {
    if is_new {
        return Err(ScriptError::not_constructor(range));
    }
    Ok(())
}

fn this_mismatch(expected: &str, actual: &Value, range: Option<Range>) -> ScriptError {
    ScriptError::type_error(
        format!("Expected 'this' to be a {expected}, but actually {}", actual.type_name()),
        range,
    )
}

fn this_boolean(call: &FunctionCall<'_>, range: Option<Range>) -> Result<bool, ScriptError> {
    check_not_new(call.is_new, range)?;
    match call.this {
        Value::Boolean(b) => Ok(*b),
        other => Err(this_mismatch(type_tag::BOOLEAN, other, range)),
    }
}

fn this_number(call: &FunctionCall<'_>, range: Option<Range>) -> Result<f64, ScriptError> {
    check_not_new(call.is_new, range)?;
    match call.this {
        Value::Number(n) => Ok(*n),
        other => Err(this_mismatch(type_tag::NUMBER, other, range)),
    }
}

fn this_string<'a>(call: &FunctionCall<'a>, range: Option<Range>) -> Result<&'a str, ScriptError> {
    check_not_new(call.is_new, range)?;
    match call.this {
        Value::String(s) => Ok(s.as_str()),
        other => Err(this_mismatch(type_tag::STRING, other, range)),
    }
}

fn method<F>(receiver: Value, body: F) -> Value
where
    F: Fn(FunctionCall<'_>) -> Result<Value, ScriptError> + 'static,
{
    Value::Function(JSFunction::new(body, receiver, false))
}

fn argument<'a>(call: &FunctionCall<'a>, index: usize) -> &'a Value {
    call.args.get(index).unwrap_or(&Value::Undefined)
}

pub(crate) fn get_boolean_member(raw: bool, property: &Value, range: Option<Range>) -> Result<Value, ScriptError> {
    let name = PropertyKey::try_from_value(property).map(|key| key.to_key_string());
    let member = match name.as_deref() {
        Some("toString") => method(Value::Boolean(raw), move |call| {
            let this = this_boolean(&call, range)?;
            Ok(Value::String(this.to_string()))
        }),
        Some("valueOf") => method(Value::Boolean(raw), move |call| {
            let this = this_boolean(&call, range)?;
            Ok(Value::Boolean(this))
        }),
        _ => Value::Undefined,
    };
    Ok(member)
}

pub(crate) fn get_number_member(raw: f64, property: &Value, range: Option<Range>) -> Result<Value, ScriptError> {
    let name = PropertyKey::try_from_value(property).map(|key| key.to_key_string());
    let member = match name.as_deref() {
        Some("toString") => method(Value::Number(raw), move |call| {
            let this = this_number(&call, range)?;
            let radix: Option<f64> = begin_cast(argument(&call, 0)).add_number().add_undefined().cast(range)?;
            let radix = match radix {
                None => 10,
                Some(r) => {
                    let r = if r.is_nan() { 0.0 } else { r.trunc() };
                    if !(2.0..=36.0).contains(&r) {
                        return Err(ScriptError::range_error("toString() radix must be between 2 and 36", range));
                    }
                    r as u32
                }
            };
            Ok(Value::String(number_to_string_radix(this, radix)))
        }),
        Some("toFixed") => method(Value::Number(raw), move |call| {
            let this = this_number(&call, range)?;
            let digits: Option<f64> = begin_cast(argument(&call, 0)).add_number().add_undefined().cast(range)?;
            Ok(Value::String(number_to_fixed(this, digits.unwrap_or(0.0), range)?))
        }),
        Some("valueOf") => method(Value::Number(raw), move |call| {
            let this = this_number(&call, range)?;
            Ok(Value::Number(this))
        }),
        _ => Value::Undefined,
    };
    Ok(member)
}

pub(crate) fn get_string_member(raw: &str, property: &Value, range: Option<Range>) -> Result<Value, ScriptError> {
    let name = PropertyKey::try_from_value(property).map(|key| key.to_key_string());
    let receiver = || Value::String(raw.to_string());
    let member = match name.as_deref() {
        // length counts UTF-16 code units
        Some("length") => Value::Number(raw.encode_utf16().count() as f64),
        Some("toString") | Some("valueOf") => method(receiver(), move |call| {
            let this = this_string(&call, range)?;
            Ok(Value::String(this.to_string()))
        }),
        Some("toUpperCase") => method(receiver(), move |call| {
            let this = this_string(&call, range)?;
            Ok(Value::String(this.to_uppercase()))
        }),
        Some("toLowerCase") => method(receiver(), move |call| {
            let this = this_string(&call, range)?;
            Ok(Value::String(this.to_lowercase()))
        }),
        _ => Value::Undefined,
    };
    Ok(member)
}
