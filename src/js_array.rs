use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::cast::{begin_cast, cast_property_key};
use crate::error::ScriptError;
use crate::js_function::{FunctionCall, JSFunction};
use crate::js_number::{number_to_string, string_to_number};
use crate::operators::is_truthy;
use crate::range::Range;
use crate::value::{type_tag, Value};

// Largest index the host accepts: 2^32 - 2.
const MAX_ARRAY_INDEX: u64 = 4_294_967_294;

/// Storage is dense, so a write may not grow an array beyond this many elements.
pub const MAX_ARRAY_LENGTH: usize = 1 << 20;

/// An ordered, index-mutable sequence shared between all values that alias it.
#[derive(Clone, Default)]
pub struct JSArray(Rc<RefCell<Vec<Value>>>);

/// `"0"` or a digit sequence without a leading zero.
pub(crate) fn is_valid_index(index: &str) -> bool {
    match index.as_bytes() {
        [b'0'] => true,
        [first, rest @ ..] => (b'1'..=b'9').contains(first) && rest.iter().all(u8::is_ascii_digit),
        [] => false,
    }
}

fn parse_index(index: &str) -> Option<usize> {
    if !is_valid_index(index) {
        return None;
    }
    let parsed = index.parse::<u64>().ok()?;
    if parsed > MAX_ARRAY_INDEX {
        return None;
    }
    usize::try_from(parsed).ok()
}

fn prepare_instance_method(call: &FunctionCall<'_>, range: Option<Range>) -> Result<JSArray, ScriptError> {
    if call.is_new {
        return Err(ScriptError::not_constructor(range));
    }
    match call.this {
        Value::Array(array) => Ok(array.clone()),
        other => Err(ScriptError::type_error(
            format!("Expected 'this' to be an {}, but actually {}", type_tag::ARRAY, other.type_name()),
            range,
        )),
    }
}

fn callback_argument(call: &FunctionCall<'_>, range: Option<Range>) -> Result<JSFunction, ScriptError> {
    begin_cast(call.args.first().unwrap_or(&Value::Undefined))
        .add_function()
        .cast(range)
}

impl JSArray {
    pub fn new(values: Vec<Value>) -> Self {
        JSArray(Rc::new(RefCell::new(values)))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// A snapshot of the elements.
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    pub fn get_index(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    pub fn push(&self, value: Value) {
        self.0.borrow_mut().push(value);
    }

    pub fn ptr_eq(&self, other: &JSArray) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn get(&self, property: &Value, range: Option<Range>) -> Result<Value, ScriptError> {
        let index = cast_property_key(property, range)?.to_key_string();
        if is_valid_index(&index) {
            return Ok(parse_index(&index)
                .and_then(|i| self.get_index(i))
                .unwrap_or(Value::Undefined));
        }
        match index.as_str() {
            "length" => Ok(Value::Number(self.len() as f64)),
            "filter" => Ok(self.method(move |call| {
                let this = prepare_instance_method(&call, range)?;
                let predicate = callback_argument(&call, range)?;
                let mut kept = Vec::new();
                for (i, element) in this.to_vec().into_iter().enumerate() {
                    let args = [element.clone(), Value::Number(i as f64), Value::Array(this.clone())];
                    if is_truthy(&predicate.exec(&args, false)?) {
                        kept.push(element);
                    }
                }
                Ok(Value::Array(JSArray::new(kept)))
            })),
            "map" => Ok(self.method(move |call| {
                let this = prepare_instance_method(&call, range)?;
                let callback = callback_argument(&call, range)?;
                let mut mapped = Vec::with_capacity(this.len());
                for (i, element) in this.to_vec().into_iter().enumerate() {
                    let args = [element, Value::Number(i as f64), Value::Array(this.clone())];
                    mapped.push(callback.exec(&args, false)?);
                }
                Ok(Value::Array(JSArray::new(mapped)))
            })),
            _ => Err(ScriptError::invalid_index(&index, range)),
        }
    }

    pub fn set(&self, property: &Value, new_value: Value, range: Option<Range>) -> Result<(), ScriptError> {
        let index = cast_property_key(property, range)?.to_key_string();
        let Some(i) = parse_index(&index) else {
            return Err(ScriptError::invalid_index(&index, range));
        };
        let mut elements = self.0.borrow_mut();
        if i >= MAX_ARRAY_LENGTH {
            return Err(ScriptError::range_error(
                format!("Array length {} exceeds the maximum of {MAX_ARRAY_LENGTH}", i + 1),
                range,
            ));
        }
        if i >= elements.len() {
            // holes read back as undefined
            elements.resize(i + 1, Value::Undefined);
        }
        elements[i] = new_value;
        Ok(())
    }

    fn method<F>(&self, body: F) -> Value
    where
        F: Fn(FunctionCall<'_>) -> Result<Value, ScriptError> + 'static,
    {
        Value::Function(JSFunction::new(body, Value::Array(self.clone()), false))
    }

    /// Elements joined with `,`; null and undefined elements render empty.
    pub fn to_primitive_as_string(&self) -> String {
        self.0
            .borrow()
            .iter()
            .map(|element| element.to_primitive_as_string().unwrap_or_default())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Each element is converted to a number, the results are joined like a
    /// string conversion and that string is read back as a number. Only empty and
    /// single-element arrays can produce anything other than NaN.
    pub fn to_primitive_as_number(&self) -> f64 {
        let joined = self
            .0
            .borrow()
            .iter()
            .map(|element| element.to_primitive_as_number().map(number_to_string).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(",");
        string_to_number(&joined)
    }
}

impl fmt::Debug for JSArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.borrow().iter()).finish()
    }
}
