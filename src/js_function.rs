use std::fmt;
use std::rc::Rc;

use crate::cast::cast_property_key;
use crate::error::ScriptError;
use crate::range::Range;
use crate::value::Value;

/// Arguments handed to a native closure on every invocation.
pub struct FunctionCall<'a> {
    pub args: &'a [Value],
    pub is_new: bool,
    pub this: &'a Value,
}

pub type NativeFunction = Rc<dyn Fn(FunctionCall<'_>) -> Result<Value, ScriptError>>;

struct FunctionData {
    func: NativeFunction,
    // For a plain function this is the receiver of the member call (`x` in `x.f()`),
    // or undefined for a bare call. For an arrow function it is the enclosing `this`.
    this: Value,
    is_arrow: bool,
}

/// A callable value wrapping a native closure.
///
/// Functions are immutable: `bind` produces a new instance sharing the closure.
#[derive(Clone)]
pub struct JSFunction(Rc<FunctionData>);

impl JSFunction {
    pub fn new<F>(func: F, this: Value, is_arrow: bool) -> Self
    where
        F: Fn(FunctionCall<'_>) -> Result<Value, ScriptError> + 'static,
    {
        JSFunction(Rc::new(FunctionData {
            func: Rc::new(func),
            this,
            is_arrow,
        }))
    }

    /// A plain function with no receiver yet.
    pub fn native<F>(func: F) -> Self
    where
        F: Fn(FunctionCall<'_>) -> Result<Value, ScriptError> + 'static,
    {
        JSFunction::new(func, Value::Undefined, false)
    }

    /// An arrow function closing over `this`.
    pub fn arrow<F>(func: F, this: Value) -> Self
    where
        F: Fn(FunctionCall<'_>) -> Result<Value, ScriptError> + 'static,
    {
        JSFunction::new(func, this, true)
    }

    pub fn is_arrow(&self) -> bool {
        self.0.is_arrow
    }

    pub fn this(&self) -> &Value {
        &self.0.this
    }

    /// Returns a new function sharing this closure with `this` rebound.
    ///
    /// Arrow functions ignore `this` here and keep the one they captured, so binding
    /// an arrow only produces a fresh instance.
    pub fn bind(&self, this: Value) -> JSFunction {
        let this = if self.0.is_arrow { self.0.this.clone() } else { this };
        JSFunction(Rc::new(FunctionData {
            func: Rc::clone(&self.0.func),
            this,
            is_arrow: self.0.is_arrow,
        }))
    }

    pub fn exec(&self, args: &[Value], is_new: bool) -> Result<Value, ScriptError> {
        (self.0.func)(FunctionCall {
            args,
            is_new,
            this: &self.0.this,
        })
    }

    pub fn ptr_eq(&self, other: &JSFunction) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn get(&self, property: &Value, range: Option<Range>) -> Result<Value, ScriptError> {
        cast_property_key(property, range)?;
        // functions expose no members
        Ok(Value::Undefined)
    }

    pub fn set(&self, _property: &Value, _new_value: Value, range: Option<Range>) -> Result<(), ScriptError> {
        Err(ScriptError::type_error("You cannot set any value to Function", range))
    }

    /// The closure carries no source text, so every function renders the same
    /// fixed placeholder.
    pub fn to_primitive_as_string(&self) -> String {
        "function () { [native code] }".to_string()
    }

    pub fn to_primitive_as_number(&self) -> f64 {
        f64::NAN
    }
}

impl fmt::Debug for JSFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JSFunction")
            .field("this", &self.0.this.type_name())
            .field("is_arrow", &self.0.is_arrow)
            .finish()
    }
}
