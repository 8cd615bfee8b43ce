//! Runtime value model and lexical scoping for an embedded scripting language.
//!
//! The external evaluator owns a [`Context`] per execution, routes identifier
//! reads and writes through it, and uses [`Value::get`]/[`Value::set`],
//! [`JSFunction::exec`] and the [`operators`] for everything else.

pub mod cast;
pub mod context;
pub mod error;
pub mod js_array;
pub mod js_function;
pub mod js_number;
pub mod js_object;
mod js_primitive;
pub mod operators;
pub mod plain_data;
pub mod range;
pub mod value;

pub use cast::{begin_cast, Cast, Caster};
pub use context::{Context, VarKind};
pub use error::ScriptError;
pub use js_array::JSArray;
pub use js_function::{FunctionCall, JSFunction};
pub use js_object::{new_global_record, JSRecord, RecordHooks};
pub use operators::{eqeq, eqeqeq, is_truthy, to_primitive, Hint, Primitive};
pub use plain_data::{create_global_record, create_record, create_value, PlainData};
pub use range::{Position, Range};
pub use value::{PropertyKey, Value};
