use indexmap::IndexMap;

use crate::error::ScriptError;
use crate::js_object::JSRecord;
use crate::range::Range;
use crate::value::Value;

/// How a binding was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Let,
    Const,
}

impl VarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VarKind::Let => "let",
            VarKind::Const => "const",
        }
    }
}

#[derive(Debug, Clone)]
struct Binding {
    value: Value,
    is_const: bool,
}

/// The lexical scope stack of one script execution.
///
/// Frames are innermost-last. For
///
/// ```text
/// let x = 1;
/// let f = () => {
///     let x = 2;
///     return x;
/// };
/// ```
///
/// the stack is `[{x: 1}]` outside the arrow body, `[{x: 1}, {}]` on entering it and
/// `[{x: 1}, {x: 2}]` after the inner declaration. Names found in no frame resolve
/// against the global record.
pub struct Context {
    var_tables: Vec<IndexMap<String, Binding>>,
    global_this: JSRecord,
    current_this: Value,
}

impl Context {
    pub fn new(global_this: JSRecord) -> Self {
        let current_this = Value::Record(global_this.clone());
        Context {
            var_tables: vec![IndexMap::new()],
            global_this,
            current_this,
        }
    }

    pub fn global_this(&self) -> &JSRecord {
        &self.global_this
    }

    pub fn current_this(&self) -> &Value {
        &self.current_this
    }

    /// Returns the previous value.
    pub fn set_current_this(&mut self, this: Value) -> Value {
        std::mem::replace(&mut self.current_this, this)
    }

    /// Number of frames, including the base frame.
    pub fn depth(&self) -> usize {
        self.var_tables.len()
    }

    fn find_binding_mut(&mut self, name: &str) -> Option<&mut Binding> {
        self.var_tables.iter_mut().rev().find_map(|table| table.get_mut(name))
    }

    pub fn get(&self, name: &str, range: Option<Range>) -> Result<Value, ScriptError> {
        if let Some(binding) = self.var_tables.iter().rev().find_map(|table| table.get(name)) {
            return Ok(binding.value.clone());
        }
        self.global_this.get(&Value::String(name.to_string()), range)
    }

    pub fn assign(&mut self, name: &str, new_value: Value, range: Option<Range>) -> Result<(), ScriptError> {
        if let Some(binding) = self.find_binding_mut(name) {
            if binding.is_const {
                return Err(ScriptError::type_error(format!("invalid assignment to const '{name}'"), range));
            }
            binding.value = new_value;
            return Ok(());
        }
        log::debug!("assigning undeclared '{name}' on the global record");
        self.global_this.set(&Value::String(name.to_string()), new_value, range)
    }

    /// Declares `name` in the innermost frame. Shadowing an outer frame is allowed;
    /// redeclaring within the same frame is not.
    pub fn declare(&mut self, name: &str, value: Value, kind: VarKind, range: Option<Range>) -> Result<(), ScriptError> {
        let depth = self.var_tables.len();
        let Some(table) = self.var_tables.last_mut() else {
            return Err(ScriptError::internal_error("scope stack must not be empty", range));
        };
        if table.contains_key(name) {
            return Err(ScriptError::syntax_error(format!("redeclaration of {} {name}", kind.as_str()), range));
        }
        log::trace!("declare {} {name} at depth {depth}", kind.as_str());
        table.insert(
            name.to_string(),
            Binding {
                value,
                is_const: kind == VarKind::Const,
            },
        );
        Ok(())
    }

    pub fn scope_in(&mut self) {
        self.var_tables.push(IndexMap::new());
        log::trace!("scope in, depth {}", self.var_tables.len());
    }

    pub fn scope_out(&mut self) -> Result<(), ScriptError> {
        if self.var_tables.len() <= 1 {
            return Err(ScriptError::internal_error("the base scope cannot be popped", None));
        }
        self.var_tables.pop();
        log::trace!("scope out, depth {}", self.var_tables.len());
        Ok(())
    }

    /// Runs `f` inside a fresh frame, popping it whether or not `f` succeeds.
    pub fn with_scope<T, F>(&mut self, f: F) -> Result<T, ScriptError>
    where
        F: FnOnce(&mut Context) -> Result<T, ScriptError>,
    {
        let depth = self.var_tables.len();
        self.scope_in();
        let result = f(self);
        // also discards frames `f` pushed and left behind
        self.var_tables.truncate(depth);
        log::trace!("scope out, depth {}", self.var_tables.len());
        result
    }
}
