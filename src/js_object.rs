use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::cast::cast_property_key;
use crate::error::ScriptError;
use crate::operators::Primitive;
use crate::range::Range;
use crate::value::{PropertyKey, Value};

/// Interception points consulted on every record access.
pub trait RecordHooks {
    /// A `Some` result replaces the lookup in the backing map.
    fn on_getting(&self, _record: &JSRecord, _key: &PropertyKey, _range: Option<Range>) -> Option<Value> {
        None
    }

    /// Returning an error rejects the write before anything is stored.
    fn on_setting(
        &self,
        _record: &JSRecord,
        _key: &PropertyKey,
        _new_value: &Value,
        _range: Option<Range>,
    ) -> Result<(), ScriptError> {
        Ok(())
    }

    fn to_primitive_as_default(&self, _record: &JSRecord) -> Option<Primitive> {
        None
    }
}

struct RecordData {
    properties: RefCell<IndexMap<String, Value>>,
    hooks: Option<Rc<dyn RecordHooks>>,
}

/// The script's generic object: an insertion-ordered string-keyed property bag.
///
/// Properties live in an explicit map, so keys such as `__proto__` are plain data.
#[derive(Clone)]
pub struct JSRecord(Rc<RecordData>);

impl JSRecord {
    pub fn new() -> Self {
        JSRecord::from_parts(IndexMap::new(), None)
    }

    pub fn with_hooks(hooks: Rc<dyn RecordHooks>) -> Self {
        JSRecord::from_parts(IndexMap::new(), Some(hooks))
    }

    /// An independent record holding the same entries as `base`, without its hooks.
    pub fn from_base(base: &JSRecord) -> Self {
        JSRecord::from_parts(base.0.properties.borrow().clone(), None)
    }

    fn from_parts(properties: IndexMap<String, Value>, hooks: Option<Rc<dyn RecordHooks>>) -> Self {
        JSRecord(Rc::new(RecordData {
            properties: RefCell::new(properties),
            hooks,
        }))
    }

    pub fn get(&self, property: &Value, range: Option<Range>) -> Result<Value, ScriptError> {
        let key = cast_property_key(property, range)?;
        if let Some(hooks) = &self.0.hooks {
            if let Some(value) = hooks.on_getting(self, &key, range) {
                log::debug!("record read of '{key}' answered by hook");
                return Ok(value);
            }
        }
        Ok(self.get_own(&key.to_key_string()).unwrap_or(Value::Undefined))
    }

    pub fn set(&self, property: &Value, new_value: Value, range: Option<Range>) -> Result<(), ScriptError> {
        let key = cast_property_key(property, range)?;
        if let Some(hooks) = &self.0.hooks {
            hooks.on_setting(self, &key, &new_value, range)?;
        }
        self.insert(key.to_key_string(), new_value);
        Ok(())
    }

    /// Direct map read, bypassing the hooks.
    pub fn get_own(&self, key: &str) -> Option<Value> {
        self.0.properties.borrow().get(key).cloned()
    }

    /// Direct map write, bypassing the hooks.
    pub fn insert(&self, key: String, value: Value) {
        self.0.properties.borrow_mut().insert(key, value);
    }

    pub fn keys(&self) -> Vec<String> {
        self.0.properties.borrow().keys().cloned().collect()
    }

    pub fn entries(&self) -> Vec<(String, Value)> {
        self.0
            .properties
            .borrow()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.properties.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.properties.borrow().is_empty()
    }

    pub fn ptr_eq(&self, other: &JSRecord) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn to_primitive_as_string(&self) -> String {
        "[object Object]".to_string()
    }

    pub fn to_primitive_as_number(&self) -> f64 {
        f64::NAN
    }

    pub fn to_primitive_as_default(&self) -> Option<Primitive> {
        self.0.hooks.as_ref().and_then(|hooks| hooks.to_primitive_as_default(self))
    }
}

impl Default for JSRecord {
    fn default() -> Self {
        JSRecord::new()
    }
}

impl fmt::Debug for JSRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JSRecord").field("keys", &self.keys()).finish()
    }
}

const SELF: &str = "self";
const GLOBAL_THIS: &str = "globalThis";

fn is_global_self_key(key: &str) -> bool {
    key == SELF || key == GLOBAL_THIS
}

/// Hooks of the global record: `self` and `globalThis` read back the record
/// itself and cannot be assigned.
struct GlobalRecordHooks;

impl RecordHooks for GlobalRecordHooks {
    fn on_getting(&self, record: &JSRecord, key: &PropertyKey, _range: Option<Range>) -> Option<Value> {
        if is_global_self_key(&key.to_key_string()) {
            return Some(Value::Record(record.clone()));
        }
        None
    }

    fn on_setting(
        &self,
        _record: &JSRecord,
        key: &PropertyKey,
        _new_value: &Value,
        range: Option<Range>,
    ) -> Result<(), ScriptError> {
        let key = key.to_key_string();
        if is_global_self_key(&key) {
            return Err(ScriptError::type_error(format!("Assignment to '{key}' is not supported"), range));
        }
        Ok(())
    }
}

/// Builds a global record seeded with the entries of `base`.
/// Any `self` or `globalThis` entry in `base` is dropped.
pub fn new_global_record(base: Option<&JSRecord>) -> JSRecord {
    let properties: IndexMap<String, Value> = match base {
        Some(base) => base
            .entries()
            .into_iter()
            .filter(|(key, _)| !is_global_self_key(key))
            .collect(),
        None => IndexMap::new(),
    };
    JSRecord::from_parts(properties, Some(Rc::new(GlobalRecordHooks)))
}
