use std::collections::BTreeMap;

use parking_lot::Mutex;

use super::Patchable;
use crate::{ConfigError, Value};

/// A host object backed by a map of named properties.
#[derive(Default)]
pub struct Object {
    properties: Mutex<BTreeMap<String, Value>>,
}

impl Object {
    pub fn new() -> Self {
        Object::default()
    }

    /// Adds a property, builder style.
    pub fn with(self, property: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(property, value);
        self
    }

    /// Adds or overwrites a property, returning the previous value.
    pub fn insert(&self, property: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.properties.lock().insert(property.into(), value.into())
    }

    pub fn remove(&self, property: &str) -> Option<Value> {
        self.properties.lock().remove(property)
    }
}

impl Patchable for Object {
    fn get(&self, property: &str) -> Option<Value> {
        self.properties.lock().get(property).cloned()
    }

    fn set(&self, property: &str, value: Value) -> Result<Value, ConfigError> {
        match self.properties.lock().get_mut(property) {
            Some(slot) => Ok(std::mem::replace(slot, value)),
            None => Err(ConfigError::UnknownProperty {
                property: property.to_string(),
            }),
        }
    }

    fn properties(&self) -> Vec<String> {
        self.properties.lock().keys().cloned().collect()
    }
}

/// A single patchable field of a struct deriving
/// [`Patchable`](derive@crate::Patchable).
#[derive(Default)]
pub struct Slot(Mutex<Value>);

impl Slot {
    pub fn new(value: impl Into<Value>) -> Self {
        Slot(Mutex::new(value.into()))
    }

    pub fn get(&self) -> Value {
        self.0.lock().clone()
    }

    pub fn replace(&self, value: Value) -> Value {
        std::mem::replace(&mut *self.0.lock(), value)
    }
}

impl std::fmt::Debug for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Slot").field(&*self.0.lock()).finish()
    }
}
