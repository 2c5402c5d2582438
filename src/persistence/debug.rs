//! Debug hooks for persisted values
//!
//! Each managed key contributes a `{key}Getter` returning the serialized
//! value and a `{key}Setter` applying a serialized value directly. The
//! registry is owned by the app context and only exists when debug hooks
//! are enabled in settings.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::error::{Error, Result};

pub type DebugGetter = Rc<dyn Fn() -> String>;
pub type DebugSetter = Rc<dyn Fn(&str) -> Result<()>>;

#[derive(Clone)]
pub enum DebugHook {
    Getter(DebugGetter),
    Setter(DebugSetter),
}

#[derive(Default)]
pub struct DebugRegistry {
    hooks: RefCell<BTreeMap<String, DebugHook>>,
}

impl DebugRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the getter/setter pair for `key`. Re-registering replaces.
    pub fn install(&self, key: &str, getter: DebugGetter, setter: DebugSetter) {
        let mut hooks = self.hooks.borrow_mut();
        hooks.insert(getter_name(key), DebugHook::Getter(getter));
        hooks.insert(setter_name(key), DebugHook::Setter(setter));
    }

    /// All hook names, sorted
    pub fn names(&self) -> Vec<String> {
        self.hooks.borrow().keys().cloned().collect()
    }

    pub fn hook(&self, name: &str) -> Option<DebugHook> {
        self.hooks.borrow().get(name).cloned()
    }

    /// Call a getter hook by its full name (e.g. `wood_countGetter`)
    pub fn get(&self, name: &str) -> Result<String> {
        match self.hook(name) {
            Some(DebugHook::Getter(getter)) => Ok(getter()),
            _ => Err(Error::UnknownDebugHook(name.to_string())),
        }
    }

    /// Call a setter hook by its full name (e.g. `wood_countSetter`)
    pub fn set(&self, name: &str, serial: &str) -> Result<()> {
        // Cloned out so the setter may touch the registry
        match self.hook(name) {
            Some(DebugHook::Setter(setter)) => setter(serial),
            _ => Err(Error::UnknownDebugHook(name.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.hooks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.borrow().is_empty()
    }
}

pub fn getter_name(key: &str) -> String {
    format!("{key}Getter")
}

pub fn setter_name(key: &str) -> String {
    format!("{key}Setter")
}
