//! Browser platform: LocalStorage and the `window` debug namespace

use wasm_bindgen::prelude::*;

use super::KeyValueStore;
use crate::error::{Error, Result};
use crate::persistence::{DebugHook, DebugRegistry};

/// `window.localStorage`
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    pub fn new() -> Result<Self> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| Error::Platform("LocalStorage unavailable".to_string()))?;
        Ok(Self { storage })
    }
}

fn storage_err(key: &str, err: JsValue) -> Error {
    Error::Storage {
        key: key.to_string(),
        message: format!("{:?}", err),
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_item(key).map_err(|e| storage_err(key, e))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        // Quota errors surface here
        self.storage
            .set_item(key, value)
            .map_err(|e| storage_err(key, e))
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.storage.remove_item(key).map_err(|e| storage_err(key, e))
    }
}

/// Publish every registered hook as a function on `window[name]`.
///
/// Getters take no arguments and return the serialized value; setters take
/// a serialized string and throw on decode failure. Call after the game has
/// mounted so all hooks exist.
pub fn expose_debug_namespace(registry: &DebugRegistry, name: &str) -> Result<()> {
    let window = web_sys::window().ok_or_else(|| Error::Platform("no window".to_string()))?;
    let namespace = js_sys::Object::new();

    for hook_name in registry.names() {
        let func: JsValue = match registry.hook(&hook_name) {
            Some(DebugHook::Getter(getter)) => {
                Closure::<dyn Fn() -> String>::new(move || getter()).into_js_value()
            }
            Some(DebugHook::Setter(setter)) => {
                Closure::<dyn Fn(String) -> std::result::Result<(), JsValue>>::new(
                    move |serial: String| {
                        setter(&serial).map_err(|e| JsValue::from_str(&e.to_string()))
                    },
                )
                .into_js_value()
            }
            None => continue,
        };
        js_sys::Reflect::set(&namespace, &JsValue::from_str(&hook_name), &func)
            .map_err(|e| Error::Platform(format!("{:?}", e)))?;
    }

    js_sys::Reflect::set(&window, &JsValue::from_str(name), &namespace)
        .map_err(|e| Error::Platform(format!("{:?}", e)))?;
    log::info!("Exposed {} debug hooks on window.{}", registry.len(), name);
    Ok(())
}
