//! Binding a reactive value to a storage key
//!
//! `manage` ties one `State<T>` to one key:
//! - every update after mount is serialized and written
//! - on mount the value is hydrated from storage (or the default)
//! - on mount debug hooks are installed, when the context has a registry

use std::cell::Cell;
use std::rc::Rc;

use super::HydrationPolicy;
use super::debug::DebugRegistry;
use super::serializer::{Defaulted, StateSerializer};
use crate::context::AppContext;
use crate::error::{Error, Result};
use crate::reactive::{Change, Scope, State, WeakState};

/// Live wiring between a state and its key
#[derive(Debug)]
pub struct PersistenceBinding {
    key: String,
    mounted: Rc<Cell<bool>>,
}

impl PersistenceBinding {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether hydration has run and updates are being written
    pub fn is_mounted(&self) -> bool {
        self.mounted.get()
    }
}

/// Persist `state` under `key`.
///
/// Updates made before `scope` mounts are not written. On mount the stored
/// value replaces the state, or `default_value` does when nothing is stored
/// or the serializer reports the decoded value as undefined. The hydrated
/// value is then written back like any other update.
///
/// Keys must be unique across bindings; nothing here detects a collision.
pub fn manage<T, S>(
    ctx: &AppContext,
    scope: &Scope,
    key: impl Into<String>,
    state: &State<T>,
    default_value: T,
    serializer: S,
) -> Result<PersistenceBinding>
where
    T: Clone + 'static,
    S: StateSerializer<T> + 'static,
{
    let key = key.into();
    let serializer = Rc::new(serializer);
    let mounted = Rc::new(Cell::new(false));

    {
        let weak = state.downgrade();
        let ctx = ctx.clone();
        let key = key.clone();
        let serializer = Rc::clone(&serializer);
        let mounted = Rc::clone(&mounted);
        state.subscribe(move |change| {
            if change == Change::Init || !mounted.get() {
                return Ok(());
            }
            let Some(state) = weak.upgrade() else {
                return Ok(());
            };
            let serial = state.with(|v| serializer.serialize(v));
            ctx.storage()
                .set_item(&key, &serial)
                .inspect_err(|e| log::error!("Failed to persist '{}': {}", key, e))
        })?;
    }

    {
        let weak = state.downgrade();
        let ctx = ctx.clone();
        let key = key.clone();
        let mounted = Rc::clone(&mounted);
        scope.on_mount(move || {
            let Some(state) = weak.upgrade() else {
                return Ok(());
            };
            mounted.set(true);

            if let Some(registry) = ctx.debug() {
                install_debug_hooks(registry, &key, &weak, &serializer);
            }

            let value = hydrate(&ctx, &key, serializer.as_ref(), default_value)?;
            state.set(value)
        })?;
    }

    Ok(PersistenceBinding { key, mounted })
}

/// `manage` with a default-value style serializer
pub fn manage_defaulted<T, S, F>(
    ctx: &AppContext,
    scope: &Scope,
    key: impl Into<String>,
    state: &State<T>,
    serializer: Defaulted<S, F>,
) -> Result<PersistenceBinding>
where
    T: Clone + 'static,
    S: StateSerializer<T> + 'static,
    F: Fn() -> T + 'static,
{
    let default_value = serializer.default_value();
    manage(ctx, scope, key, state, default_value, serializer)
}

/// Decide the initial value for `key`
fn hydrate<T, S>(ctx: &AppContext, key: &str, serializer: &S, default_value: T) -> Result<T>
where
    S: StateSerializer<T> + ?Sized,
{
    let Some(serial) = ctx.storage().get_item(key)? else {
        log::debug!("No stored value for '{}', using default", key);
        return Ok(default_value);
    };

    match serializer.deserialize(&serial) {
        Ok(value) if serializer.is_undefined(&value) => {
            log::debug!("Stored value for '{}' is undefined, using default", key);
            Ok(default_value)
        }
        Ok(value) => {
            log::debug!("Hydrated '{}'", key);
            Ok(value)
        }
        Err(e) => match ctx.hydration() {
            HydrationPolicy::Strict => Err(Error::deserialize(key, e)),
            HydrationPolicy::Recover => {
                log::warn!("Discarding unreadable value for '{}': {}", key, e);
                Ok(default_value)
            }
        },
    }
}

/// Getter returns the serialized value; setter decodes and sets it as-is,
/// without the undefined check hydration applies.
fn install_debug_hooks<T, S>(
    registry: &DebugRegistry,
    key: &str,
    state: &WeakState<T>,
    serializer: &Rc<S>,
) where
    T: Clone + 'static,
    S: StateSerializer<T> + 'static,
{
    let getter = {
        let state = state.clone();
        let serializer = Rc::clone(serializer);
        move || {
            state
                .upgrade()
                .map(|s| s.with(|v| serializer.serialize(v)))
                .unwrap_or_default()
        }
    };
    let setter = {
        let state = state.clone();
        let serializer = Rc::clone(serializer);
        let key = key.to_string();
        move |serial: &str| -> Result<()> {
            let value = serializer
                .deserialize(serial)
                .map_err(|e| Error::deserialize(&key, e))?;
            match state.upgrade() {
                Some(state) => state.set(value),
                None => Ok(()),
            }
        }
    };
    registry.install(key, Rc::new(getter), Rc::new(setter));
}
