//! Application context shared by every binding

use std::rc::Rc;

use crate::persistence::{DebugRegistry, HydrationPolicy};
use crate::platform::KeyValueStore;
use crate::settings::Settings;

/// Storage handle, optional debug registry and hydration policy
#[derive(Clone)]
pub struct AppContext {
    storage: Rc<dyn KeyValueStore>,
    debug: Option<Rc<DebugRegistry>>,
    hydration: HydrationPolicy,
}

impl AppContext {
    /// Strict hydration, no debug hooks
    pub fn new(storage: Rc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            debug: None,
            hydration: HydrationPolicy::default(),
        }
    }

    pub fn from_settings(storage: Rc<dyn KeyValueStore>, settings: &Settings) -> Self {
        let ctx = Self::new(storage).with_hydration(settings.hydration);
        if settings.debug_hooks {
            ctx.with_debug_hooks()
        } else {
            ctx
        }
    }

    /// Attach a fresh debug registry
    pub fn with_debug_hooks(mut self) -> Self {
        self.debug = Some(Rc::new(DebugRegistry::new()));
        self
    }

    pub fn with_hydration(mut self, policy: HydrationPolicy) -> Self {
        self.hydration = policy;
        self
    }

    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    pub fn debug(&self) -> Option<&DebugRegistry> {
        self.debug.as_deref()
    }

    pub fn hydration(&self) -> HydrationPolicy {
        self.hydration
    }
}
