//! Game entities
//!
//! Workers, their upgrades, and the bootstrap that wires them to storage.

pub mod roster;
pub mod upgrade;
pub mod worker;

pub use roster::Roster;
pub use upgrade::{Upgrade, create_upgrades};
pub use worker::Worker;

use std::fmt;
use std::rc::Rc;

use crate::context::AppContext;
use crate::error::Result;
use crate::platform::KeyValueStore;
use crate::reactive::Scope;
use crate::settings::Settings;

/// A mounted game: context, root scope and roster
pub struct Game {
    ctx: AppContext,
    settings: Settings,
    scope: Scope,
    roster: Roster,
}

impl Game {
    /// Load settings from `storage`, build the roster and mount it.
    ///
    /// With strict hydration an unreadable stored value fails the start.
    pub fn start(storage: Rc<dyn KeyValueStore>) -> Result<Self> {
        let settings = Settings::load(storage.as_ref());
        Self::start_with(storage, settings)
    }

    pub fn start_with(storage: Rc<dyn KeyValueStore>, settings: Settings) -> Result<Self> {
        let ctx = AppContext::from_settings(storage, &settings);
        let scope = Scope::new();
        let roster = Roster::new(&ctx, &scope, &settings.workers)?;
        scope.mount()?;
        log::info!("Game started with {} workers", roster.len());

        Ok(Self {
            ctx,
            settings,
            scope,
            roster,
        })
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn is_mounted(&self) -> bool {
        self.scope.is_mounted()
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("hydration", &self.ctx.hydration())
            .field("mounted", &self.is_mounted())
            .field("roster", &self.roster)
            .finish()
    }
}
