//! Game settings and roster definition
//!
//! Persisted separately from worker state, under its own storage key.

use serde::{Deserialize, Serialize};

use crate::Decimal;
use crate::error::Result;
use crate::persistence::HydrationPolicy;
use crate::platform::KeyValueStore;

/// Static description of one worker type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerDef {
    /// Unique id, also the storage key prefix
    pub id: String,
    pub name: String,
    pub plural_name: String,
    pub base_price: Decimal,
    /// Production per second of a single unit
    pub pps: Decimal,
    /// One upgrade is created per price
    #[serde(default)]
    pub upgrade_prices: Vec<Decimal>,
}

impl WorkerDef {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        plural_name: impl Into<String>,
        base_price: Decimal,
        pps: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            plural_name: plural_name.into(),
            base_price,
            pps,
            upgrade_prices: Vec::new(),
        }
    }

    pub fn with_upgrade_prices(mut self, prices: impl IntoIterator<Item = Decimal>) -> Self {
        self.upgrade_prices = prices.into_iter().collect();
        self
    }
}

/// Settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Handling of unreadable stored values
    pub hydration: HydrationPolicy,
    /// Install `{key}Getter`/`{key}Setter` debug hooks
    pub debug_hooks: bool,
    /// Worker roster, in display order
    pub workers: Vec<WorkerDef>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hydration: HydrationPolicy::Strict,
            // Hooks stay out of release builds unless asked for
            debug_hooks: cfg!(debug_assertions),
            workers: default_roster(),
        }
    }
}

fn default_roster() -> Vec<WorkerDef> {
    let d = |n: u64| Decimal::from(n);
    vec![
        WorkerDef::new("wood", "Lumberjack", "Lumberjacks", d(10), Decimal::new(1.into(), 1))
            .with_upgrade_prices([d(100), d(500), d(2_500)]),
        WorkerDef::new("stone", "Mason", "Masons", d(100), d(1))
            .with_upgrade_prices([d(1_000), d(5_000), d(25_000)]),
        WorkerDef::new("gold", "Prospector", "Prospectors", d(1_100), d(8))
            .with_upgrade_prices([d(11_000), d(55_000), d(275_000)]),
    ]
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "idle_store_settings";

    /// Load settings, falling back to defaults when missing or unreadable
    pub fn load(storage: &dyn KeyValueStore) -> Self {
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from storage");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Could not read settings: {}", e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, storage: &dyn KeyValueStore) -> Result<()> {
        let json = serde_json::to_string(self)?;
        storage.set_item(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }

    pub fn worker(&self, id: &str) -> Option<&WorkerDef> {
        self.workers.iter().find(|w| w.id == id)
    }
}
