//! Reactive persistence
//!
//! Features:
//! - `StateSerializer` codecs (decimals, upgrade lists)
//! - `manage`: write-on-update, hydrate-on-mount bindings
//! - Debug getter/setter hooks per managed key
//! - Strict or recovering handling of unreadable stored data

use serde::{Deserialize, Serialize};

pub mod binding;
pub mod debug;
pub mod serializer;

pub use binding::{PersistenceBinding, manage, manage_defaulted};
pub use debug::{DebugHook, DebugRegistry};
pub use serializer::{
    DECIMAL_PLACES, DecimalSerializer, Defaulted, StateSerializer, UpgradeListSerializer,
    parse_decimal,
};

/// What hydration does with a stored value its serializer cannot read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HydrationPolicy {
    /// Fail the mount with `Error::Deserialize`
    #[default]
    Strict,
    /// Log a warning and use the default value
    Recover,
}

impl HydrationPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            HydrationPolicy::Strict => "Strict",
            HydrationPolicy::Recover => "Recover",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "strict" => Some(HydrationPolicy::Strict),
            "recover" | "reset" => Some(HydrationPolicy::Recover),
            _ => None,
        }
    }
}
