//! Purchasable production modifiers

use crate::Decimal;
use crate::consts;

/// A bonus that adds `value` to a worker's influence once unlocked.
///
/// Everything except the unlocked flag is fixed at creation, and the flag
/// only ever goes from locked to unlocked.
#[derive(Debug, Clone, PartialEq)]
pub struct Upgrade {
    value: Decimal,
    price_to_unlock: Decimal,
    name: Option<String>,
    unlocked: bool,
}

impl Upgrade {
    /// New locked upgrade
    pub fn new(value: Decimal, price_to_unlock: Decimal) -> Self {
        Self {
            value,
            price_to_unlock,
            name: None,
            unlocked: false,
        }
    }

    /// Rebuild an upgrade from persisted fields
    pub fn restore(
        value: Decimal,
        price_to_unlock: Decimal,
        name: Option<String>,
        unlocked: bool,
    ) -> Self {
        Self {
            value,
            price_to_unlock,
            name,
            unlocked,
        }
    }

    pub fn value(&self) -> &Decimal {
        &self.value
    }

    pub fn price_to_unlock(&self) -> &Decimal {
        &self.price_to_unlock
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Unlock the upgrade. Returns false if it was already unlocked.
    pub fn unlock(&mut self) -> bool {
        !std::mem::replace(&mut self.unlocked, true)
    }
}

/// One locked upgrade per price, each worth the standard bonus
pub fn create_upgrades(prices: impl IntoIterator<Item = Decimal>) -> Vec<Upgrade> {
    prices
        .into_iter()
        .map(|price| Upgrade::new(consts::upgrade_bonus(), price))
        .collect()
}
