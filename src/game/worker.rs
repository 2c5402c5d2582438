//! Production units
//!
//! A worker's count and upgrade list live in reactive state, each persisted
//! under its own key (`{id}_count`, `{id}_upgrades`).

use bigdecimal::{One, RoundingMode, ToPrimitive, Zero};

use super::upgrade::{Upgrade, create_upgrades};
use crate::context::AppContext;
use crate::error::{Error, Result};
use crate::persistence::{DecimalSerializer, PersistenceBinding, UpgradeListSerializer, manage};
use crate::reactive::{Scope, State};
use crate::settings::WorkerDef;
use crate::{Decimal, consts, pow_decimal};

pub struct Worker {
    id: String,
    name: String,
    plural_name: String,
    base_price: Decimal,
    pps: Decimal,
    count: State<Decimal>,
    upgrades: State<Vec<Upgrade>>,
    bindings: [PersistenceBinding; 2],
}

impl Worker {
    /// Build a worker with an explicit upgrade list.
    ///
    /// Count starts at zero; both fields hydrate when `scope` mounts. The
    /// supplied upgrades are also the default when nothing usable is stored.
    pub fn new(
        ctx: &AppContext,
        scope: &Scope,
        def: &WorkerDef,
        upgrades: Vec<Upgrade>,
    ) -> Result<Self> {
        let count = State::new(Decimal::zero());
        let upgrades = State::new(upgrades);

        let count_binding = manage(
            ctx,
            scope,
            format!("{}_count", def.id),
            &count,
            Decimal::zero(),
            DecimalSerializer,
        )?;
        let upgrades_binding = manage(
            ctx,
            scope,
            format!("{}_upgrades", def.id),
            &upgrades,
            upgrades.get(),
            UpgradeListSerializer,
        )?;

        Ok(Self {
            id: def.id.clone(),
            name: def.name.clone(),
            plural_name: def.plural_name.clone(),
            base_price: def.base_price.clone(),
            pps: def.pps.clone(),
            count,
            upgrades,
            bindings: [count_binding, upgrades_binding],
        })
    }

    /// Build a worker with one standard upgrade per configured price
    pub fn from_def(ctx: &AppContext, scope: &Scope, def: &WorkerDef) -> Result<Self> {
        Self::new(ctx, scope, def, create_upgrades(def.upgrade_prices.iter().cloned()))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn plural_name(&self) -> &str {
        &self.plural_name
    }

    /// Singular or plural name for the current count
    pub fn display_name(&self) -> &str {
        if self.count.with(|c| c == &Decimal::one()) {
            &self.name
        } else {
            &self.plural_name
        }
    }

    pub fn base_price(&self) -> &Decimal {
        &self.base_price
    }

    pub fn pps(&self) -> &Decimal {
        &self.pps
    }

    pub fn count(&self) -> Decimal {
        self.count.get()
    }

    pub fn count_state(&self) -> &State<Decimal> {
        &self.count
    }

    pub fn upgrades(&self) -> Vec<Upgrade> {
        self.upgrades.get()
    }

    pub fn upgrades_state(&self) -> &State<Vec<Upgrade>> {
        &self.upgrades
    }

    pub fn count_key(&self) -> &str {
        self.bindings[0].key()
    }

    pub fn upgrades_key(&self) -> &str {
        self.bindings[1].key()
    }

    pub fn is_mounted(&self) -> bool {
        self.bindings.iter().all(PersistenceBinding::is_mounted)
    }

    /// Price of the next unit: `base_price * 1.25^count`, truncated.
    ///
    /// Fractional counts use their whole part; negative counts price as if
    /// none were owned. Counts above `consts::MAX_PRICED_COUNT` are an error.
    pub fn upgrade_price(&self) -> Result<Decimal> {
        let owned = self.count.with(|c| {
            if *c < Decimal::zero() {
                return Ok(0);
            }
            c.with_scale_round(0, RoundingMode::Down)
                .to_u64()
                .filter(|n| *n <= consts::MAX_PRICED_COUNT)
                .ok_or_else(|| Error::CountOutOfRange {
                    worker: self.id.clone(),
                    count: c.to_plain_string(),
                })
        })?;
        let growth = pow_decimal(&consts::price_growth(), owned, consts::PRICE_WORK_SCALE);
        Ok((&self.base_price * growth).with_scale_round(0, RoundingMode::Down))
    }

    /// `1 + sum of unlocked upgrade values`, summed in list order
    pub fn upgrade_influence(&self) -> Decimal {
        self.upgrades.with(|upgrades| {
            upgrades
                .iter()
                .filter(|u| u.is_unlocked())
                .fold(Decimal::one(), |acc, u| acc + u.value())
        })
    }

    pub fn set_count(&self, count: Decimal) -> Result<()> {
        self.count.set(count)
    }

    /// Add `n` whole units
    pub fn hire(&self, n: u64) -> Result<()> {
        self.count.update(|c| *c += Decimal::from(n))
    }

    /// Unlock the upgrade at `index` and persist the list.
    ///
    /// Returns false, without writing, when it was already unlocked.
    pub fn unlock_upgrade(&self, index: usize) -> Result<bool> {
        let locked = self.upgrades.with(|list| list.get(index).map(|u| !u.is_unlocked()));
        match locked {
            None => Err(Error::UnknownUpgrade {
                worker: self.id.clone(),
                index,
            }),
            Some(false) => Ok(false),
            Some(true) => {
                self.upgrades.update(|list| {
                    list[index].unlock();
                })?;
                Ok(true)
            }
        }
    }
}

impl std::fmt::Debug for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worker")
            .field("id", &self.id)
            .field("count", &self.count)
            .field("upgrades", &self.upgrades)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::parse_decimal;
    use crate::platform::{KeyValueStore, MemoryStorage};
    use std::rc::Rc;

    fn dec(s: &str) -> Decimal {
        parse_decimal(s).unwrap()
    }

    fn wood() -> WorkerDef {
        WorkerDef::new("wood", "Lumberjack", "Lumberjacks", dec("10"), dec("0.1"))
            .with_upgrade_prices([dec("100"), dec("500"), dec("2500")])
    }

    fn mounted(storage: Rc<MemoryStorage>) -> (Worker, Scope) {
        let ctx = AppContext::new(storage);
        let scope = Scope::new();
        let worker = Worker::from_def(&ctx, &scope, &wood()).unwrap();
        scope.mount().unwrap();
        (worker, scope)
    }

    #[test]
    fn test_price_grows_with_count() {
        let (worker, _scope) = mounted(Rc::new(MemoryStorage::new()));
        assert_eq!(worker.upgrade_price().unwrap(), dec("10"));

        worker.set_count(dec("4")).unwrap();
        assert_eq!(worker.upgrade_price().unwrap(), dec("24"));

        worker.hire(1).unwrap();
        // 10 * 1.25^5 = 30.517...
        assert_eq!(worker.upgrade_price().unwrap(), dec("30"));
    }

    #[test]
    fn test_price_beyond_f64_range() {
        let (worker, _scope) = mounted(Rc::new(MemoryStorage::new()));
        worker.set_count(dec("4000")).unwrap();
        let price = worker.upgrade_price().unwrap();
        // 10 * 1.25^4000 is about 4e388
        assert!(price > dec("1e387"));
        assert!(price < dec("1e389"));
        assert!(price.is_integer());
    }

    #[test]
    fn test_price_stops_at_priced_range() {
        let (worker, _scope) = mounted(Rc::new(MemoryStorage::new()));
        worker.set_count(dec("1000001")).unwrap();
        assert!(matches!(
            worker.upgrade_price(),
            Err(Error::CountOutOfRange { worker: ref id, .. }) if id == "wood"
        ));

        // 2^64 must not wrap back to the base price
        worker.set_count(dec("18446744073709551616")).unwrap();
        let err = worker.upgrade_price().unwrap_err();
        assert!(err.to_string().contains("18446744073709551616"));

        worker.set_count(dec("1e30")).unwrap();
        assert!(worker.upgrade_price().is_err());

        worker.set_count(dec("20")).unwrap();
        // 10 * 1.25^20 = 867.36...
        assert_eq!(worker.upgrade_price().unwrap(), dec("867"));
    }

    #[test]
    fn test_fractional_and_negative_counts() {
        let (worker, _scope) = mounted(Rc::new(MemoryStorage::new()));
        worker.set_count(dec("4.9")).unwrap();
        assert_eq!(worker.upgrade_price().unwrap(), dec("24"));
        worker.set_count(dec("-3")).unwrap();
        assert_eq!(worker.upgrade_price().unwrap(), dec("10"));
    }

    #[test]
    fn test_influence_counts_unlocked_only() {
        let (worker, _scope) = mounted(Rc::new(MemoryStorage::new()));
        assert_eq!(worker.upgrade_influence(), dec("1"));

        assert!(worker.unlock_upgrade(0).unwrap());
        assert!(worker.unlock_upgrade(2).unwrap());
        assert!(!worker.unlock_upgrade(2).unwrap());
        assert_eq!(worker.upgrade_influence(), dec("1.10"));
        assert!(matches!(
            worker.unlock_upgrade(3),
            Err(Error::UnknownUpgrade { index: 3, .. })
        ));
    }

    #[test]
    fn test_fields_persist_under_own_keys() {
        let storage = Rc::new(MemoryStorage::new());
        let (worker, _scope) = mounted(storage.clone());
        assert_eq!(worker.count_key(), "wood_count");
        assert_eq!(worker.upgrades_key(), "wood_upgrades");
        assert!(worker.is_mounted());

        worker.hire(3).unwrap();
        worker.unlock_upgrade(1).unwrap();

        assert_eq!(
            storage.get_item("wood_count").unwrap().as_deref(),
            Some("3.000")
        );
        let stored = storage.get_item("wood_upgrades").unwrap().unwrap();
        assert!(stored.contains(r#""priceToUnlock":"500","unlocked":true"#));
    }

    #[test]
    fn test_hydrates_from_previous_session() {
        let storage = Rc::new(MemoryStorage::new());
        {
            let (worker, _scope) = mounted(storage.clone());
            worker.hire(2).unwrap();
            worker.unlock_upgrade(0).unwrap();
        }

        let (worker, _scope) = mounted(storage);
        assert_eq!(worker.count(), dec("2"));
        assert!(worker.upgrades()[0].is_unlocked());
        assert_eq!(worker.upgrade_influence(), dec("1.05"));
        assert_eq!(worker.display_name(), "Lumberjacks");
    }

    #[test]
    fn test_empty_stored_upgrades_restore_defaults() {
        let storage = Rc::new(MemoryStorage::with_items([("wood_upgrades", "[]")]));
        let (worker, _scope) = mounted(storage);
        assert_eq!(worker.upgrades().len(), 3);
    }

    #[test]
    fn test_display_name() {
        let (worker, _scope) = mounted(Rc::new(MemoryStorage::new()));
        worker.hire(1).unwrap();
        assert_eq!(worker.display_name(), "Lumberjack");
        assert_eq!(worker.name(), "Lumberjack");
        assert_eq!(worker.plural_name(), "Lumberjacks");
        assert_eq!(worker.pps(), &dec("0.1"));
        assert_eq!(worker.base_price(), &dec("10"));
        assert_eq!(worker.id(), "wood");
    }
}
