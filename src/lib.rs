//! Idle Store - reactive persistence for an idle game
//!
//! Core modules:
//! - `reactive`: Observable state and mount lifecycle
//! - `persistence`: Serializers, storage bindings, debug hooks
//! - `platform`: Key/value storage backends (memory, file, LocalStorage)
//! - `game`: Workers and upgrades bound to storage
//! - `settings`: Persisted preferences and roster definition

pub mod context;
pub mod error;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod reactive;
pub mod settings;

pub use context::AppContext;
pub use error::{Error, Result};
pub use game::{Game, Roster, Upgrade, Worker, create_upgrades};
pub use persistence::{HydrationPolicy, manage};
pub use settings::{Settings, WorkerDef};

use bigdecimal::{One, RoundingMode};

/// Arbitrary-precision number used for every game quantity
pub type Decimal = bigdecimal::BigDecimal;

/// Game number constants
pub mod consts {
    use super::Decimal;

    /// Per-unit price multiplier (1.25)
    pub fn price_growth() -> Decimal {
        Decimal::new(125.into(), 2)
    }

    /// Influence added by each unlocked upgrade (0.05)
    pub fn upgrade_bonus() -> Decimal {
        Decimal::new(5.into(), 2)
    }

    /// Largest unit count a price is computed for. 1.25^count already has
    /// about 97,000 integer digits here.
    pub const MAX_PRICED_COUNT: u64 = 1_000_000;

    /// Fractional digits kept while raising the price multiplier
    pub const PRICE_WORK_SCALE: i64 = 32;
}

/// `base^exp` by repeated squaring.
///
/// Intermediate products are truncated to `scale` fractional digits, so the
/// fraction stays bounded while the integer part grows. Exact whenever
/// `base^exp` needs no more than `scale` digits after the point.
pub fn pow_decimal(base: &Decimal, mut exp: u64, scale: i64) -> Decimal {
    let truncate = |x: Decimal| {
        if x.fractional_digit_count() > scale {
            x.with_scale_round(scale, RoundingMode::Down)
        } else {
            x
        }
    };

    let mut result = Decimal::one();
    let mut square = truncate(base.clone());
    while exp > 0 {
        if exp & 1 == 1 {
            result = truncate(&result * &square);
        }
        exp >>= 1;
        if exp > 0 {
            square = truncate(&square * &square);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_pow_decimal() {
        let growth = consts::price_growth();
        let scale = consts::PRICE_WORK_SCALE;
        assert_eq!(pow_decimal(&growth, 0, scale), Decimal::one());
        assert_eq!(pow_decimal(&growth, 1, scale), growth);
        assert_eq!(pow_decimal(&growth, 4, scale), dec("2.44140625"));
        assert_eq!(
            pow_decimal(&Decimal::from(2), 100, scale).to_plain_string().len(),
            31
        );
    }

    #[test]
    fn test_pow_decimal_fraction_stays_bounded() {
        let growth = consts::price_growth();
        let scale = consts::PRICE_WORK_SCALE;

        // 1.25^1000 is about 8.13e96 and would carry 2000 fractional digits
        let big = pow_decimal(&growth, 1000, scale);
        assert!(big.fractional_digit_count() <= scale);
        assert!(big > dec("8.1e96"));
        assert!(big < dec("8.2e96"));

        // 1.25^64 needs 128 fractional digits to be exact
        let exact = pow_decimal(&growth, 64, 200);
        let truncated = pow_decimal(&growth, 64, scale);
        assert!(truncated <= exact);
        assert!(&exact - &truncated < dec("1e-20"));
    }
}
