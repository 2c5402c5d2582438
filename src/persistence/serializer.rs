//! String codecs for persisted state
//!
//! Every serializer follows one contract: encode, decode, and say whether a
//! decoded value should be treated as "nothing stored". The older
//! default-value style is available through [`Defaulted`].

use std::str::FromStr;

use bigdecimal::RoundingMode;
use serde::{Deserialize, Serialize};

use crate::Decimal;
use crate::error::{Error, Result};
use crate::game::Upgrade;

/// Fractional digits kept when writing decimals
pub const DECIMAL_PLACES: i64 = 3;

pub trait StateSerializer<T> {
    fn serialize(&self, value: &T) -> String;
    fn deserialize(&self, serial: &str) -> Result<T>;
    /// Whether a decoded value should be replaced by the caller's default
    fn is_undefined(&self, value: &T) -> bool;
}

/// Decimals as plain text with exactly three fractional digits.
///
/// Lossy: values are rounded half-up to [`DECIMAL_PLACES`]. Zero is a real
/// value, never "undefined".
#[derive(Debug, Clone, Copy, Default)]
pub struct DecimalSerializer;

impl DecimalSerializer {
    /// Wrapped with a zero default, for `manage_defaulted`
    pub fn defaulted() -> Defaulted<Self, fn() -> Decimal> {
        Defaulted::new(Self, Decimal::default as fn() -> Decimal)
    }
}

impl StateSerializer<Decimal> for DecimalSerializer {
    fn serialize(&self, value: &Decimal) -> String {
        value
            .with_scale_round(DECIMAL_PLACES, RoundingMode::HalfUp)
            .to_plain_string()
    }

    fn deserialize(&self, serial: &str) -> Result<Decimal> {
        parse_decimal(serial)
    }

    fn is_undefined(&self, _value: &Decimal) -> bool {
        false
    }
}

/// Parse decimal text, trimming surrounding whitespace
pub fn parse_decimal(text: &str) -> Result<Decimal> {
    Decimal::from_str(text.trim()).map_err(|_| Error::InvalidDecimal(text.to_string()))
}

/// Upgrade lists as a JSON array of plain records.
///
/// Each record is rebuilt through `Upgrade::restore`, so decoded entries are
/// full `Upgrade` values. An empty list counts as "undefined".
#[derive(Debug, Clone, Copy, Default)]
pub struct UpgradeListSerializer;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpgradeRecord {
    value: DecimalText,
    price_to_unlock: DecimalText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default)]
    unlocked: bool,
}

/// Decimals are written as strings; numbers are accepted when reading
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum DecimalText {
    Text(String),
    Number(serde_json::Number),
}

impl DecimalText {
    fn from_decimal(value: &Decimal) -> Self {
        DecimalText::Text(value.to_plain_string())
    }

    fn to_decimal(&self) -> Result<Decimal> {
        match self {
            DecimalText::Text(s) => parse_decimal(s),
            DecimalText::Number(n) => parse_decimal(&n.to_string()),
        }
    }
}

impl UpgradeRecord {
    fn from_upgrade(upgrade: &Upgrade) -> Self {
        Self {
            value: DecimalText::from_decimal(upgrade.value()),
            price_to_unlock: DecimalText::from_decimal(upgrade.price_to_unlock()),
            name: upgrade.name().map(str::to_string),
            unlocked: upgrade.is_unlocked(),
        }
    }

    fn into_upgrade(self) -> Result<Upgrade> {
        Ok(Upgrade::restore(
            self.value.to_decimal()?,
            self.price_to_unlock.to_decimal()?,
            self.name,
            self.unlocked,
        ))
    }
}

impl StateSerializer<Vec<Upgrade>> for UpgradeListSerializer {
    fn serialize(&self, value: &Vec<Upgrade>) -> String {
        let records: Vec<UpgradeRecord> = value.iter().map(UpgradeRecord::from_upgrade).collect();
        // A Vec of string/bool records always encodes
        serde_json::to_string(&records).unwrap_or_else(|_| "[]".to_string())
    }

    fn deserialize(&self, serial: &str) -> Result<Vec<Upgrade>> {
        let records: Vec<UpgradeRecord> = serde_json::from_str(serial)?;
        records.into_iter().map(UpgradeRecord::into_upgrade).collect()
    }

    fn is_undefined(&self, value: &Vec<Upgrade>) -> bool {
        value.is_empty()
    }
}

/// Default-value style serializer: wraps a codec with a default factory and
/// never reports "undefined".
#[derive(Debug, Clone)]
pub struct Defaulted<S, F> {
    inner: S,
    default: F,
}

impl<S, F> Defaulted<S, F> {
    pub fn new(inner: S, default: F) -> Self {
        Self { inner, default }
    }

    pub fn default_value<T>(&self) -> T
    where
        F: Fn() -> T,
    {
        (self.default)()
    }
}

impl<T, S, F> StateSerializer<T> for Defaulted<S, F>
where
    S: StateSerializer<T>,
    F: Fn() -> T,
{
    fn serialize(&self, value: &T) -> String {
        self.inner.serialize(value)
    }

    fn deserialize(&self, serial: &str) -> Result<T> {
        self.inner.deserialize(serial)
    }

    fn is_undefined(&self, _value: &T) -> bool {
        false
    }
}
