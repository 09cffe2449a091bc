//! Per-player resource counters.
//!
//! Four spendable resources are earned by playing coloured cards (when colour
//! awards are enabled) and spent in the catalog. Skip protection and lucky
//! charms are held items consumed by forced draws.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};

use crate::cards::Color;

/// A spendable resource.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
    strum::Display, EnumIter, EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "snake_case")]
pub enum Resource {
    Coins,
    ShuffleTokens,
    LunarMana,
    SolarMana,
}

impl Resource {
    /// Resource awarded for playing a card of `color`.
    ///
    /// ```
    /// use rust_uno::cards::Color;
    /// use rust_uno::core::Resource;
    ///
    /// assert_eq!(Resource::awarded_for(Color::Red), Some(Resource::SolarMana));
    /// assert_eq!(Resource::awarded_for(Color::Wild), None);
    /// ```
    #[must_use]
    pub const fn awarded_for(color: Color) -> Option<Resource> {
        match color {
            Color::Red => Some(Resource::SolarMana),
            Color::Yellow => Some(Resource::Coins),
            Color::Green => Some(Resource::ShuffleTokens),
            Color::Blue => Some(Resource::LunarMana),
            Color::Wild => None,
        }
    }
}

/// A debit exceeded the available balance.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error, Serialize, Deserialize)]
#[display("{resource} balance {available} is below the cost of {needed}")]
pub struct Shortfall {
    pub resource: Resource,
    pub needed: u32,
    pub available: u32,
}

/// Resource counters for one player. All counters start at zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLedger {
    pub coins: u32,
    pub shuffle_tokens: u32,
    pub lunar_mana: u32,
    pub solar_mana: u32,
    pub skip_protection: bool,
    pub lucky_charms: u32,
}

impl ResourceLedger {
    #[must_use]
    pub fn balance(&self, resource: Resource) -> u32 {
        match resource {
            Resource::Coins => self.coins,
            Resource::ShuffleTokens => self.shuffle_tokens,
            Resource::LunarMana => self.lunar_mana,
            Resource::SolarMana => self.solar_mana,
        }
    }

    fn slot(&mut self, resource: Resource) -> &mut u32 {
        match resource {
            Resource::Coins => &mut self.coins,
            Resource::ShuffleTokens => &mut self.shuffle_tokens,
            Resource::LunarMana => &mut self.lunar_mana,
            Resource::SolarMana => &mut self.solar_mana,
        }
    }

    pub fn credit(&mut self, resource: Resource, amount: u32) {
        let slot = self.slot(resource);
        *slot = slot.saturating_add(amount);
    }

    /// Spend `amount` of `resource`. Leaves the ledger untouched on failure.
    ///
    /// ```
    /// use rust_uno::core::{Resource, ResourceLedger};
    ///
    /// let mut ledger = ResourceLedger::default();
    /// ledger.credit(Resource::LunarMana, 3);
    ///
    /// assert!(ledger.debit(Resource::LunarMana, 5).is_err());
    /// assert!(ledger.debit(Resource::LunarMana, 3).is_ok());
    /// assert_eq!(ledger.balance(Resource::LunarMana), 0);
    /// ```
    pub fn debit(&mut self, resource: Resource, amount: u32) -> Result<(), Shortfall> {
        let slot = self.slot(resource);
        if *slot < amount {
            return Err(Shortfall {
                resource,
                needed: amount,
                available: *slot,
            });
        }
        *slot -= amount;
        Ok(())
    }

    /// Consume skip protection if held.
    pub fn take_skip_protection(&mut self) -> bool {
        std::mem::replace(&mut self.skip_protection, false)
    }

    /// Consume one lucky charm if held.
    pub fn take_lucky_charm(&mut self) -> bool {
        if self.lucky_charms > 0 {
            self.lucky_charms -= 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_colour_awards_a_distinct_resource() {
        let awarded: Vec<_> = Color::PLAYABLE
            .iter()
            .filter_map(|&c| Resource::awarded_for(c))
            .collect();
        for resource in Resource::iter() {
            assert_eq!(awarded.iter().filter(|&&r| r == resource).count(), 1);
        }
    }

    #[test]
    fn test_debit_shortfall() {
        let mut ledger = ResourceLedger::default();
        ledger.credit(Resource::Coins, 2);

        let err = ledger.debit(Resource::Coins, 5).unwrap_err();
        assert_eq!(err.needed, 5);
        assert_eq!(err.available, 2);
        assert_eq!(ledger.coins, 2);
        assert_eq!(err.to_string(), "coins balance 2 is below the cost of 5");
    }

    #[test]
    fn test_held_items_consumed_once() {
        let mut ledger = ResourceLedger {
            skip_protection: true,
            lucky_charms: 1,
            ..ResourceLedger::default()
        };

        assert!(ledger.take_skip_protection());
        assert!(!ledger.take_skip_protection());
        assert!(ledger.take_lucky_charm());
        assert!(!ledger.take_lucky_charm());
    }

    #[test]
    fn test_resource_names() {
        assert_eq!(Resource::from_str("lunar_mana").unwrap(), Resource::LunarMana);
        assert_eq!(Resource::ShuffleTokens.to_string(), "shuffle_tokens");
    }
}
