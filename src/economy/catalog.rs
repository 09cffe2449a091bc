//! Purchasable items and spells.
//!
//! ## Entries
//!
//! | Id                  | Cost            | Effect                                   |
//! |---------------------|-----------------|------------------------------------------|
//! | `gain_shuffle_token`| 3 coins         | +1 shuffle token                         |
//! | `lucky_charm`       | 5 coins         | next forced draw is one card smaller     |
//! | `moonbeam_draw`     | 3 lunar mana    | target draws one card                    |
//! | `lunar_shield`      | 5 lunar mana    | next forced draw is absorbed             |
//! | `shadow_swap`       | 4 lunar mana    | swap one card with the target            |
//! | `sun_flare`         | 3 solar mana    | target discards a random card            |
//! | `reshuffle`         | 1 shuffle token | recycle the discard pile into the deck   |
//!
//! Purchases never end the buyer's turn.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::smallvec;
use strum::{EnumIter, EnumString, IntoEnumIterator};

use crate::core::{GameState, PlayerId, Resource, ResourceLedger};
use crate::effects::{Effect, EffectList};

/// Catalog entry identifier. Parses from its snake_case name.
///
/// ```
/// use std::str::FromStr;
/// use rust_uno::economy::CatalogId;
///
/// assert_eq!(CatalogId::from_str("moonbeam_draw").unwrap(), CatalogId::MoonbeamDraw);
/// assert_eq!(CatalogId::SunFlare.to_string(), "sun_flare");
/// ```
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    strum::Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CatalogId {
    GainShuffleToken,
    LuckyCharm,
    MoonbeamDraw,
    LunarShield,
    ShadowSwap,
    SunFlare,
    Reshuffle,
}

/// Grouping shown to players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CatalogKind {
    ShopItem,
    LunarSpell,
    SolarSpell,
    TokenAction,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: CatalogId,
    pub name: &'static str,
    pub kind: CatalogKind,
    pub resource: Resource,
    pub cost: u32,
    /// Needs a target seat other than the buyer.
    pub targeted: bool,
}

impl CatalogEntry {
    /// Effects of `buyer` purchasing this entry.
    ///
    /// `None` when a targeted entry is given no target.
    #[must_use]
    pub fn effects(&self, buyer: PlayerId, target: Option<PlayerId>) -> Option<EffectList> {
        let effects = match self.id {
            CatalogId::GainShuffleToken => smallvec![Effect::Gain {
                player: buyer,
                resource: Resource::ShuffleTokens,
                amount: 1,
            }],
            CatalogId::LuckyCharm => smallvec![Effect::GrantLuckyCharm { player: buyer }],
            CatalogId::LunarShield => smallvec![Effect::GrantSkipProtection { player: buyer }],
            CatalogId::Reshuffle => smallvec![Effect::RecycleDiscard],
            CatalogId::MoonbeamDraw => smallvec![Effect::Draw {
                target: target?,
                count: 1,
            }],
            CatalogId::ShadowSwap => smallvec![Effect::SwapWithChosen {
                player: buyer,
                target: Some(target?),
            }],
            CatalogId::SunFlare => smallvec![Effect::DiscardRandom { target: target? }],
        };
        Some(effects)
    }

    /// Check if buying this entry would change anything in `state`.
    ///
    /// A reshuffle with nothing beneath the top discard is refused.
    #[must_use]
    pub fn has_effect(&self, state: &GameState) -> bool {
        match self.id {
            CatalogId::Reshuffle => state.deck.can_recycle(),
            _ => true,
        }
    }

    /// Check if `ledger` can pay for this entry.
    #[must_use]
    pub fn affordable(&self, ledger: &ResourceLedger) -> bool {
        ledger.balance(self.resource) >= self.cost
    }
}

/// The fixed set of purchasable entries.
#[derive(Clone, Debug)]
pub struct Catalog {
    entries: FxHashMap<CatalogId, CatalogEntry>,
}

impl Catalog {
    /// The standard catalog.
    #[must_use]
    pub fn standard() -> Self {
        let entries = CatalogId::iter()
            .map(|id| (id, Self::standard_entry(id)))
            .collect();
        Self { entries }
    }

    fn standard_entry(id: CatalogId) -> CatalogEntry {
        let (name, kind, resource, cost, targeted) = match id {
            CatalogId::GainShuffleToken => {
                ("Shuffle Token", CatalogKind::ShopItem, Resource::Coins, 3, false)
            }
            CatalogId::LuckyCharm => ("Lucky Charm", CatalogKind::ShopItem, Resource::Coins, 5, false),
            CatalogId::MoonbeamDraw => {
                ("Moonbeam Draw", CatalogKind::LunarSpell, Resource::LunarMana, 3, true)
            }
            CatalogId::LunarShield => {
                ("Lunar Shield", CatalogKind::LunarSpell, Resource::LunarMana, 5, false)
            }
            CatalogId::ShadowSwap => {
                ("Shadow Swap", CatalogKind::LunarSpell, Resource::LunarMana, 4, true)
            }
            CatalogId::SunFlare => {
                ("Sun Flare Discard", CatalogKind::SolarSpell, Resource::SolarMana, 3, true)
            }
            CatalogId::Reshuffle => {
                ("Reshuffle", CatalogKind::TokenAction, Resource::ShuffleTokens, 1, false)
            }
        };
        CatalogEntry {
            id,
            name,
            kind,
            resource,
            cost,
            targeted,
        }
    }

    #[must_use]
    pub fn get(&self, id: CatalogId) -> Option<&CatalogEntry> {
        self.entries.get(&id)
    }

    /// All entries in a stable order.
    #[must_use]
    pub fn entries(&self) -> Vec<&CatalogEntry> {
        let mut entries: Vec<_> = self.entries.values().collect();
        entries.sort_by_key(|e| e.id);
        entries
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
