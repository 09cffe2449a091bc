//! Match configuration.
//!
//! `GameConfig` carries the tunable rules of a match. It is fixed at
//! construction and travels with the state so checkpoints replay under the
//! same rules.

use serde::{Deserialize, Serialize};

use crate::cards::Color;
use crate::engine::ConfigError;

/// Fewest seats a match supports.
pub const MIN_PLAYERS: usize = 2;

/// Most seats a match supports.
pub const MAX_PLAYERS: usize = 8;

/// How a played 7 picks its swap partner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SevenRule {
    /// Always swap with the next seat in turn order.
    Neighbor,
    /// Always let the player choose a partner.
    Chosen,
    /// RED/YELLOW swap with the neighbour; GREEN/BLUE let the player choose.
    SplitByColor,
}

/// Swap flavour a 7 resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SevenSwap {
    Neighbor,
    Chosen,
}

impl SevenRule {
    /// Swap flavour for a 7 of `color`.
    #[must_use]
    pub fn swap_for(self, color: Color) -> SevenSwap {
        match self {
            SevenRule::Neighbor => SevenSwap::Neighbor,
            SevenRule::Chosen => SevenSwap::Chosen,
            SevenRule::SplitByColor => match color {
                Color::Red | Color::Yellow => SevenSwap::Neighbor,
                _ => SevenSwap::Chosen,
            },
        }
    }
}

/// Tunable match rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Cards dealt to each seat.
    pub starting_hand_size: usize,
    /// Cards a played 3 forces the next seat to discard.
    pub forced_discard_count: usize,
    pub seven_rule: SevenRule,
    /// Award a resource for every coloured card played.
    pub color_awards: bool,
    /// Pick the opening seat at random instead of seat 0.
    pub random_first_player: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_hand_size: 7,
            forced_discard_count: 2,
            seven_rule: SevenRule::SplitByColor,
            color_awards: true,
            random_first_player: false,
        }
    }
}

impl GameConfig {
    /// Check the configuration against a seat count and deck size.
    ///
    /// Every seat is dealt at least one card, and the deal must leave at
    /// least one card to open the discard pile.
    pub fn validate(&self, player_count: usize, deck_size: usize) -> Result<(), ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
            return Err(ConfigError::PlayerCount {
                count: player_count,
            });
        }
        if self.starting_hand_size == 0 {
            return Err(ConfigError::StartingHandSize);
        }
        if self.forced_discard_count == 0 {
            return Err(ConfigError::ForcedDiscardCount);
        }
        let needed = self
            .starting_hand_size
            .checked_mul(player_count)
            .and_then(|dealt| dealt.checked_add(1))
            .unwrap_or(usize::MAX);
        if needed > deck_size {
            return Err(ConfigError::DeckTooSmall {
                needed,
                available: deck_size,
            });
        }
        Ok(())
    }
}
