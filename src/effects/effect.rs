//! Effect descriptors.
//!
//! An effect is a plain value describing one state change. Targets are fixed
//! when the effect is produced, so applying a list never re-derives seats from
//! a direction that an earlier effect in the same list may have flipped.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::cards::Color;
use crate::core::{PlayerId, Resource};

/// Effects produced by one card play or purchase.
///
/// Most plays produce at most three effects, so the list stays inline.
pub type EffectList = SmallVec<[Effect; 4]>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Add to a player's resource counter.
    Gain {
        player: PlayerId,
        resource: Resource,
        amount: u32,
    },
    /// Set the active wild colour.
    SetColor { color: Color },
    /// Ask `player` to name the active wild colour.
    ChooseColor { player: PlayerId },
    /// Penalty draw, softened by skip protection or a lucky charm.
    ForceDraw { target: PlayerId, count: usize },
    /// Plain draw with no protection.
    Draw { target: PlayerId, count: usize },
    /// Skip one extra seat when the turn advances.
    SkipNext,
    /// Flip the turn direction.
    Reverse,
    /// `chooser` picks `count` cards from `target`'s hand to discard.
    ForcedDiscard {
        chooser: PlayerId,
        target: PlayerId,
        count: usize,
    },
    /// `player` plays one more card, then draws one.
    PlayExtraThenDraw { player: PlayerId },
    /// `player` trades one card with the neighbouring seat.
    SwapWithNeighbor { player: PlayerId, neighbor: PlayerId },
    /// `player` trades one card with a seat of their choosing.
    ///
    /// With `target` already fixed the partner step is skipped.
    SwapWithChosen {
        player: PlayerId,
        target: Option<PlayerId>,
    },
    /// Discard a random card from `target`'s hand.
    DiscardRandom { target: PlayerId },
    GrantSkipProtection { player: PlayerId },
    GrantLuckyCharm { player: PlayerId },
    /// Shuffle all discards except the top card into the draw pile.
    RecycleDiscard,
}

impl Effect {
    /// Check if applying this effect waits on player input.
    #[must_use]
    pub fn needs_input(&self) -> bool {
        matches!(
            self,
            Effect::ChooseColor { .. }
                | Effect::ForcedDiscard { .. }
                | Effect::PlayExtraThenDraw { .. }
                | Effect::SwapWithNeighbor { .. }
                | Effect::SwapWithChosen { .. }
        )
    }

    /// Seats this effect names.
    #[must_use]
    pub fn seats(&self) -> SmallVec<[PlayerId; 2]> {
        match *self {
            Effect::Gain { player, .. }
            | Effect::ChooseColor { player }
            | Effect::PlayExtraThenDraw { player }
            | Effect::SwapWithChosen {
                player,
                target: None,
            }
            | Effect::GrantSkipProtection { player }
            | Effect::GrantLuckyCharm { player } => smallvec![player],
            Effect::ForceDraw { target, .. }
            | Effect::Draw { target, .. }
            | Effect::DiscardRandom { target } => smallvec![target],
            Effect::ForcedDiscard {
                chooser: a,
                target: b,
                ..
            }
            | Effect::SwapWithNeighbor {
                player: a,
                neighbor: b,
            }
            | Effect::SwapWithChosen {
                player: a,
                target: Some(b),
            } => smallvec![a, b],
            Effect::SetColor { .. } | Effect::SkipNext | Effect::Reverse | Effect::RecycleDiscard => {
                SmallVec::new()
            }
        }
    }
}
