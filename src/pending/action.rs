//! Pending action records and the inputs that answer them.

use serde::{Deserialize, Serialize};

use crate::cards::Color;
use crate::core::PlayerId;
use crate::effects::Effect;

/// Step of a chosen-partner swap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapPhase {
    /// Waiting for the partner seat.
    SelectTarget,
    /// Partner fixed; waiting for the two card indices.
    SelectCards { target: PlayerId },
}

/// What the open pending action is waiting for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingKind {
    ChooseColor {
        actor: PlayerId,
    },
    SwapWithNeighbor {
        actor: PlayerId,
        neighbor: PlayerId,
    },
    SwapWithChosen {
        actor: PlayerId,
        phase: SwapPhase,
    },
    ForcedDiscard {
        chooser: PlayerId,
        target: PlayerId,
        count: usize,
    },
    PlayExtraThenDraw {
        actor: PlayerId,
    },
}

/// Wire tag for a pending kind.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PendingTag {
    ChooseColor,
    SwapWithNeighbor,
    SwapWithChosen,
    ForcedDiscard,
    PlayExtraThenDraw,
}

impl PendingKind {
    /// The only player allowed to answer.
    #[must_use]
    pub fn actor(&self) -> PlayerId {
        match *self {
            PendingKind::ChooseColor { actor }
            | PendingKind::SwapWithNeighbor { actor, .. }
            | PendingKind::SwapWithChosen { actor, .. }
            | PendingKind::PlayExtraThenDraw { actor } => actor,
            PendingKind::ForcedDiscard { chooser, .. } => chooser,
        }
    }

    /// The other seat involved, when one is fixed.
    #[must_use]
    pub fn target(&self) -> Option<PlayerId> {
        match *self {
            PendingKind::SwapWithNeighbor { neighbor, .. } => Some(neighbor),
            PendingKind::SwapWithChosen {
                phase: SwapPhase::SelectCards { target },
                ..
            } => Some(target),
            PendingKind::ForcedDiscard { target, .. } => Some(target),
            _ => None,
        }
    }

    #[must_use]
    pub fn tag(&self) -> PendingTag {
        match self {
            PendingKind::ChooseColor { .. } => PendingTag::ChooseColor,
            PendingKind::SwapWithNeighbor { .. } => PendingTag::SwapWithNeighbor,
            PendingKind::SwapWithChosen { .. } => PendingTag::SwapWithChosen,
            PendingKind::ForcedDiscard { .. } => PendingTag::ForcedDiscard,
            PendingKind::PlayExtraThenDraw { .. } => PendingTag::PlayExtraThenDraw,
        }
    }
}

/// Work left to do once the pending action is answered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Continuation {
    /// Effects still to apply, in order.
    pub remaining: Vec<Effect>,
    /// Extra seats skipped so far.
    pub skips: usize,
    /// Advance the turn after the remaining effects.
    pub ends_turn: bool,
}

/// An open pending action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAction {
    pub kind: PendingKind,
    pub continuation: Continuation,
}

impl PendingAction {
    #[must_use]
    pub fn actor(&self) -> PlayerId {
        self.kind.actor()
    }
}

/// Player input answering a pending action.
///
/// Serializes externally tagged in camelCase: `{"color": "GREEN"}`,
/// `{"target": 2}`, `{"swap": {"give": 0, "take": 1}}`, `{"discard": [0, 3]}`,
/// `{"playExtra": {"cardIndex": 1, "color": null}}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PendingInput {
    Color(Color),
    Target(PlayerId),
    Swap { give: usize, take: usize },
    Discard(Vec<usize>),
    #[serde(rename_all = "camelCase")]
    PlayExtra {
        card_index: usize,
        color: Option<Color>,
    },
}
