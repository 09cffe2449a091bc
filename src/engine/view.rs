//! Presentation snapshots.
//!
//! A `StateView` is a serializable snapshot of the match as one audience may
//! see it. Hands are revealed selectively; everything else is public. Field
//! names serialize in camelCase for the presentation layer.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Color, Rank};
use crate::core::{ActorType, GameState, Player, PlayerId, TurnPhase};
use crate::pending::{PendingKind, PendingTag, SwapPhase};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub id: u32,
    pub color: Color,
    pub rank: Rank,
    pub label: String,
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id.0,
            color: card.color,
            rank: card.rank,
            label: card.label(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub actor_type: ActorType,
    pub card_count: usize,
    /// Present only when this audience may see the hand.
    pub hand: Option<Vec<CardView>>,
    pub coins: u32,
    pub shuffle_tokens: u32,
    pub lunar_mana: u32,
    pub solar_mana: u32,
    pub has_skip_protection: bool,
    pub lucky_charms: u32,
}

impl PlayerView {
    fn build(player: &Player, reveal: bool) -> Self {
        let ledger = &player.ledger;
        Self {
            id: player.id,
            name: player.name.clone(),
            actor_type: player.actor,
            card_count: player.hand_size(),
            hand: reveal.then(|| player.hand.iter().map(CardView::from).collect()),
            coins: ledger.coins,
            shuffle_tokens: ledger.shuffle_tokens,
            lunar_mana: ledger.lunar_mana,
            solar_mana: ledger.solar_mana,
            has_skip_protection: ledger.skip_protection,
            lucky_charms: ledger.lucky_charms,
        }
    }
}

/// Details of the open pending action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionData {
    pub actor: PlayerId,
    pub target: Option<PlayerId>,
    pub required_count: Option<usize>,
    /// `selectTarget` or `selectCards` for a chosen-partner swap.
    pub phase: Option<String>,
}

impl From<&PendingKind> for ActionData {
    fn from(kind: &PendingKind) -> Self {
        let required_count = match kind {
            PendingKind::ForcedDiscard { count, .. } => Some(*count),
            _ => None,
        };
        let phase = match kind {
            PendingKind::SwapWithChosen { phase, .. } => Some(
                match phase {
                    SwapPhase::SelectTarget => "selectTarget",
                    SwapPhase::SelectCards { .. } => "selectCards",
                }
                .to_owned(),
            ),
            _ => None,
        };
        Self {
            actor: kind.actor(),
            target: kind.target(),
            required_count,
            phase,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateView {
    pub players: Vec<PlayerView>,
    pub current_player_id: PlayerId,
    pub top_discard: Option<CardView>,
    pub active_wild_color: Option<Color>,
    pub pending_action: Option<PendingTag>,
    pub action_data: Option<ActionData>,
    pub draw_pile_count: usize,
    pub discard_pile_count: usize,
    /// `1` forward, `-1` backward.
    pub direction: i8,
    pub turn_number: u32,
    pub game_over: bool,
    pub winner: Option<PlayerId>,
    pub phase: TurnPhase,
}

impl StateView {
    /// Snapshot `state`, revealing the hands `reveal` accepts.
    pub fn build(state: &GameState, reveal: impl Fn(&Player) -> bool) -> Self {
        let pending = state.pending.as_ref().map(|p| &p.kind);
        Self {
            players: state
                .players
                .iter()
                .map(|(_, p)| PlayerView::build(p, reveal(p)))
                .collect(),
            current_player_id: state.current,
            top_discard: state.top_discard().map(CardView::from),
            active_wild_color: state.active_wild_color,
            pending_action: pending.map(PendingKind::tag),
            action_data: pending.map(ActionData::from),
            draw_pile_count: state.deck.draw_pile().len(),
            discard_pile_count: state.deck.discard_pile().len(),
            direction: state.direction.sign(),
            turn_number: state.turn_number,
            game_over: state.game_over,
            winner: state.winner,
            phase: state.phase(),
        }
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&PlayerView> {
        self.players.get(id.index())
    }
}
