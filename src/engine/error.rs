//! Error types.
//!
//! - `RejectReason`: why an operation was refused (state untouched)
//! - `Rejection`: a reason plus the caller's view of the unchanged state
//! - `InvariantViolation`: a candidate state broke a rule; the match halts
//! - `ConfigError`: a match could not be built
//! - `CheckpointError`: a checkpoint could not be written or restored

use derive_more::{Display, Error, From};
use serde::Serialize;

use super::StateView;
use crate::cards::{Card, CardId, Color, InvalidCard};
use crate::core::{PlayerId, Shortfall};
use crate::pending::PendingTag;

/// A rule every committed state must satisfy was broken.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum InvariantViolation {
    #[display("card count changed: expected {expected}, found {found}")]
    CardCount { expected: usize, found: usize },
    #[display("{id} appears more than once")]
    DuplicateCard { id: CardId },
    #[display("{count} seats is outside the supported range")]
    SeatCount { count: usize },
    #[display("seat {seat} does not exist")]
    UnknownSeat { seat: PlayerId },
    #[display("seat {seat} holds a player recorded as {id}")]
    SeatMismatch { seat: PlayerId, id: PlayerId },
    #[display("active colour {color} is set but the top discard is not a wild card")]
    ActiveColor { color: Color },
    #[display("game_over is {game_over} but the winner does not agree")]
    Outcome { game_over: bool },
    #[display("a pending action is open after the match ended")]
    PendingAfterGameOver,
    #[display("forced discard of {count} from a hand of {hand}")]
    DiscardCount { count: usize, hand: usize },
}

/// Why an operation was refused.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error, Serialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "reason")]
pub enum RejectReason {
    #[display("the match is over")]
    GameOver,
    #[display("the match is halted: {violation}")]
    MatchHalted {
        #[error(source)]
        violation: InvariantViolation,
    },
    #[display("it is {expected}'s turn, not {actual}'s")]
    NotYourTurn { expected: PlayerId, actual: PlayerId },
    #[display("{card} cannot be played on {top}")]
    IllegalCard {
        card: Card,
        top: Card,
        active_wild_color: Option<Color>,
    },
    #[display("{kind} is waiting on {actor}")]
    PendingActionOpen { kind: PendingTag, actor: PlayerId },
    #[display("no pending action is open")]
    NoPendingAction,
    #[display("the pending action belongs to {expected}, not {actual}")]
    WrongActor { expected: PlayerId, actual: PlayerId },
    #[display("malformed input: {detail}")]
    MalformedInput { detail: String },
    #[display("{shortfall}")]
    InsufficientResource {
        #[error(source)]
        shortfall: Shortfall,
    },
}

/// A refused operation. The state is unchanged and `view` shows it as the
/// caller sees it.
#[derive(Clone, Debug, Display, Error)]
#[display("{reason}")]
pub struct Rejection {
    #[error(source)]
    pub reason: RejectReason,
    pub view: Box<StateView>,
}

/// A match could not be built.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error, From)]
pub enum ConfigError {
    #[display("{count} players requested; 2 to 8 are supported")]
    PlayerCount { count: usize },
    #[display("starting hand size must be at least 1")]
    StartingHandSize,
    #[display("forced discard count must be at least 1")]
    ForcedDiscardCount,
    #[display("dealing needs {needed} cards but the deck holds {available}")]
    DeckTooSmall { needed: usize, available: usize },
    #[display("preset deal has {hands} hands for {players} players")]
    PresetHands { hands: usize, players: usize },
    #[display("preset hand for {seat} is empty")]
    EmptyPresetHand { seat: PlayerId },
    #[display("first player {seat} is not seated")]
    FirstPlayer { seat: PlayerId },
    #[display("active colour {color} is not a choosable colour for a wild top card")]
    PresetColor { color: Color },
    #[from]
    #[display("invalid card: {_0}")]
    Card(InvalidCard),
}

/// A checkpoint could not be written or restored.
#[derive(Debug, Display, Error, From)]
pub enum CheckpointError {
    #[display("checkpoint encoding failed: {_0}")]
    Codec(bincode::Error),
    #[display("restored state is inconsistent: {_0}")]
    Corrupt(InvariantViolation),
}
