//! Core types: seats, ledgers, RNG, configuration and the match state.

pub mod player;
pub mod ledger;
pub mod rng;
pub mod config;
pub mod state;

pub use player::{ActorType, Player, PlayerId, PlayerMap};
pub use ledger::{Resource, ResourceLedger, Shortfall};
pub use rng::{GameRng, GameRngState};
pub use config::{GameConfig, SevenRule, SevenSwap, MAX_PLAYERS, MIN_PLAYERS};
pub use state::{Direction, GameState, TurnPhase};
