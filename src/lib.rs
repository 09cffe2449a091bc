//! # rust-uno
//!
//! Turn-resolution engine for an extended Uno variant with a resource
//! economy.
//!
//! ## Design Principles
//!
//! 1. **One authority**: a `Game` owns the only `GameState` of a match. Every
//!    request is validated against it and either fully applied or rejected
//!    with the state unchanged.
//!
//! 2. **N-Player First**: seats `2..=8`; turn order wraps in the current
//!    direction. No API assumes two players.
//!
//! 3. **Effects, not side channels**: card plays and purchases become effect
//!    lists. Counters and hands change only when effects resolve.
//!
//! ## Architecture
//!
//! - **Transactions**: operations run on a clone of the state, are
//!   integrity-checked, then committed. Hands and piles are `im` vectors, so
//!   the clone is O(1).
//!
//! - **Pending actions**: an effect that needs a decision (colour, swap,
//!   discard, free play) suspends resolution until its actor answers.
//!
//! - **Determinism**: all randomness comes from the seeded `GameRng` inside
//!   the state.
//!
//! ## Modules
//!
//! - `core`: Player ids, seats, ledgers, RNG, configuration, match state
//! - `cards`: Cards, the matching rule, draw and discard piles
//! - `effects`: Effect type, card-to-effect resolution, effect application
//! - `pending`: Pending actions and the coordinator that answers them
//! - `economy`: Purchasable items and spells
//! - `engine`: The `Game` API, builder, views and errors
//! - `cpu`: Legal-intent enumeration and CPU policies

pub mod core;
pub mod cards;
pub mod effects;
pub mod pending;
pub mod economy;
pub mod engine;
pub mod cpu;

// Re-export commonly used types
pub use crate::core::{
    ActorType, Direction, GameConfig, GameRng, GameRngState, GameState, Player, PlayerId,
    PlayerMap, Resource, ResourceLedger, SevenRule, TurnPhase,
};

pub use crate::cards::{Card, CardId, Color, Deck, Rank};

pub use crate::effects::{ActionResolver, Effect, EffectList};

pub use crate::pending::{PendingAction, PendingInput, PendingKind, PendingTag, SwapPhase};

pub use crate::economy::{Catalog, CatalogEntry, CatalogId};

pub use crate::engine::{
    CheckpointError, ConfigError, Game, GameBuilder, Intent, InvariantViolation, Outcome,
    PresetDeal, RejectReason, Rejection, StateView,
};

pub use crate::cpu::{legal_intents, CpuPolicy, RandomPolicy};
