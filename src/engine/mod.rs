//! Turn engine: the transactional match API.
//!
//! - `Game`: owns the state; play, draw, answer pending actions, purchase
//! - `GameBuilder` / `PresetDeal`: match construction
//! - `Intent`: one value per player request, for `Game::apply`
//! - `StateView`: serializable snapshot for the presentation layer
//! - Errors: `Rejection`, `RejectReason`, `InvariantViolation`, `ConfigError`,
//!   `CheckpointError`

pub mod builder;
pub mod error;
pub mod game;
pub mod intent;
mod turn;
pub mod view;

pub use builder::{GameBuilder, PresetDeal};
pub use error::{CheckpointError, ConfigError, InvariantViolation, RejectReason, Rejection};
pub use game::{Game, Outcome};
pub use intent::Intent;
pub use view::{ActionData, CardView, PlayerView, StateView};
