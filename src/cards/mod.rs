//! Cards and piles.
//!
//! - `Card`: colour, rank and instance id, with the matching rule
//! - `Deck`: draw and discard piles with recycling

pub mod card;
pub mod deck;

pub use card::{Card, CardId, Color, InvalidCard, Rank};
pub use deck::{Deck, STANDARD_DECK_SIZE};
