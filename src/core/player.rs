//! Seats, per-seat storage and player records.
//!
//! ## PlayerId
//!
//! Type-safe seat identifier. Seats are 0-based and follow turn order
//! when the direction is forward.
//!
//! ## PlayerMap
//!
//! Per-seat data backed by `Vec` for O(1) access, indexable by `PlayerId`.
//!
//! ## Player
//!
//! Name, controller type, hand and resource ledger for one seat.

use std::ops::{Index, IndexMut};

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, Color};
use crate::core::ResourceLedger;

/// Seat identifier.
///
/// Player indices are 0-based: the first seat is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use rust_uno::core::{PlayerId, PlayerMap};
///
/// let mut scores: PlayerMap<u32> = PlayerMap::from_vec(vec![0; 3]);
/// scores[PlayerId::new(1)] += 5;
///
/// assert_eq!(scores[PlayerId::new(1)], 5);
/// assert_eq!(scores.player_count(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a PlayerMap from values already in seat order.
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(!data.is_empty(), "Must have at least 1 player");
        assert!(data.len() <= 255, "At most 255 players supported");
        Self { data }
    }

    /// Get the number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Check whether `player` names a seat in this map.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.index() < self.data.len()
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Get a seat's data, or `None` for an unknown seat.
    #[must_use]
    pub fn try_get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.data.len() as u8).map(PlayerId)
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// Who controls a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorType {
    Human,
    Cpu,
}

/// One seat at the table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub actor: ActorType,
    pub hand: Vector<Card>,
    pub ledger: ResourceLedger,
}

impl Player {
    /// Create a player with an empty hand and zeroed ledger.
    pub fn new(id: PlayerId, name: impl Into<String>, actor: ActorType) -> Self {
        Self {
            id,
            name: name.into(),
            actor,
            hand: Vector::new(),
            ledger: ResourceLedger::default(),
        }
    }

    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }

    #[must_use]
    pub fn has_empty_hand(&self) -> bool {
        self.hand.is_empty()
    }

    #[must_use]
    pub fn is_cpu(&self) -> bool {
        self.actor == ActorType::Cpu
    }

    /// Card at `index`, if any.
    #[must_use]
    pub fn card(&self, index: usize) -> Option<&Card> {
        self.hand.get(index)
    }

    /// Remove and return the card at `index`, if any.
    pub fn take_card(&mut self, index: usize) -> Option<Card> {
        if index < self.hand.len() {
            Some(self.hand.remove(index))
        } else {
            None
        }
    }

    pub fn add_card(&mut self, card: Card) {
        self.hand.push_back(card);
    }

    pub fn add_cards(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.hand.extend(cards);
    }

    /// Indices of cards that may legally be played on `top`.
    #[must_use]
    pub fn playable_indices(&self, top: &Card, active_wild_color: Option<Color>) -> Vec<usize> {
        self.hand
            .iter()
            .enumerate()
            .filter(|(_, card)| card.matches(top, active_wild_color))
            .map(|(i, _)| i)
            .collect()
    }
}
