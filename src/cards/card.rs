//! Card identity: colours, ranks and the matching rule.
//!
//! Cards are immutable values. Two cards compare equal when colour and rank
//! agree; the `CardId` only exists so a specific copy can be tracked through
//! hands and piles (the integrity check relies on it).

use std::fmt;
use std::hash::{Hash, Hasher};

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};

/// Card colour.
///
/// `Wild` is the intrinsic colour of WILD and WILD_DRAW_FOUR cards; it is
/// never a valid choice for the active colour.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
    strum::Display, EnumIter, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Color {
    Red,
    Yellow,
    Green,
    Blue,
    Wild,
}

impl Color {
    /// The four colours a player may pick for a wild card.
    pub const PLAYABLE: [Color; 4] = [Color::Red, Color::Yellow, Color::Green, Color::Blue];

    /// Check if this is the intrinsic wild colour.
    #[must_use]
    pub const fn is_wild(self) -> bool {
        matches!(self, Color::Wild)
    }
}

/// Card rank.
///
/// Digits 3, 6 and 7 carry custom effects; SKIP, REVERSE, DRAW_TWO and the
/// two wild ranks carry the standard ones. Every other digit is plain.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
    strum::Display, EnumIter, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Rank {
    #[strum(to_string = "0")]
    Zero,
    #[strum(to_string = "1")]
    One,
    #[strum(to_string = "2")]
    Two,
    #[strum(to_string = "3")]
    Three,
    #[strum(to_string = "4")]
    Four,
    #[strum(to_string = "5")]
    Five,
    #[strum(to_string = "6")]
    Six,
    #[strum(to_string = "7")]
    Seven,
    #[strum(to_string = "8")]
    Eight,
    #[strum(to_string = "9")]
    Nine,
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    WildDrawFour,
}

impl Rank {
    /// Digit ranks in ascending order.
    pub const DIGITS: [Rank; 10] = [
        Rank::Zero,
        Rank::One,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
    ];

    /// Check if this is WILD or WILD_DRAW_FOUR.
    #[must_use]
    pub const fn is_wild(self) -> bool {
        matches!(self, Rank::Wild | Rank::WildDrawFour)
    }
}

/// Unique instance identifier, assigned once at deck construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card#{}", self.0)
    }
}

/// A non-wild rank was given the intrinsic wild colour.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error, Serialize, Deserialize)]
#[display("rank {rank} cannot carry colour WILD")]
pub struct InvalidCard {
    pub rank: Rank,
}

/// A single card.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub color: Color,
    pub rank: Rank,
}

impl Card {
    /// Create a card.
    ///
    /// Wild ranks are normalised to `Color::Wild` whatever colour is passed.
    ///
    /// ```
    /// use rust_uno::cards::{Card, CardId, Color, Rank};
    ///
    /// let wild = Card::new(CardId::new(0), Color::Red, Rank::Wild).unwrap();
    /// assert_eq!(wild.color, Color::Wild);
    ///
    /// assert!(Card::new(CardId::new(1), Color::Wild, Rank::Seven).is_err());
    /// ```
    pub fn new(id: CardId, color: Color, rank: Rank) -> Result<Self, InvalidCard> {
        if rank.is_wild() {
            return Ok(Self { id, color: Color::Wild, rank });
        }
        if color.is_wild() {
            return Err(InvalidCard { rank });
        }
        Ok(Self { id, color, rank })
    }

    /// Check if this is a wild card.
    #[must_use]
    pub fn is_wild(&self) -> bool {
        self.rank.is_wild()
    }

    /// Check if this card may be played on `top`.
    ///
    /// Legal when the colour matches the active wild colour (or the top
    /// card's colour when no wild colour is active), the ranks match, or this
    /// card is wild.
    ///
    /// ```
    /// use rust_uno::cards::{Card, CardId, Color, Rank};
    ///
    /// let top = Card::new(CardId::new(0), Color::Red, Rank::Three).unwrap();
    /// let red_five = Card::new(CardId::new(1), Color::Red, Rank::Five).unwrap();
    /// let blue_skip = Card::new(CardId::new(2), Color::Blue, Rank::Skip).unwrap();
    ///
    /// assert!(red_five.matches(&top, None));
    /// assert!(!blue_skip.matches(&top, None));
    /// ```
    #[must_use]
    pub fn matches(&self, top: &Card, active_wild_color: Option<Color>) -> bool {
        let color_in_force = active_wild_color.unwrap_or(top.color);
        self.color.is_wild() || self.color == color_in_force || self.rank == top.rank
    }

    /// Display label for the presentation layer ("RED 5", "WILD_DRAW_FOUR").
    #[must_use]
    pub fn label(&self) -> String {
        if self.is_wild() {
            self.rank.to_string()
        } else {
            format!("{} {}", self.color, self.rank)
        }
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.color == other.color && self.rank == other.rank
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.color.hash(state);
        self.rank.hash(state);
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
