//! Draw and discard piles.
//!
//! ## Layout
//!
//! Both piles are persistent `im::Vector`s so cloning the state for a
//! transaction is cheap. The draw pile is drawn from the front; the discard
//! pile's last element is the top card.
//!
//! ## Recycling
//!
//! When the draw pile runs dry, every discard except the top card is shuffled
//! back into it. With nothing to recycle a draw yields no card.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Card, CardId, Color, Rank};
use crate::core::GameRng;

/// Number of cards in a standard deck.
pub const STANDARD_DECK_SIZE: usize = 108;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Deck {
    draw_pile: Vector<Card>,
    discard_pile: Vector<Card>,
}

impl Deck {
    /// The 108-card standard set in a fixed order, ids `0..108`.
    ///
    /// Per colour: one 0, two each of 1-9, SKIP, REVERSE and DRAW_TWO.
    /// Plus four WILD and four WILD_DRAW_FOUR.
    ///
    /// ```
    /// use rust_uno::cards::{Deck, Rank};
    ///
    /// let cards = Deck::standard_cards();
    /// assert_eq!(cards.len(), 108);
    /// assert_eq!(cards.iter().filter(|c| c.rank == Rank::Zero).count(), 4);
    /// ```
    #[must_use]
    pub fn standard_cards() -> Vec<Card> {
        let mut specs = Vec::with_capacity(STANDARD_DECK_SIZE);
        for color in Color::PLAYABLE {
            specs.push((color, Rank::Zero));
            for rank in Rank::DIGITS[1..]
                .iter()
                .copied()
                .chain([Rank::Skip, Rank::Reverse, Rank::DrawTwo])
            {
                specs.push((color, rank));
                specs.push((color, rank));
            }
        }
        for _ in 0..4 {
            specs.push((Color::Wild, Rank::Wild));
            specs.push((Color::Wild, Rank::WildDrawFour));
        }

        specs
            .into_iter()
            .enumerate()
            .map(|(i, (color, rank))| Card {
                id: CardId::new(i as u32),
                color,
                rank,
            })
            .collect()
    }

    /// Build a shuffled standard draw pile with an empty discard pile.
    pub fn standard(rng: &mut GameRng) -> Self {
        let mut cards = Self::standard_cards();
        rng.shuffle(&mut cards);
        Self::from_piles(cards, Vec::new())
    }

    /// Build from explicit piles. The last discard is the top card.
    #[must_use]
    pub fn from_piles(draw_pile: Vec<Card>, discard_pile: Vec<Card>) -> Self {
        Self {
            draw_pile: draw_pile.into_iter().collect(),
            discard_pile: discard_pile.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn draw_pile(&self) -> &Vector<Card> {
        &self.draw_pile
    }

    #[must_use]
    pub fn discard_pile(&self) -> &Vector<Card> {
        &self.discard_pile
    }

    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.discard_pile.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.draw_pile.is_empty() && self.discard_pile.is_empty()
    }

    /// Shuffle the draw pile in place.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        let mut cards: Vec<Card> = self.draw_pile.iter().copied().collect();
        rng.shuffle(&mut cards);
        self.draw_pile = cards.into_iter().collect();
    }

    /// Draw one card, recycling the discard pile if the draw pile is empty.
    pub fn draw_one(&mut self, rng: &mut GameRng) -> Option<Card> {
        if self.draw_pile.is_empty() {
            self.recycle(rng);
        }
        self.draw_pile.pop_front()
    }

    /// Draw up to `count` cards. Fewer come back when both piles run out.
    pub fn draw(&mut self, count: usize, rng: &mut GameRng) -> Vec<Card> {
        let mut drawn = Vec::with_capacity(count);
        for _ in 0..count {
            match self.draw_one(rng) {
                Some(card) => drawn.push(card),
                None => break,
            }
        }
        drawn
    }

    /// Take the first draw-pile card that satisfies `accept`.
    ///
    /// Rejected cards are returned to the draw pile, which is then reshuffled.
    /// Used to turn over an opening card that is not a WILD_DRAW_FOUR.
    pub fn draw_first_matching(
        &mut self,
        rng: &mut GameRng,
        accept: impl Fn(&Card) -> bool,
    ) -> Option<Card> {
        let mut rejected = Vec::new();
        let mut found = None;
        while let Some(card) = self.draw_pile.pop_front() {
            if accept(&card) {
                found = Some(card);
                break;
            }
            rejected.push(card);
        }
        if !rejected.is_empty() {
            debug!(returned = rejected.len(), "returning rejected opening cards");
            self.draw_pile.extend(rejected);
            self.shuffle(rng);
        }
        found
    }

    /// Place a card on top of the discard pile.
    pub fn discard(&mut self, card: Card) {
        self.discard_pile.push_back(card);
    }

    /// Place a card directly beneath the top discard.
    pub fn bury(&mut self, card: Card) {
        let len = self.discard_pile.len();
        if len == 0 {
            self.discard_pile.push_back(card);
        } else {
            self.discard_pile.insert(len - 1, card);
        }
    }

    /// Check if any discard lies beneath the top card.
    #[must_use]
    pub fn can_recycle(&self) -> bool {
        self.discard_pile.len() > 1
    }

    /// Shuffle every discard except the top card into the draw pile.
    ///
    /// Returns the number of cards moved.
    pub fn recycle(&mut self, rng: &mut GameRng) -> usize {
        let Some(top) = self.discard_pile.pop_back() else {
            return 0;
        };
        let moved = self.discard_pile.len();
        let rest = std::mem::take(&mut self.discard_pile);
        self.discard_pile.push_back(top);
        if moved > 0 {
            self.draw_pile.append(rest);
            self.shuffle(rng);
            debug!(moved, draw_pile = self.draw_pile.len(), "recycled discard pile");
        }
        moved
    }
}
