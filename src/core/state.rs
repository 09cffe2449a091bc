//! Authoritative match state.
//!
//! ## GameState
//!
//! Everything needed to resume a match: seats with hands and ledgers, the
//! piles, turn pointer and direction, the active wild colour, any open pending
//! action, the outcome and the RNG. Hands and piles are `im` vectors, so a
//! clone is cheap; the engine mutates a clone and commits it only after the
//! integrity check passes.
//!
//! ## Integrity
//!
//! `integrity_check` verifies the rules every committed state must satisfy:
//! card conservation, unique card ids, a legal active colour, pending actors
//! that exist, and a winner exactly when the match is over.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::config::{GameConfig, MAX_PLAYERS, MIN_PLAYERS};
use super::player::{Player, PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::{Card, Color, Deck};
use crate::effects::Effect;
use crate::engine::InvariantViolation;
use crate::pending::{PendingAction, PendingKind, SwapPhase};

/// Turn direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Ascending seat order.
    Forward,
    /// Descending seat order.
    Backward,
}

impl Direction {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    /// `+1` or `-1`.
    #[must_use]
    pub fn sign(self) -> i8 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// Coarse phase of the match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TurnPhase {
    /// The current player may play, draw or purchase.
    AwaitingAction,
    /// A pending action is open.
    AwaitingPendingInput,
    /// The match is over.
    Terminal,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    pub players: PlayerMap<Player>,
    pub current: PlayerId,
    pub direction: Direction,
    pub deck: Deck,
    pub active_wild_color: Option<Color>,
    pub pending: Option<PendingAction>,
    pub game_over: bool,
    pub winner: Option<PlayerId>,
    /// Incremented every time the turn advances.
    pub turn_number: u32,
    /// Cards in play, fixed at construction.
    card_total: usize,
    pub rng: GameRng,
}

impl GameState {
    /// Assemble a state from dealt seats and piles.
    ///
    /// The card total is taken from what is passed in and never changes.
    pub fn new(
        config: GameConfig,
        players: Vec<Player>,
        deck: Deck,
        current: PlayerId,
        active_wild_color: Option<Color>,
        rng: GameRng,
    ) -> Self {
        let card_total = deck.len() + players.iter().map(Player::hand_size).sum::<usize>();
        Self {
            config,
            players: PlayerMap::from_vec(players),
            current,
            direction: Direction::Forward,
            deck,
            active_wild_color,
            pending: None,
            game_over: false,
            winner: None,
            turn_number: 0,
            card_total,
            rng,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        self.players.contains(player)
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&Player> {
        self.players.try_get(player)
    }

    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    #[must_use]
    pub fn top_discard(&self) -> Option<&Card> {
        self.deck.top()
    }

    #[must_use]
    pub fn card_total(&self) -> usize {
        self.card_total
    }

    /// Cards currently in hands and piles.
    #[must_use]
    pub fn cards_in_play(&self) -> usize {
        self.deck.len()
            + self
                .players
                .iter()
                .map(|(_, p)| p.hand_size())
                .sum::<usize>()
    }

    /// Seat `steps` places after `from` in the current direction.
    ///
    /// ```
    /// use rust_uno::core::PlayerId;
    /// use rust_uno::engine::GameBuilder;
    ///
    /// let game = GameBuilder::new()
    ///     .cpu("A").cpu("B").cpu("C")
    ///     .build(1)
    ///     .unwrap();
    /// let state = game.state();
    /// assert_eq!(state.seat_after(PlayerId::new(2), 1), PlayerId::new(0));
    /// assert_eq!(state.seat_after(PlayerId::new(0), 2), PlayerId::new(2));
    /// ```
    #[must_use]
    pub fn seat_after(&self, from: PlayerId, steps: usize) -> PlayerId {
        let n = self.player_count();
        let steps = steps % n;
        let index = match self.direction {
            Direction::Forward => (from.index() + steps) % n,
            Direction::Backward => (from.index() + n - steps) % n,
        };
        PlayerId::new(index as u8)
    }

    #[must_use]
    pub fn next_seat(&self, from: PlayerId) -> PlayerId {
        self.seat_after(from, 1)
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        if self.game_over {
            TurnPhase::Terminal
        } else if self.pending.is_some() {
            TurnPhase::AwaitingPendingInput
        } else {
            TurnPhase::AwaitingAction
        }
    }

    /// Move the turn `steps` seats on from the current player.
    pub fn advance_turn(&mut self, steps: usize) {
        self.current = self.seat_after(self.current, steps);
        self.turn_number += 1;
    }

    /// Declare a winner if any hand is empty.
    ///
    /// `actor` is checked first, then the other seats in turn order. Returns
    /// `true` when the match is (now) over.
    pub fn settle_winner(&mut self, actor: PlayerId) -> bool {
        if self.game_over {
            return true;
        }
        let n = self.player_count();
        let winner = (0..n)
            .map(|step| self.seat_after(actor, step))
            .find(|&seat| self.players[seat].has_empty_hand());
        if let Some(seat) = winner {
            self.game_over = true;
            self.winner = Some(seat);
            self.pending = None;
            info!(winner = %seat, turn = self.turn_number, "match won");
        }
        self.game_over
    }

    /// Check the rules every committed state must satisfy.
    pub fn integrity_check(&self) -> Result<(), InvariantViolation> {
        let found = self.cards_in_play();
        if found != self.card_total {
            return Err(InvariantViolation::CardCount {
                expected: self.card_total,
                found,
            });
        }

        let mut seen = FxHashSet::default();
        let all_cards = self
            .deck
            .draw_pile()
            .iter()
            .chain(self.deck.discard_pile().iter())
            .chain(self.players.iter().flat_map(|(_, p)| p.hand.iter()));
        for card in all_cards {
            if !seen.insert(card.id) {
                return Err(InvariantViolation::DuplicateCard { id: card.id });
            }
        }

        let seats = self.player_count();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&seats) {
            return Err(InvariantViolation::SeatCount { count: seats });
        }
        if let Some((seat, player)) = self.players.iter().find(|(seat, p)| p.id != *seat) {
            return Err(InvariantViolation::SeatMismatch { seat, id: player.id });
        }
        if let Some(seat) = [Some(self.current), self.winner]
            .into_iter()
            .flatten()
            .find(|&seat| !self.contains(seat))
        {
            return Err(InvariantViolation::UnknownSeat { seat });
        }

        if let Some(color) = self.active_wild_color {
            let top_is_wild = self.top_discard().is_some_and(Card::is_wild);
            if color.is_wild() || !top_is_wild {
                return Err(InvariantViolation::ActiveColor { color });
            }
        }

        if self.game_over != self.winner.is_some() {
            return Err(InvariantViolation::Outcome {
                game_over: self.game_over,
            });
        }

        if let Some(pending) = &self.pending {
            if self.game_over {
                return Err(InvariantViolation::PendingAfterGameOver);
            }
            self.check_pending(pending)?;
        }

        Ok(())
    }

    fn check_pending(&self, pending: &PendingAction) -> Result<(), InvariantViolation> {
        let kind = &pending.kind;
        let mut seats = vec![kind.actor()];
        if let PendingKind::SwapWithNeighbor { neighbor, .. } = kind {
            seats.push(*neighbor);
        }
        if let PendingKind::SwapWithChosen {
            phase: SwapPhase::SelectCards { target },
            ..
        } = kind
        {
            seats.push(*target);
        }
        if let PendingKind::ForcedDiscard { target, .. } = kind {
            seats.push(*target);
        }
        seats.extend(
            pending
                .continuation
                .remaining
                .iter()
                .flat_map(Effect::seats),
        );
        if let Some(&seat) = seats.iter().find(|&&seat| !self.contains(seat)) {
            return Err(InvariantViolation::UnknownSeat { seat });
        }

        if let PendingKind::ForcedDiscard { target, count, .. } = *kind {
            let hand = self.players[target].hand_size();
            if count == 0 || count > hand {
                return Err(InvariantViolation::DiscardCount { count, hand });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, Rank};
    use crate::core::ActorType;
    use crate::pending::Continuation;

    fn card(id: u32, color: Color, rank: Rank) -> Card {
        Card::new(CardId::new(id), color, rank).unwrap()
    }

    fn three_seats() -> GameState {
        let players = (0..3)
            .map(|i| {
                let mut p = Player::new(PlayerId::new(i), format!("P{i}"), ActorType::Cpu);
                p.add_card(card(u32::from(i), Color::Red, Rank::One));
                p
            })
            .collect();
        let deck = Deck::from_piles(
            vec![card(10, Color::Blue, Rank::Two)],
            vec![card(11, Color::Green, Rank::Four)],
        );
        GameState::new(
            GameConfig::default(),
            players,
            deck,
            PlayerId::new(0),
            None,
            GameRng::new(0),
        )
    }

    #[test]
    fn test_seat_arithmetic_both_directions() {
        let mut state = three_seats();
        assert_eq!(state.next_seat(PlayerId::new(2)), PlayerId::new(0));

        state.direction = state.direction.flipped();
        assert_eq!(state.next_seat(PlayerId::new(0)), PlayerId::new(2));
        assert_eq!(state.seat_after(PlayerId::new(0), 2), PlayerId::new(1));
        assert_eq!(state.direction.sign(), -1);
    }

    #[test]
    fn test_advance_counts_turns() {
        let mut state = three_seats();
        state.advance_turn(2);
        assert_eq!(state.current, PlayerId::new(2));
        assert_eq!(state.turn_number, 1);
    }

    #[test]
    fn test_integrity_detects_lost_card() {
        let mut state = three_seats();
        assert_eq!(state.card_total(), 5);
        assert!(state.integrity_check().is_ok());

        state.players[PlayerId::new(1)].take_card(0);
        assert_eq!(
            state.integrity_check(),
            Err(InvariantViolation::CardCount {
                expected: 5,
                found: 4
            })
        );
    }

    #[test]
    fn test_integrity_detects_active_color_on_plain_top() {
        let mut state = three_seats();
        state.active_wild_color = Some(Color::Blue);
        assert_eq!(
            state.integrity_check(),
            Err(InvariantViolation::ActiveColor { color: Color::Blue })
        );
    }

    #[test]
    fn test_integrity_checks_seats_in_continuation() {
        let mut state = three_seats();
        state.pending = Some(PendingAction {
            kind: PendingKind::ChooseColor {
                actor: PlayerId::new(0),
            },
            continuation: Continuation {
                remaining: vec![
                    Effect::SkipNext,
                    Effect::Draw {
                        target: PlayerId::new(9),
                        count: 1,
                    },
                ],
                skips: 0,
                ends_turn: true,
            },
        });
        assert_eq!(
            state.integrity_check(),
            Err(InvariantViolation::UnknownSeat {
                seat: PlayerId::new(9)
            })
        );
    }

    #[test]
    fn test_integrity_checks_seat_ids() {
        let mut state = three_seats();
        state.players[PlayerId::new(2)].id = PlayerId::new(0);
        assert_eq!(
            state.integrity_check(),
            Err(InvariantViolation::SeatMismatch {
                seat: PlayerId::new(2),
                id: PlayerId::new(0)
            })
        );

        let mut state = three_seats();
        state.game_over = true;
        state.winner = Some(PlayerId::new(4));
        assert_eq!(
            state.integrity_check(),
            Err(InvariantViolation::UnknownSeat {
                seat: PlayerId::new(4)
            })
        );
    }

    #[test]
    fn test_settle_winner_prefers_actor_then_turn_order() {
        let mut state = three_seats();
        state.players[PlayerId::new(0)].take_card(0);
        state.players[PlayerId::new(2)].take_card(0);
        state.deck.discard(card(0, Color::Red, Rank::One));
        state.deck.discard(card(2, Color::Red, Rank::One));

        assert!(state.settle_winner(PlayerId::new(1)));
        assert_eq!(state.winner, Some(PlayerId::new(2)));
        assert_eq!(state.phase(), TurnPhase::Terminal);
        assert!(state.integrity_check().is_ok());
    }
}
