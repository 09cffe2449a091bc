//! The match: authoritative state behind a transactional API.
//!
//! ## Transactions
//!
//! Every operation clones the state (cheap, hands and piles are persistent
//! vectors), applies the request to the clone, checks the clone's integrity
//! and only then commits it. A refused request leaves the state untouched and
//! returns a `Rejection` carrying the caller's view.
//!
//! ## Halting
//!
//! A candidate state that fails the integrity check is discarded, logged at
//! `error` level and stored. From then on every operation is refused with
//! `MatchHalted`.

use tracing::{debug, error, instrument};

use super::{turn, CheckpointError, Intent, InvariantViolation, RejectReason, Rejection, StateView};
use crate::cards::Color;
use crate::core::{ActorType, GameState, PlayerId, TurnPhase};
use crate::economy::{Catalog, CatalogId};
use crate::pending::PendingInput;

/// Result of an operation: the caller's view of the committed state, or why
/// nothing changed.
pub type Outcome = Result<StateView, Rejection>;

#[derive(Clone, Debug)]
pub struct Game {
    state: GameState,
    catalog: Catalog,
    halted: Option<InvariantViolation>,
}

impl Game {
    pub(crate) fn new(state: GameState, catalog: Catalog) -> Self {
        Self {
            state,
            catalog,
            halted: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.state.phase()
    }

    /// The violation that halted the match, if any.
    #[must_use]
    pub fn halted(&self) -> Option<&InvariantViolation> {
        self.halted.as_ref()
    }

    /// The player the engine is waiting on: the pending actor if an action is
    /// open, otherwise the current player. `None` once the match is over.
    #[must_use]
    pub fn expected_actor(&self) -> Option<PlayerId> {
        match self.state.phase() {
            TurnPhase::Terminal => None,
            TurnPhase::AwaitingPendingInput => self.state.pending.as_ref().map(|p| p.actor()),
            TurnPhase::AwaitingAction => Some(self.state.current),
        }
    }

    /// Play the card at `card_index` from `player`'s hand.
    ///
    /// `chosen_color` is read for wild cards only. A wild played without one
    /// opens a CHOOSE_COLOR pending action.
    #[instrument(level = "debug", skip(self))]
    pub fn play_card(
        &mut self,
        player: PlayerId,
        card_index: usize,
        chosen_color: Option<Color>,
    ) -> Outcome {
        self.transact(player, |state, _| {
            turn::play_card(state, player, card_index, chosen_color)
        })
    }

    /// Draw one card and end the turn.
    #[instrument(level = "debug", skip(self))]
    pub fn draw_card(&mut self, player: PlayerId) -> Outcome {
        self.transact(player, |state, _| turn::draw_card(state, player))
    }

    /// Answer the open pending action.
    #[instrument(level = "debug", skip(self))]
    pub fn provide_pending_input(&mut self, player: PlayerId, input: PendingInput) -> Outcome {
        self.transact(player, |state, _| turn::respond(state, player, input))
    }

    /// Buy a catalog entry. Never ends the turn.
    #[instrument(level = "debug", skip(self))]
    pub fn purchase(
        &mut self,
        player: PlayerId,
        item: CatalogId,
        target: Option<PlayerId>,
    ) -> Outcome {
        self.transact(player, |state, catalog| {
            turn::purchase(state, catalog, player, item, target)
        })
    }

    /// Dispatch an intent to the matching operation.
    pub fn apply(&mut self, player: PlayerId, intent: Intent) -> Outcome {
        match intent {
            Intent::Play { card_index, color } => self.play_card(player, card_index, color),
            Intent::Draw => self.draw_card(player),
            Intent::Respond(input) => self.provide_pending_input(player, input),
            Intent::Purchase { item, target } => self.purchase(player, item, target),
        }
    }

    /// Snapshot with every human player's hand revealed.
    #[must_use]
    pub fn state_view(&self) -> StateView {
        StateView::build(&self.state, |p| p.actor == ActorType::Human)
    }

    /// Snapshot as `viewer` sees it: only their own hand is revealed.
    #[must_use]
    pub fn state_view_for(&self, viewer: PlayerId) -> StateView {
        StateView::build(&self.state, |p| p.id == viewer)
    }

    /// Serialize the full state.
    ///
    /// ```
    /// use rust_uno::engine::{Game, GameBuilder};
    ///
    /// let game = GameBuilder::new().human("Ada").cpu("Bot").build(11).unwrap();
    /// let bytes = game.checkpoint().unwrap();
    /// let restored = Game::restore(&bytes).unwrap();
    /// assert_eq!(restored.state_view(), game.state_view());
    /// ```
    pub fn checkpoint(&self) -> Result<Vec<u8>, CheckpointError> {
        Ok(bincode::serialize(&self.state)?)
    }

    /// Rebuild a match from a checkpoint, refusing inconsistent states.
    pub fn restore(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let state: GameState = bincode::deserialize(bytes)?;
        state.integrity_check()?;
        Ok(Self::new(state, Catalog::standard()))
    }

    fn reject(&self, viewer: PlayerId, reason: RejectReason) -> Rejection {
        Rejection {
            reason,
            view: Box::new(self.state_view_for(viewer)),
        }
    }

    fn transact(
        &mut self,
        player: PlayerId,
        op: impl FnOnce(&mut GameState, &Catalog) -> Result<(), RejectReason>,
    ) -> Outcome {
        if self.state.game_over {
            return Err(self.reject(player, RejectReason::GameOver));
        }
        if let Some(violation) = &self.halted {
            let reason = RejectReason::MatchHalted {
                violation: violation.clone(),
            };
            return Err(self.reject(player, reason));
        }

        let mut candidate = self.state.clone();
        if let Err(reason) = op(&mut candidate, &self.catalog) {
            debug!(%player, %reason, "operation rejected");
            return Err(self.reject(player, reason));
        }

        if let Err(violation) = candidate.integrity_check() {
            error!(%player, %violation, "integrity check failed; halting match");
            self.halted = Some(violation.clone());
            return Err(self.reject(player, RejectReason::MatchHalted { violation }));
        }

        self.state = candidate;
        Ok(self.state_view_for(player))
    }

    /// Raw state access for corrupting a match in tests.
    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Rank;
    use crate::effects::Effect;
    use crate::engine::{GameBuilder, PresetDeal};

    const P0: PlayerId = PlayerId(0);
    const P1: PlayerId = PlayerId(1);

    fn preset(hands: Vec<Vec<(Color, Rank)>>, top: (Color, Rank)) -> Game {
        GameBuilder::new()
            .human("Ada")
            .cpu("Bot")
            .build_preset(
                PresetDeal::new(hands, top).draw_pile(vec![(Color::Blue, Rank::Nine); 5]),
                1,
            )
            .unwrap()
    }

    #[test]
    fn test_commit_returns_actor_view() {
        let mut game = preset(
            vec![
                vec![(Color::Red, Rank::Five), (Color::Red, Rank::One)],
                vec![(Color::Green, Rank::Five)],
            ],
            (Color::Red, Rank::Three),
        );

        let view = game.play_card(P0, 0, None).unwrap();
        assert_eq!(view.current_player_id, P1);
        assert!(view.players[0].hand.is_some());
        assert!(view.players[1].hand.is_none());
        assert_eq!(view.players[0].solar_mana, 1);
    }

    #[test]
    fn test_rejection_leaves_state_untouched() {
        let mut game = preset(
            vec![vec![(Color::Blue, Rank::Skip)], vec![(Color::Green, Rank::Five)]],
            (Color::Red, Rank::Three),
        );
        let before = game.state_view();

        let err = game.play_card(P0, 0, None).unwrap_err();
        assert!(matches!(err.reason, RejectReason::IllegalCard { .. }));
        assert_eq!(game.state_view(), before);
        assert_eq!(*err.view, game.state_view_for(P0));
    }

    #[test]
    fn test_corrupt_state_halts_match() {
        let mut game = preset(
            vec![
                vec![(Color::Red, Rank::Five), (Color::Red, Rank::One)],
                vec![(Color::Green, Rank::Five), (Color::Green, Rank::Six)],
            ],
            (Color::Red, Rank::Three),
        );
        game.state_mut().players[P1].take_card(0);

        let err = game.play_card(P0, 0, None).unwrap_err();
        assert!(matches!(err.reason, RejectReason::MatchHalted { .. }));
        assert!(game.halted().is_some());
        assert_eq!(game.state().players[P0].hand_size(), 2);

        let err = game.draw_card(P0).unwrap_err();
        assert!(matches!(err.reason, RejectReason::MatchHalted { .. }));
    }

    #[test]
    fn test_expected_actor_follows_pending() {
        let mut game = preset(
            vec![
                vec![(Color::Wild, Rank::Wild), (Color::Red, Rank::One)],
                vec![(Color::Green, Rank::Five)],
            ],
            (Color::Red, Rank::Three),
        );
        assert_eq!(game.expected_actor(), Some(P0));

        game.play_card(P0, 0, None).unwrap();
        assert_eq!(game.phase(), TurnPhase::AwaitingPendingInput);
        assert_eq!(game.expected_actor(), Some(P0));
    }

    #[test]
    fn test_restore_refuses_corrupt_checkpoint() {
        let mut game = preset(
            vec![vec![(Color::Red, Rank::Five)], vec![(Color::Green, Rank::Five)]],
            (Color::Red, Rank::Three),
        );
        game.state_mut().players[P1].take_card(0);
        let bytes = game.checkpoint().unwrap();

        assert!(matches!(
            Game::restore(&bytes),
            Err(CheckpointError::Corrupt(InvariantViolation::CardCount { .. }))
        ));
        assert!(matches!(
            Game::restore(&bytes[..3]),
            Err(CheckpointError::Codec(_))
        ));
    }

    #[test]
    fn test_restore_refuses_unknown_seat_in_pending_effects() {
        let mut game = preset(
            vec![
                vec![(Color::Wild, Rank::WildDrawFour), (Color::Red, Rank::One)],
                vec![(Color::Green, Rank::Five)],
            ],
            (Color::Red, Rank::Three),
        );
        game.play_card(P0, 0, None).unwrap();
        if let Some(pending) = game.state_mut().pending.as_mut() {
            pending.continuation.remaining.push(Effect::Draw {
                target: PlayerId(9),
                count: 1,
            });
        }
        let bytes = game.checkpoint().unwrap();

        assert!(matches!(
            Game::restore(&bytes),
            Err(CheckpointError::Corrupt(InvariantViolation::UnknownSeat { seat: PlayerId(9) }))
        ));
    }
}
