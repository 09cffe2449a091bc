//! Property tests over random legal play.
//!
//! Matches are driven by intents picked from `legal_intents`; after every
//! step the committed state must keep its card count, pass the integrity
//! check, and refuse requests from anyone but the expected seat.

use proptest::prelude::*;
use proptest::sample::Index;

use rust_uno::cards::{Color, STANDARD_DECK_SIZE};
use rust_uno::core::{PlayerId, TurnPhase};
use rust_uno::cpu::legal_intents;
use rust_uno::engine::{Game, GameBuilder, Intent, RejectReason};

fn new_game(seats: usize, seed: u64, hand: usize) -> Game {
    let mut builder = GameBuilder::new().starting_hand_size(hand);
    for i in 0..seats {
        builder = builder.cpu(format!("Bot {i}"));
    }
    builder.build(seed).unwrap()
}

/// The seat after `actor` by index, ignoring direction.
fn bystander(game: &Game, actor: PlayerId) -> PlayerId {
    let n = game.state().player_count() as u8;
    PlayerId((actor.0 + 1) % n)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_random_play_keeps_invariants(
        seats in 2usize..=8,
        seed in any::<u64>(),
        hand in 1usize..=7,
        choices in prop::collection::vec(any::<Index>(), 0..150),
    ) {
        let mut game = new_game(seats, seed, hand);

        for choice in &choices {
            let Some(actor) = game.expected_actor() else {
                break;
            };
            let intents = legal_intents(game.state(), game.catalog(), actor);
            prop_assert!(!intents.is_empty());
            let intent = choice.get(&intents).clone();

            let result = game.apply(actor, intent.clone());
            prop_assert!(
                result.is_ok(),
                "{:?} refused: {:?}",
                intent,
                result.err().map(|r| r.reason)
            );

            let state = game.state();
            prop_assert!(game.halted().is_none());
            prop_assert_eq!(state.cards_in_play(), STANDARD_DECK_SIZE);
            prop_assert!(state.integrity_check().is_ok());
            if state.active_wild_color.is_some() {
                prop_assert!(state.top_discard().is_some_and(|c| c.is_wild()));
            }
            if state.game_over {
                prop_assert_eq!(game.phase(), TurnPhase::Terminal);
                prop_assert!(state.pending.is_none());
                let winner = state.winner.unwrap();
                prop_assert!(state.players[winner].has_empty_hand());
            }
        }
    }

    /// Only the expected seat may act; everyone else is refused without a
    /// state change.
    #[test]
    fn prop_only_expected_actor_moves(
        seats in 2usize..=6,
        seed in any::<u64>(),
        choices in prop::collection::vec(any::<Index>(), 0..60),
    ) {
        let mut game = new_game(seats, seed, 5);

        for choice in &choices {
            let Some(actor) = game.expected_actor() else {
                break;
            };
            let other = bystander(&game, actor);
            let before = game.state_view();

            let err = game.draw_card(other).unwrap_err();
            let expected_refusal = matches!(
                err.reason,
                RejectReason::NotYourTurn { .. } | RejectReason::PendingActionOpen { .. }
            );
            prop_assert!(expected_refusal);
            prop_assert!(legal_intents(game.state(), game.catalog(), other).is_empty());
            prop_assert_eq!(game.state_view(), before);

            let intents = legal_intents(game.state(), game.catalog(), actor);
            let intent = choice.get(&intents).clone();
            prop_assert!(game.apply(actor, intent).is_ok());
        }
    }

    /// A card that does not match is refused with `IllegalCard` and nothing
    /// changes.
    #[test]
    fn prop_illegal_cards_refused(
        seats in 2usize..=4,
        seed in any::<u64>(),
        choices in prop::collection::vec(any::<Index>(), 0..40),
    ) {
        let mut game = new_game(seats, seed, 7);

        for choice in &choices {
            let Some(actor) = game.expected_actor() else {
                break;
            };
            if game.phase() == TurnPhase::AwaitingAction {
                let state = game.state();
                let top = *state.top_discard().unwrap();
                let active = state.active_wild_color;
                let illegal = state.players[actor]
                    .hand
                    .iter()
                    .position(|c| !c.matches(&top, active));
                if let Some(index) = illegal {
                    let before = game.state_view();
                    let err = game.play_card(actor, index, Some(Color::Red)).unwrap_err();
                    let is_illegal = matches!(err.reason, RejectReason::IllegalCard { .. });
                    prop_assert!(is_illegal);
                    prop_assert_eq!(game.state_view(), before);
                }
            }

            let intents = legal_intents(game.state(), game.catalog(), actor);
            let intent = choice.get(&intents).clone();
            prop_assert!(game.apply(actor, intent).is_ok());
        }
    }

    /// Same seed and same intents replay to the same match.
    #[test]
    fn prop_seeded_replay_is_deterministic(
        seed in any::<u64>(),
        choices in prop::collection::vec(any::<Index>(), 0..80),
    ) {
        let mut a = new_game(3, seed, 7);
        let mut b = new_game(3, seed, 7);

        for choice in &choices {
            let Some(actor) = a.expected_actor() else {
                break;
            };
            let intents: Vec<Intent> = legal_intents(a.state(), a.catalog(), actor);
            let intent = choice.get(&intents).clone();
            prop_assert!(a.apply(actor, intent.clone()).is_ok());
            prop_assert!(b.apply(actor, intent).is_ok());
        }
        prop_assert_eq!(a.state_view(), b.state_view());

        let restored = Game::restore(&a.checkpoint().unwrap()).unwrap();
        prop_assert_eq!(restored.state_view(), a.state_view());
    }
}
