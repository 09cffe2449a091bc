//! State view integration tests.
//!
//! The JSON the presentation layer reads, and which hands each audience may
//! see.

use serde_json::json;

use rust_uno::cards::{Color, Rank};
use rust_uno::core::{PlayerId, TurnPhase};
use rust_uno::engine::{Game, GameBuilder, PresetDeal, StateView};

const P0: PlayerId = PlayerId(0);
const P1: PlayerId = PlayerId(1);

fn game() -> Game {
    GameBuilder::new()
        .human("Ada")
        .cpu("Bot")
        .human("Cy")
        .build_preset(
            PresetDeal::new(
                vec![
                    vec![(Color::Wild, Rank::Wild), (Color::Red, Rank::One)],
                    vec![(Color::Green, Rank::Five)],
                    vec![(Color::Blue, Rank::DrawTwo)],
                ],
                (Color::Red, Rank::Nine),
            )
            .draw_pile(vec![(Color::Yellow, Rank::Zero); 3]),
            4,
        )
        .unwrap()
}

/// Test that the default view reveals human hands only and the per-seat
/// view reveals the viewer's hand only.
#[test]
fn test_hand_visibility() {
    let game = game();

    let view = game.state_view();
    assert!(view.players[0].hand.is_some());
    assert!(view.players[1].hand.is_none());
    assert!(view.players[2].hand.is_some());
    assert_eq!(view.players[1].card_count, 1);

    let view = game.state_view_for(P1);
    assert!(view.players[0].hand.is_none());
    assert!(view.players[1].hand.is_some());
    assert!(view.players[2].hand.is_none());
}

#[test]
fn test_initial_view_json() {
    let json = serde_json::to_value(game().state_view_for(P0)).unwrap();

    assert_eq!(json["currentPlayerId"], 0);
    assert_eq!(json["direction"], 1);
    assert_eq!(json["turnNumber"], 0);
    assert_eq!(json["drawPileCount"], 3);
    assert_eq!(json["discardPileCount"], 1);
    assert_eq!(json["gameOver"], false);
    assert_eq!(json["winner"], serde_json::Value::Null);
    assert_eq!(json["pendingAction"], serde_json::Value::Null);
    assert_eq!(json["phase"], "AWAITING_ACTION");
    assert_eq!(
        json["topDiscard"],
        json!({"id": 4, "color": "RED", "rank": "NINE", "label": "RED 9"})
    );
    assert_eq!(
        json["players"][0]["hand"][0],
        json!({"id": 0, "color": "WILD", "rank": "WILD", "label": "WILD"})
    );
    assert_eq!(json["players"][1]["actorType"], "CPU");
    assert_eq!(json["players"][1]["hand"], serde_json::Value::Null);
    assert_eq!(json["players"][0]["coins"], 0);
    assert_eq!(json["players"][0]["solarMana"], 0);
}

/// Test the pending action fields while a colour choice is open.
#[test]
fn test_pending_view_json() {
    let mut game = game();
    let view = game.play_card(P0, 0, None).unwrap();
    assert_eq!(view.phase, TurnPhase::AwaitingPendingInput);

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["pendingAction"], "CHOOSE_COLOR");
    assert_eq!(json["actionData"]["actor"], 0);
    assert_eq!(json["actionData"]["target"], serde_json::Value::Null);
    assert_eq!(json["phase"], "AWAITING_PENDING_INPUT");
}

/// Test that a view survives a JSON round trip unchanged.
#[test]
fn test_view_round_trip() {
    let mut game = game();
    game.play_card(P0, 1, None).unwrap();

    let view = game.state_view();
    let text = serde_json::to_string(&view).unwrap();
    let back: StateView = serde_json::from_str(&text).unwrap();
    assert_eq!(back, view);
    assert_eq!(back.players[0].solar_mana, 1);
    assert_eq!(back.current_player_id, P1);
}

/// Test the shape of a rejection reason.
#[test]
fn test_rejection_json() {
    let mut game = game();
    let err = game.play_card(P1, 0, None).unwrap_err();

    let json = serde_json::to_value(&err.reason).unwrap();
    assert_eq!(json, json!({"reason": "notYourTurn", "expected": 0, "actual": 1}));
    assert_eq!(err.to_string(), "it is Player 0's turn, not Player 1's");
    assert_eq!(err.view.current_player_id, P0);
}
