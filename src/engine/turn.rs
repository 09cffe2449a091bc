//! Turn operations on a scratch state.
//!
//! Each function validates its request, then mutates `state` in place. The
//! caller owns the transaction: it hands in a clone and commits only on `Ok`
//! and a clean integrity check.

use tracing::{debug, info};

use super::RejectReason;
use crate::cards::Color;
use crate::core::{GameState, PlayerId};
use crate::economy::{Catalog, CatalogId};
use crate::effects::{apply_effects, ActionResolver, Resolution};
use crate::pending::{Coordinator, PendingInput, Step};

fn malformed(detail: impl Into<String>) -> RejectReason {
    RejectReason::MalformedInput {
        detail: detail.into(),
    }
}

/// Refuse anything but the current player acting with no pending action open.
fn guard_turn(state: &GameState, player: PlayerId) -> Result<(), RejectReason> {
    if state.game_over {
        return Err(RejectReason::GameOver);
    }
    if let Some(pending) = &state.pending {
        return Err(RejectReason::PendingActionOpen {
            kind: pending.kind.tag(),
            actor: pending.actor(),
        });
    }
    if player != state.current {
        return Err(RejectReason::NotYourTurn {
            expected: state.current,
            actual: player,
        });
    }
    Ok(())
}

fn finish(state: &mut GameState, resolution: Resolution, ends_turn: bool) {
    if let Resolution::Complete { skips } = resolution {
        if ends_turn {
            state.advance_turn(1 + skips);
        }
    }
}

pub(crate) fn play_card(
    state: &mut GameState,
    player: PlayerId,
    card_index: usize,
    chosen_color: Option<Color>,
) -> Result<(), RejectReason> {
    guard_turn(state, player)?;

    let card = *state.players[player]
        .card(card_index)
        .ok_or_else(|| malformed(format!("no card at index {card_index}")))?;
    if chosen_color.is_some_and(Color::is_wild) {
        return Err(malformed("WILD is not a choosable colour"));
    }
    if let Some(top) = state.top_discard() {
        if !card.matches(top, state.active_wild_color) {
            return Err(RejectReason::IllegalCard {
                card,
                top: *top,
                active_wild_color: state.active_wild_color,
            });
        }
    }
    let chosen_color = if card.is_wild() { chosen_color } else { None };

    let Some(played) = state.players[player].take_card(card_index) else {
        return Err(malformed(format!("no card at index {card_index}")));
    };
    state.deck.discard(played);
    state.active_wild_color = None;
    debug!(%player, card = %played, "card played");

    if state.settle_winner(player) {
        return Ok(());
    }

    let effects = ActionResolver::resolve(&played, player, state, chosen_color);
    let resolution = apply_effects(state, player, effects, 0, true);
    finish(state, resolution, true);
    Ok(())
}

pub(crate) fn draw_card(state: &mut GameState, player: PlayerId) -> Result<(), RejectReason> {
    guard_turn(state, player)?;

    match state.deck.draw_one(&mut state.rng) {
        Some(card) => {
            debug!(%player, card = %card, "card drawn");
            state.players[player].add_card(card);
        }
        None => debug!(%player, "no card available to draw"),
    }
    state.advance_turn(1);
    Ok(())
}

pub(crate) fn respond(
    state: &mut GameState,
    player: PlayerId,
    input: PendingInput,
) -> Result<(), RejectReason> {
    if state.game_over {
        return Err(RejectReason::GameOver);
    }

    match Coordinator::accept(state, player, input)? {
        Step::Advanced | Step::GameOver => {}
        Step::Closed {
            actor,
            effects,
            skips,
            ends_turn,
        } => {
            let resolution = apply_effects(state, actor, effects, skips, ends_turn);
            finish(state, resolution, ends_turn);
        }
    }
    Ok(())
}

pub(crate) fn purchase(
    state: &mut GameState,
    catalog: &Catalog,
    player: PlayerId,
    item: CatalogId,
    target: Option<PlayerId>,
) -> Result<(), RejectReason> {
    guard_turn(state, player)?;

    let entry = catalog
        .get(item)
        .ok_or_else(|| malformed(format!("{item} is not for sale")))?;
    let target = if entry.targeted {
        let target = target.ok_or_else(|| malformed(format!("{item} needs a target")))?;
        if target == player {
            return Err(malformed(format!("{item} cannot target yourself")));
        }
        if !state.contains(target) {
            return Err(malformed(format!("no seat {}", target.0)));
        }
        Some(target)
    } else {
        None
    };
    let effects = entry
        .effects(player, target)
        .ok_or_else(|| malformed(format!("{item} needs a target")))?;
    if !entry.has_effect(state) {
        return Err(malformed(format!("{item} would have no effect")));
    }

    state.players[player]
        .ledger
        .debit(entry.resource, entry.cost)
        .map_err(|shortfall| RejectReason::InsufficientResource { shortfall })?;
    info!(%player, %item, cost = entry.cost, resource = %entry.resource, "purchase");

    let resolution = apply_effects(state, player, effects, 0, false);
    finish(state, resolution, false);
    Ok(())
}
