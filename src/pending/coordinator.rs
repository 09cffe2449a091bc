//! Pending action coordination.
//!
//! `Coordinator::accept` validates an input against the open pending action,
//! applies it, and reports whether the action moved to its next step or
//! closed. A closed action hands back the effects still to apply so the engine
//! can finish the interrupted resolution.
//!
//! ## Flows
//!
//! | Pending              | Input                    | Result                         |
//! |----------------------|--------------------------|--------------------------------|
//! | CHOOSE_COLOR         | `Color`                  | active colour set, closed      |
//! | SWAP_WITH_NEIGHBOR   | `Swap`                   | cards traded, closed           |
//! | SWAP_WITH_CHOSEN     | `Target`, then `Swap`    | partner fixed, then closed     |
//! | FORCED_DISCARD       | `Discard`                | cards buried, closed           |
//! | PLAY_EXTRA_THEN_DRAW | `PlayExtra`              | card played, draw one, closed  |
//!
//! The free play of a 6 may be any card in hand; matching is not enforced.

use tracing::debug;

use super::{Continuation, PendingAction, PendingInput, PendingKind, SwapPhase};
use crate::cards::Color;
use crate::core::{GameState, PlayerId};
use crate::effects::{ActionResolver, Effect};
use crate::engine::RejectReason;

/// Outcome of an accepted input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// The pending action moved to its next step and is still open.
    Advanced,
    /// The pending action closed. Apply `effects` for `actor`, then advance
    /// the turn if `ends_turn`.
    Closed {
        actor: PlayerId,
        effects: Vec<Effect>,
        skips: usize,
        ends_turn: bool,
    },
    /// A hand emptied and the match ended.
    GameOver,
}

pub struct Coordinator;

impl Coordinator {
    /// Validate and apply `input` from `player`.
    ///
    /// On error the state may be partially modified; callers work on a
    /// scratch copy.
    pub fn accept(
        state: &mut GameState,
        player: PlayerId,
        input: PendingInput,
    ) -> Result<Step, RejectReason> {
        let PendingAction { kind, continuation } =
            state.pending.clone().ok_or(RejectReason::NoPendingAction)?;
        let actor = kind.actor();
        if player != actor {
            return Err(RejectReason::WrongActor {
                expected: actor,
                actual: player,
            });
        }

        match (kind, input) {
            (PendingKind::ChooseColor { .. }, PendingInput::Color(color)) => {
                if color.is_wild() {
                    return Err(malformed("WILD is not a choosable colour"));
                }
                state.active_wild_color = Some(color);
                debug!(%actor, %color, "colour chosen");
                Ok(close(state, actor, continuation, Vec::new()))
            }

            (
                PendingKind::SwapWithNeighbor { neighbor, .. },
                PendingInput::Swap { give, take },
            ) => {
                swap(state, actor, neighbor, give, take)?;
                Ok(close(state, actor, continuation, Vec::new()))
            }

            (
                PendingKind::SwapWithChosen {
                    phase: SwapPhase::SelectTarget,
                    ..
                },
                PendingInput::Target(target),
            ) => {
                if target == actor {
                    return Err(malformed("cannot swap with yourself"));
                }
                if !state.contains(target) {
                    return Err(malformed(format!("no seat {}", target.0)));
                }
                state.pending = Some(PendingAction {
                    kind: PendingKind::SwapWithChosen {
                        actor,
                        phase: SwapPhase::SelectCards { target },
                    },
                    continuation,
                });
                debug!(%actor, %target, "swap partner chosen");
                Ok(Step::Advanced)
            }

            (
                PendingKind::SwapWithChosen {
                    phase: SwapPhase::SelectCards { target },
                    ..
                },
                PendingInput::Swap { give, take },
            ) => {
                swap(state, actor, target, give, take)?;
                Ok(close(state, actor, continuation, Vec::new()))
            }

            (
                PendingKind::ForcedDiscard { target, count, .. },
                PendingInput::Discard(indices),
            ) => {
                let mut indices = discard_indices(indices, count, state.players[target].hand_size())?;
                indices.sort_unstable_by(|a, b| b.cmp(a));
                for index in indices {
                    if let Some(card) = state.players[target].take_card(index) {
                        state.deck.bury(card);
                    }
                }
                debug!(chooser = %actor, %target, count, "forced discard applied");
                if state.settle_winner(actor) {
                    return Ok(Step::GameOver);
                }
                Ok(close(state, actor, continuation, Vec::new()))
            }

            (
                PendingKind::PlayExtraThenDraw { .. },
                PendingInput::PlayExtra { card_index, color },
            ) => play_extra(state, actor, continuation, card_index, color),

            (kind, input) => Err(malformed(format!(
                "{} cannot answer {}",
                input_name(&input),
                kind.tag()
            ))),
        }
    }
}

fn malformed(detail: impl Into<String>) -> RejectReason {
    RejectReason::MalformedInput {
        detail: detail.into(),
    }
}

fn input_name(input: &PendingInput) -> &'static str {
    match input {
        PendingInput::Color(_) => "color",
        PendingInput::Target(_) => "target",
        PendingInput::Swap { .. } => "swap",
        PendingInput::Discard(_) => "discard",
        PendingInput::PlayExtra { .. } => "playExtra",
    }
}

fn close(
    state: &mut GameState,
    actor: PlayerId,
    continuation: Continuation,
    mut effects: Vec<Effect>,
) -> Step {
    state.pending = None;
    effects.extend(continuation.remaining);
    Step::Closed {
        actor,
        effects,
        skips: continuation.skips,
        ends_turn: continuation.ends_turn,
    }
}

fn swap(
    state: &mut GameState,
    actor: PlayerId,
    partner: PlayerId,
    give: usize,
    take: usize,
) -> Result<(), RejectReason> {
    let given = *state.players[actor]
        .card(give)
        .ok_or_else(|| malformed(format!("no card at index {give} in your hand")))?;
    let taken = *state.players[partner]
        .card(take)
        .ok_or_else(|| malformed(format!("no card at index {take} in {partner}'s hand")))?;

    state.players[actor].hand.set(give, taken);
    state.players[partner].hand.set(take, given);
    debug!(%actor, %partner, gave = %given, took = %taken, "cards swapped");
    Ok(())
}

/// Check that `indices` names exactly `count` distinct cards of a hand of
/// `hand_size`.
fn discard_indices(
    indices: Vec<usize>,
    count: usize,
    hand_size: usize,
) -> Result<Vec<usize>, RejectReason> {
    if indices.len() != count {
        return Err(malformed(format!(
            "expected {count} card indices, got {}",
            indices.len()
        )));
    }
    if let Some(&bad) = indices.iter().find(|&&i| i >= hand_size) {
        return Err(malformed(format!("no card at index {bad}")));
    }
    let mut sorted = indices.clone();
    sorted.sort_unstable();
    sorted.dedup();
    if sorted.len() != indices.len() {
        return Err(malformed("card indices must be distinct"));
    }
    Ok(indices)
}

fn play_extra(
    state: &mut GameState,
    actor: PlayerId,
    continuation: Continuation,
    card_index: usize,
    color: Option<Color>,
) -> Result<Step, RejectReason> {
    let card = *state.players[actor]
        .card(card_index)
        .ok_or_else(|| malformed(format!("no card at index {card_index}")))?;

    let color = if card.is_wild() {
        match color {
            None => return Err(malformed("a wild free play needs a colour")),
            Some(c) if c.is_wild() => return Err(malformed("WILD is not a choosable colour")),
            Some(c) => Some(c),
        }
    } else {
        None
    };

    let Some(played) = state.players[actor].take_card(card_index) else {
        return Err(malformed(format!("no card at index {card_index}")));
    };
    state.deck.discard(played);
    state.active_wild_color = None;
    debug!(%actor, card = %played, "free play");

    if state.settle_winner(actor) {
        return Ok(Step::GameOver);
    }

    let mut effects = ActionResolver::resolve_free_play(&played, actor, state, color).into_vec();
    effects.push(Effect::Draw {
        target: actor,
        count: 1,
    });
    Ok(close(state, actor, continuation, effects))
}
