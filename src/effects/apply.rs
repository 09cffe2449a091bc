//! Effect application.
//!
//! `apply_effects` walks an effect list in order. Effects that need player
//! input open a pending action carrying the rest of the list, and application
//! stops there; the coordinator resumes it once the input arrives.

use tracing::debug;

use super::Effect;
use crate::core::{GameState, PlayerId};
use crate::pending::{Continuation, PendingAction, PendingKind, SwapPhase};

/// How far an effect list got.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Every effect applied. `skips` counts the SKIP effects seen.
    Complete { skips: usize },
    /// A pending action is now open.
    Suspended,
    /// A hand emptied and the match ended.
    GameOver,
}

/// Apply `effects` for `actor`, carrying `skips` already counted.
///
/// `ends_turn` is recorded on any pending action that opens so the turn
/// advances once it is answered.
pub fn apply_effects(
    state: &mut GameState,
    actor: PlayerId,
    effects: impl IntoIterator<Item = Effect>,
    mut skips: usize,
    ends_turn: bool,
) -> Resolution {
    let mut effects = effects.into_iter();
    while let Some(effect) = effects.next() {
        if effect.needs_input() {
            if let Some(kind) = pending_kind(state, &effect) {
                debug!(kind = %kind.tag(), actor = %kind.actor(), "pending action opened");
                state.pending = Some(PendingAction {
                    kind,
                    continuation: Continuation {
                        remaining: effects.by_ref().collect(),
                        skips,
                        ends_turn,
                    },
                });
                return Resolution::Suspended;
            }
            continue;
        }

        match effect {
            Effect::Gain {
                player,
                resource,
                amount,
            } => state.players[player].ledger.credit(resource, amount),
            Effect::SetColor { color } => state.active_wild_color = Some(color),
            Effect::ForceDraw { target, count } => force_draw(state, target, count),
            Effect::Draw { target, count } => {
                let drawn = state.deck.draw(count, &mut state.rng);
                state.players[target].add_cards(drawn);
            }
            Effect::SkipNext => skips += 1,
            Effect::Reverse => state.direction = state.direction.flipped(),
            Effect::DiscardRandom { target } => {
                let hand = state.players[target].hand_size();
                if hand > 0 {
                    let index = state.rng.gen_range_usize(0..hand);
                    if let Some(card) = state.players[target].take_card(index) {
                        debug!(%target, card = %card, "random discard");
                        state.deck.bury(card);
                    }
                    if state.settle_winner(actor) {
                        return Resolution::GameOver;
                    }
                }
            }
            Effect::GrantSkipProtection { player } => {
                state.players[player].ledger.skip_protection = true;
            }
            Effect::GrantLuckyCharm { player } => state.players[player].ledger.lucky_charms += 1,
            Effect::RecycleDiscard => {
                state.deck.recycle(&mut state.rng);
            }
            Effect::ChooseColor { .. }
            | Effect::ForcedDiscard { .. }
            | Effect::PlayExtraThenDraw { .. }
            | Effect::SwapWithNeighbor { .. }
            | Effect::SwapWithChosen { .. } => {}
        }
    }
    Resolution::Complete { skips }
}

fn force_draw(state: &mut GameState, target: PlayerId, count: usize) {
    let ledger = &mut state.players[target].ledger;
    if ledger.take_skip_protection() {
        debug!(%target, count, "skip protection absorbed forced draw");
        return;
    }
    let count = if ledger.take_lucky_charm() {
        debug!(%target, "lucky charm softened forced draw");
        count.saturating_sub(1)
    } else {
        count
    };
    let drawn = state.deck.draw(count, &mut state.rng);
    state.players[target].add_cards(drawn);
}

/// Pending record for an input-needing effect, or `None` when nothing is
/// left to decide.
fn pending_kind(state: &GameState, effect: &Effect) -> Option<PendingKind> {
    match *effect {
        Effect::ChooseColor { player } => Some(PendingKind::ChooseColor { actor: player }),
        Effect::ForcedDiscard {
            chooser,
            target,
            count,
        } => {
            let count = count.min(state.players[target].hand_size());
            (count > 0).then_some(PendingKind::ForcedDiscard {
                chooser,
                target,
                count,
            })
        }
        Effect::PlayExtraThenDraw { player } => {
            Some(PendingKind::PlayExtraThenDraw { actor: player })
        }
        Effect::SwapWithNeighbor { player, neighbor } => Some(PendingKind::SwapWithNeighbor {
            actor: player,
            neighbor,
        }),
        Effect::SwapWithChosen { player, target } => Some(PendingKind::SwapWithChosen {
            actor: player,
            phase: match target {
                Some(target) => SwapPhase::SelectCards { target },
                None => SwapPhase::SelectTarget,
            },
        }),
        _ => None,
    }
}
