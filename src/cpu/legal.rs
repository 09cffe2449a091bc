//! Enumeration of the intents a seat may submit right now.

use crate::cards::Color;
use crate::core::{GameState, PlayerId};
use crate::economy::Catalog;
use crate::engine::Intent;
use crate::pending::{PendingInput, PendingKind, SwapPhase};

/// Upper bound on the discard combinations offered for one FORCED_DISCARD.
pub const MAX_DISCARD_CHOICES: usize = 256;

/// Every intent `player` may submit in `state` that the engine would accept.
///
/// With a pending action open only its actor has intents, all of them
/// answers to that action. Otherwise the current player may play any
/// matching card, draw, or buy whatever they can afford. A wild card is
/// offered once per colour and once without a colour.
#[must_use]
pub fn legal_intents(state: &GameState, catalog: &Catalog, player: PlayerId) -> Vec<Intent> {
    if state.game_over || !state.contains(player) {
        return Vec::new();
    }
    if let Some(pending) = &state.pending {
        if pending.actor() != player {
            return Vec::new();
        }
        return pending_inputs(state, &pending.kind)
            .into_iter()
            .map(Intent::Respond)
            .collect();
    }
    if player != state.current {
        return Vec::new();
    }

    let me = &state.players[player];
    let mut intents = Vec::new();

    let playable = match state.top_discard() {
        Some(top) => me.playable_indices(top, state.active_wild_color),
        None => (0..me.hand_size()).collect(),
    };
    for card_index in playable {
        let Some(card) = me.card(card_index) else {
            continue;
        };
        intents.push(Intent::Play {
            card_index,
            color: None,
        });
        if card.is_wild() {
            intents.extend(Color::PLAYABLE.iter().map(|&c| Intent::Play {
                card_index,
                color: Some(c),
            }));
        }
    }

    intents.push(Intent::Draw);

    for entry in catalog.entries() {
        if !entry.affordable(&me.ledger) || !entry.has_effect(state) {
            continue;
        }
        if entry.targeted {
            intents.extend(
                state
                    .players
                    .player_ids()
                    .filter(|&seat| seat != player)
                    .map(|seat| Intent::Purchase {
                        item: entry.id,
                        target: Some(seat),
                    }),
            );
        } else {
            intents.push(Intent::Purchase {
                item: entry.id,
                target: None,
            });
        }
    }

    intents
}

fn pending_inputs(state: &GameState, kind: &PendingKind) -> Vec<PendingInput> {
    match *kind {
        PendingKind::ChooseColor { .. } => Color::PLAYABLE
            .iter()
            .map(|&c| PendingInput::Color(c))
            .collect(),
        PendingKind::SwapWithNeighbor { actor, neighbor } => swap_inputs(state, actor, neighbor),
        PendingKind::SwapWithChosen {
            actor,
            phase: SwapPhase::SelectTarget,
        } => state
            .players
            .player_ids()
            .filter(|&seat| seat != actor)
            .map(PendingInput::Target)
            .collect(),
        PendingKind::SwapWithChosen {
            actor,
            phase: SwapPhase::SelectCards { target },
        } => swap_inputs(state, actor, target),
        PendingKind::ForcedDiscard { target, count, .. } => {
            combinations(state.players[target].hand_size(), count, MAX_DISCARD_CHOICES)
                .into_iter()
                .map(PendingInput::Discard)
                .collect()
        }
        PendingKind::PlayExtraThenDraw { actor } => {
            let mut inputs = Vec::new();
            for (card_index, card) in state.players[actor].hand.iter().enumerate() {
                if card.is_wild() {
                    inputs.extend(Color::PLAYABLE.iter().map(|&c| PendingInput::PlayExtra {
                        card_index,
                        color: Some(c),
                    }));
                } else {
                    inputs.push(PendingInput::PlayExtra {
                        card_index,
                        color: None,
                    });
                }
            }
            inputs
        }
    }
}

fn swap_inputs(state: &GameState, actor: PlayerId, partner: PlayerId) -> Vec<PendingInput> {
    let give_count = state.players[actor].hand_size();
    let take_count = state.players[partner].hand_size();
    (0..give_count)
        .flat_map(|give| (0..take_count).map(move |take| PendingInput::Swap { give, take }))
        .collect()
}

/// Up to `limit` ascending `k`-subsets of `0..n`, in lexicographic order.
fn combinations(n: usize, k: usize, limit: usize) -> Vec<Vec<usize>> {
    if k > n {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut current: Vec<usize> = (0..k).collect();
    loop {
        out.push(current.clone());
        if out.len() >= limit {
            return out;
        }
        // Rightmost position that can still move up.
        let Some(i) = (0..k).rev().find(|&i| current[i] < n - k + i) else {
            return out;
        };
        current[i] += 1;
        for j in i + 1..k {
            current[j] = current[j - 1] + 1;
        }
    }
}
