//! Card play resolution.
//!
//! `ActionResolver` turns a played card into the ordered effect list it
//! triggers. It reads the state to fix targets but never mutates it; applying
//! the list is `apply_effects`' job.
//!
//! ## Order
//!
//! 1. Colour award (when enabled and the card is coloured)
//! 2. Standard effects (SKIP, REVERSE, DRAW_TWO, WILD, WILD_DRAW_FOUR)
//! 3. Custom effects (3, 6, 7)

use smallvec::smallvec;

use super::{Effect, EffectList};
use crate::cards::{Card, Color, Rank};
use crate::core::{GameState, PlayerId, Resource, SevenSwap};

pub struct ActionResolver;

impl ActionResolver {
    /// Effects of `actor` playing `card` as a normal turn.
    ///
    /// `chosen_color` is only read for wild cards; without one a wild opens a
    /// colour choice.
    #[must_use]
    pub fn resolve(
        card: &Card,
        actor: PlayerId,
        state: &GameState,
        chosen_color: Option<Color>,
    ) -> EffectList {
        let mut effects = Self::resolve_free_play(card, actor, state, chosen_color);
        Self::custom(&mut effects, card, actor, state);
        effects
    }

    /// Effects of a card played as the free play of a 6.
    ///
    /// Awards and standard effects only; a free 3, 6 or 7 does nothing extra.
    #[must_use]
    pub fn resolve_free_play(
        card: &Card,
        actor: PlayerId,
        state: &GameState,
        chosen_color: Option<Color>,
    ) -> EffectList {
        let mut effects = EffectList::new();
        if state.config.color_awards {
            if let Some(resource) = Resource::awarded_for(card.color) {
                effects.push(Effect::Gain {
                    player: actor,
                    resource,
                    amount: 1,
                });
            }
        }
        effects.extend(Self::standard(card, actor, state, chosen_color));
        effects
    }

    fn standard(
        card: &Card,
        actor: PlayerId,
        state: &GameState,
        chosen_color: Option<Color>,
    ) -> EffectList {
        let next = state.next_seat(actor);
        let pick_color = || match chosen_color {
            Some(color) => Effect::SetColor { color },
            None => Effect::ChooseColor { player: actor },
        };

        match card.rank {
            Rank::Skip => smallvec![Effect::SkipNext],
            Rank::Reverse if state.player_count() == 2 => {
                smallvec![Effect::Reverse, Effect::SkipNext]
            }
            Rank::Reverse => smallvec![Effect::Reverse],
            Rank::DrawTwo => smallvec![
                Effect::ForceDraw {
                    target: next,
                    count: 2
                },
                Effect::SkipNext,
            ],
            Rank::Wild => smallvec![pick_color()],
            Rank::WildDrawFour => smallvec![
                pick_color(),
                Effect::ForceDraw {
                    target: next,
                    count: 4
                },
                Effect::SkipNext,
            ],
            _ => EffectList::new(),
        }
    }

    fn custom(effects: &mut EffectList, card: &Card, actor: PlayerId, state: &GameState) {
        match card.rank {
            Rank::Three => {
                let target = state.next_seat(actor);
                let count = state
                    .config
                    .forced_discard_count
                    .min(state.players[target].hand_size());
                if count > 0 {
                    effects.push(Effect::ForcedDiscard {
                        chooser: actor,
                        target,
                        count,
                    });
                }
            }
            Rank::Six => effects.push(Effect::PlayExtraThenDraw { player: actor }),
            Rank::Seven => effects.push(match state.config.seven_rule.swap_for(card.color) {
                SevenSwap::Neighbor => Effect::SwapWithNeighbor {
                    player: actor,
                    neighbor: state.next_seat(actor),
                },
                SevenSwap::Chosen => Effect::SwapWithChosen {
                    player: actor,
                    target: None,
                },
            }),
            _ => {}
        }
    }
}
