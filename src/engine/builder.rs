//! Match construction.
//!
//! `GameBuilder` collects seats and rule settings, then either deals a
//! shuffled standard deck (`build`) or lays out an explicit table
//! (`build_preset`) for scenarios and tests.

use tracing::info;

use super::{ConfigError, Game};
use crate::cards::{Card, CardId, Color, Deck, InvalidCard, Rank, STANDARD_DECK_SIZE};
use crate::core::{ActorType, GameConfig, GameRng, GameState, Player, PlayerId, SevenRule};
use crate::economy::Catalog;

/// An explicit table layout.
///
/// Cards are given as (colour, rank) pairs; ids are assigned in order: hands
/// by seat first, then the top discard, then the draw pile (front first).
#[derive(Clone, Debug)]
pub struct PresetDeal {
    pub hands: Vec<Vec<(Color, Rank)>>,
    pub top_discard: (Color, Rank),
    pub draw_pile: Vec<(Color, Rank)>,
    /// Required to be `None` unless the top discard is wild. A wild top with
    /// no colour gets a random one.
    pub active_wild_color: Option<Color>,
    pub first_player: PlayerId,
}

impl PresetDeal {
    pub fn new(hands: Vec<Vec<(Color, Rank)>>, top_discard: (Color, Rank)) -> Self {
        Self {
            hands,
            top_discard,
            draw_pile: Vec::new(),
            active_wild_color: None,
            first_player: PlayerId::new(0),
        }
    }

    pub fn draw_pile(mut self, cards: Vec<(Color, Rank)>) -> Self {
        self.draw_pile = cards;
        self
    }

    pub fn active_wild_color(mut self, color: Color) -> Self {
        self.active_wild_color = Some(color);
        self
    }

    pub fn first_player(mut self, player: PlayerId) -> Self {
        self.first_player = player;
        self
    }
}

/// Builder for a `Game`.
#[derive(Clone, Debug, Default)]
pub struct GameBuilder {
    seats: Vec<(String, ActorType)>,
    config: GameConfig,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a seat. Seats are numbered in the order they are added.
    pub fn player(mut self, name: impl Into<String>, actor: ActorType) -> Self {
        self.seats.push((name.into(), actor));
        self
    }

    pub fn human(self, name: impl Into<String>) -> Self {
        self.player(name, ActorType::Human)
    }

    pub fn cpu(self, name: impl Into<String>) -> Self {
        self.player(name, ActorType::Cpu)
    }

    /// Replace every rule setting at once.
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn starting_hand_size(mut self, size: usize) -> Self {
        self.config.starting_hand_size = size;
        self
    }

    pub fn forced_discard_count(mut self, count: usize) -> Self {
        self.config.forced_discard_count = count;
        self
    }

    pub fn seven_rule(mut self, rule: SevenRule) -> Self {
        self.config.seven_rule = rule;
        self
    }

    pub fn color_awards(mut self, enabled: bool) -> Self {
        self.config.color_awards = enabled;
        self
    }

    pub fn random_first_player(mut self, enabled: bool) -> Self {
        self.config.random_first_player = enabled;
        self
    }

    fn seat_players(&self) -> Vec<Player> {
        self.seats
            .iter()
            .enumerate()
            .map(|(i, (name, actor))| Player::new(PlayerId::new(i as u8), name.clone(), *actor))
            .collect()
    }

    /// Shuffle a standard deck, deal, and turn over an opening card.
    ///
    /// The opening card is never a WILD_DRAW_FOUR. An opening WILD gets a
    /// random active colour; other opening action cards have no effect.
    ///
    /// ```
    /// use rust_uno::engine::GameBuilder;
    ///
    /// let game = GameBuilder::new()
    ///     .human("Ada")
    ///     .cpu("Bot")
    ///     .starting_hand_size(5)
    ///     .build(42)
    ///     .unwrap();
    ///
    /// let view = game.state_view();
    /// assert_eq!(view.players[0].card_count, 5);
    /// assert_eq!(view.draw_pile_count, 108 - 10 - 1);
    /// ```
    pub fn build(self, seed: u64) -> Result<Game, ConfigError> {
        let player_count = self.seats.len();
        self.config.validate(player_count, STANDARD_DECK_SIZE)?;

        let mut rng = GameRng::new(seed);
        let mut deck = Deck::standard(&mut rng);
        let mut players = self.seat_players();

        for _ in 0..self.config.starting_hand_size {
            for player in &mut players {
                if let Some(card) = deck.draw_one(&mut rng) {
                    player.add_card(card);
                }
            }
        }

        let opening = deck
            .draw_first_matching(&mut rng, |c| c.rank != Rank::WildDrawFour)
            .ok_or(ConfigError::DeckTooSmall {
                needed: self.config.starting_hand_size * player_count + 1,
                available: STANDARD_DECK_SIZE,
            })?;
        deck.discard(opening);

        let active_wild_color = opening.is_wild().then(|| random_color(&mut rng));
        let first = if self.config.random_first_player {
            PlayerId::new(rng.gen_range_usize(0..player_count) as u8)
        } else {
            PlayerId::new(0)
        };

        info!(
            seed,
            players = player_count,
            first = %first,
            opening = %opening,
            "match started"
        );
        let state = GameState::new(self.config, players, deck, first, active_wild_color, rng);
        Ok(Game::new(state, Catalog::standard()))
    }

    /// Lay out `deal` exactly as given.
    ///
    /// `starting_hand_size` is not used for dealing; the other rule settings
    /// apply. Every hand must hold at least one card.
    pub fn build_preset(self, deal: PresetDeal, seed: u64) -> Result<Game, ConfigError> {
        let player_count = self.seats.len();
        self.config.validate(player_count, usize::MAX)?;
        if deal.hands.len() != player_count {
            return Err(ConfigError::PresetHands {
                hands: deal.hands.len(),
                players: player_count,
            });
        }
        if let Some(seat) = deal.hands.iter().position(Vec::is_empty) {
            return Err(ConfigError::EmptyPresetHand {
                seat: PlayerId::new(seat as u8),
            });
        }
        if deal.first_player.index() >= player_count {
            return Err(ConfigError::FirstPlayer {
                seat: deal.first_player,
            });
        }

        let mut next_id = 0u32;
        let mut make = |(color, rank): (Color, Rank)| -> Result<Card, InvalidCard> {
            let card = Card::new(CardId::new(next_id), color, rank)?;
            next_id += 1;
            Ok(card)
        };

        let mut players = self.seat_players();
        for (player, hand) in players.iter_mut().zip(&deal.hands) {
            for &spec in hand {
                player.add_card(make(spec)?);
            }
        }
        let top = make(deal.top_discard)?;
        let draw_pile = deal
            .draw_pile
            .iter()
            .map(|&spec| make(spec))
            .collect::<Result<Vec<_>, _>>()?;

        let mut rng = GameRng::new(seed);
        let active_wild_color = match (top.is_wild(), deal.active_wild_color) {
            (_, Some(color)) if color.is_wild() => return Err(ConfigError::PresetColor { color }),
            (false, Some(color)) => return Err(ConfigError::PresetColor { color }),
            (false, None) => None,
            (true, Some(color)) => Some(color),
            (true, None) => Some(random_color(&mut rng)),
        };

        let deck = Deck::from_piles(draw_pile, vec![top]);
        info!(seed, players = player_count, opening = %top, "preset match started");
        let state = GameState::new(
            self.config,
            players,
            deck,
            deal.first_player,
            active_wild_color,
            rng,
        );
        Ok(Game::new(state, Catalog::standard()))
    }
}

fn random_color(rng: &mut GameRng) -> Color {
    Color::PLAYABLE[rng.gen_range_usize(0..Color::PLAYABLE.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TurnPhase;

    #[test]
    fn test_build_deals_and_opens() {
        let game = GameBuilder::new().human("A").cpu("B").cpu("C").build(7).unwrap();
        let state = game.state();

        assert_eq!(state.player_count(), 3);
        for (_, player) in state.players.iter() {
            assert_eq!(player.hand_size(), 7);
        }
        let top = state.top_discard().unwrap();
        assert_ne!(top.rank, Rank::WildDrawFour);
        assert_eq!(state.active_wild_color.is_some(), top.is_wild());
        assert_eq!(state.card_total(), STANDARD_DECK_SIZE);
        assert_eq!(state.current, PlayerId::new(0));
        assert_eq!(game.phase(), TurnPhase::AwaitingAction);
        assert!(state.integrity_check().is_ok());
    }

    #[test]
    fn test_build_is_deterministic() {
        let a = GameBuilder::new().human("A").cpu("B").build(99).unwrap();
        let b = GameBuilder::new().human("A").cpu("B").build(99).unwrap();
        assert_eq!(a.state_view(), b.state_view());
        assert_eq!(
            a.state().players[PlayerId::new(1)].hand,
            b.state().players[PlayerId::new(1)].hand
        );
    }

    #[test]
    fn test_random_first_player_in_range() {
        for seed in 0..20 {
            let game = GameBuilder::new()
                .cpu("A")
                .cpu("B")
                .cpu("C")
                .random_first_player(true)
                .build(seed)
                .unwrap();
            assert!(game.state().current.index() < 3);
        }
    }

    #[test]
    fn test_rejects_empty_starting_hand() {
        let err = GameBuilder::new()
            .cpu("A")
            .cpu("B")
            .starting_hand_size(0)
            .build(1)
            .unwrap_err();
        assert_eq!(err, ConfigError::StartingHandSize);
    }

    #[test]
    fn test_rejects_bad_seat_count() {
        let err = GameBuilder::new().human("Solo").build(1).unwrap_err();
        assert_eq!(err, ConfigError::PlayerCount { count: 1 });
    }

    #[test]
    fn test_preset_ids_and_colour() {
        let game = GameBuilder::new()
            .human("A")
            .human("B")
            .build_preset(
                PresetDeal::new(
                    vec![vec![(Color::Red, Rank::Five)], vec![(Color::Blue, Rank::One)]],
                    (Color::Wild, Rank::Wild),
                )
                .active_wild_color(Color::Green),
                3,
            )
            .unwrap();
        let state = game.state();

        assert_eq!(state.players[PlayerId::new(1)].hand[0].id, CardId::new(1));
        assert_eq!(state.top_discard().map(|c| c.id), Some(CardId::new(2)));
        assert_eq!(state.active_wild_color, Some(Color::Green));
    }

    #[test]
    fn test_preset_rejects_invalid_layout() {
        let builder = GameBuilder::new().human("A").human("B");
        let one_card_each = vec![vec![(Color::Red, Rank::Five)], vec![(Color::Blue, Rank::One)]];

        let err = builder
            .clone()
            .build_preset(PresetDeal::new(vec![vec![]], (Color::Red, Rank::One)), 0)
            .unwrap_err();
        assert_eq!(err, ConfigError::PresetHands { hands: 1, players: 2 });

        let err = builder
            .clone()
            .build_preset(
                PresetDeal::new(
                    vec![vec![(Color::Red, Rank::Five)], vec![]],
                    (Color::Red, Rank::One),
                ),
                0,
            )
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::EmptyPresetHand {
                seat: PlayerId::new(1)
            }
        );

        let err = builder
            .clone()
            .build_preset(
                PresetDeal::new(one_card_each.clone(), (Color::Wild, Rank::Two)),
                0,
            )
            .unwrap_err();
        assert_eq!(err, ConfigError::Card(InvalidCard { rank: Rank::Two }));

        let err = builder
            .build_preset(
                PresetDeal::new(one_card_each, (Color::Red, Rank::One))
                    .active_wild_color(Color::Blue),
                0,
            )
            .unwrap_err();
        assert_eq!(err, ConfigError::PresetColor { color: Color::Blue });
    }
}
