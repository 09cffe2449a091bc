//! Decision policies for CPU seats.
//!
//! The engine never schedules CPU turns. A caller loop asks
//! `Game::expected_actor`, and when that seat is a CPU it lets a policy pick
//! an intent and submits it through `Game::apply` like any human request.

use crate::core::{GameRng, PlayerId};
use crate::engine::{Game, Intent};

use super::legal_intents;

/// Picks an intent for a seat.
pub trait CpuPolicy {
    /// Choose what `player` does next, or `None` if they have nothing to do.
    fn choose(&mut self, game: &Game, player: PlayerId) -> Option<Intent>;
}

/// Uniform random policy.
///
/// Selects uniformly from legal intents.
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    rng: GameRng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl CpuPolicy for RandomPolicy {
    fn choose(&mut self, game: &Game, player: PlayerId) -> Option<Intent> {
        let mut intents = legal_intents(game.state(), game.catalog(), player);
        if intents.is_empty() {
            return None;
        }
        let idx = self.rng.gen_range_usize(0..intents.len());
        Some(intents.swap_remove(idx))
    }
}

/// Let `policy` act for CPU seats until a human is expected or the match
/// ends. Returns the number of intents applied.
///
/// Stops early after `max_steps` intents, or if the policy has nothing to
/// offer.
pub fn run_cpu_turns(game: &mut Game, policy: &mut impl CpuPolicy, max_steps: usize) -> usize {
    let mut steps = 0;
    while steps < max_steps {
        let Some(actor) = game.expected_actor() else {
            break;
        };
        if !game.state().players[actor].is_cpu() {
            break;
        }
        let Some(intent) = policy.choose(game, actor) else {
            break;
        };
        if game.apply(actor, intent).is_err() {
            break;
        }
        steps += 1;
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TurnPhase;
    use crate::engine::GameBuilder;

    #[test]
    fn test_random_policy_only_legal() {
        let game = GameBuilder::new().cpu("A").cpu("B").build(5).unwrap();
        let mut policy = RandomPolicy::new(1);

        let legal = legal_intents(game.state(), game.catalog(), PlayerId::new(0));
        for _ in 0..20 {
            let intent = policy.choose(&game, PlayerId::new(0)).unwrap();
            assert!(legal.contains(&intent));
        }
        assert_eq!(policy.choose(&game, PlayerId::new(1)), None);
    }

    #[test]
    fn test_cpu_match_runs_to_completion() {
        let mut game = GameBuilder::new().cpu("A").cpu("B").cpu("C").build(21).unwrap();
        let mut policy = RandomPolicy::new(21);

        run_cpu_turns(&mut game, &mut policy, 20_000);

        assert!(game.halted().is_none());
        assert_eq!(game.phase(), TurnPhase::Terminal);
        let winner = game.state().winner.unwrap();
        assert!(game.state().players[winner].has_empty_hand());
    }

    #[test]
    fn test_stops_at_human_seat() {
        let mut game = GameBuilder::new().human("Ada").cpu("Bot").build(3).unwrap();
        let mut policy = RandomPolicy::new(0);

        assert_eq!(run_cpu_turns(&mut game, &mut policy, 100), 0);
    }
}
