#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pursuer decision system driving the AI-controlled chaser.

mod strategy;

use dungeon_chase_core::{Command, Difficulty, Position, PursuerAction};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub use strategy::{CertainChase, Strategy, WeightedChase};

/// Configuration parameters required to construct the pursuer system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    difficulty: Difficulty,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided difficulty and seed.
    #[must_use]
    pub const fn new(difficulty: Difficulty, rng_seed: u64) -> Self {
        Self {
            difficulty,
            rng_seed,
        }
    }
}

/// Pure system that picks the pursuer's action each round.
#[derive(Debug)]
pub struct Pursuer {
    difficulty: Difficulty,
    strategy: Strategy,
    rng: ChaCha8Rng,
    turns_taken: u64,
}

impl Pursuer {
    /// Creates a new pursuer system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            difficulty: config.difficulty,
            strategy: Strategy::for_difficulty(config.difficulty),
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            turns_taken: 0,
        }
    }

    /// Decides the action for one turn given both entity positions.
    pub fn decide(&mut self, human: Position, pursuer: Position) -> PursuerAction {
        let action = self.strategy.decide(human, pursuer, &mut self.rng);
        self.turns_taken = self.turns_taken.saturating_add(1);
        log::debug!(
            "pursuer turn {} ({}): {action:?} from {pursuer}, {} steps from the human",
            self.turns_taken,
            self.difficulty,
            pursuer.manhattan_distance(human)
        );
        action
    }

    /// Takes one turn and emits the resulting movement command, if any.
    ///
    /// Look turns emit nothing; the pursuer stays put.
    pub fn handle(&mut self, human: Position, pursuer: Position, out: &mut Vec<Command>) {
        if let PursuerAction::Move(heading) = self.decide(human, pursuer) {
            out.push(Command::StepPursuer { heading });
        }
    }

    /// Difficulty the system was configured with.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Active strategy and its memory.
    #[must_use]
    pub const fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Number of turns decided so far.
    #[must_use]
    pub const fn turns_taken(&self) -> u64 {
        self.turns_taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungeon_chase_core::Heading;

    #[test]
    fn look_turns_emit_no_command() {
        let mut pursuer = Pursuer::new(Config::new(Difficulty::Hard, 3));
        let mut out = Vec::new();
        pursuer.handle(Position::new(1, 1), Position::new(2, 1), &mut out);
        assert!(out.is_empty());
        assert_eq!(pursuer.turns_taken(), 1);
        assert_eq!(pursuer.difficulty(), Difficulty::Hard);
    }

    #[test]
    fn godlike_emits_step_toward_human() {
        let mut pursuer = Pursuer::new(Config::new(Difficulty::Godlike, 3));
        let mut out = Vec::new();
        pursuer.handle(Position::new(5, 1), Position::new(2, 1), &mut out);
        assert_eq!(
            out,
            vec![Command::StepPursuer {
                heading: Heading::East
            }]
        );
    }

    #[test]
    fn same_seed_replays_same_decisions() {
        let human = Position::new(30, 30);
        let mut first = Pursuer::new(Config::new(Difficulty::Easy, 99));
        let mut second = Pursuer::new(Config::new(Difficulty::Easy, 99));
        for step in 0..64 {
            let pursuer = Position::new(step, 0);
            assert_eq!(first.decide(human, pursuer), second.decide(human, pursuer));
        }
    }
}
