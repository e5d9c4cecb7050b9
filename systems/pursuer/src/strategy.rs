//! Decision policies selectable for the pursuer.

use dungeon_chase_core::{
    Difficulty, Heading, Position, PursuerAction, Weighting, LOOK_CADENCE, LOOK_RADIUS,
};
use rand::Rng;

/// Policy deciding what the pursuer does each turn.
///
/// Variants own whatever memory they need; nothing is shared between them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Uniformly random step every turn, blind to the human.
    Easy,
    /// Periodic look, then a chase biased toward the last sighting.
    Weighted(WeightedChase),
    /// Periodic look, then a certain chase toward the last sighting.
    Hard(CertainChase),
    /// Certain chase toward the human's true position every turn.
    Godlike,
}

impl Strategy {
    /// Builds the policy matching a difficulty preset.
    #[must_use]
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self::Easy,
            Difficulty::Medium => Self::Weighted(WeightedChase::new(Weighting::medium())),
            Difficulty::Custom(weighting) => Self::Weighted(WeightedChase::new(weighting)),
            Difficulty::Hard => Self::Hard(CertainChase::default()),
            Difficulty::Godlike => Self::Godlike,
        }
    }

    /// Chooses the action for one turn.
    pub fn decide<R>(&mut self, human: Position, pursuer: Position, rng: &mut R) -> PursuerAction
    where
        R: Rng + ?Sized,
    {
        match self {
            Self::Easy => PursuerAction::Move(random_heading(rng)),
            Self::Weighted(chase) => chase.decide(human, pursuer, rng),
            Self::Hard(chase) => chase.decide(human, pursuer, rng),
            Self::Godlike => PursuerAction::Move(pursuer.heading_toward(human)),
        }
    }
}

/// Weighted chase shared by the medium and custom difficulties.
///
/// While a sighting is held, each movement turn draws from
/// `0..4 * multiplier`. The first four values pick a heading uniformly; every
/// other value heads for the sighting, so a multiplier of `w` heads there with
/// probability `(4w - 3) / 4w`. Reaching the sighting drops it and the chase
/// wanders uniformly until the next successful look.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightedChase {
    multiplier: Weighting,
    cycle: LookCycle,
    last_sighting: Option<Position>,
}

impl WeightedChase {
    /// Creates a chase that adopts `multiplier` as its weight after each sighting.
    #[must_use]
    pub const fn new(multiplier: Weighting) -> Self {
        Self {
            multiplier,
            cycle: LookCycle::new(),
            last_sighting: None,
        }
    }

    /// Weight currently applied to movement draws; 1 when nothing is being chased.
    #[must_use]
    pub const fn weight(&self) -> u32 {
        match self.last_sighting {
            Some(_) => self.multiplier.get(),
            None => 1,
        }
    }

    /// Weight adopted after a sighting.
    #[must_use]
    pub const fn multiplier(&self) -> Weighting {
        self.multiplier
    }

    /// Where the human was last seen, while the pursuer is still heading there.
    #[must_use]
    pub const fn last_sighting(&self) -> Option<Position> {
        self.last_sighting
    }

    fn decide<R>(&mut self, human: Position, pursuer: Position, rng: &mut R) -> PursuerAction
    where
        R: Rng + ?Sized,
    {
        if self.cycle.advance() {
            if let Some(sighting) = look(human, pursuer) {
                self.last_sighting = Some(sighting);
            }
            return PursuerAction::Look;
        }

        if self.last_sighting == Some(pursuer) {
            self.last_sighting = None;
        }

        let heading = match self.last_sighting {
            Some(sighting) => {
                let draw = rng.gen_range(0..4 * self.multiplier.get()) as usize;
                Heading::ALL
                    .get(draw)
                    .copied()
                    .unwrap_or_else(|| pursuer.heading_toward(sighting))
            }
            None => random_heading(rng),
        };
        PursuerAction::Move(heading)
    }
}

/// Chase used by the hard difficulty: random until a sighting, then exact.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CertainChase {
    cycle: LookCycle,
    last_sighting: Option<Position>,
}

impl CertainChase {
    /// Where the human was last seen, while the pursuer is still heading there.
    #[must_use]
    pub const fn last_sighting(&self) -> Option<Position> {
        self.last_sighting
    }

    fn decide<R>(&mut self, human: Position, pursuer: Position, rng: &mut R) -> PursuerAction
    where
        R: Rng + ?Sized,
    {
        if self.cycle.advance() {
            if let Some(sighting) = look(human, pursuer) {
                self.last_sighting = Some(sighting);
            }
            return PursuerAction::Look;
        }

        let heading = match self.last_sighting {
            Some(sighting) if sighting != pursuer => pursuer.heading_toward(sighting),
            _ => {
                self.last_sighting = None;
                random_heading(rng)
            }
        };
        PursuerAction::Move(heading)
    }
}

/// Turn counter marking every [`LOOK_CADENCE`]th turn, starting with the first, as a look.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct LookCycle {
    turn: u32,
}

impl LookCycle {
    const fn new() -> Self {
        Self { turn: 0 }
    }

    fn advance(&mut self) -> bool {
        let is_look = self.turn % LOOK_CADENCE == 0;
        self.turn = self.turn.wrapping_add(1);
        is_look
    }
}

fn look(human: Position, pursuer: Position) -> Option<Position> {
    let spotted = pursuer.is_near(human, LOOK_RADIUS);
    log::trace!("look from {pursuer}: human at {human} spotted={spotted}");
    spotted.then_some(human)
}

fn random_heading<R>(rng: &mut R) -> Heading
where
    R: Rng + ?Sized,
{
    Heading::ALL[rng.gen_range(0..Heading::ALL.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn look_cycle_starts_with_a_look() {
        let mut cycle = LookCycle::new();
        let pattern: Vec<bool> = (0..8).map(|_| cycle.advance()).collect();
        assert_eq!(
            pattern,
            [true, false, false, false, true, false, false, false]
        );
    }

    #[test]
    fn weighted_weight_resets_on_reaching_sighting() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut chase = WeightedChase::new(Weighting::medium());
        let human = Position::new(4, 4);

        assert_eq!(chase.decide(human, Position::new(2, 4), &mut rng), PursuerAction::Look);
        assert_eq!(chase.weight(), 3);
        assert_eq!(chase.last_sighting(), Some(human));

        let _ = chase.decide(human, human, &mut rng);
        assert_eq!(chase.weight(), 1);
        assert_eq!(chase.last_sighting(), None);
    }

    #[test]
    fn weighted_without_sighting_wanders_uniformly() {
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        let weighting = Weighting::new(10).expect("weighting in range");
        let mut chase = WeightedChase::new(weighting);
        let mut counts = [0_u32; 4];

        for _ in 0..4_000 {
            if let PursuerAction::Move(heading) =
                chase.decide(Position::new(50, 50), Position::new(0, 0), &mut rng)
            {
                let index = Heading::ALL
                    .iter()
                    .position(|candidate| *candidate == heading)
                    .expect("listed heading");
                counts[index] += 1;
            }
        }

        assert_eq!(chase.weight(), 1);
        assert!(counts.iter().all(|&count| (650..850).contains(&count)), "{counts:?}");
    }

    #[test]
    fn weighted_ignores_distant_humans() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut chase = WeightedChase::new(Weighting::medium());
        let _ = chase.decide(Position::new(40, 40), Position::new(1, 1), &mut rng);
        assert_eq!(chase.weight(), 1);
        assert_eq!(chase.last_sighting(), None);
    }

    #[test]
    fn certain_chase_forgets_sighting_on_arrival() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut chase = CertainChase::default();
        let human = Position::new(3, 3);

        let _ = chase.decide(human, Position::new(3, 1), &mut rng);
        assert_eq!(chase.last_sighting(), Some(human));

        let _ = chase.decide(Position::new(9, 9), human, &mut rng);
        assert_eq!(chase.last_sighting(), None);
    }
}
