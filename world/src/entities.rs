//! Human and pursuer bodies placed on the grid.

use dungeon_chase_core::{Heading, Position};

use crate::grid::Grid;

/// Attempts a single step from `position` and returns the destination when it is walkable.
#[must_use]
pub fn attempt_move(grid: &Grid, position: Position, heading: Heading) -> Option<Position> {
    let destination = position.adjacent(heading);
    grid.is_walkable(destination).then_some(destination)
}

/// Avatar controlled by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Human {
    position: Position,
    gold: u32,
}

impl Human {
    pub(crate) const fn spawn(position: Position) -> Self {
        Self { position, gold: 0 }
    }

    /// Cell currently occupied by the human.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Gold collected so far.
    #[must_use]
    pub const fn gold(&self) -> u32 {
        self.gold
    }

    pub(crate) fn step(&mut self, grid: &Grid, heading: Heading) -> Option<Position> {
        let destination = attempt_move(grid, self.position, heading)?;
        self.position = destination;
        Some(destination)
    }

    pub(crate) fn pick_up(&mut self, grid: &mut Grid) -> bool {
        let collected = grid.collect_gold_at(self.position);
        if collected {
            self.gold = self.gold.saturating_add(1);
        }
        collected
    }
}

/// Body of the AI-controlled chaser. Its decision state lives with the pursuer system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pursuer {
    position: Position,
}

impl Pursuer {
    pub(crate) const fn spawn(position: Position) -> Self {
        Self { position }
    }

    /// Cell currently occupied by the pursuer.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    pub(crate) fn step(&mut self, grid: &Grid, heading: Heading) -> Option<Position> {
        let destination = attempt_move(grid, self.position, heading)?;
        self.position = destination;
        Some(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MapDefinition;

    fn corridor() -> Grid {
        MapDefinition::parse("name corridor\nwin 1\n#####\n#.G.#\n#####")
            .expect("valid map")
            .into_parts()
            .1
    }

    #[test]
    fn attempt_move_refuses_walls() {
        let grid = corridor();
        let start = Position::new(1, 1);
        assert_eq!(attempt_move(&grid, start, Heading::North), None);
        assert_eq!(attempt_move(&grid, start, Heading::West), None);
        assert_eq!(
            attempt_move(&grid, start, Heading::East),
            Some(Position::new(2, 1))
        );
    }

    #[test]
    fn human_collects_gold_once() {
        let mut grid = corridor();
        let mut human = Human::spawn(Position::new(1, 1));
        assert!(!human.pick_up(&mut grid));
        assert_eq!(human.step(&grid, Heading::East), Some(Position::new(2, 1)));
        assert!(human.pick_up(&mut grid));
        assert!(!human.pick_up(&mut grid));
        assert_eq!(human.gold(), 1);
    }
}
