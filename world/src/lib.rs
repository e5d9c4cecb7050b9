#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Dungeon Chase.

mod entities;
mod grid;
mod map;

use dungeon_chase_core::{
    Command, Event, GameState, HumanCommand, LossCause, Position, LOOK_RADIUS,
};
use rand::Rng;
use thiserror::Error;

pub use entities::{attempt_move, Human, Pursuer};
pub use grid::{Grid, HUMAN_MARKER, PURSUER_MARKER};
pub use map::{MapDefinition, MapError};

/// Problems raised when placing entities explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum WorldError {
    /// The requested spawn cell is a wall or lies outside the grid.
    #[error("cannot spawn on {position}: tile is not walkable")]
    InvalidSpawn {
        /// Rejected spawn cell.
        position: Position,
    },
}

/// Represents the authoritative Dungeon Chase world state.
#[derive(Clone, Debug)]
pub struct World {
    name: String,
    grid: Grid,
    human: Human,
    pursuer: Pursuer,
    state: GameState,
    pending_quit: Option<bool>,
    round_index: u64,
}

impl World {
    /// Creates a world with both entities placed on random floor or exit tiles.
    pub fn new<R>(map: MapDefinition, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let (name, grid) = map.into_parts();
        let human = grid.random_spawn(rng);
        let pursuer = grid.random_spawn(rng);
        log::info!("spawned human at {human} and pursuer at {pursuer} in `{name}`");
        Self::assemble(name, grid, human, pursuer)
    }

    /// Creates a world with both entities placed on the provided walkable tiles.
    pub fn with_spawns(
        map: MapDefinition,
        human: Position,
        pursuer: Position,
    ) -> Result<Self, WorldError> {
        let (name, grid) = map.into_parts();
        for position in [human, pursuer] {
            if !grid.is_walkable(position) {
                return Err(WorldError::InvalidSpawn { position });
            }
        }
        Ok(Self::assemble(name, grid, human, pursuer))
    }

    fn assemble(name: String, grid: Grid, human: Position, pursuer: Position) -> Self {
        Self {
            name,
            grid,
            human: Human::spawn(human),
            pursuer: Pursuer::spawn(pursuer),
            state: GameState::Active,
            pending_quit: None,
            round_index: 0,
        }
    }

    fn apply_human(&mut self, command: HumanCommand, out_events: &mut Vec<Event>) {
        match command {
            HumanCommand::Gold => out_events.push(Event::GoldReported {
                owned: self.human.gold(),
            }),
            HumanCommand::Pickup => {
                if self.human.pick_up(&mut self.grid) {
                    out_events.push(Event::GoldCollected {
                        owned: self.human.gold(),
                    });
                } else {
                    out_events.push(Event::PickupFailed);
                }
            }
            HumanCommand::Quit => {
                let escaped = self.grid.tile_at(self.human.position()).is_exit()
                    && self.human.gold() >= self.grid.gold_required();
                self.pending_quit = Some(escaped);
                out_events.push(Event::QuitRequested { escaped });
            }
            HumanCommand::Move { heading } => {
                let from = self.human.position();
                match self.human.step(&self.grid, heading) {
                    Some(to) => out_events.push(Event::HumanMoved { from, to }),
                    None => out_events.push(Event::HumanBlocked { heading }),
                }
            }
            HumanCommand::Look => {
                let overlays = [
                    (self.human.position(), HUMAN_MARKER),
                    (self.pursuer.position(), PURSUER_MARKER),
                ];
                let view = self
                    .grid
                    .windowed_view(self.human.position(), LOOK_RADIUS, &overlays);
                out_events.push(Event::LookRendered { view });
            }
            HumanCommand::Hello => out_events.push(Event::GoldRequirementReported {
                required: self.grid.gold_required(),
            }),
        }
    }

    fn close_round(&mut self, out_events: &mut Vec<Event>) {
        self.round_index = self.round_index.saturating_add(1);

        let caught = self.pursuer.position() == self.human.position();
        let quit = self.pending_quit.take();

        let state = if caught {
            out_events.push(Event::HumanCaught {
                cell: self.human.position(),
            });
            GameState::Lost(LossCause::Captured)
        } else {
            match quit {
                Some(true) => GameState::WonExit,
                Some(false) => GameState::Lost(LossCause::QuitEarly),
                None => return,
            }
        };

        self.state = state;
        log::info!("game ended after round {}: {state:?}", self.round_index);
        out_events.push(Event::GameEnded { state });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Commands arriving after the game reached a terminal state are ignored.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if world.state.is_terminal() {
        log::debug!("ignoring {command:?}: game already over");
        return;
    }

    log::debug!("round {}: applying {command:?}", world.round_index);
    match command {
        Command::Human(human_command) => world.apply_human(human_command, out_events),
        Command::StepPursuer { heading } => {
            let from = world.pursuer.position();
            match world.pursuer.step(&world.grid, heading) {
                Some(to) => out_events.push(Event::PursuerMoved { from, to }),
                None => out_events.push(Event::PursuerBlocked { heading }),
            }
        }
        Command::CloseRound => world.close_round(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use dungeon_chase_core::{GameState, Position};

    use super::{World, HUMAN_MARKER, PURSUER_MARKER};

    /// Name of the loaded map.
    #[must_use]
    pub fn map_name(world: &World) -> &str {
        &world.name
    }

    /// Cell occupied by the human.
    #[must_use]
    pub fn human_position(world: &World) -> Position {
        world.human.position()
    }

    /// Cell occupied by the pursuer.
    #[must_use]
    pub fn pursuer_position(world: &World) -> Position {
        world.pursuer.position()
    }

    /// Gold collected by the human so far.
    #[must_use]
    pub fn gold_collected(world: &World) -> u32 {
        world.human.gold()
    }

    /// Gold the human needs to escape.
    #[must_use]
    pub fn gold_required(world: &World) -> u32 {
        world.grid.gold_required()
    }

    /// Current lifecycle state of the game.
    #[must_use]
    pub fn game_state(world: &World) -> GameState {
        world.state
    }

    /// Number of rounds closed so far.
    #[must_use]
    pub fn rounds_played(world: &World) -> u64 {
        world.round_index
    }

    /// Renders the full map with both entities overlaid.
    #[must_use]
    pub fn render_map(world: &World) -> String {
        world.grid.render(&[
            (world.human.position(), HUMAN_MARKER),
            (world.pursuer.position(), PURSUER_MARKER),
        ])
    }
}
