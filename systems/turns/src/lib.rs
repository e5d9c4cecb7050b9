#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Round sequencing for Dungeon Chase.
//!
//! A round is one human command followed by one pursuer turn and a capture
//! check. The engine owns the world and the pursuer system, routes commands
//! through [`dungeon_chase_world::apply`], and translates the resulting events
//! into console [`Response`] values.

use dungeon_chase_core::{Command, Event, GameState, HumanCommand, Response};
use dungeon_chase_system_pursuer::Pursuer;
use dungeon_chase_world::{self as world, query, World};

/// Drives rounds until the game reaches a terminal state.
#[derive(Debug)]
pub struct TurnEngine {
    world: World,
    pursuer: Pursuer,
    events: Vec<Event>,
    commands: Vec<Command>,
}

impl TurnEngine {
    /// Creates an engine around a freshly spawned world and a configured pursuer.
    #[must_use]
    pub fn new(world: World, pursuer: Pursuer) -> Self {
        Self {
            world,
            pursuer,
            events: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Plays one round from a raw input line and returns the resulting state.
    ///
    /// Malformed input yields a single error response; the human loses the
    /// command but the pursuer still takes its turn. Once the game is over no
    /// further rounds are played.
    pub fn play_round(&mut self, line: &str, out: &mut Vec<Response>) -> GameState {
        let state = query::game_state(&self.world);
        if state.is_terminal() {
            return state;
        }

        log::debug!("round {} input {line:?}", query::rounds_played(&self.world));
        match HumanCommand::parse(line) {
            Ok(command) => self.dispatch(Command::Human(command), out),
            Err(error) => {
                log::debug!("rejected input: {error}");
                out.push(Response::from(error));
            }
        }

        self.commands.clear();
        self.pursuer.handle(
            query::human_position(&self.world),
            query::pursuer_position(&self.world),
            &mut self.commands,
        );
        let commands = std::mem::take(&mut self.commands);
        for command in &commands {
            self.dispatch(*command, out);
        }
        self.commands = commands;

        self.dispatch(Command::CloseRound, out);
        query::game_state(&self.world)
    }

    fn dispatch(&mut self, command: Command, out: &mut Vec<Response>) {
        self.events.clear();
        world::apply(&mut self.world, command, &mut self.events);
        for event in self.events.drain(..) {
            if let Some(response) = respond(event) {
                out.push(response);
            }
        }
    }

    /// Read-only access to the world being played.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Read-only access to the pursuer system.
    #[must_use]
    pub const fn pursuer(&self) -> &Pursuer {
        &self.pursuer
    }

    /// Current lifecycle state of the game.
    #[must_use]
    pub fn state(&self) -> GameState {
        query::game_state(&self.world)
    }
}

/// Console reply for an event, if the human should see one.
fn respond(event: Event) -> Option<Response> {
    match event {
        Event::GoldReported { owned } => Some(Response::GoldOwned { owned }),
        Event::GoldCollected { owned } => Some(Response::GoldCollected { owned }),
        Event::PickupFailed | Event::HumanBlocked { .. } => Some(Response::Fail),
        Event::HumanMoved { .. } => Some(Response::Success),
        Event::LookRendered { view } => Some(Response::Look(view)),
        Event::GoldRequirementReported { required } => Some(Response::GoldRequired { required }),
        Event::PursuerMoved { from, to } => {
            log::trace!("pursuer moved {from} -> {to}");
            None
        }
        Event::PursuerBlocked { heading } => {
            log::trace!("pursuer bumped into a wall heading {heading}");
            None
        }
        Event::QuitRequested { .. } | Event::HumanCaught { .. } | Event::GameEnded { .. } => None,
    }
}
