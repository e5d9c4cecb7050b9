#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a Dungeon Chase session on the console.

mod config;
mod console;
mod maps;

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use dungeon_chase_core::{Difficulty, GameState, Response, Weighting};
use dungeon_chase_system_bootstrap::Bootstrap;
use dungeon_chase_system_pursuer::{Config as PursuerConfig, Pursuer};
use dungeon_chase_system_turns::TurnEngine;
use dungeon_chase_world::{query, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    config::{DifficultyKind, Settings},
    console::Console,
};

/// Collect the gold and reach the exit before the bot catches you.
#[derive(Parser, Debug)]
#[command(name = "dungeon-chase", version)]
struct Args {
    /// Map file to play, skipping the map menu
    #[arg(long, value_name = "FILE")]
    map: Option<PathBuf>,

    /// Directory listed by the map menu [default: maps]
    #[arg(long, value_name = "DIR")]
    maps_dir: Option<PathBuf>,

    /// Bot difficulty, skipping the difficulty menu
    #[arg(long, value_enum)]
    difficulty: Option<DifficultyKind>,

    /// Weighting for the custom difficulty
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=10))]
    weighting: Option<u32>,

    /// Seed for spawn placement and bot decisions
    #[arg(long)]
    seed: Option<u64>,

    /// Settings file [default: dungeon-chase.toml when present]
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the whole map after every round
    #[arg(long)]
    reveal: bool,
}

impl Args {
    fn settings(&self) -> Settings {
        Settings {
            map: self.map.clone(),
            maps_dir: self.maps_dir.clone(),
            difficulty: self.difficulty,
            weighting: self.weighting,
            seed: self.seed,
        }
    }
}

/// Entry point for the Dungeon Chase command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let settings = Settings::load(args.config.as_deref())?.overlay(args.settings());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());
    let bootstrap = Bootstrap;
    console.say(bootstrap.welcome_banner())?;

    let map_path = match &settings.map {
        Some(path) => path.clone(),
        None => {
            let dir = settings.maps_dir();
            let files = maps::discover(&dir)?;
            anyhow::ensure!(!files.is_empty(), "no .txt maps found in {}", dir.display());
            dir.join(console.select_map(&files)?)
        }
    };
    let map = maps::load(&map_path)?;
    let difficulty = resolve_difficulty(&settings, &mut console)?;

    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("session seed {seed}");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let world = World::new(map, &mut rng);
    let pursuer = Pursuer::new(PursuerConfig::new(difficulty, rng.gen()));
    log::info!("bot playing on {} difficulty", pursuer.difficulty());

    for line in bootstrap.greeting(&world) {
        console.say(line)?;
    }

    let mut engine = TurnEngine::new(world, pursuer);
    let state = run(&mut engine, &mut console, args.reveal)?;

    if state == GameState::WonExit {
        console.say("WIN")?;
        console.say("Congratulations! You escaped the bot!")?;
    } else {
        console.say("LOSE")?;
    }
    Ok(())
}

fn resolve_difficulty<R: BufRead, W: Write>(
    settings: &Settings,
    console: &mut Console<R, W>,
) -> Result<Difficulty> {
    let kind = match settings.difficulty {
        Some(kind) => kind,
        None => console.select_difficulty()?,
    };

    let difficulty = match kind.preset() {
        Some(difficulty) => {
            if settings.weighting.is_some() {
                log::warn!("ignoring weighting: it only applies to the custom difficulty");
            }
            difficulty
        }
        None => {
            let weighting = match settings.weighting {
                Some(value) => Weighting::new(value).context("invalid custom weighting")?,
                None => console.select_weighting()?,
            };
            Difficulty::Custom(weighting)
        }
    };

    console.say(format!("You have selected the {difficulty} difficulty!"))?;
    if let Difficulty::Custom(weighting) = difficulty {
        console.say(format!(
            "Custom difficulty level is set at {}",
            weighting.get()
        ))?;
    }
    Ok(difficulty)
}

fn run<R: BufRead, W: Write>(
    engine: &mut TurnEngine,
    console: &mut Console<R, W>,
    reveal: bool,
) -> Result<GameState> {
    let mut responses: Vec<Response> = Vec::new();
    loop {
        let line = console.read_line()?;
        responses.clear();
        let state = engine.play_round(&line, &mut responses);
        for response in &responses {
            console.say(response)?;
        }
        if reveal {
            console.say(query::render_map(engine.world()))?;
        }
        if state.is_terminal() {
            log::info!(
                "{state:?} after {} rounds",
                query::rounds_played(engine.world())
            );
            return Ok(state);
        }
    }
}
