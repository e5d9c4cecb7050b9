#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Dungeon Chase engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters parse raw input into
//! [`HumanCommand`] values, the turn engine wraps them in [`Command`] values
//! that the world executes via its `apply` entry point, and the world then
//! broadcasts [`Event`] values describing what changed. Systems consume those
//! events, query immutable snapshots, and respond with new commands.

use std::{fmt, ops::RangeInclusive};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = concat!(
    " ____                                             ___   __   ____                   \n",
    "|  _ \\ _   _ _ __   __ _  ___  ___  _ __  ___   / _ \\ / _| |  _ \\  ___   ___  _ __ ___  \n",
    "| | | | | | | '_ \\ / _` |/ _ \\/ _ \\| '_ \\/ __| | | | | |_  | | | |/ _ \\ / _ \\| '_ ` _ \\ \n",
    "| |_| | |_| | | | | (_| |  __/ (_) | | | \\__ \\ | |_| |  _| | |_| | (_) | (_) | | | | | |\n",
    "|____/ \\__,_|_| |_|\\__, |\\___|\\___/|_| |_|___/  \\___/|_|   |____/ \\___/ \\___/|_| |_| |_|\n",
    "                   |___/                                                                 ",
);

/// Radius used by the LOOK command, both for the window size and for proximity sensing.
pub const LOOK_RADIUS: u32 = 5;

/// Number of pursuer turns in one look cycle; the first turn of each cycle is a look.
pub const LOOK_CADENCE: u32 = 4;

/// Weighting applied by the medium difficulty once the human has been spotted.
pub const MEDIUM_WEIGHTING: u32 = 3;

/// Inclusive range of weightings accepted for the custom difficulty.
pub const WEIGHTING_RANGE: RangeInclusive<u32> = 1..=10;

/// Cardinal headings available to both the human and the pursuer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Heading {
    /// Every heading, in the order used when sampling uniformly.
    pub const ALL: [Heading; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Parses the single-letter heading token accepted by `MOVE`.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "N" => Some(Self::North),
            "E" => Some(Self::East),
            "S" => Some(Self::South),
            "W" => Some(Self::West),
            _ => None,
        }
    }

    /// Single-letter label used in transcripts.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::North => 'N',
            Self::East => 'E',
            Self::South => 'S',
            Self::West => 'W',
        }
    }

    const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Positions carry no bounds of their own; whether a position lies inside the
/// dungeon is decided by the grid it is checked against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    column: i32,
    row: i32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Zero-based row index.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Returns the position exactly one cell away in the provided heading.
    ///
    /// Coordinates saturate at the `i32` limits, so a step off the edge of the
    /// coordinate space stays in place.
    #[must_use]
    pub const fn adjacent(self, heading: Heading) -> Self {
        let (dc, dr) = heading.offset();
        Self::new(self.column.saturating_add(dc), self.row.saturating_add(dr))
    }

    /// Reports whether `other` lies within the Euclidean `radius` of this position.
    #[must_use]
    pub fn is_near(self, other: Position, radius: u32) -> bool {
        let dc = i64::from(self.column) - i64::from(other.column);
        let dr = i64::from(self.row) - i64::from(other.row);
        let radius = i64::from(radius);
        dc * dc + dr * dr <= radius * radius
    }

    /// Picks the single heading that most reduces the gap toward `target`.
    ///
    /// The vertical axis wins only when its gap is strictly larger; ties,
    /// including `target == self`, resolve horizontally. Walls are not
    /// considered, so the returned heading may be blocked.
    #[must_use]
    pub fn heading_toward(self, target: Position) -> Heading {
        let dc = i64::from(target.column) - i64::from(self.column);
        let dr = i64::from(target.row) - i64::from(self.row);

        if dr.abs() > dc.abs() {
            if dr > 0 {
                Heading::South
            } else {
                Heading::North
            }
        } else if dc < 0 {
            Heading::West
        } else {
            Heading::East
        }
    }

    /// Computes the Manhattan distance between two positions, saturating at `u32::MAX`.
    #[must_use]
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.column
            .abs_diff(other.column)
            .saturating_add(self.row.abs_diff(other.row))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Terrain stored in a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Impassable rock.
    Wall,
    /// Open floor.
    Floor,
    /// Floor holding one piece of gold.
    Gold,
    /// The way out of the dungeon.
    Exit,
}

impl Tile {
    /// Parses the map-file character for a tile.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '#' => Some(Self::Wall),
            '.' => Some(Self::Floor),
            'G' => Some(Self::Gold),
            'E' => Some(Self::Exit),
            _ => None,
        }
    }

    /// Map-file character for the tile.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Floor => '.',
            Self::Gold => 'G',
            Self::Exit => 'E',
        }
    }

    /// Everything except walls can be walked on.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        !matches!(self, Self::Wall)
    }

    /// Gold is the only collectible tile.
    #[must_use]
    pub const fn is_collectible(self) -> bool {
        matches!(self, Self::Gold)
    }

    /// Entities may be placed on floor and exit tiles at game start.
    #[must_use]
    pub const fn can_spawn_on(self) -> bool {
        matches!(self, Self::Floor | Self::Exit)
    }

    /// Reports whether the tile is the exit.
    #[must_use]
    pub const fn is_exit(self) -> bool {
        matches!(self, Self::Exit)
    }
}

/// Multiplier steering the weighted pursuer toward the last sighting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Weighting(u32);

impl Weighting {
    /// Validates a weighting against [`WEIGHTING_RANGE`].
    pub fn new(value: u32) -> Result<Self, WeightingError> {
        if WEIGHTING_RANGE.contains(&value) {
            Ok(Self(value))
        } else {
            Err(WeightingError::OutOfRange { value })
        }
    }

    /// Weighting used by the medium difficulty.
    #[must_use]
    pub const fn medium() -> Self {
        Self(MEDIUM_WEIGHTING)
    }

    /// Retrieves the numeric weighting.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Weighting {
    type Error = WeightingError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Weighting> for u32 {
    fn from(weighting: Weighting) -> Self {
        weighting.0
    }
}

/// Rejection raised when a custom weighting falls outside [`WEIGHTING_RANGE`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum WeightingError {
    /// The requested weighting is not between 1 and 10.
    #[error("weighting {value} is outside the supported range 1..=10")]
    OutOfRange {
        /// Weighting that was requested.
        value: u32,
    },
}

/// Pursuer difficulty chosen once before play begins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Wanders uniformly at random.
    Easy,
    /// Weighted chase with the fixed [`MEDIUM_WEIGHTING`].
    Medium,
    /// Certain chase once the human has been spotted.
    Hard,
    /// Always knows where the human is.
    Godlike,
    /// Weighted chase with an operator-chosen weighting.
    Custom(Weighting),
}

impl Difficulty {
    /// Upper-case label shown to the player.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Medium => "MEDIUM",
            Self::Hard => "HARD",
            Self::Godlike => "GODLIKE",
            Self::Custom(_) => "CUSTOM",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Commands a human may issue during a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HumanCommand {
    /// Reports the amount of gold collected so far.
    Gold,
    /// Attempts to pick up gold on the current tile.
    Pickup,
    /// Ends the game, winning only on the exit with enough gold.
    Quit,
    /// Attempts a single step in the given heading.
    Move {
        /// Heading of the attempted step.
        heading: Heading,
    },
    /// Requests the windowed view around the human.
    Look,
    /// Announces how much gold the dungeon requires.
    Hello,
}

impl HumanCommand {
    /// Tokenises a raw input line into a command.
    ///
    /// The first whitespace-separated token selects the command regardless of
    /// case. `MOVE` takes exactly one `N`/`E`/`S`/`W` argument.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut tokens = line.split_whitespace();
        let command = tokens.next().unwrap_or_default().to_ascii_uppercase();
        let args: Vec<&str> = tokens.collect();

        match command.as_str() {
            "GOLD" => Ok(Self::Gold),
            "PICKUP" => Ok(Self::Pickup),
            "QUIT" | "EXIT" => Ok(Self::Quit),
            "LOOK" => Ok(Self::Look),
            "HELLO" => Ok(Self::Hello),
            "MOVE" => match args.as_slice() {
                [token] => Heading::from_token(token)
                    .map(|heading| Self::Move { heading })
                    .ok_or(CommandError::MoveSyntax),
                _ => Err(CommandError::MoveSyntax),
            },
            _ => Err(CommandError::UnknownCommand(command)),
        }
    }
}

/// Recoverable rejection of a raw input line.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    /// `MOVE` was issued without exactly one valid heading.
    #[error("Syntax Error: Syntax should be MOVE <N / E / S / W>")]
    MoveSyntax,
    /// The first token is not a known command.
    #[error("Invalid Command {0}!")]
    UnknownCommand(String),
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Executes a command on behalf of the human.
    Human(HumanCommand),
    /// Moves the pursuer one step in the provided heading if the tile is walkable.
    StepPursuer {
        /// Heading of the attempted step.
        heading: Heading,
    },
    /// Closes the current round: checks for capture and resolves a pending quit.
    CloseRound,
}

/// Action chosen by a pursuer strategy for a single turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PursuerAction {
    /// Attempt a step in the given heading.
    Move(Heading),
    /// Spend the turn sensing; the pursuer stays in place.
    Look,
}

/// Reason a game ended without the human escaping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LossCause {
    /// The pursuer reached the human's tile.
    Captured,
    /// The human quit away from the exit or without enough gold.
    QuitEarly,
}

/// Lifecycle of a single game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameState {
    /// Rounds are still being played.
    Active,
    /// The human quit on the exit holding enough gold.
    WonExit,
    /// The game is over and the human did not escape.
    Lost(LossCause),
}

impl GameState {
    /// Terminal states end the round loop.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Active)
    }
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Reports the human's gold total.
    GoldReported {
        /// Gold collected so far.
        owned: u32,
    },
    /// Confirms that gold was picked up.
    GoldCollected {
        /// Gold collected after the pickup.
        owned: u32,
    },
    /// Reports that the human's tile held no gold.
    PickupFailed,
    /// Confirms that the human moved between two cells.
    HumanMoved {
        /// Cell occupied before the move.
        from: Position,
        /// Cell occupied after the move.
        to: Position,
    },
    /// Reports that the human's step was blocked by a wall.
    HumanBlocked {
        /// Heading of the rejected step.
        heading: Heading,
    },
    /// Carries the window produced by a LOOK.
    LookRendered {
        /// Window centred on the human.
        view: LookView,
    },
    /// Announces the gold required to win.
    GoldRequirementReported {
        /// Gold required by the dungeon.
        required: u32,
    },
    /// Records that the human asked to quit.
    QuitRequested {
        /// Whether the human stood on the exit holding enough gold.
        escaped: bool,
    },
    /// Confirms that the pursuer moved between two cells.
    PursuerMoved {
        /// Cell occupied before the move.
        from: Position,
        /// Cell occupied after the move.
        to: Position,
    },
    /// Reports that the pursuer walked into a wall.
    PursuerBlocked {
        /// Heading of the rejected step.
        heading: Heading,
    },
    /// Reports that the pursuer shares the human's tile at the end of a round.
    HumanCaught {
        /// Tile where the capture happened.
        cell: Position,
    },
    /// Announces that the game reached a terminal state.
    GameEnded {
        /// Terminal state reached.
        state: GameState,
    },
}

/// Square window of map characters centred on a position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LookView {
    size: u32,
    cells: Vec<char>,
}

impl LookView {
    /// Creates a view from row-major cells; `cells.len()` must equal `size * size`.
    #[must_use]
    pub fn new(size: u32, cells: Vec<char>) -> Self {
        debug_assert_eq!(cells.len(), (size as usize) * (size as usize));
        Self { size, cells }
    }

    /// Edge length of the square window.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Character at the window-relative column and row.
    #[must_use]
    pub fn cell(&self, column: u32, row: u32) -> Option<char> {
        if column >= self.size || row >= self.size {
            return None;
        }
        let index = (row as usize) * (self.size as usize) + column as usize;
        self.cells.get(index).copied()
    }

    /// Iterator over the rendered rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cells
            .chunks(self.size.max(1) as usize)
            .map(|row| row.iter().collect())
    }
}

impl fmt::Display for LookView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.rows().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            f.write_str(&row)?;
        }
        Ok(())
    }
}

/// Replies handed back to the console after a human command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Response {
    /// The command succeeded.
    Success,
    /// The command could not be carried out.
    Fail,
    /// Gold was picked up.
    GoldCollected {
        /// Gold collected after the pickup.
        owned: u32,
    },
    /// Gold total requested with `GOLD`.
    GoldOwned {
        /// Gold collected so far.
        owned: u32,
    },
    /// Gold requirement requested with `HELLO`.
    GoldRequired {
        /// Gold required by the dungeon.
        required: u32,
    },
    /// A malformed `MOVE`.
    MoveSyntaxError,
    /// An unrecognised command.
    InvalidCommand {
        /// Upper-cased command token that was rejected.
        command: String,
    },
    /// The window produced by `LOOK`.
    Look(LookView),
}

impl From<CommandError> for Response {
    fn from(error: CommandError) -> Self {
        match error {
            CommandError::MoveSyntax => Self::MoveSyntaxError,
            CommandError::UnknownCommand(command) => Self::InvalidCommand { command },
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("SUCCESS"),
            Self::Fail => f.write_str("FAIL"),
            Self::GoldCollected { owned } => write!(f, "SUCCESS. Gold owned: {owned}"),
            Self::GoldOwned { owned } => write!(f, "Gold owned: {owned}"),
            Self::GoldRequired { required } => write!(f, "Gold to win: {required}"),
            Self::MoveSyntaxError => write!(f, "{}", CommandError::MoveSyntax),
            Self::InvalidCommand { command } => {
                write!(f, "{}", CommandError::UnknownCommand(command.clone()))
            }
            Self::Look(view) => fmt::Display::fmt(view, f),
        }
    }
}
