//! Line-oriented console with the interactive setup menus.

use std::{
    fmt::Display,
    io::{BufRead, Write},
};

use anyhow::{bail, Context, Result};
use dungeon_chase_core::Weighting;
use thiserror::Error;

use crate::config::DifficultyKind;

const MENU_WIDTH: usize = 100;
const MENU_BORDER: char = '=';

/// Recoverable menu input; the message is shown and the menu re-prompts.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub(crate) enum Rejection {
    #[error("The number {0} isn't on the list! Please try again...")]
    NotListed(i64),
    #[error("Error: Couldn't find the file with the name \"{0}\"! Please try again...")]
    UnknownFile(String),
    #[error("Error: Please input a number!")]
    NotANumber,
    #[error("Error: Unable to read difficulty! Please select again...")]
    UnknownDifficulty,
    #[error("Please make sure to type in a difficulty between 1 and 10! Please try again...")]
    WeightingOutOfRange,
}

/// Frames numbered, centred entries between two borders.
pub(crate) fn render_menu<S: AsRef<str>>(entries: &[S]) -> String {
    let border: String = std::iter::repeat(MENU_BORDER).take(MENU_WIDTH).collect();
    let mut menu = border.clone();
    for (index, entry) in entries.iter().enumerate() {
        let line = format!("{}. {}", index + 1, entry.as_ref());
        let padding = MENU_WIDTH.saturating_sub(line.chars().count()) / 2;
        menu.push('\n');
        menu.push_str(&" ".repeat(padding));
        menu.push_str(&line);
    }
    menu.push('\n');
    menu.push_str(&border);
    menu
}

/// Accepts either a 1-based index into `files` or an exact file name.
pub(crate) fn parse_map_choice(input: &str, files: &[String]) -> Result<String, Rejection> {
    let input = input.trim();
    if let Ok(number) = input.parse::<i64>() {
        return usize::try_from(number)
            .ok()
            .and_then(|number| number.checked_sub(1))
            .and_then(|index| files.get(index))
            .cloned()
            .ok_or(Rejection::NotListed(number));
    }
    files
        .iter()
        .find(|file| file.as_str() == input)
        .cloned()
        .ok_or_else(|| Rejection::UnknownFile(input.to_owned()))
}

pub(crate) fn parse_difficulty_choice(input: &str) -> Result<DifficultyKind, Rejection> {
    let number: i64 = input.trim().parse().map_err(|_| Rejection::NotANumber)?;
    usize::try_from(number)
        .ok()
        .and_then(|number| number.checked_sub(1))
        .and_then(|index| DifficultyKind::MENU.get(index))
        .copied()
        .ok_or(Rejection::UnknownDifficulty)
}

pub(crate) fn parse_weighting(input: &str) -> Result<Weighting, Rejection> {
    let number: i64 = input.trim().parse().map_err(|_| Rejection::NotANumber)?;
    u32::try_from(number)
        .ok()
        .and_then(|value| Weighting::new(value).ok())
        .ok_or(Rejection::WeightingOutOfRange)
}

/// Console bound to an input and an output stream.
pub(crate) struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Reads one line without its terminator. Closed input is an error.
    pub(crate) fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read from standard input")?;
        if read == 0 {
            bail!("standard input closed before the game ended");
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    pub(crate) fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{text}").context("failed to write to standard output")
    }

    pub(crate) fn select_map(&mut self, files: &[String]) -> Result<String> {
        self.say("Please select a map by either:")?;
        self.say("- Typing in the name of the .txt file")?;
        self.say("- Typing in the corresponding number")?;
        let file = self.prompt(&render_menu(files), |input| parse_map_choice(input, files))?;
        self.say(format!("You have selected the map {file}"))?;
        Ok(file)
    }

    pub(crate) fn select_difficulty(&mut self) -> Result<DifficultyKind> {
        self.say("Please select a bot difficulty by typing in the corresponding number: ")?;
        let descriptions = DifficultyKind::MENU.map(DifficultyKind::description);
        self.prompt(&render_menu(&descriptions), parse_difficulty_choice)
    }

    pub(crate) fn select_weighting(&mut self) -> Result<Weighting> {
        self.prompt(
            "Please type in a number from 1 to 10 to change the difficulty: ",
            parse_weighting,
        )
    }

    /// Shows `header` and reads until `parse` accepts a line.
    fn prompt<T>(
        &mut self,
        header: &str,
        mut parse: impl FnMut(&str) -> Result<T, Rejection>,
    ) -> Result<T> {
        loop {
            self.say(header)?;
            let line = self.read_line()?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(rejection) => {
                    log::debug!("menu input {line:?} rejected: {rejection:?}");
                    self.say(rejection)?;
                }
            }
        }
    }
}
