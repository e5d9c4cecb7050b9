//! Session settings merged from an optional TOML file and the command line.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::ValueEnum;
use dungeon_chase_core::Difficulty;
use serde::Deserialize;

/// Settings file picked up from the working directory when `--config` is absent.
pub(crate) const DEFAULT_CONFIG_FILE: &str = "dungeon-chase.toml";

/// Directory scanned for maps when no other location is configured.
pub(crate) const DEFAULT_MAPS_DIR: &str = "maps";

/// Difficulty names accepted on the command line, in settings files and in the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub(crate) enum DifficultyKind {
    Easy,
    Medium,
    Hard,
    Godlike,
    Custom,
}

impl DifficultyKind {
    /// Menu order; the entry at index `i` is chosen by typing `i + 1`.
    pub(crate) const MENU: [DifficultyKind; 5] = [
        Self::Easy,
        Self::Medium,
        Self::Hard,
        Self::Godlike,
        Self::Custom,
    ];

    pub(crate) const fn description(self) -> &'static str {
        match self {
            Self::Easy => "EASY - Randomly moves around the map.",
            Self::Medium => "MEDIUM - Attempts to chase you when executing the LOOK command.",
            Self::Hard => {
                "HARD - The bot will chase you with 100% accuracy when it finds you using the LOOK command."
            }
            Self::Godlike => {
                "GODLIKE - The bot knows where you are at all times and tries to chase you."
            }
            Self::Custom => "CUSTOM - Customise the difficulty level for you!",
        }
    }

    /// Difficulty for every kind except custom, which still needs a weighting.
    pub(crate) const fn preset(self) -> Option<Difficulty> {
        match self {
            Self::Easy => Some(Difficulty::Easy),
            Self::Medium => Some(Difficulty::Medium),
            Self::Hard => Some(Difficulty::Hard),
            Self::Godlike => Some(Difficulty::Godlike),
            Self::Custom => None,
        }
    }
}

/// Settings for one session. Anything left unset is asked for interactively.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct Settings {
    pub(crate) map: Option<PathBuf>,
    pub(crate) maps_dir: Option<PathBuf>,
    pub(crate) difficulty: Option<DifficultyKind>,
    pub(crate) weighting: Option<u32>,
    pub(crate) seed: Option<u64>,
}

impl Settings {
    /// Loads the settings file.
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] is read
    /// when present and defaults are used otherwise.
    pub(crate) fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::read(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::read(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        let settings = Self::from_toml(&contents)
            .with_context(|| format!("invalid settings in {}", path.display()))?;
        log::info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    pub(crate) fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse settings toml contents")
    }

    /// Layers `overrides` on top of `self`; values set in `overrides` win.
    #[must_use]
    pub(crate) fn overlay(self, overrides: Settings) -> Settings {
        Settings {
            map: overrides.map.or(self.map),
            maps_dir: overrides.maps_dir.or(self.maps_dir),
            difficulty: overrides.difficulty.or(self.difficulty),
            weighting: overrides.weighting.or(self.weighting),
            seed: overrides.seed.or(self.seed),
        }
    }

    pub(crate) fn maps_dir(&self) -> PathBuf {
        self.maps_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MAPS_DIR))
    }
}
