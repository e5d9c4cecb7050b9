//! Parser for the plain-text map format.
//!
//! ```text
//! name Small Cave
//! win 1
//! #####
//! #.GE#
//! #####
//! ```
//!
//! The first two lines carry a label followed by the map name and the gold
//! requirement. Every remaining line is one row of tiles.

use dungeon_chase_core::Tile;
use thiserror::Error;

use crate::grid::Grid;

/// Fatal problems detected while loading a map.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MapError {
    /// The text has no name line.
    #[error("map is missing its name line")]
    MissingName,
    /// The text has no gold requirement line.
    #[error("map is missing its gold requirement line")]
    MissingGoldRequirement,
    /// The gold requirement is not a number.
    #[error("invalid gold amount `{0}`")]
    InvalidGoldAmount(String),
    /// The gold requirement is below zero.
    #[error("cannot require negative gold ({0})")]
    NegativeGold(i64),
    /// No rows follow the metadata.
    #[error("unable to find a map layout after the metadata")]
    EmptyLayout,
    /// A row differs in length from the first row.
    #[error("row {row} has length {found}, expected {expected}")]
    RaggedRow {
        /// Zero-based row index within the layout.
        row: u32,
        /// Width established by the first row.
        expected: u32,
        /// Width of the offending row.
        found: u32,
    },
    /// A character is not one of `#`, `.`, `G`, `E`.
    #[error("invalid token '{symbol}' on map at coordinates ({column}, {row})")]
    InvalidTile {
        /// Offending character.
        symbol: char,
        /// Column of the offending character.
        column: u32,
        /// Row of the offending character.
        row: u32,
    },
    /// The tile list does not fill the declared dimensions.
    #[error("expected {expected} tiles, found {found}")]
    DimensionMismatch {
        /// Tiles implied by the dimensions.
        expected: usize,
        /// Tiles supplied.
        found: usize,
    },
    /// A border cell is not a wall.
    #[error("map border is open at ({column}, {row})")]
    OpenBorder {
        /// Column of the first non-wall border cell.
        column: i32,
        /// Row of the first non-wall border cell.
        row: i32,
    },
    /// Less gold lies on the map than the requirement.
    #[error("map requires {required} gold but only {available} is placed")]
    InsufficientGold {
        /// Gold required to win.
        required: u32,
        /// Gold present on the map.
        available: u32,
    },
    /// Neither floor nor exit exists to place entities on.
    #[error("map has no floor or exit tile to spawn on")]
    NoSpawnableTile,
}

/// Named, validated map ready to seed a world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapDefinition {
    name: String,
    grid: Grid,
}

impl MapDefinition {
    /// Parses the textual map format.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let mut lines = text.lines();
        let name = lines.next().map(metadata_value).ok_or(MapError::MissingName)?;
        let gold_line = lines.next().ok_or(MapError::MissingGoldRequirement)?;
        let gold_required = parse_gold_required(metadata_value(gold_line))?;

        let layout: Vec<&str> = lines.collect();
        let first = layout.first().ok_or(MapError::EmptyLayout)?;
        let columns = first.chars().count();
        if columns == 0 {
            return Err(MapError::EmptyLayout);
        }

        let mut tiles = Vec::with_capacity(columns * layout.len());
        for (row, line) in layout.iter().enumerate() {
            let found = line.chars().count();
            if found != columns {
                return Err(MapError::RaggedRow {
                    row: row as u32,
                    expected: columns as u32,
                    found: found as u32,
                });
            }

            for (column, symbol) in line.chars().enumerate() {
                let tile = Tile::from_symbol(symbol).ok_or(MapError::InvalidTile {
                    symbol,
                    column: column as u32,
                    row: row as u32,
                })?;
                tiles.push(tile);
            }
        }

        let grid = Grid::new(columns as u32, layout.len() as u32, tiles, gold_required)?;
        log::info!(
            "parsed map `{name}` ({}x{}, {} gold required)",
            grid.columns(),
            grid.rows(),
            grid.gold_required()
        );

        Ok(Self { name, grid })
    }

    /// Name given on the first metadata line.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validated tile grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Splits the definition into its name and grid.
    #[must_use]
    pub fn into_parts(self) -> (String, Grid) {
        (self.name, self.grid)
    }
}

/// Everything after the first space, trimmed; the whole line when there is no space.
fn metadata_value(line: &str) -> String {
    line.split_once(' ')
        .map_or(line, |(_, value)| value)
        .trim()
        .to_owned()
}

fn parse_gold_required(value: String) -> Result<u32, MapError> {
    let amount: i64 = value
        .parse()
        .map_err(|_| MapError::InvalidGoldAmount(value.clone()))?;
    if amount < 0 {
        return Err(MapError::NegativeGold(amount));
    }
    u32::try_from(amount).map_err(|_| MapError::InvalidGoldAmount(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "name Small_Cave\nwin 1\n#####\n#.GE#\n#####\n";

    #[test]
    fn parses_metadata_and_layout() {
        let map = MapDefinition::parse(SMALL).expect("valid map");
        assert_eq!(map.name(), "Small_Cave");
        assert_eq!(map.grid().gold_required(), 1);
        assert_eq!(map.grid().columns(), 5);
        assert_eq!(map.grid().rows(), 3);
    }

    #[test]
    fn name_keeps_inner_spaces() {
        let map = MapDefinition::parse("name  The Deep Halls \nwin 0\n###\n#.#\n###")
            .expect("valid map");
        assert_eq!(map.name(), "The Deep Halls");
    }

    #[test]
    fn tolerates_windows_line_endings() {
        let text = SMALL.replace('\n', "\r\n");
        assert!(MapDefinition::parse(&text).is_ok());
    }

    #[test]
    fn rejects_bad_gold_requirement() {
        let negative = MapDefinition::parse("name x\nwin -2\n###\n#.#\n###");
        assert_eq!(negative, Err(MapError::NegativeGold(-2)));

        let garbage = MapDefinition::parse("name x\nwin lots\n###\n#.#\n###");
        assert_eq!(garbage, Err(MapError::InvalidGoldAmount("lots".to_owned())));
    }

    #[test]
    fn rejects_missing_layout() {
        assert_eq!(MapDefinition::parse("name x\nwin 0\n"), Err(MapError::EmptyLayout));
        assert_eq!(MapDefinition::parse("name x"), Err(MapError::MissingGoldRequirement));
        assert_eq!(MapDefinition::parse(""), Err(MapError::MissingName));
    }

    #[test]
    fn rejects_ragged_rows() {
        let error = MapDefinition::parse("name x\nwin 0\n####\n#.#\n####").unwrap_err();
        assert_eq!(
            error,
            MapError::RaggedRow {
                row: 1,
                expected: 4,
                found: 3
            }
        );
    }

    #[test]
    fn invalid_tile_names_its_coordinate() {
        let error = MapDefinition::parse("name x\nwin 0\n####\n#.X#\n####").unwrap_err();
        assert_eq!(
            error,
            MapError::InvalidTile {
                symbol: 'X',
                column: 2,
                row: 1
            }
        );
        assert_eq!(
            error.to_string(),
            "invalid token 'X' on map at coordinates (2, 1)"
        );
    }

    #[test]
    fn rejects_insufficient_gold() {
        let error = MapDefinition::parse("name x\nwin 2\n####\n#G.#\n####").unwrap_err();
        assert_eq!(
            error,
            MapError::InsufficientGold {
                required: 2,
                available: 1
            }
        );
    }
}
