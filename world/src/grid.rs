//! Tile matrix owned by the world.

use dungeon_chase_core::{LookView, Position, Tile};
use rand::Rng;

use crate::MapError;

/// Marker drawn over the human in windowed views and full renders.
pub const HUMAN_MARKER: char = 'P';

/// Marker drawn over the pursuer in windowed views and full renders.
pub const PURSUER_MARKER: char = 'B';

/// Rectangular dungeon layout plus the gold needed to escape it.
///
/// Construction rejects layouts whose border is not solid wall, that hold
/// less gold than required, or that offer nowhere to spawn. After that the
/// only mutation is picking gold up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    columns: u32,
    rows: u32,
    tiles: Vec<Tile>,
    gold_required: u32,
}

impl Grid {
    /// Builds a grid from row-major tiles.
    pub fn new(
        columns: u32,
        rows: u32,
        tiles: Vec<Tile>,
        gold_required: u32,
    ) -> Result<Self, MapError> {
        if columns == 0 || rows == 0 {
            return Err(MapError::EmptyLayout);
        }

        let expected = (columns as usize) * (rows as usize);
        if tiles.len() != expected {
            return Err(MapError::DimensionMismatch {
                expected,
                found: tiles.len(),
            });
        }

        let grid = Self {
            columns,
            rows,
            tiles,
            gold_required,
        };

        if let Some(breach) = grid.border_breach() {
            return Err(MapError::OpenBorder {
                column: breach.column(),
                row: breach.row(),
            });
        }

        let available = grid.gold_remaining();
        if available < gold_required {
            return Err(MapError::InsufficientGold {
                required: gold_required,
                available,
            });
        }

        if !grid.tiles.iter().any(|tile| tile.can_spawn_on()) {
            return Err(MapError::NoSpawnableTile);
        }

        Ok(grid)
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Gold the human must hold to escape.
    #[must_use]
    pub const fn gold_required(&self) -> u32 {
        self.gold_required
    }

    /// Gold still lying on the floor.
    #[must_use]
    pub fn gold_remaining(&self) -> u32 {
        let count = self.tiles.iter().filter(|tile| tile.is_collectible()).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Reports whether the position lies inside the grid.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.index(position).is_some()
    }

    /// Tile at the position; anything outside the grid reads as wall.
    #[must_use]
    pub fn tile_at(&self, position: Position) -> Tile {
        self.index(position)
            .and_then(|index| self.tiles.get(index).copied())
            .unwrap_or(Tile::Wall)
    }

    /// Reports whether the tile at the position can be entered.
    #[must_use]
    pub fn is_walkable(&self, position: Position) -> bool {
        self.tile_at(position).is_walkable()
    }

    /// Picks up gold at the position, leaving floor behind.
    ///
    /// Returns `false` when the tile holds no gold.
    pub fn collect_gold_at(&mut self, position: Position) -> bool {
        let Some(index) = self.index(position) else {
            return false;
        };

        match self.tiles.get_mut(index) {
            Some(tile) if tile.is_collectible() => {
                *tile = Tile::Floor;
                true
            }
            _ => false,
        }
    }

    /// Produces the `size` x `size` window whose top-left corner sits
    /// `size / 2` cells above and to the left of `center`.
    ///
    /// Cells outside the grid, including cells beyond the `i32` coordinate
    /// range, read as `#`. Overlays are checked in order, so earlier markers
    /// win when two share a cell.
    #[must_use]
    pub fn windowed_view(&self, center: Position, size: u32, overlays: &[(Position, char)]) -> LookView {
        let span = i64::from(size);
        let half = span / 2;
        let mut cells = Vec::with_capacity((size as usize) * (size as usize));

        for dy in 0..span {
            let row = i32::try_from(i64::from(center.row()) - half + dy);
            for dx in 0..span {
                let column = i32::try_from(i64::from(center.column()) - half + dx);
                let symbol = match (column, row) {
                    (Ok(column), Ok(row)) => self.symbol_at(Position::new(column, row), overlays),
                    _ => Tile::Wall.symbol(),
                };
                cells.push(symbol);
            }
        }

        LookView::new(size, cells)
    }

    /// Samples uniformly random cells until one is floor or exit.
    ///
    /// Terminates with probability one because construction guarantees at
    /// least one spawnable tile.
    pub fn random_spawn<R>(&self, rng: &mut R) -> Position
    where
        R: Rng + ?Sized,
    {
        loop {
            let column = rng.gen_range(0..self.columns);
            let row = rng.gen_range(0..self.rows);
            let position = Position::new(column as i32, row as i32);
            if self.tile_at(position).can_spawn_on() {
                return position;
            }
        }
    }

    /// Renders the whole grid, one line per row, with the provided overlays.
    #[must_use]
    pub fn render(&self, overlays: &[(Position, char)]) -> String {
        let mut rendered = String::with_capacity(self.tiles.len() + self.rows as usize);
        for row in 0..self.rows {
            if row > 0 {
                rendered.push('\n');
            }
            for column in 0..self.columns {
                let position = Position::new(column as i32, row as i32);
                rendered.push(self.symbol_at(position, overlays));
            }
        }
        rendered
    }

    fn symbol_at(&self, position: Position, overlays: &[(Position, char)]) -> char {
        if !self.contains(position) {
            return Tile::Wall.symbol();
        }

        overlays
            .iter()
            .find(|(overlay, _)| *overlay == position)
            .map_or_else(|| self.tile_at(position).symbol(), |(_, marker)| *marker)
    }

    fn border_breach(&self) -> Option<Position> {
        let last_column = self.columns as i32 - 1;
        let last_row = self.rows as i32 - 1;

        (0..self.rows as i32)
            .flat_map(|row| (0..self.columns as i32).map(move |column| Position::new(column, row)))
            .filter(|position| {
                position.row() == 0
                    || position.row() == last_row
                    || position.column() == 0
                    || position.column() == last_column
            })
            .find(|position| self.tile_at(*position) != Tile::Wall)
    }

    fn index(&self, position: Position) -> Option<usize> {
        let column = u32::try_from(position.column()).ok()?;
        let row = u32::try_from(position.row()).ok()?;
        if column < self.columns && row < self.rows {
            Some(row as usize * self.columns as usize + column as usize)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walled(columns: u32, rows: u32) -> Vec<Tile> {
        (0..rows)
            .flat_map(|row| {
                (0..columns).map(move |column| {
                    if row == 0 || row == rows - 1 || column == 0 || column == columns - 1 {
                        Tile::Wall
                    } else {
                        Tile::Floor
                    }
                })
            })
            .collect()
    }

    #[test]
    fn rejects_mismatched_tile_count() {
        let error = Grid::new(3, 3, vec![Tile::Wall; 8], 0).unwrap_err();
        assert_eq!(
            error,
            MapError::DimensionMismatch {
                expected: 9,
                found: 8
            }
        );
    }

    #[test]
    fn reports_first_border_breach() {
        let mut tiles = walled(4, 4);
        tiles[3 * 4 + 2] = Tile::Floor;
        let error = Grid::new(4, 4, tiles, 0).unwrap_err();
        assert_eq!(error, MapError::OpenBorder { column: 2, row: 3 });
    }

    #[test]
    fn rejects_layout_without_spawnable_tiles() {
        let mut tiles = walled(3, 3);
        tiles[4] = Tile::Gold;
        assert_eq!(Grid::new(3, 3, tiles, 0), Err(MapError::NoSpawnableTile));
    }

    #[test]
    fn render_overlays_markers() {
        let grid = Grid::new(3, 3, walled(3, 3), 0).expect("valid grid");
        let rendered = grid.render(&[(Position::new(1, 1), HUMAN_MARKER)]);
        assert_eq!(rendered, "###\n#P#\n###");
    }
}
