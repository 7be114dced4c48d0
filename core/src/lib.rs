#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod tile;
mod types;

/// Board configuration triple: dimensions plus mine count.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    /// Validated constructor: dimensions must be positive and the mine count
    /// must leave at least one safe cell.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        if rows == 0 || cols == 0 || mines >= mult(rows, cols) {
            return Err(GameError::InvalidConfiguration);
        }
        Ok(Self::new_unchecked(rows, cols, mines))
    }

    /// Default engine configuration.
    pub const fn standard() -> Self {
        Self::new_unchecked(18, 18, 40)
    }

    /// Default configuration for the terminal front-end.
    pub const fn compact() -> Self {
        Self::new_unchecked(6, 7, 5)
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }
}

/// Immutable content of a single board cell.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LayoutCell {
    Mine,
    /// Count of mines among the up-to-8 neighbors, `0..=8`.
    Clear(u8),
}

impl LayoutCell {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }
}

/// The fixed board content: mine placement plus precomputed adjacency counts.
///
/// Counts are computed exactly once, at construction, and never change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardLayout {
    cells: Array2<LayoutCell>,
    mine_count: CellCount,
}

impl BoardLayout {
    /// Builds the layout from a mine mask, computing every adjacency count.
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mut cells = Array2::from_elem(mine_mask.dim(), LayoutCell::Clear(0));
        let mut mine_count: CellCount = 0;

        for ((row, col), &is_mine) in mine_mask.indexed_iter() {
            cells[[row, col]] = if is_mine {
                mine_count += 1;
                LayoutCell::Mine
            } else {
                let coords = (
                    row.try_into().unwrap(),
                    col.try_into().unwrap(),
                );
                let adjacent = mine_mask
                    .iter_neighbors(coords)
                    .filter(|&pos| mine_mask[pos.to_nd_index()])
                    .count();
                LayoutCell::Clear(adjacent.try_into().unwrap())
            };
        }

        Self { cells, mine_count }
    }

    /// Fixture-friendly constructor from explicit mine coordinates.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn config(&self) -> GameConfig {
        let (rows, cols) = self.size();
        GameConfig {
            rows,
            cols,
            mines: self.mine_count,
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn in_bounds(&self, coords: Coord2) -> bool {
        let size = self.size();
        coords.0 < size.0 && coords.1 < size.1
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len().try_into().unwrap()
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords].is_mine()
    }

    /// Precomputed adjacency count; zero for mine cells.
    pub fn adjacent_mines(&self, coords: Coord2) -> u8 {
        match self[coords] {
            LayoutCell::Mine => 0,
            LayoutCell::Clear(count) => count,
        }
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }
}

impl Index<Coord2> for BoardLayout {
    type Output = LayoutCell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}
