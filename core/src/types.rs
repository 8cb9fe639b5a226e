use core::fmt;
use serde::{Deserialize, Serialize};

use crate::{FlipError, Result};

/// Number of cells along one side of the grid.
pub const GRID_SIDE: u8 = 3;

/// Total number of cells in the grid.
pub const GRID_CELLS: u8 = GRID_SIDE * GRID_SIDE;

/// Position of a cell in the 3×3 grid, numbered row-major starting at 1.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CellIndex(u8);

impl CellIndex {
    pub const FIRST: Self = Self(1);
    pub const LAST: Self = Self(GRID_CELLS);

    pub const fn new(index: u8) -> Result<Self> {
        if index >= 1 && index <= GRID_CELLS {
            Ok(Self(index))
        } else {
            Err(FlipError::InvalidCell(index))
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based row, top to bottom.
    pub const fn row(self) -> u8 {
        (self.0 - 1) / GRID_SIDE
    }

    /// Zero-based column, left to right.
    pub const fn col(self) -> u8 {
        (self.0 - 1) % GRID_SIDE
    }

    /// Offset into dense per-cell arrays.
    pub(crate) const fn slot(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Every cell in ascending order.
    pub fn all() -> impl Iterator<Item = Self> + Clone {
        (1..=GRID_CELLS).map(Self)
    }
}

impl TryFrom<u8> for CellIndex {
    type Error = FlipError;

    fn try_from(index: u8) -> Result<Self> {
        Self::new(index)
    }
}

impl From<CellIndex> for u8 {
    fn from(cell: CellIndex) -> Self {
        cell.0
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which side of a cell is showing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Face {
    Front,
    Back,
}

impl Face {
    pub const fn from_flipped(flipped: bool) -> Self {
        if flipped { Self::Back } else { Self::Front }
    }

    pub const fn is_back(self) -> bool {
        matches!(self, Self::Back)
    }

    pub const fn name(self) -> &'static str {
        use Face::*;
        match self {
            Front => "front",
            Back => "back",
        }
    }
}

impl Default for Face {
    fn default() -> Self {
        Self::Front
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn cell_index_rejects_out_of_range() {
        assert_eq!(CellIndex::new(0), Err(FlipError::InvalidCell(0)));
        assert_eq!(CellIndex::new(10), Err(FlipError::InvalidCell(10)));
        assert_eq!(CellIndex::new(9).map(CellIndex::get), Ok(9));
    }

    #[test]
    fn all_cells_cover_one_through_nine() {
        let cells: Vec<u8> = CellIndex::all().map(u8::from).collect();
        assert_eq!(cells, [1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn rows_and_columns_are_row_major() {
        let center = CellIndex::new(5).unwrap();
        assert_eq!((center.row(), center.col()), (1, 1));
        assert_eq!((CellIndex::LAST.row(), CellIndex::LAST.col()), (2, 2));
        assert_eq!((CellIndex::FIRST.row(), CellIndex::FIRST.col()), (0, 0));
    }

    #[test]
    fn face_follows_resolved_flag() {
        assert_eq!(Face::from_flipped(false), Face::Front);
        assert_eq!(Face::from_flipped(true), Face::Back);
        assert!(Face::Back.is_back());
    }
}
