use alloc::collections::BTreeMap;
use serde::{Deserialize, Serialize};

use crate::*;

/// Global flip flag plus the visual state of every cell.
///
/// `cells` starts empty and holds all nine entries once the first cascade has begun. A missing entry means the
/// cell follows the global flag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipState {
    flipped: bool,
    cells: BTreeMap<CellIndex, bool>,
    borders_visible: bool,
    generation: u64,
}

impl FlipState {
    pub fn new() -> Self {
        Self {
            flipped: false,
            cells: BTreeMap::new(),
            borders_visible: true,
            generation: 0,
        }
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn cell_flip_states(&self) -> &BTreeMap<CellIndex, bool> {
        &self.cells
    }

    pub fn borders_visible(&self) -> bool {
        self.borders_visible
    }

    /// Number of cascades started so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn resolve(&self, cell: CellIndex) -> bool {
        self.cells.get(&cell).copied().unwrap_or(self.flipped)
    }

    pub fn face(&self, cell: CellIndex) -> Face {
        Face::from_flipped(self.resolve(cell))
    }

    /// Every cell shows the face the global flag asks for.
    pub fn is_converged(&self) -> bool {
        CellIndex::all().all(|cell| self.resolve(cell) == self.flipped)
    }

    pub fn snapshot(&self) -> FlipSnapshot {
        let mut cells = [None; GRID_CELLS as usize];
        for (&cell, &flipped) in &self.cells {
            cells[cell.slot()] = Some(flipped);
        }
        FlipSnapshot {
            flipped: self.flipped,
            cells,
            borders_visible: self.borders_visible,
        }
    }

    /// Records a new target and opens the next generation.
    pub(crate) fn begin_cascade(&mut self, flipped: bool) -> u64 {
        self.flipped = flipped;
        self.generation += 1;
        self.generation
    }

    /// Snaps every cell to the front face.
    pub(crate) fn reset_cells(&mut self) {
        for cell in CellIndex::all() {
            self.cells.insert(cell, false);
        }
    }

    /// Returns whether the visible state changed.
    pub(crate) fn write(&mut self, cell: CellIndex, flipped: bool) -> bool {
        self.cells.insert(cell, flipped) != Some(flipped)
    }
}

impl Default for FlipState {
    fn default() -> Self {
        Self::new()
    }
}

/// Copyable view of a [`FlipState`] for rendering, compared by value to decide on re-renders.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipSnapshot {
    flipped: bool,
    cells: [Option<bool>; GRID_CELLS as usize],
    borders_visible: bool,
}

impl FlipSnapshot {
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn borders_visible(&self) -> bool {
        self.borders_visible
    }

    pub fn cell(&self, cell: CellIndex) -> Option<bool> {
        self.cells[cell.slot()]
    }

    pub fn resolve(&self, cell: CellIndex) -> bool {
        self.cell(cell).unwrap_or(self.flipped)
    }

    pub fn face(&self, cell: CellIndex) -> Face {
        Face::from_flipped(self.resolve(cell))
    }
}

impl Default for FlipSnapshot {
    fn default() -> Self {
        FlipState::new().snapshot()
    }
}
