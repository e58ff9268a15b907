//! Read-only render snapshot.
//!
//! Produced by the engine between completed mutations; the grid shape is
//! validated immediately beforehand, so the fixed-size cell matrix here is
//! always safe to index.

use tetrohash_types::{Cell, GRID_HEIGHT, GRID_WIDTH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    /// Locked cells, row-major, top to bottom.
    pub cells: [[Cell; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
    /// Absolute cells of the active piece, if any. Cells with y < 0 may be
    /// present; consumers clip to the visible area.
    pub active_cells: Option<[(i8, i8); 4]>,
    pub score: u32,
    pub game_over: bool,
}

impl GridSnapshot {
    pub fn new(score: u32, game_over: bool) -> Self {
        Self {
            cells: [[false; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
            active_cells: None,
            score,
            game_over,
        }
    }

    /// Whether the visible cell at (x, y) is covered by the active piece.
    pub fn is_active_cell(&self, x: i8, y: i8) -> bool {
        self.active_cells
            .map(|cells| cells.contains(&(x, y)))
            .unwrap_or(false)
    }
}
