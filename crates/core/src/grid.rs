//! Grid: the fixed-size cell matrix with a self-healing shape invariant.
//!
//! The grid is stored row-of-rows so the structural invariant (exactly
//! `GRID_HEIGHT` rows of exactly `GRID_WIDTH` cells) is a checkable property.
//! `validate_and_repair` restores it deterministically and is invoked at three
//! checkpoints only: after construction, before every render snapshot, and
//! before every lock.

use tetrohash_types::{Cell, GRID_HEIGHT, GRID_WIDTH};

/// The game grid. Rows run top (0) to bottom (`GRID_HEIGHT - 1`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

fn blank_row() -> Vec<Cell> {
    vec![false; GRID_WIDTH as usize]
}

impl Grid {
    /// Create a new blank grid.
    pub fn new() -> Self {
        Self {
            rows: (0..GRID_HEIGHT).map(|_| blank_row()).collect(),
        }
    }

    /// Build a grid from explicit rows. Rows are taken as-is; callers that
    /// hand in a malformed matrix get exactly what `validate_and_repair`
    /// exists to fix.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Whether the cell at (x, y) is occupied. Out-of-range coordinates read
    /// as unoccupied; bounds handling is the collision test's job.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        self.rows
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
            .unwrap_or(false)
    }

    /// Mark the cell at (x, y) occupied. Returns false (and leaves the grid
    /// untouched) when the coordinate is out of bounds.
    pub fn set_occupied(&mut self, x: i8, y: i8) -> bool {
        if x < 0 || x >= GRID_WIDTH as i8 || y < 0 || y >= GRID_HEIGHT as i8 {
            return false;
        }
        self.rows[y as usize][x as usize] = true;
        true
    }

    /// Restore the shape invariant. Any row whose length differs from
    /// `GRID_WIDTH` is replaced by a blank row; excess rows are discarded;
    /// missing rows are inserted blank at the top. Idempotent.
    ///
    /// Returns true when any repair was applied.
    pub fn validate_and_repair(&mut self) -> bool {
        let mut repaired = false;

        if self.rows.len() > GRID_HEIGHT as usize {
            tracing::warn!(
                rows = self.rows.len(),
                "grid has excess rows, truncating to {}",
                GRID_HEIGHT
            );
            self.rows.truncate(GRID_HEIGHT as usize);
            repaired = true;
        }

        for (y, row) in self.rows.iter_mut().enumerate() {
            if row.len() != GRID_WIDTH as usize {
                tracing::warn!(row = y, len = row.len(), "row width mismatch, blanking");
                *row = blank_row();
                repaired = true;
            }
        }

        while self.rows.len() < GRID_HEIGHT as usize {
            self.rows.insert(0, blank_row());
            repaired = true;
        }
        if repaired {
            tracing::warn!("grid shape repaired");
        }

        repaired
    }

    /// Remove every full row, keeping the remaining rows in their relative
    /// order and prepending blank rows at the top. Returns the count removed.
    pub fn clear_full_rows(&mut self) -> u32 {
        let before = self.rows.len();
        self.rows.retain(|row| !row.iter().all(|&cell| cell));
        let cleared = before - self.rows.len();

        for _ in 0..cleared {
            self.rows.insert(0, blank_row());
        }

        cleared as u32
    }

    /// Direct row access for corruption-injection tests.
    #[cfg(test)]
    pub(crate) fn rows_mut(&mut self) -> &mut Vec<Vec<Cell>> {
        &mut self.rows
    }

    /// Reset every cell to empty. Shape is restored as a side effect.
    pub fn wipe(&mut self) {
        self.rows = (0..GRID_HEIGHT).map(|_| blank_row()).collect();
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape_ok(grid: &Grid) -> bool {
        grid.rows().len() == GRID_HEIGHT as usize
            && grid.rows().iter().all(|row| row.len() == GRID_WIDTH as usize)
    }

    #[test]
    fn test_new_grid_is_blank_and_well_shaped() {
        let grid = Grid::new();
        assert!(shape_ok(&grid));
        for y in 0..GRID_HEIGHT as i8 {
            for x in 0..GRID_WIDTH as i8 {
                assert!(!grid.is_occupied(x, y));
            }
        }
    }

    #[test]
    fn test_repair_is_noop_on_valid_grid() {
        let mut grid = Grid::new();
        grid.set_occupied(3, 10);
        let snapshot = grid.clone();
        assert!(!grid.validate_and_repair());
        assert_eq!(grid, snapshot);
    }

    #[test]
    fn test_repair_blanks_short_and_long_rows() {
        let mut grid = Grid::new();
        grid.set_occupied(0, 5);
        grid.rows[5].pop();
        grid.rows[6].push(true);

        assert!(grid.validate_and_repair());
        assert!(shape_ok(&grid));
        // Both malformed rows come back blank, content included.
        assert!(!grid.is_occupied(0, 5));
    }

    #[test]
    fn test_repair_truncates_excess_rows() {
        let mut grid = Grid::new();
        grid.rows.push(vec![true; GRID_WIDTH as usize]);
        assert!(grid.validate_and_repair());
        assert!(shape_ok(&grid));
    }

    #[test]
    fn test_repair_inserts_missing_rows_at_top() {
        let mut grid = Grid::new();
        grid.set_occupied(2, GRID_HEIGHT as i8 - 1);
        grid.rows.remove(0);
        grid.rows.remove(0);

        assert!(grid.validate_and_repair());
        assert!(shape_ok(&grid));
        // Surviving rows keep their place relative to the floor.
        assert!(grid.is_occupied(2, GRID_HEIGHT as i8 - 1));
        assert!(!grid.is_occupied(0, 0));
    }

    #[test]
    fn test_repair_is_idempotent() {
        let mut grid = Grid::from_rows(vec![vec![true; 3], vec![false; 40]]);
        grid.validate_and_repair();
        let once = grid.clone();
        assert!(!grid.validate_and_repair());
        assert_eq!(grid, once);
    }

    #[test]
    fn test_set_occupied_rejects_out_of_bounds() {
        let mut grid = Grid::new();
        assert!(!grid.set_occupied(-1, 0));
        assert!(!grid.set_occupied(GRID_WIDTH as i8, 0));
        assert!(!grid.set_occupied(0, -1));
        assert!(!grid.set_occupied(0, GRID_HEIGHT as i8));
        assert!(grid.set_occupied(0, 0));
    }

    #[test]
    fn test_clear_full_rows_none_full() {
        let mut grid = Grid::new();
        grid.set_occupied(0, 19);
        assert_eq!(grid.clear_full_rows(), 0);
        assert!(grid.is_occupied(0, 19));
    }

    #[test]
    fn test_clear_full_rows_keeps_relative_order() {
        let mut grid = Grid::new();
        // Full rows at 17 and 19, markers at 16 and 18.
        for x in 0..GRID_WIDTH as i8 {
            grid.set_occupied(x, 17);
            grid.set_occupied(x, 19);
        }
        grid.set_occupied(1, 16);
        grid.set_occupied(2, 18);

        assert_eq!(grid.clear_full_rows(), 2);
        assert!(shape_ok(&grid));
        // Marker rows slide down two, order preserved.
        assert!(grid.is_occupied(1, 18));
        assert!(grid.is_occupied(2, 19));
        assert!(!grid.is_occupied(1, 16));
    }

    #[test]
    fn test_wipe_clears_everything() {
        let mut grid = Grid::new();
        grid.set_occupied(4, 4);
        grid.wipe();
        assert!(shape_ok(&grid));
        assert!(!grid.is_occupied(4, 4));
    }
}
