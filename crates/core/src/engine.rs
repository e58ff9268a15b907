//! Grid engine: the falling-piece state machine.
//!
//! Orchestrates spawn / move / tick / lock / clear / game-over over the grid.
//! The engine is a single-mutator resource: an external scheduler feeds it
//! commands and gravity ticks one at a time, and reads a snapshot between
//! completed mutations. No operation here blocks, and none is fatal; the only
//! terminal condition is a spawn-time collision, which sets the permanent
//! `game_over` flag.

use crate::grid::Grid;
use crate::pieces::{definition, PieceDef, SPAWN_X, SPAWN_Y};
use crate::rng::PieceRng;
use crate::snapshot::GridSnapshot;
use tetrohash_types::{Command, PieceKind, SCORE_PER_LINE};

/// The currently falling piece: a catalog reference plus its anchor.
#[derive(Debug, Clone, Copy)]
pub struct ActivePiece {
    pub def: &'static PieceDef,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    pub fn kind(&self) -> PieceKind {
        self.def.kind
    }

    /// Absolute grid cells covered by the piece. May include cells with
    /// y < 0 while the piece is still entering the visible area.
    pub fn cells(&self) -> [(i8, i8); 4] {
        let mut out = [(0i8, 0i8); 4];
        for (slot, &(dx, dy)) in out.iter_mut().zip(self.def.offsets.iter()) {
            *slot = (self.x + dx, self.y + dy);
        }
        out
    }
}

/// Emitted after each completed lock→clear→spawn sequence, for external
/// recording (reward/persistence collaborators).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub score_delta: u32,
    pub lines_cleared: u32,
    pub game_over: bool,
}

/// Complete engine state: grid, optional active piece, score, terminal flag.
pub struct GridEngine {
    grid: Grid,
    active: Option<ActivePiece>,
    rng: Box<dyn PieceRng>,
    score: u32,
    game_over: bool,
    /// Last lock/line-clear event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GridEngine {
    /// Create an engine over a blank grid. No piece is active until
    /// [`start`](Self::start) spawns the first one.
    pub fn new(rng: Box<dyn PieceRng>) -> Self {
        Self::with_grid(Grid::new(), rng)
    }

    /// Create an engine over a caller-supplied grid (scenario tests, demos).
    pub fn with_grid(mut grid: Grid, rng: Box<dyn PieceRng>) -> Self {
        // Construction checkpoint.
        grid.validate_and_repair();
        Self {
            grid,
            active: None,
            rng,
            score: 0,
            game_over: false,
            last_event: None,
        }
    }

    /// Spawn the first piece. A spawn-time collision here transitions straight
    /// to game over, exactly as for any later spawn.
    pub fn start(&mut self) {
        if self.active.is_none() && !self.game_over {
            self.spawn();
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    /// Label of the current piece, matched externally against puzzle tokens.
    pub fn current_piece_label(&self) -> Option<&'static str> {
        self.active.as_ref().map(|p| p.def.label)
    }

    /// Take and clear the last lock/line-clear event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Collision test for the active piece at a hypothetical anchor.
    ///
    /// A mapped cell collides when x < 0, x ≥ WIDTH, y ≥ HEIGHT, or when it
    /// lies on an occupied cell with y ≥ 0. Cells above the visible area
    /// (y < 0) never collide by themselves; that asymmetry is what makes the
    /// stack reaching the top produce a spawn-time game over.
    pub fn collides(&self, x: i8, y: i8) -> bool {
        match &self.active {
            Some(piece) => self.collides_at(piece.def, x, y),
            None => false,
        }
    }

    fn collides_at(&self, def: &PieceDef, x: i8, y: i8) -> bool {
        let width = self.grid.width() as i8;
        let height = self.grid.height() as i8;
        def.offsets.iter().any(|&(dx, dy)| {
            let (cx, cy) = (x + dx, y + dy);
            if cx < 0 || cx >= width || cy >= height {
                return true;
            }
            cy >= 0 && self.grid.is_occupied(cx, cy)
        })
    }

    /// Apply one command. Unsupported or rejected commands are silent no-ops;
    /// the return value reports whether anything changed.
    pub fn apply(&mut self, cmd: Command) -> bool {
        if self.game_over {
            return false;
        }
        match cmd {
            Command::Left => self.try_shift(-1),
            Command::Right => self.try_shift(1),
            Command::SoftDrop => {
                self.tick();
                true
            }
            // Quit is a scheduler concern, not an engine mutation.
            Command::Quit => false,
        }
    }

    /// Horizontal move: shift the anchor by dx if the target is free,
    /// otherwise do nothing. Never an error.
    fn try_shift(&mut self, dx: i8) -> bool {
        let Some(piece) = &self.active else {
            return false;
        };
        let (def, x, y) = (piece.def, piece.x, piece.y);
        if self.collides_at(def, x + dx, y) {
            return false;
        }
        if let Some(piece) = &mut self.active {
            piece.x += dx;
        }
        true
    }

    /// Gravity step. Either the piece descends one row, or the full
    /// lock→clear→spawn sequence completes before control returns; a tick is
    /// never partially applied.
    pub fn tick(&mut self) -> Option<LockEvent> {
        if self.game_over {
            return None;
        }
        let Some(piece) = &self.active else {
            return None;
        };
        let (def, x, y) = (piece.def, piece.x, piece.y);

        if !self.collides_at(def, x, y + 1) {
            if let Some(piece) = &mut self.active {
                piece.y += 1;
            }
            return None;
        }

        self.lock_active();
        let lines_cleared = self.clear_lines();
        self.spawn();

        let event = LockEvent {
            score_delta: lines_cleared * SCORE_PER_LINE,
            lines_cleared,
            game_over: self.game_over,
        };
        self.last_event = Some(event);
        Some(event)
    }

    /// Commit the active piece into the grid.
    ///
    /// Pre-lock checkpoint: if the grid shape was found corrupted, the pending
    /// lock is discarded and the whole state is reset to blank (score and
    /// piece cleared) rather than writing into a possibly-misshapen structure.
    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        if self.grid.validate_and_repair() {
            tracing::warn!("corruption found at lock checkpoint, resetting grid and score");
            self.grid.wipe();
            self.score = 0;
            return;
        }

        for (x, y) in piece.cells() {
            if !self.grid.set_occupied(x, y) {
                tracing::warn!(x = i32::from(x), y = i32::from(y), "lock cell out of bounds, skipped");
            }
        }
    }

    /// Remove full rows and credit the score. Returns the count removed.
    pub fn clear_lines(&mut self) -> u32 {
        let cleared = self.grid.clear_full_rows();
        self.score += cleared * SCORE_PER_LINE;
        cleared
    }

    /// Draw a fresh piece at the spawn anchor. A collision there is the one
    /// and only way the engine reaches game over: the grid is left untouched,
    /// the candidate is discarded, and the flag becomes permanent.
    fn spawn(&mut self) {
        let def = definition(self.rng.next_piece());
        if self.collides_at(def, SPAWN_X, SPAWN_Y) {
            self.game_over = true;
            self.active = None;
            return;
        }
        self.active = Some(ActivePiece {
            def,
            x: SPAWN_X,
            y: SPAWN_Y,
        });
    }

    /// Produce a render snapshot. Pre-render checkpoint: the grid shape is
    /// validated and repaired immediately before the copy is taken.
    pub fn snapshot(&mut self) -> GridSnapshot {
        self.grid.validate_and_repair();

        let mut snapshot = GridSnapshot::new(self.score, self.game_over);
        for (y, row) in self.grid.rows().iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                snapshot.cells[y][x] = cell;
            }
        }
        snapshot.active_cells = self.active.as_ref().map(|p| p.cells());
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;
    use tetrohash_types::{GRID_HEIGHT, GRID_WIDTH};

    fn engine_with(script: &[PieceKind]) -> GridEngine {
        GridEngine::new(Box::new(ScriptedRng::new(script.to_vec())))
    }

    #[test]
    fn test_start_spawns_at_anchor() {
        let mut engine = engine_with(&[PieceKind::O]);
        engine.start();
        let piece = engine.active().expect("piece after start");
        assert_eq!((piece.x, piece.y), (4, 0));
        assert_eq!(piece.kind(), PieceKind::O);
        assert!(!engine.collides(4, 0));
    }

    #[test]
    fn test_move_shifts_or_leaves_anchor() {
        let mut engine = engine_with(&[PieceKind::O]);
        engine.start();
        assert!(engine.apply(Command::Left));
        assert_eq!(engine.active().map(|p| p.x), Some(3));

        // Push against the left wall: every rejection is silent.
        for _ in 0..10 {
            engine.apply(Command::Left);
        }
        assert_eq!(engine.active().map(|p| p.x), Some(0));
        assert!(!engine.apply(Command::Left));
        assert_eq!(engine.active().map(|p| p.x), Some(0));
    }

    #[test]
    fn test_tick_descends_without_lock() {
        let mut engine = engine_with(&[PieceKind::I]);
        engine.start();
        assert!(engine.tick().is_none());
        assert_eq!(engine.active().map(|p| p.y), Some(1));
        assert!(engine.take_last_event().is_none());
    }

    #[test]
    fn test_tick_at_floor_runs_full_lock_sequence() {
        let mut engine = engine_with(&[PieceKind::O, PieceKind::I]);
        engine.start();

        // O spans dy 0..=1, so it rests with its anchor at y = 18.
        let mut locked = None;
        for _ in 0..GRID_HEIGHT {
            if let Some(event) = engine.tick() {
                locked = Some(event);
                break;
            }
        }
        let event = locked.expect("piece should lock against the floor");
        assert_eq!(event.lines_cleared, 0);
        assert_eq!(event.score_delta, 0);
        assert!(!event.game_over);

        // Lock, clear, and respawn all happened within the one tick.
        let piece = engine.active().expect("next piece spawned in same tick");
        assert_eq!(piece.kind(), PieceKind::I);
        assert_eq!((piece.x, piece.y), (4, 0));
        assert!(engine.grid().is_occupied(4, 18));
        assert!(engine.grid().is_occupied(5, 19));
    }

    #[test]
    fn test_spawn_collision_sets_game_over_and_preserves_grid() {
        let mut grid = Grid::new();
        for x in 0..GRID_WIDTH as i8 {
            grid.set_occupied(x, 0);
        }
        let before = grid.clone();

        for kind in PieceKind::ALL {
            let mut engine =
                GridEngine::with_grid(before.clone(), Box::new(ScriptedRng::new(vec![kind])));
            engine.start();
            assert!(engine.game_over(), "{:?} should collide at spawn", kind);
            assert!(engine.active().is_none());
            assert_eq!(engine.grid(), &before, "{:?} spawn must not touch the grid", kind);
        }
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut grid = Grid::new();
        for x in 0..GRID_WIDTH as i8 {
            grid.set_occupied(x, 0);
        }
        let mut engine = GridEngine::with_grid(grid, Box::new(ScriptedRng::new(vec![PieceKind::T])));
        engine.start();
        assert!(engine.game_over());

        assert!(!engine.apply(Command::Left));
        assert!(!engine.apply(Command::Right));
        assert!(!engine.apply(Command::SoftDrop));
        assert!(engine.tick().is_none());
        assert!(engine.game_over());
    }

    #[test]
    fn test_corruption_at_lock_discards_lock_and_wipes() {
        let mut engine = engine_with(&[PieceKind::O, PieceKind::T]);
        engine.start();
        engine.score = 500;

        // Drop the O to its resting anchor, then corrupt a row before the
        // lock runs.
        for _ in 0..18 {
            assert!(engine.tick().is_none());
        }
        engine.grid.rows_mut()[19].pop();

        let event = engine.tick().expect("floor tick still completes");
        assert_eq!(event.lines_cleared, 0);
        assert_eq!(engine.score(), 0, "score cleared by defensive reset");
        assert!(!engine.game_over());

        // Grid came back blank; only the freshly spawned piece remains.
        for y in 0..GRID_HEIGHT as i8 {
            for x in 0..GRID_WIDTH as i8 {
                assert!(!engine.grid().is_occupied(x, y));
            }
        }
        assert_eq!(engine.active().map(|p| p.kind()), Some(PieceKind::T));
    }

    #[test]
    fn test_snapshot_reports_cells_and_score() {
        let mut engine = engine_with(&[PieceKind::I]);
        engine.start();
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.score, 0);
        assert!(!snapshot.game_over);
        // I at (4,0) occupies the vertical run (4,0)..(4,3).
        assert_eq!(
            snapshot.active_cells,
            Some([(4, 0), (4, 1), (4, 2), (4, 3)])
        );
        assert!(snapshot.cells.iter().flatten().all(|&cell| !cell));
    }

    #[test]
    fn test_shape_invariant_holds_after_every_mutation() {
        let mut engine = engine_with(&[PieceKind::S, PieceKind::Z, PieceKind::L]);
        engine.start();
        let check = |engine: &GridEngine| {
            assert_eq!(engine.grid().rows().len(), GRID_HEIGHT as usize);
            assert!(engine
                .grid()
                .rows()
                .iter()
                .all(|row| row.len() == GRID_WIDTH as usize));
        };
        for step in 0..200 {
            match step % 3 {
                0 => {
                    engine.apply(Command::Left);
                }
                1 => {
                    engine.apply(Command::Right);
                }
                _ => {
                    engine.tick();
                }
            }
            check(&engine);
            if engine.game_over() {
                break;
            }
        }
    }
}
