//! GameView: maps a `GridSnapshot` plus HUD state into text lines.
//!
//! This module is pure (no I/O). It can be unit-tested.

use tetrohash_core::GridSnapshot;
use tetrohash_types::{GRID_HEIGHT, GRID_WIDTH};

/// Glyph used for both locked and active cells.
const BLOCK: char = '█';

/// How many leading hex chars of the target digest the HUD shows.
const HASH_PREVIEW_LEN: usize = 16;

/// HUD state that lives outside the grid snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudState<'a> {
    pub target_hash: &'a str,
    pub wallet_sats: u64,
}

/// A text-mode view over the grid. Stateless; one instance serves every frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct GameView;

impl GameView {
    pub fn new() -> Self {
        Self
    }

    /// Render a frame as terminal lines, top to bottom.
    pub fn render_lines(&self, snap: &GridSnapshot, hud: &HudState) -> Vec<String> {
        let mut lines = Vec::with_capacity(GRID_HEIGHT as usize + 7);

        lines.push("=== TetroHash Unlock ===".to_owned());
        lines.push("a/d move  s drop  p check puzzle  q quit".to_owned());
        lines.push(format!(
            "Score: {}    Wallet: {} sats",
            snap.score, hud.wallet_sats
        ));
        lines.push(format!(
            "Target Hash: {}...",
            truncated_hash(hud.target_hash)
        ));

        for y in 0..GRID_HEIGHT as i8 {
            let mut row = String::with_capacity(GRID_WIDTH as usize + 2);
            row.push('|');
            for x in 0..GRID_WIDTH as i8 {
                let occupied =
                    snap.cells[y as usize][x as usize] || snap.is_active_cell(x, y);
                row.push(if occupied { BLOCK } else { ' ' });
            }
            row.push('|');
            lines.push(row);
        }

        let mut floor = String::with_capacity(GRID_WIDTH as usize + 2);
        floor.push('+');
        for _ in 0..GRID_WIDTH {
            floor.push('-');
        }
        floor.push('+');
        lines.push(floor);

        if snap.game_over {
            lines.push("GAME OVER".to_owned());
        }

        lines
    }
}

fn truncated_hash(hash: &str) -> &str {
    let end = hash
        .char_indices()
        .nth(HASH_PREVIEW_LEN)
        .map(|(i, _)| i)
        .unwrap_or(hash.len());
    &hash[..end]
}
