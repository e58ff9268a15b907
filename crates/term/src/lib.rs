//! Terminal rendering layer.
//!
//! Split the way the rest of the workspace is: `game_view` is pure and
//! unit-testable, `renderer` owns the crossterm session (raw mode, alternate
//! screen) and flushes full frames.

pub mod game_view;
pub mod renderer;

pub use game_view::{GameView, HudState};
pub use renderer::TerminalRenderer;
