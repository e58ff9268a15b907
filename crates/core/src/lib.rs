//! Core grid-engine logic - pure, deterministic, and testable.
//!
//! This crate contains the falling-piece state machine and nothing else: no
//! UI, no networking, no I/O. Everything is driven by an external scheduler
//! feeding discrete commands and gravity ticks.
//!
//! # Module Structure
//!
//! - [`grid`]: 10x20 cell matrix with the self-healing shape invariant
//! - [`pieces`]: the seven fixed shapes with their puzzle labels
//! - [`engine`]: spawn / move / tick / lock / clear / game-over orchestration
//! - [`rng`]: injectable piece-selection randomness
//! - [`snapshot`]: read-only state copy for the render collaborator
//!
//! # Recovery model
//!
//! Nothing in this crate returns an error. Structural grid corruption is
//! auto-repaired at three checkpoints (construction, pre-render, pre-lock);
//! out-of-bounds lock writes are skipped; the only terminal condition is a
//! spawn-time collision, which sets the permanent game-over flag.

pub mod engine;
pub mod grid;
pub mod pieces;
pub mod rng;
pub mod snapshot;

pub use tetrohash_types as types;

// Re-export commonly used types for convenience.
pub use engine::{ActivePiece, GridEngine, LockEvent};
pub use grid::Grid;
pub use pieces::{by_label, definition, PieceDef, CATALOG, SPAWN_X, SPAWN_Y};
pub use rng::{LcgRng, PieceRng, ScriptedRng};
pub use snapshot::GridSnapshot;
