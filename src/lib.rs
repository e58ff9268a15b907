//! TetroHash Unlock (workspace facade crate).
//!
//! This package keeps the `tetrohash::{core,puzzle,input,term,types}` public
//! API stable while the implementation lives in dedicated crates under
//! `crates/`.

pub use tetrohash_core as core;
pub use tetrohash_input as input;
pub use tetrohash_puzzle as puzzle;
pub use tetrohash_term as term;
pub use tetrohash_types as types;
