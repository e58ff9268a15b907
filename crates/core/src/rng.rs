//! Random piece selection.
//!
//! Spawn draws uniformly from the seven shapes. The source of randomness is
//! injected behind [`PieceRng`] so spawn sequences are reproducible under test
//! with a fixed seed or a scripted sequence.

use std::collections::VecDeque;

use tetrohash_types::PieceKind;

/// Source of spawn randomness.
pub trait PieceRng: Send {
    /// Draw the next piece kind, uniformly over the seven shapes.
    fn next_piece(&mut self) -> PieceKind;
}

/// Simple LCG (Linear Congruential Generator) RNG.
/// Uses constants from Numerical Recipes.
#[derive(Debug, Clone)]
pub struct LcgRng {
    state: u32,
}

impl LcgRng {
    /// Create a new RNG with the given seed.
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max).
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}

impl PieceRng for LcgRng {
    fn next_piece(&mut self) -> PieceKind {
        PieceKind::ALL[self.next_range(7) as usize]
    }
}

/// Scripted piece source for tests: yields a fixed sequence, then cycles it.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    script: VecDeque<PieceKind>,
}

impl ScriptedRng {
    pub fn new(script: impl Into<Vec<PieceKind>>) -> Self {
        Self {
            script: script.into().into(),
        }
    }
}

impl PieceRng for ScriptedRng {
    fn next_piece(&mut self) -> PieceKind {
        let kind = self.script.pop_front().expect("scripted rng exhausted");
        self.script.push_back(kind);
        kind
    }
}
