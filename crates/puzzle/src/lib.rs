//! Hash-puzzle collaborator: SHA-256 preimage puzzles keyed on piece labels.
//!
//! The puzzle side owns target-hash generation and digest comparison; the
//! grid engine only ever hands over the label of its current piece. A puzzle
//! is solved when `sha256(label)` equals the target digest
//! (`<preimage> OP_SHA256 <target> OP_EQUAL OP_VERIFY`, in the original's
//! Bitcoin Script framing). Solving pays a sat reward into an in-memory
//! wallet; payout rails are out of scope.

use sha2::{Digest, Sha256};

use tetrohash_core::{LcgRng, CATALOG};

/// Reward bounds in sats for a solved puzzle.
const REWARD_MIN: u32 = 250;
const REWARD_MAX: u32 = 1000;

/// Hex-encoded SHA-256 digest of a preimage string.
pub fn sha256_hex(preimage: &str) -> String {
    hex::encode(Sha256::digest(preimage.as_bytes()))
}

/// Result of checking a piece label against the active puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuzzleOutcome {
    pub matched: bool,
    pub reward: u64,
}

/// An active SHA-256 puzzle: one of the seven piece labels, hashed.
pub struct HashPuzzle {
    rng: LcgRng,
    target_hash: String,
}

impl HashPuzzle {
    /// Create a puzzle book with a seeded RNG and generate the first target.
    pub fn new(seed: u32) -> Self {
        let mut puzzle = Self {
            rng: LcgRng::new(seed),
            target_hash: String::new(),
        };
        puzzle.regenerate();
        puzzle
    }

    /// Pick a fresh target: a uniformly chosen piece label, hashed.
    pub fn regenerate(&mut self) {
        let idx = self.rng.next_range(CATALOG.len() as u32) as usize;
        self.target_hash = sha256_hex(CATALOG[idx].label);
        tracing::debug!(hash = %self.target_hash, "new puzzle target");
    }

    /// The current target digest, lowercase hex.
    pub fn target_hash(&self) -> &str {
        &self.target_hash
    }

    /// Check a piece label against the target. On a match, a reward is drawn
    /// and the next puzzle is generated; on a miss nothing changes.
    pub fn check(&mut self, label: &str) -> PuzzleOutcome {
        if sha256_hex(label) != self.target_hash {
            return PuzzleOutcome {
                matched: false,
                reward: 0,
            };
        }

        // Base reward plus a flat bonus of 2 sats per digest hex char.
        let span = REWARD_MAX - REWARD_MIN + 1;
        let base = REWARD_MIN + self.rng.next_range(span);
        let reward = u64::from(base) + 2 * self.target_hash.len() as u64;

        self.regenerate();
        PuzzleOutcome {
            matched: true,
            reward,
        }
    }
}

/// In-memory sat wallet. Bookkeeping only; no storage, no payouts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Wallet {
    sats: u64,
}

impl Wallet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn credit(&mut self, sats: u64) {
        self.sats += sats;
    }

    pub fn balance(&self) -> u64 {
        self.sats
    }
}
