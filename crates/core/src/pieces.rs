//! Piece catalog: the seven fixed tetromino shapes.
//!
//! Each definition carries the four cell offsets relative to the piece anchor,
//! a symbolic label (the preimage string matched by the hash-puzzle
//! collaborator), and a display glyph. The offset sets are fixed protocol
//! data: labels are resolved against them externally, so they must never be
//! normalized or re-centered.

use tetrohash_types::{PieceKind, GRID_WIDTH};

/// Offset of a single cell relative to the piece anchor.
pub type CellOffset = (i8, i8);

/// Immutable definition of one tetromino shape.
#[derive(Debug, PartialEq, Eq)]
pub struct PieceDef {
    pub kind: PieceKind,
    /// Four (dx, dy) offsets applied to the anchor.
    pub offsets: [CellOffset; 4],
    /// Preimage label checked by the puzzle collaborator.
    pub label: &'static str,
    pub glyph: char,
}

/// The seven shapes, in [`PieceKind::ALL`] order.
pub const CATALOG: [PieceDef; 7] = [
    PieceDef {
        kind: PieceKind::I,
        offsets: [(0, 0), (0, 1), (0, 2), (0, 3)],
        label: "TJLO",
        glyph: '█',
    },
    PieceDef {
        kind: PieceKind::O,
        offsets: [(0, 0), (0, 1), (1, 0), (1, 1)],
        label: "SQUARE",
        glyph: '█',
    },
    PieceDef {
        kind: PieceKind::T,
        offsets: [(0, 1), (1, 0), (1, 1), (1, 2)],
        label: "TEE",
        glyph: '█',
    },
    PieceDef {
        kind: PieceKind::S,
        offsets: [(0, 1), (0, 2), (1, 0), (1, 1)],
        label: "ESS",
        glyph: '█',
    },
    PieceDef {
        kind: PieceKind::Z,
        offsets: [(0, 0), (0, 1), (1, 1), (1, 2)],
        label: "ZED",
        glyph: '█',
    },
    PieceDef {
        kind: PieceKind::J,
        offsets: [(0, 1), (1, 1), (2, 0), (2, 1)],
        label: "JAY",
        glyph: '█',
    },
    PieceDef {
        kind: PieceKind::L,
        offsets: [(0, 0), (1, 0), (2, 0), (2, 1)],
        label: "ELL",
        glyph: '█',
    },
];

/// Spawn anchor for freshly drawn pieces.
pub const SPAWN_X: i8 = GRID_WIDTH as i8 / 2 - 1;
pub const SPAWN_Y: i8 = 0;

/// Look up the definition for a piece kind.
pub fn definition(kind: PieceKind) -> &'static PieceDef {
    match kind {
        PieceKind::I => &CATALOG[0],
        PieceKind::O => &CATALOG[1],
        PieceKind::T => &CATALOG[2],
        PieceKind::S => &CATALOG[3],
        PieceKind::Z => &CATALOG[4],
        PieceKind::J => &CATALOG[5],
        PieceKind::L => &CATALOG[6],
    }
}

/// Look up a definition by its preimage label.
pub fn by_label(label: &str) -> Option<&'static PieceDef> {
    CATALOG.iter().find(|def| def.label == label)
}
