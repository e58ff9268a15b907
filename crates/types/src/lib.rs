//! Core types shared across the workspace.
//! This crate contains pure data types with no external dependencies.

/// Grid dimensions.
pub const GRID_WIDTH: u8 = 10;
pub const GRID_HEIGHT: u8 = 20;

/// Gravity cadence: one forced drop every 300ms.
pub const GRAVITY_TICK_MS: u64 = 300;

/// Points awarded per cleared line.
pub const SCORE_PER_LINE: u32 = 100;

/// Capacity of the bounded input command queue. Commands pushed while the
/// queue is full are dropped (input is lossy, never blocking).
pub const COMMAND_QUEUE_DEPTH: usize = 64;

/// A single grid cell: occupied or not. Occupancy carries no further
/// information in the core.
pub type Cell = bool;

/// Tetromino piece kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All seven kinds, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Engine commands. This is the closed vocabulary the grid engine accepts;
/// anything else from the keyboard is ignored upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Left,
    Right,
    SoftDrop,
    Quit,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Left => "left",
            Command::Right => "right",
            Command::SoftDrop => "softDrop",
            Command::Quit => "quit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_kind_str_roundtrip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(PieceKind::from_str("x"), None);
    }

    #[test]
    fn test_all_kinds_distinct() {
        for (i, a) in PieceKind::ALL.iter().enumerate() {
            for b in &PieceKind::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
