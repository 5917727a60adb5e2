use crate::Coord;

/// Everything that can go wrong when reading or changing a game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("coordinate {coord} is outside a board of size {size}")]
    InvalidCoordinate { coord: Coord, size: usize },

    #[error("a move needs exactly 4 coordinates, got {arity}")]
    InvalidMove { arity: usize },

    #[error("cell {0} is already occupied")]
    IllegalMove(Coord),

    #[error("cannot accept {action} while {state}")]
    InvalidStateTransition {
        state: &'static str,
        action: &'static str,
    },

    #[error("no legal moves left on the board")]
    NoLegalMoves,

    #[error("unsupported board size {0} (expected 2..=8)")]
    UnsupportedSize(usize),

    #[error("board of size {size} needs {expected} cells, got {actual}")]
    CellCount {
        size: usize,
        expected: usize,
        actual: usize,
    },
}
