// Core 4D tic-tac-toe game logic modules
pub mod board;
pub mod coord;
pub mod error;
#[cfg(any(test, feature = "test-support"))]
pub mod fixtures;
pub mod lines;
pub mod moves;
pub mod player;
pub mod rules;
pub mod state;

// Re-export main types for convenience
pub use board::Board;
pub use coord::Coord;
pub use error::GameError;
pub use lines::LineTable;
pub use moves::{legal_moves, LegalMoves, Move};
pub use player::{Cell, Player};
pub use rules::{check_move, check_winner, is_legal, Terminal};
pub use state::GameState;
