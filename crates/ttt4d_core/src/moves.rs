use std::fmt;

use bincode::{Decode, Encode};

use crate::{Board, Coord, GameError};

/// A mark placed on one cell by the player to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode)]
pub struct Move {
    pub coord: Coord,
}

impl Move {
    pub fn new(w: u8, x: u8, y: u8, z: u8) -> Self {
        Self {
            coord: Coord::new(w, x, y, z),
        }
    }

    /// Parses raw coordinates; anything but four components is malformed.
    pub fn from_slice(components: &[usize]) -> Result<Self, GameError> {
        Coord::from_slice(components).map(Self::from)
    }
}

impl From<Coord> for Move {
    fn from(coord: Coord) -> Self {
        Self { coord }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.coord, f)
    }
}

/// Empty cells of a board in lexicographic (w, x, y, z) order.
///
/// Lazy and finite. Cloning the iterator restarts from the same point, and
/// calling [`legal_moves`] again always yields the same sequence for the same
/// board.
#[derive(Debug, Clone)]
pub struct LegalMoves<'a> {
    board: &'a Board,
    next: usize,
}

pub fn legal_moves(board: &Board) -> LegalMoves<'_> {
    LegalMoves { board, next: 0 }
}

impl Iterator for LegalMoves<'_> {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        let cells = self.board.cells();
        while self.next < cells.len() {
            let index = self.next;
            self.next += 1;
            if cells[index].is_empty() {
                return Some(Coord::from_index(index, self.board.size()).into());
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.board.cells().len() - self.next))
    }
}
