//! Hand-checked positions shared by the tests of every crate in the
//! workspace. Built with `cfg(test)` or the `test-support` feature only.
use crate::{Board, Cell, Coord, Move};

/// A full 4⁴ board with 128 marks each and no completed line. Row r holds
/// the cells with w = r / 4 and x = r % 4, ordered by (y, z).
pub const DRAWN_BOARD: [&str; 16] = [
    "OOOXOOXXXXXOOXXO",
    "OXXOOXOOXOXXXOOO",
    "XOXOXOOXOXOXOXXX",
    "OXOXXOOOXOXXXXXO",
    "OXXXOXOXXOXXXXOO",
    "XOOOXOOOOXOXOOXX",
    "XOXXOXXOOOOXOOXX",
    "OOXOOOXXOXOOXOXX",
    "XXXOXOXOXOOOOXOX",
    "OOXOOXOXXXOOXXOX",
    "OXOOXXOOOOXXXOXX",
    "XOXXOXOXXXXOXOXO",
    "OXOOXOOOOXXXOOXX",
    "XOXXOXXXOXOOOXXX",
    "OOXXOXOOXOOOXXOO",
    "XOXXOOOXXOXOOXOO",
];

fn drawn_cells() -> impl Iterator<Item = (usize, Cell)> {
    DRAWN_BOARD
        .iter()
        .flat_map(|row| row.chars())
        .map(|c| if c == 'X' { Cell::Player1 } else { Cell::Player2 })
        .enumerate()
}

pub fn drawn_board() -> Board {
    let cells = drawn_cells().map(|(_, cell)| cell).collect();
    Board::from_cells(4, cells).expect("drawn board has 256 cells")
}

/// The drawn board as two move lists in board order, Player1's first.
/// Playing them alternately never completes a line and fills the board.
pub fn drawn_moves() -> (Vec<Move>, Vec<Move>) {
    let mut p1 = Vec::new();
    let mut p2 = Vec::new();
    for (index, cell) in drawn_cells() {
        let mv = Move::from(Coord::from_index(index, 4));
        match cell {
            Cell::Player1 => p1.push(mv),
            _ => p2.push(mv),
        }
    }
    (p1, p2)
}
