use crate::lines::{self, LineTable};
use crate::{Board, Cell, GameError, Move, Player};

/// Game-over classification of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terminal {
    Ongoing,
    Win(Player),
    Draw,
}

impl Terminal {
    pub fn is_terminal(self) -> bool {
        self != Terminal::Ongoing
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            Terminal::Win(player) => Some(player),
            _ => None,
        }
    }
}

/// Scans every line of the board.
///
/// Legal play stops at the first completed line, so two winners cannot
/// occur. If a hand-built board has both, the player who moved last (P1 when
/// it has more marks, otherwise P2) is reported.
pub fn check_winner(board: &Board) -> Terminal {
    let table = lines::table(board.size());
    let cells = board.cells();
    let mut complete = [false; 2];

    for line in table.iter() {
        let first = cells[line[0]];
        if let Some(owner) = first.owner() {
            if line.iter().all(|&index| cells[index] == first) {
                complete[owner.index()] = true;
            }
        }
    }

    match complete {
        [true, true] => {
            if board.count(Cell::Player1) > board.count(Cell::Player2) {
                Terminal::Win(Player::Player1)
            } else {
                Terminal::Win(Player::Player2)
            }
        }
        [true, false] => Terminal::Win(Player::Player1),
        [false, true] => Terminal::Win(Player::Player2),
        [false, false] if board.is_full() => Terminal::Draw,
        [false, false] => Terminal::Ongoing,
    }
}

/// Status after `mv` was just played, looking only at the lines through it.
pub fn check_move(board: &Board, mv: Move) -> Result<Terminal, GameError> {
    let index = board.index_of(mv.coord)?;
    let cells = board.cells();
    let Some(mover) = cells[index].owner() else {
        return Ok(Terminal::Ongoing);
    };

    let table = lines::table(board.size());
    if completes_line(&table, cells, index, mover.cell()) {
        Ok(Terminal::Win(mover))
    } else if board.is_full() {
        Ok(Terminal::Draw)
    } else {
        Ok(Terminal::Ongoing)
    }
}

fn completes_line(table: &LineTable, cells: &[Cell], index: usize, mark: Cell) -> bool {
    table
        .lines_through_index(index)
        .iter()
        .any(|&id| table.line(id).iter().all(|&cell| cells[cell] == mark))
}

/// In bounds and currently empty.
pub fn is_legal(board: &Board, mv: Move) -> bool {
    matches!(board.get(mv.coord), Ok(Cell::Empty))
}

/// Legality of raw components; malformed arity is an error, not `false`.
pub fn is_legal_components(board: &Board, components: &[usize]) -> Result<bool, GameError> {
    Move::from_slice(components).map(|mv| is_legal(board, mv))
}
