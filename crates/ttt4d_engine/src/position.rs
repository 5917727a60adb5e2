use std::sync::Arc;

use ttt4d_core::lines::{self, LineTable};
use ttt4d_core::{rules, Board, Cell, Player};

use crate::evaluation::line_weight;

/// Board copy used inside the search, with per-line mark counts kept up to
/// date on every move so wins and evaluation never rescan the board.
#[derive(Debug, Clone)]
pub struct SearchPosition {
    size: usize,
    cells: Vec<Cell>,
    table: Arc<LineTable>,
    // marks per line, indexed by Player::index()
    counts: Vec<[u8; 2]>,
    // summed weights of lines only one player has marked
    pressure: [i32; 2],
    winner: Option<Player>,
    empty: usize,
}

impl SearchPosition {
    pub fn new(board: &Board) -> Self {
        let table = lines::table(board.size());
        let cells = board.cells().to_vec();

        let counts: Vec<[u8; 2]> = table
            .iter()
            .map(|line| {
                let mut count = [0u8; 2];
                for &index in line {
                    if let Some(owner) = cells[index].owner() {
                        count[owner.index()] += 1;
                    }
                }
                count
            })
            .collect();

        let mut pressure = [0i32; 2];
        for count in &counts {
            let contribution = line_pressure(*count);
            pressure[0] += contribution[0];
            pressure[1] += contribution[1];
        }

        Self {
            size: board.size(),
            empty: board.count(Cell::Empty),
            winner: rules::check_winner(board).winner(),
            cells,
            table,
            counts,
            pressure,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell(&self, index: usize) -> Cell {
        self.cells[index]
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn is_full(&self) -> bool {
        self.empty == 0
    }

    pub fn table(&self) -> &LineTable {
        &self.table
    }

    pub fn line_counts(&self) -> &[[u8; 2]] {
        &self.counts
    }

    pub fn pressure(&self, player: Player) -> i32 {
        self.pressure[player.index()]
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index)
    }

    /// Places a mark. The cell must be empty and the game undecided.
    pub fn play(&mut self, index: usize, player: Player) {
        debug_assert!(self.cells[index].is_empty());
        self.cells[index] = player.cell();
        self.empty -= 1;

        let slot = player.index();
        for &id in self.table.lines_through_index(index) {
            let before = line_pressure(self.counts[id]);
            self.counts[id][slot] += 1;
            let after = line_pressure(self.counts[id]);
            self.pressure[0] += after[0] - before[0];
            self.pressure[1] += after[1] - before[1];

            if self.counts[id][slot] as usize == self.size {
                self.winner = Some(player);
            }
        }
    }

    /// Takes back the last `play`. Positions are never searched past a win,
    /// so the game was undecided before it.
    pub fn unplay(&mut self, index: usize, player: Player) {
        debug_assert_eq!(self.cells[index], player.cell());
        self.cells[index] = Cell::Empty;
        self.empty += 1;

        let slot = player.index();
        for &id in self.table.lines_through_index(index) {
            let before = line_pressure(self.counts[id]);
            self.counts[id][slot] -= 1;
            let after = line_pressure(self.counts[id]);
            self.pressure[0] += after[0] - before[0];
            self.pressure[1] += after[1] - before[1];
        }
        self.winner = None;
    }

    /// (danger to us, danger from us): the most marks the opponent has on a
    /// line we have not touched, and the most we have on a line they have not.
    pub fn danger(&self, us: Player) -> (u8, u8) {
        let (ours, theirs) = (us.index(), us.opponent().index());
        let mut to_us = 0;
        let mut from_us = 0;
        for count in &self.counts {
            if count[ours] == 0 {
                to_us = to_us.max(count[theirs]);
            } else if count[theirs] == 0 {
                from_us = from_us.max(count[ours]);
            }
        }
        (to_us, from_us)
    }

    /// Moves worth searching for `us`, in board order.
    ///
    /// Ahead: only cells on our strongest open lines. Behind: only cells on
    /// the opponent's strongest open lines. Level: every empty cell.
    pub fn candidate_moves(&self, us: Player) -> Vec<usize> {
        let (to_us, from_us) = self.danger(us);
        let focus = if to_us < from_us {
            us
        } else if to_us > from_us {
            us.opponent()
        } else {
            return self.empty_cells().collect();
        };
        let level = to_us.max(from_us);

        let (owner, other) = (focus.index(), focus.opponent().index());
        let mut wanted = vec![false; self.cells.len()];
        for (id, count) in self.counts.iter().enumerate() {
            if count[owner] == level && count[other] == 0 {
                for &index in self.table.line(id) {
                    wanted[index] = true;
                }
            }
        }

        self.empty_cells().filter(|&index| wanted[index]).collect()
    }

    /// Empty cells that would complete a line for `player`, in board order.
    pub fn winning_cells(&self, player: Player) -> Vec<usize> {
        let (ours, theirs) = (player.index(), player.opponent().index());
        let mut wanted = vec![false; self.cells.len()];
        for (id, count) in self.counts.iter().enumerate() {
            if count[ours] as usize == self.size - 1 && count[theirs] == 0 {
                for &index in self.table.line(id) {
                    wanted[index] = true;
                }
            }
        }
        self.empty_cells().filter(|&index| wanted[index]).collect()
    }
}

// Weight each player gets from one line: only a line untouched by the other
// player counts.
fn line_pressure(count: [u8; 2]) -> [i32; 2] {
    match count {
        [0, 0] => [0, 0],
        [k, 0] => [line_weight(k), 0],
        [0, k] => [0, line_weight(k)],
        _ => [0, 0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttt4d_core::Coord;

    fn index(w: u8, x: u8, y: u8, z: u8) -> usize {
        Coord::new(w, x, y, z).index(4)
    }

    #[test]
    fn test_play_and_unplay_restore_position() {
        let board = Board::standard();
        let mut position = SearchPosition::new(&board);
        let before = position.clone();

        position.play(index(1, 2, 3, 0), Player::Player1);
        position.play(index(0, 0, 0, 0), Player::Player2);
        assert_ne!(position.pressure(Player::Player1), 0);
        position.unplay(index(0, 0, 0, 0), Player::Player2);
        position.unplay(index(1, 2, 3, 0), Player::Player1);

        assert_eq!(position.cells, before.cells);
        assert_eq!(position.counts, before.counts);
        assert_eq!(position.pressure, before.pressure);
        assert_eq!(position.empty, 256);
    }

    #[test]
    fn test_incremental_counts_match_rebuild() {
        let mut board = Board::standard();
        let mut position = SearchPosition::new(&board);
        let moves = [
            (Coord::new(0, 0, 0, 0), Player::Player1),
            (Coord::new(1, 1, 1, 1), Player::Player2),
            (Coord::new(0, 0, 0, 1), Player::Player1),
            (Coord::new(3, 2, 1, 0), Player::Player2),
        ];
        for (coord, player) in moves {
            board.set(coord, player.cell()).unwrap();
            position.play(coord.index(4), player);
        }

        let rebuilt = SearchPosition::new(&board);
        assert_eq!(position.counts, rebuilt.counts);
        assert_eq!(position.pressure, rebuilt.pressure);
        assert_eq!(position.empty, rebuilt.empty);
    }

    #[test]
    fn test_completing_a_line_sets_winner() {
        let mut position = SearchPosition::new(&Board::standard());
        for t in 0..3 {
            position.play(index(t, t, t, t), Player::Player2);
        }
        assert_eq!(position.winner(), None);
        position.play(index(3, 3, 3, 3), Player::Player2);
        assert_eq!(position.winner(), Some(Player::Player2));
        position.unplay(index(3, 3, 3, 3), Player::Player2);
        assert_eq!(position.winner(), None);
    }

    #[test]
    fn test_danger_ignores_blocked_lines() {
        let mut position = SearchPosition::new(&Board::standard());
        position.play(index(0, 0, 0, 0), Player::Player1);
        position.play(index(0, 0, 0, 1), Player::Player1);
        assert_eq!(position.danger(Player::Player2), (2, 0));
        assert_eq!(position.danger(Player::Player1), (0, 2));

        position.play(index(0, 0, 0, 2), Player::Player2);
        // the z line is now mixed; only single marks remain open for Player1
        assert_eq!(position.danger(Player::Player2), (1, 1));
    }

    #[test]
    fn test_candidates_focus_on_threats() {
        let mut position = SearchPosition::new(&Board::standard());
        assert_eq!(position.candidate_moves(Player::Player1).len(), 256);

        position.play(index(0, 0, 0, 0), Player::Player1);
        let defend = position.candidate_moves(Player::Player2);
        // 15 lines through the corner, 3 empty cells each
        assert_eq!(defend.len(), 45);
        assert!(defend.contains(&index(0, 0, 0, 3)));
        assert!(defend.contains(&index(3, 3, 3, 3)));
        assert!(!defend.contains(&index(1, 2, 0, 0)));
        assert!(defend.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_winning_cells() {
        let mut position = SearchPosition::new(&Board::standard());
        for z in 0..3 {
            position.play(index(2, 2, 2, z), Player::Player1);
        }
        assert_eq!(position.winning_cells(Player::Player1), vec![index(2, 2, 2, 3)]);
        assert!(position.winning_cells(Player::Player2).is_empty());
    }
}
