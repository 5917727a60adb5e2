use log::debug;

use crate::rules::{self, Terminal};
use crate::{Board, Cell, GameError, Move, Player};

/// A board plus whose turn it is, how many moves were made, and whether the
/// game is over. Once terminal it no longer changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    to_move: Player,
    move_count: usize,
    status: Terminal,
}

impl GameState {
    pub fn new(size: usize) -> Result<Self, GameError> {
        Ok(Self::from_board(Board::new(size)?))
    }

    pub fn standard() -> Self {
        Self::from_board(Board::standard())
    }

    fn from_board(board: Board) -> Self {
        Self {
            board,
            to_move: Player::FIRST,
            move_count: 0,
            status: Terminal::Ongoing,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub fn status(&self) -> Terminal {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Apply a move and return the new state, leaving `self` untouched.
    pub fn apply(&self, mv: Move) -> Result<GameState, GameError> {
        let mut next = self.clone();
        next.apply_mut(mv)?;
        Ok(next)
    }

    /// Apply a move in place. Every check happens before the board is
    /// touched, so an error leaves the state exactly as it was.
    pub fn apply_mut(&mut self, mv: Move) -> Result<Terminal, GameError> {
        if self.is_terminal() {
            return Err(GameError::InvalidStateTransition {
                state: "the game is over",
                action: "a move",
            });
        }
        if self.board.get(mv.coord)? != Cell::Empty {
            return Err(GameError::IllegalMove(mv.coord));
        }

        self.board.set(mv.coord, self.to_move.cell())?;
        self.move_count += 1;
        self.status = rules::check_move(&self.board, mv)?;
        debug!(
            "{} played {} (move {}), status {:?}",
            self.to_move, mv, self.move_count, self.status
        );
        self.to_move = self.to_move.opponent();
        Ok(self.status)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::drawn_moves;
    use crate::{legal_moves, Coord};
    use rand::rngs::StdRng;
    use rand::seq::IteratorRandom;
    use rand::SeedableRng;

    #[test]
    fn test_initial_state() {
        let state = GameState::standard();
        assert_eq!(state.to_move(), Player::Player1);
        assert_eq!(state.move_count(), 0);
        assert_eq!(state.status(), Terminal::Ongoing);
        assert!(!state.is_terminal());
    }

    #[test]
    fn test_apply_alternates_players() {
        let state = GameState::standard();
        let next = state.apply(Move::new(0, 0, 0, 0)).unwrap();
        assert_eq!(next.to_move(), Player::Player2);
        assert_eq!(next.move_count(), 1);
        assert_eq!(next.board().get(Coord::new(0, 0, 0, 0)).unwrap(), Cell::Player1);
        // input state untouched
        assert_eq!(state.move_count(), 0);

        let next = next.apply(Move::new(1, 0, 0, 0)).unwrap();
        assert_eq!(next.board().get(Coord::new(1, 0, 0, 0)).unwrap(), Cell::Player2);
        assert_eq!(next.to_move(), Player::Player1);
    }

    #[test]
    fn test_occupied_cell_is_rejected_without_change() {
        let state = GameState::standard().apply(Move::new(0, 0, 0, 0)).unwrap();
        let mut copy = state.clone();
        assert_eq!(
            copy.apply_mut(Move::new(0, 0, 0, 0)),
            Err(GameError::IllegalMove(Coord::new(0, 0, 0, 0)))
        );
        assert_eq!(copy, state);
    }

    #[test]
    fn test_out_of_bounds_is_rejected_without_change() {
        let mut state = GameState::standard();
        assert!(matches!(
            state.apply_mut(Move::new(0, 0, 5, 0)),
            Err(GameError::InvalidCoordinate { .. })
        ));
        assert_eq!(state, GameState::standard());
    }

    #[test]
    fn test_win_freezes_state() {
        let mut state = GameState::standard();
        for z in 0..3 {
            state.apply_mut(Move::new(0, 0, 0, z)).unwrap();
            state.apply_mut(Move::new(1, 1, 1, z)).unwrap();
        }
        let status = state.apply_mut(Move::new(0, 0, 0, 3)).unwrap();
        assert_eq!(status, Terminal::Win(Player::Player1));
        assert!(state.is_terminal());

        let frozen = state.clone();
        assert!(matches!(
            state.apply_mut(Move::new(2, 2, 2, 2)),
            Err(GameError::InvalidStateTransition { .. })
        ));
        assert_eq!(state, frozen);
    }

    #[test]
    fn test_draw_reached_by_play() {
        let (p1, p2) = drawn_moves();
        let mut state = GameState::standard();
        for (a, b) in p1.iter().zip(&p2) {
            state.apply_mut(*a).unwrap();
            state.apply_mut(*b).unwrap();
        }
        assert_eq!(state.status(), Terminal::Draw);
        assert_eq!(state.move_count(), 256);
    }

    #[test]
    fn test_random_playouts_have_one_winner() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let mut state = GameState::new(3).unwrap();
            while !state.is_terminal() {
                let mv = legal_moves(state.board()).choose(&mut rng).unwrap();
                state.apply_mut(mv).unwrap();

                let p1 = state.board().count(Cell::Player1);
                let p2 = state.board().count(Cell::Player2);
                assert!(p1 == p2 || p1 == p2 + 1);
            }
            // incremental and full scan agree
            assert_eq!(rules::check_winner(state.board()), state.status());
        }
    }
}
