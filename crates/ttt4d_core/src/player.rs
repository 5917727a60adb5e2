use std::fmt;

use bincode::{Decode, Encode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode)]
pub enum Player {
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Encode, Decode)]
pub enum Cell {
    #[default]
    Empty,
    Player1,
    Player2,
}

impl Player {
    /// Player1 always opens the game.
    pub const FIRST: Player = Player::Player1;

    pub fn opponent(self) -> Player {
        match self {
            Player::Player1 => Player::Player2,
            Player::Player2 => Player::Player1,
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Player::Player1 => Cell::Player1,
            Player::Player2 => Cell::Player2,
        }
    }

    /// Slot in per-player tables.
    pub fn index(self) -> usize {
        match self {
            Player::Player1 => 0,
            Player::Player2 => 1,
        }
    }

    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

impl Cell {
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Player1 => Some(Player::Player1),
            Cell::Player2 => Some(Player::Player2),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Player1 => 'X',
            Cell::Player2 => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}
