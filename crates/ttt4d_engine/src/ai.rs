use log::info;
use serde::{Deserialize, Serialize};
use ttt4d_core::{Board, GameError, Move, Player};

use crate::search::{search_best_move, MAX_DEPTH, MIN_DEPTH};

const NORMAL_DEPTH: u8 = 3;
const SMARTER_DEPTH: u8 = 4;

/// How far ahead the AI looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Normal,
    SlightlySmarter,
}

impl Difficulty {
    pub fn depth(self) -> u8 {
        match self {
            Difficulty::Normal => NORMAL_DEPTH,
            Difficulty::SlightlySmarter => SMARTER_DEPTH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TesseractAI {
    depth: u8,
}

impl TesseractAI {
    pub fn new(depth: u8) -> Self {
        TesseractAI {
            depth: depth.clamp(MIN_DEPTH, MAX_DEPTH),
        }
    }

    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self::new(difficulty.depth())
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn get_move(&self, board: &Board, player: Player) -> Result<Move, GameError> {
        let result = search_best_move(board, player, self.depth)?;
        info!(
            "{} plays {} (score {}, {} nodes, depth {} of {})",
            player, result.best_move, result.score, result.nodes, result.depth, self.depth
        );
        Ok(result.best_move)
    }
}

impl Default for TesseractAI {
    fn default() -> Self {
        Self::with_difficulty(Difficulty::default())
    }
}
