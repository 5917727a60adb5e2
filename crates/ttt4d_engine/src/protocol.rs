// Plain-data payloads exchanged with the background search thread
use bincode::config;
use bincode::error::{DecodeError, EncodeError};
use bincode::{Decode, Encode};
use log::debug;
use ttt4d_core::{Board, Cell, Coord, GameError, Move, Player};

use crate::search::choose_move;

#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("failed to encode payload: {0}")]
    Encode(#[from] EncodeError),

    #[error("failed to decode payload: {0}")]
    Decode(#[from] DecodeError),

    #[error("search failed: {0}")]
    Game(#[from] GameError),

    #[error("failed to start the search thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("search thread is gone")]
    Disconnected,
}

/// A board snapshot and the player the AI moves for.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct SearchRequest {
    pub generation: u64,
    pub size: u8,
    pub cells: Vec<Cell>,
    pub player: Player,
    pub depth: u8,
}

/// The move chosen for the request with the same generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub struct SearchResponse {
    pub generation: u64,
    pub coord: Coord,
}

impl SearchRequest {
    pub fn new(generation: u64, board: &Board, player: Player, depth: u8) -> Self {
        Self {
            generation,
            size: board.size() as u8,
            cells: board.cells().to_vec(),
            player,
            depth,
        }
    }

    pub fn board(&self) -> Result<Board, GameError> {
        Board::from_cells(self.size as usize, self.cells.clone())
    }

    pub fn encode(&self) -> Result<Vec<u8>, ProtocolError> {
        Ok(bincode::encode_to_vec(self, config::standard())?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolError> {
        let (request, _) = bincode::decode_from_slice(bytes, config::standard())?;
        Ok(request)
    }
}

impl SearchResponse {
    pub fn mv(&self) -> Move {
        Move::from(self.coord)
    }

    pub fn encode(&self) -> Result<Vec<u8>, ProtocolError> {
        Ok(bincode::encode_to_vec(self, config::standard())?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolError> {
        let (response, _) = bincode::decode_from_slice(bytes, config::standard())?;
        Ok(response)
    }
}

/// Background entry point: encoded request in, encoded response out.
pub fn run_ai(payload: &[u8]) -> Result<Vec<u8>, ProtocolError> {
    let request = SearchRequest::decode(payload)?;
    let board = request.board()?;
    debug!(
        "search request {} for {} at depth {}",
        request.generation, request.player, request.depth
    );

    let mv = choose_move(&board, request.player, request.depth)?;
    SearchResponse {
        generation: request.generation,
        coord: mv.coord,
    }
    .encode()
}
