// Depth-bounded negamax over incremental search positions
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, error, warn};
use rayon::prelude::*;
use ttt4d_core::{legal_moves, Board, Coord, GameError, Move, Player};

use crate::evaluation::evaluate_position;
use crate::position::SearchPosition;

// Search parameters
pub const MIN_DEPTH: u8 = 1;                 // Always look at our own move
pub const MAX_DEPTH: u8 = 5;                 // Deeper passes never fit the node budget
pub const NODE_BUDGET: u64 = 2_000_000;      // Per move, about a second of search

// Core search algorithm parameters
pub const WIN_SCORE: i32 = 1_000_000_000;    // Completed line; adjusted by ply
const DECIDED: i32 = WIN_SCORE - MAX_DEPTH as i32; // Any forced win or loss scores past this
const INFINITY: i32 = i32::MAX;              // Full window bound, safe to negate

/// The chosen move plus what the search learned about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Move,
    pub score: i32,
    /// Plies of the deepest pass that finished inside the budget.
    pub depth: u8,
    pub nodes: u64,
}

// Node counter shared by every search thread of one move
struct NodeBudget {
    visited: AtomicU64,
    limit: u64,
}

impl NodeBudget {
    fn new(limit: u64) -> Self {
        Self {
            visited: AtomicU64::new(0),
            limit,
        }
    }

    // false once the budget is spent
    fn visit(&self) -> bool {
        self.visited.fetch_add(1, Ordering::Relaxed) < self.limit
    }

    fn exhausted(&self) -> bool {
        self.visited.load(Ordering::Relaxed) >= self.limit
    }

    fn visited(&self) -> u64 {
        self.visited.load(Ordering::Relaxed)
    }
}

/// Picks a move for `player`; see [`search_best_move`].
pub fn choose_move(board: &Board, player: Player, depth: u8) -> Result<Move, GameError> {
    search_best_move(board, player, depth).map(|result| result.best_move)
}

/// Searches up to `depth` plies (our move included) within [`NODE_BUDGET`].
pub fn search_best_move(
    board: &Board,
    player: Player,
    depth: u8,
) -> Result<SearchResult, GameError> {
    search_with_budget(board, player, depth, NODE_BUDGET)
}

/// Iterative deepening from one ply up to `depth`, stopping early once
/// `node_limit` nodes were visited. The answer comes from the deepest pass
/// that finished; a pass cut short is thrown away.
///
/// Every pass picks the first move in board order with the best score, so
/// the result does not depend on how rayon schedules the work.
pub fn search_with_budget(
    board: &Board,
    player: Player,
    depth: u8,
    node_limit: u64,
) -> Result<SearchResult, GameError> {
    let depth = depth.clamp(MIN_DEPTH, MAX_DEPTH);
    let position = SearchPosition::new(board);
    let size = board.size();
    let to_move = |index: usize| Move::from(Coord::from_index(index, size));

    if position.is_full() {
        error!("search requested on a full board");
        return Err(GameError::NoLegalMoves);
    }

    if position.winner().is_some() {
        warn!("search requested on a decided board, playing the first empty cell");
        let best_move = legal_moves(board).next().ok_or(GameError::NoLegalMoves)?;
        return Ok(SearchResult { best_move, score: 0, depth: 0, nodes: 0 });
    }

    if let Some((index, score)) = find_obvious_move(&position, player) {
        let best_move = to_move(index);
        debug!("obvious move for {}: {}", player, best_move);
        return Ok(SearchResult { best_move, score, depth: 1, nodes: 1 });
    }

    let candidates = position.candidate_moves(player);
    let budget = NodeBudget::new(node_limit);
    let mut best: Option<(usize, i32, u8)> = None;

    for current in 1..=depth {
        match search_root(&position, &candidates, player, current, &budget) {
            Some((index, score)) => {
                best = Some((index, score, current));
                if score.abs() >= DECIDED {
                    break;
                }
            }
            None => {
                debug!("node budget spent at depth {}, keeping depth {}", current, current - 1);
                break;
            }
        }
    }

    let (index, score, reached) = match best {
        Some(found) => found,
        None => {
            warn!("node budget too small for a single ply, playing the first candidate");
            let index = *candidates.first().ok_or(GameError::NoLegalMoves)?;
            (index, evaluate_after(&position, index, player), 0)
        }
    };

    let best_move = to_move(index);
    let nodes = budget.visited();
    debug!(
        "best move for {}: {} score {} at depth {} after {} nodes",
        player, best_move, score, reached, nodes
    );
    Ok(SearchResult { best_move, score, depth: reached, nodes })
}

// One full pass over the root moves. The first candidate gets a full window;
// the rest are scouted in parallel against its score, and only those that
// may beat it are searched again, in board order. None if the budget ran out.
fn search_root(
    position: &SearchPosition,
    candidates: &[usize],
    player: Player,
    depth: u8,
    budget: &NodeBudget,
) -> Option<(usize, i32)> {
    let (&first, rest) = candidates.split_first()?;
    let alpha = score_move(position, first, player, depth, -INFINITY, INFINITY, budget);
    let mut best = (first, alpha);

    // collect() keeps candidate order
    let contenders: Vec<usize> = rest
        .par_iter()
        .copied()
        .filter(|&index| {
            !budget.exhausted()
                && score_move(position, index, player, depth, alpha, alpha + 1, budget) > alpha
        })
        .collect();

    for index in contenders {
        if budget.exhausted() {
            return None;
        }
        let score = score_move(position, index, player, depth, best.1, INFINITY, budget);
        if score > best.1 {
            best = (index, score);
        }
    }

    if budget.exhausted() {
        None
    } else {
        Some(best)
    }
}

fn score_move(
    position: &SearchPosition,
    index: usize,
    player: Player,
    depth: u8,
    alpha: i32,
    beta: i32,
    budget: &NodeBudget,
) -> i32 {
    let mut child = position.clone();
    child.play(index, player);
    -negamax(&mut child, depth - 1, 1, -beta, -alpha, player.opponent(), budget)
}

// Completing our own line beats everything; a lone opponent threat must be
// blocked. Two or more threats cannot all be blocked, so the search decides.
fn find_obvious_move(position: &SearchPosition, player: Player) -> Option<(usize, i32)> {
    if let Some(&index) = position.winning_cells(player).first() {
        return Some((index, WIN_SCORE - 1));
    }
    match position.winning_cells(player.opponent()).as_slice() {
        [index] => Some((*index, evaluate_after(position, *index, player))),
        _ => None,
    }
}

fn evaluate_after(position: &SearchPosition, index: usize, player: Player) -> i32 {
    let mut child = position.clone();
    child.play(index, player);
    -evaluate_position(&child, player.opponent())
}

// Score from the point of view of `player`, who is to move
fn negamax(
    position: &mut SearchPosition,
    depth: u8,
    ply: u8,
    mut alpha: i32,
    beta: i32,
    player: Player,
    budget: &NodeBudget,
) -> i32 {
    // Out of nodes: the pass is discarded, so the value is irrelevant
    if !budget.visit() {
        return 0;
    }

    // The previous mover completed a line: prefer quick wins, slow losses
    if let Some(winner) = position.winner() {
        let score = WIN_SCORE - ply as i32;
        return if winner == player { score } else { -score };
    }
    if position.is_full() {
        return 0;
    }
    if depth == 0 {
        return evaluate_position(position, player);
    }

    let mut best = -INFINITY;
    for index in position.candidate_moves(player) {
        position.play(index, player);
        let opponent = player.opponent();
        let score = -negamax(position, depth - 1, ply + 1, -beta, -alpha, opponent, budget);
        position.unplay(index, player);

        best = best.max(score);
        alpha = alpha.max(score);
        // Beta cutoff - opponent won't allow this line
        if alpha >= beta || budget.exhausted() {
            break;
        }
    }
    best
}
