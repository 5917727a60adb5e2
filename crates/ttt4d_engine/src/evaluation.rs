use ttt4d_core::Player;

use crate::position::SearchPosition;

// Opponent lines count double so the search blocks before it builds
const OPPONENT_FACTOR: i32 = 2;

/// Weight of an open line holding `marks` marks of one player: 1, 4, 16, ...
pub fn line_weight(marks: u8) -> i32 {
    if marks == 0 {
        0
    } else {
        1 << (2 * (marks as u32 - 1))
    }
}

/// Static score from `player`'s point of view: own open lines minus the
/// opponent's, the opponent's weighted more heavily.
pub fn evaluate_position(position: &SearchPosition, player: Player) -> i32 {
    position.pressure(player) - OPPONENT_FACTOR * position.pressure(player.opponent())
}
