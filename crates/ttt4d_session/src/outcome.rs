// Terminal reports and the optional score keeper
use std::fmt;

use ttt4d_core::{Player, Terminal};

// Score keeper keys
pub const WINS_METRIC: &str = "ttt4Wins";
pub const LOSSES_METRIC: &str = "ttt4Losses";
pub const DRAWS_METRIC: &str = "ttt4Draws";
pub const WIN_ACHIEVEMENT: &str = "ttt4Win";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Player1Wins,
    Player2Wins,
    Draw,
}

impl Outcome {
    pub fn from_terminal(terminal: Terminal) -> Option<Outcome> {
        match terminal {
            Terminal::Ongoing => None,
            Terminal::Win(Player::Player1) => Some(Outcome::Player1Wins),
            Terminal::Win(Player::Player2) => Some(Outcome::Player2Wins),
            Terminal::Draw => Some(Outcome::Draw),
        }
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Player1Wins => Some(Player::Player1),
            Outcome::Player2Wins => Some(Player::Player2),
            Outcome::Draw => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winner() {
            Some(player) => write!(f, "{} wins", player),
            None => write!(f, "draw"),
        }
    }
}

/// Receives the terminal report of a session.
pub trait OutcomeReporter {
    fn report(&mut self, outcome: Outcome);
}

impl<F: FnMut(Outcome)> OutcomeReporter for F {
    fn report(&mut self, outcome: Outcome) {
        self(outcome)
    }
}

/// Persistent win/loss counters, present only when the host provides them.
pub trait ScoreKeeper {
    fn increment(&mut self, metric: &str);
    fn unlock_achievement(&mut self, achievement: &str);
}

/// Records `outcome` from the point of view of `human`.
pub fn record_outcome(keeper: &mut dyn ScoreKeeper, outcome: Outcome, human: Player) {
    match outcome.winner() {
        Some(winner) if winner == human => {
            keeper.increment(WINS_METRIC);
            keeper.unlock_achievement(WIN_ACHIEVEMENT);
        }
        Some(_) => keeper.increment(LOSSES_METRIC),
        None => keeper.increment(DRAWS_METRIC),
    }
}
