// Turn-taking state machine between the human and the AI
use log::{info, warn};
use ttt4d_core::{GameError, GameState, Move, Player, Terminal};
use ttt4d_engine::{SearchRequest, SearchResponse};

use crate::outcome::{record_outcome, Outcome, OutcomeReporter, ScoreKeeper};

// The human always opens
pub const HUMAN: Player = Player::Player1;
pub const AI: Player = Player::Player2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingHumanMove,
    AwaitingAiMove,
    Terminal,
}

impl Phase {
    pub(crate) fn describe(self) -> &'static str {
        match self {
            Phase::AwaitingHumanMove => "awaiting the human move",
            Phase::AwaitingAiMove => "awaiting the AI move",
            Phase::Terminal => "the game is over",
        }
    }
}

/// What the caller has to do after a move was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    AwaitHuman,
    DispatchAi(SearchRequest),
    Finished(Outcome),
}

/// Owns the game state for one sitting. Rejected moves never touch it.
pub struct Session {
    state: GameState,
    phase: Phase,
    depth: u8,
    generation: u64,
    reporter: Box<dyn OutcomeReporter>,
    score_keeper: Option<Box<dyn ScoreKeeper>>,
    reported: bool,
}

impl Session {
    pub fn new(
        size: usize,
        depth: u8,
        reporter: impl OutcomeReporter + 'static,
    ) -> Result<Self, GameError> {
        let state = GameState::new(size)?;
        info!("new session on a {size}^4 board, AI depth {depth}");
        Ok(Session {
            state,
            phase: Phase::AwaitingHumanMove,
            depth,
            generation: 0,
            reporter: Box::new(reporter),
            score_keeper: None,
            reported: false,
        })
    }

    pub fn with_score_keeper(mut self, keeper: impl ScoreKeeper + 'static) -> Self {
        self.score_keeper = Some(Box::new(keeper));
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn outcome(&self) -> Option<Outcome> {
        Outcome::from_terminal(self.state.status())
    }

    /// The request the AI is expected to answer, if it is the AI's turn.
    pub fn pending_request(&self) -> Option<SearchRequest> {
        (self.phase == Phase::AwaitingAiMove)
            .then(|| SearchRequest::new(self.generation, self.state.board(), AI, self.depth))
    }

    pub fn apply_human_move(&mut self, mv: Move) -> Result<Step, GameError> {
        self.expect_phase(Phase::AwaitingHumanMove, "a human move")?;
        let terminal = self.state.apply_mut(mv)?;
        Ok(self.advance(terminal))
    }

    pub fn apply_ai_move(&mut self, mv: Move) -> Result<Step, GameError> {
        self.expect_phase(Phase::AwaitingAiMove, "an AI move")?;
        let terminal = self.state.apply_mut(mv)?;
        Ok(self.advance(terminal))
    }

    /// Applies a search response, or drops it if it answers an older request.
    pub fn apply_ai_response(
        &mut self,
        response: SearchResponse,
    ) -> Result<Option<Step>, GameError> {
        if self.phase != Phase::AwaitingAiMove || response.generation != self.generation {
            warn!(
                "discarding stale AI response {} (current generation {}, {})",
                response.generation,
                self.generation,
                self.phase.describe()
            );
            return Ok(None);
        }
        self.apply_ai_move(response.mv()).map(Some)
    }

    /// Starts a fresh game on the same board size.
    pub fn reset(&mut self) -> Result<(), GameError> {
        self.state = GameState::new(self.state.board().size())?;
        self.phase = Phase::AwaitingHumanMove;
        // Anything still in flight belongs to the old game
        self.generation += 1;
        self.reported = false;
        info!("session reset");
        Ok(())
    }

    fn expect_phase(&self, phase: Phase, action: &'static str) -> Result<(), GameError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(GameError::InvalidStateTransition {
                state: self.phase.describe(),
                action,
            })
        }
    }

    fn advance(&mut self, terminal: Terminal) -> Step {
        if let Some(outcome) = Outcome::from_terminal(terminal) {
            self.phase = Phase::Terminal;
            self.report(outcome);
            return Step::Finished(outcome);
        }

        match self.phase {
            Phase::AwaitingHumanMove => {
                self.phase = Phase::AwaitingAiMove;
                self.generation += 1;
                let request =
                    SearchRequest::new(self.generation, self.state.board(), AI, self.depth);
                Step::DispatchAi(request)
            }
            _ => {
                self.phase = Phase::AwaitingHumanMove;
                Step::AwaitHuman
            }
        }
    }

    fn report(&mut self, outcome: Outcome) {
        if self.reported {
            return;
        }
        self.reported = true;
        info!("game over after {} moves: {}", self.state.move_count(), outcome);
        self.reporter.report(outcome);
        if let Some(keeper) = self.score_keeper.as_deref_mut() {
            record_outcome(keeper, outcome, HUMAN);
        }
    }
}
