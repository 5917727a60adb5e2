// Wires a session to its background search thread
use log::debug;
use ttt4d_core::{GameError, Move};
use ttt4d_engine::SearchWorker;

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::outcome::{OutcomeReporter, ScoreKeeper};
use crate::session::{Phase, Session, Step};

pub struct GameController {
    session: Session,
    worker: SearchWorker,
}

impl GameController {
    /// Validates the config and starts the search thread for a new session.
    pub fn initialize(
        config: &SessionConfig,
        reporter: impl OutcomeReporter + 'static,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        let session = Session::new(config.size, config.depth(), reporter)?;
        let worker = SearchWorker::spawn()?;
        Ok(GameController { session, worker })
    }

    pub fn with_score_keeper(mut self, keeper: impl ScoreKeeper + 'static) -> Self {
        self.session = self.session.with_score_keeper(keeper);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Plays the human move given as raw `[w, x, y, z]` components and hands
    /// the AI its turn.
    pub fn submit_move(&mut self, components: &[usize]) -> Result<Step, SessionError> {
        let mv = Move::from_slice(components)?;
        let step = self.session.apply_human_move(mv)?;
        if let Step::DispatchAi(request) = &step {
            self.worker.dispatch(request)?;
        }
        Ok(step)
    }

    /// Applies the AI move if the search has finished; never blocks.
    ///
    /// A failed search is returned as an error and leaves the session waiting
    /// for the AI; [`retry_ai`](Self::retry_ai) asks again.
    pub fn poll_ai(&mut self) -> Result<Option<Step>, SessionError> {
        while let Some(response) = self.worker.try_recv()? {
            if let Some(step) = self.session.apply_ai_response(response)? {
                return Ok(Some(step));
            }
        }
        Ok(None)
    }

    /// Blocks until the AI move for the current turn is applied. Errors leave
    /// the session waiting for the AI, as with [`poll_ai`](Self::poll_ai).
    pub fn wait_for_ai(&mut self) -> Result<Step, SessionError> {
        self.expect_ai_turn("waiting for the AI")?;
        loop {
            let response = self.worker.recv()?;
            if let Some(step) = self.session.apply_ai_response(response)? {
                return Ok(step);
            }
            debug!("still waiting for AI response {}", self.session.generation());
        }
    }

    /// Sends the current AI request again after a failed dispatch or search.
    /// If the first answer still arrives, the later one is dropped as stale.
    pub fn retry_ai(&mut self) -> Result<(), SessionError> {
        self.expect_ai_turn("an AI retry")?;
        if let Some(request) = self.session.pending_request() {
            debug!("re-dispatching AI request {}", request.generation);
            self.worker.dispatch(&request)?;
        }
        Ok(())
    }

    pub fn reset(&mut self) -> Result<(), SessionError> {
        Ok(self.session.reset()?)
    }

    fn expect_ai_turn(&self, action: &'static str) -> Result<(), SessionError> {
        if self.session.phase() == Phase::AwaitingAiMove {
            return Ok(());
        }
        Err(GameError::InvalidStateTransition {
            state: self.session.phase().describe(),
            action,
        }
        .into())
    }
}
