// Interactive session layer over the 4D tic-tac-toe engine
pub mod config;
pub mod controller;
pub mod error;
pub mod outcome;
pub mod session;

pub use config::SessionConfig;
pub use controller::GameController;
pub use error::{ConfigError, SessionError};
pub use outcome::{record_outcome, Outcome, OutcomeReporter, ScoreKeeper};
pub use session::{Phase, Session, Step};

#[cfg(test)]
mod end_to_end;
