use std::path::PathBuf;

use ttt4d_core::GameError;
use ttt4d_engine::ProtocolError;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("failed to write TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Everything a game session can fail with.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("search worker error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl SessionError {
    /// The rules-level error behind this one, if any.
    pub fn game_error(&self) -> Option<&GameError> {
        match self {
            SessionError::Game(err) | SessionError::Protocol(ProtocolError::Game(err)) => Some(err),
            _ => None,
        }
    }
}
