//! Error types for dialogue orchestration.

use crate::session::SessionState;

/// Errors from the orchestration layer.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("initialization failed: {0}")]
    Initialization(String),
    #[error("invalid session transition: {from} -> {to}")]
    InvalidTransition {
        from: SessionState,
        to: SessionState,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("voice error: {0}")]
    Voice(String),
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        ChatError::Serialization(err.to_string())
    }
}
