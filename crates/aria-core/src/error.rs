//! Shared error type for the assistant workspace.

/// Convenience alias used across the workspace crates.
pub type Result<T> = std::result::Result<T, AriaError>;

/// Errors raised by the core crate (configuration, persistence).
#[derive(Debug, thiserror::Error)]
pub enum AriaError {
    #[error("config error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for AriaError {
    fn from(err: toml::de::Error) -> Self {
        AriaError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AriaError {
    fn from(err: serde_json::Error) -> Self {
        AriaError::Serialization(err.to_string())
    }
}
