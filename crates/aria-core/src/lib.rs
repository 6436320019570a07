//! Shared foundation for the assistant workspace.
//!
//! Configuration, the common error type, logging bootstrap, and the types
//! every other crate speaks in.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::AssistantConfig;
pub use error::{AriaError, Result};
pub use types::*;
