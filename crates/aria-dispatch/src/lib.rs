//! Handler dispatch for the assistant.
//!
//! Defines the narrow collaborator contracts the core depends on (text
//! generation, speech I/O, web access, OS operations), the per-intent
//! handlers, and the registry that maps an intent to exactly one handler.

pub mod collaborator;
pub mod error;
pub mod handler;
pub mod mock;
pub mod reply;

pub use collaborator::{
    CollaboratorError, OsOps, Services, SpeechToText, TextGenerator, TextToSpeech, WebSearch,
};
pub use error::DispatchError;
pub use handler::{Dispatcher, HandlerRegistry, HandlerSettings, IntentHandler};
pub use reply::{Reply, ReplyKind};
