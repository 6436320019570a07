//! Dialogue orchestration for the assistant.
//!
//! Ties the classifier, extractor, and handler dispatch into a single
//! text-in/text-out pipeline, tracks conversation context and session
//! lifecycle, and layers the speech queue and voice loop on top.

pub mod context;
pub mod error;
pub mod orchestrator;
pub mod session;
pub mod speech;
pub mod voice;

pub use context::ConversationContext;
pub use error::ChatError;
pub use orchestrator::Orchestrator;
pub use session::{Session, SessionState};
pub use speech::{SpeechBackend, SpeechQueue};
pub use voice::VoiceSession;
