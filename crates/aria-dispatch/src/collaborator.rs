//! Collaborator contracts the orchestration core depends on.
//!
//! Real implementations (llama.cpp bindings, microphone capture, HTTP
//! scraping, process spawning) live behind these traits; the pipeline is
//! tested against in-memory doubles from [`crate::mock`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use aria_core::{ConversationTurn, SearchHit};

/// Failure of an external collaborator (model, speech, web, OS).
#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    #[error("service unavailable: {0}")]
    Unavailable(String),
    #[error("operation timed out after {0} seconds")]
    Timeout(u64),
    #[error("{0}")]
    Failed(String),
}

/// Text-generation service backed by a local language model.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Bring the model up. Mandatory at startup; failure is fatal.
    async fn load(&self) -> Result<(), CollaboratorError>;

    /// Generate a reply for `prompt`.
    ///
    /// An empty `history` slice is the stateless single-shot mode. The
    /// persona/system preamble is the implementation's concern and is
    /// prepended to every prompt regardless of history.
    async fn generate(
        &self,
        prompt: &str,
        history: &[ConversationTurn],
    ) -> Result<String, CollaboratorError>;
}

/// Speech-to-text service.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Wait up to `timeout` for speech to start, capture at most
    /// `phrase_time_limit` of audio, and return the transcription.
    /// `Ok(None)` means nothing intelligible was heard.
    async fn listen(
        &self,
        timeout: Duration,
        phrase_time_limit: Duration,
    ) -> Result<Option<String>, CollaboratorError>;
}

/// Text-to-speech service.
///
/// Submission must be non-blocking unless `blocking` is requested; `stop`
/// must promptly discard queued speech and halt in-flight playback.
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    async fn speak(&self, text: &str, blocking: bool) -> Result<(), CollaboratorError>;
    fn stop(&self);
    fn is_busy(&self) -> bool;
}

/// Web search and page fetch service.
#[async_trait]
pub trait WebSearch: Send + Sync {
    /// Ordered search results, best first.
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchHit>, CollaboratorError>;

    /// Extracted text content of a page, or `None` if it could not be read.
    async fn fetch_page(&self, url: &str) -> Result<Option<String>, CollaboratorError>;
}

/// OS-operations service.
///
/// Enforcement of the directory and application allow-lists is this
/// service's responsibility, not the dispatcher's: a disallowed path or
/// name surfaces as `Ok(None)` / `Ok(false)`, the same as a missing one.
#[async_trait]
pub trait OsOps: Send + Sync {
    async fn open_application(&self, name: &str) -> Result<bool, CollaboratorError>;
    async fn read_file(&self, path: &str) -> Result<Option<String>, CollaboratorError>;
    async fn list_directory(&self, path: &str)
        -> Result<Option<Vec<String>>, CollaboratorError>;
    /// Snapshot of system metrics as ordered (name, value) pairs.
    async fn system_info(&self) -> Result<Vec<(String, String)>, CollaboratorError>;
}

/// The collaborator bundle handlers are constructed from.
///
/// Speech services are not part of the dispatch path; they belong to the
/// voice session and are injected there.
#[derive(Clone)]
pub struct Services {
    pub generator: Arc<dyn TextGenerator>,
    pub web: Arc<dyn WebSearch>,
    pub os: Arc<dyn OsOps>,
}
