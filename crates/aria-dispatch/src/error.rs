//! Error types for handler dispatch.

use aria_intent::Intent;

use crate::collaborator::CollaboratorError;

/// Errors from the dispatch layer.
///
/// Handlers never stringify collaborator failures themselves; they surface
/// here and the orchestrator renders the user-facing message.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("no handler registered for intent: {0}")]
    UnregisteredHandler(Intent),
    #[error("{service} error: {source}")]
    Collaborator {
        service: &'static str,
        #[source]
        source: CollaboratorError,
    },
}

impl DispatchError {
    /// Tag a collaborator failure with the service it came from.
    pub fn collab(service: &'static str, source: CollaboratorError) -> Self {
        DispatchError::Collaborator { service, source }
    }
}
