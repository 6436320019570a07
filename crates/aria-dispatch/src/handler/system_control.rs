//! System control handler.
//!
//! Opens allow-listed applications through the OS-operations collaborator.
//! Replies are templated, never generated: system actions stay deterministic
//! and auditable.

use std::sync::Arc;

use async_trait::async_trait;

use aria_core::ConversationTurn;
use aria_intent::{ExtractedArgs, Intent};

use crate::collaborator::OsOps;
use crate::error::DispatchError;
use crate::handler::IntentHandler;
use crate::reply::Reply;

pub struct SystemControlHandler {
    os: Arc<dyn OsOps>,
}

impl SystemControlHandler {
    pub fn new(os: Arc<dyn OsOps>) -> Self {
        Self { os }
    }
}

#[async_trait]
impl IntentHandler for SystemControlHandler {
    fn intent(&self) -> Intent {
        Intent::SystemControl
    }

    async fn handle(
        &self,
        utterance: &str,
        args: &ExtractedArgs,
        _history: &[ConversationTurn],
    ) -> Result<Reply, DispatchError> {
        tracing::info!(utterance = %utterance, "Handling system control");

        let app = match args {
            ExtractedArgs::Control { app: Some(app) } => app.clone(),
            _ => {
                return Ok(Reply::clarification(
                    "I'm not sure which application you want to open. \
                     Please specify one of the allowed applications.",
                ))
            }
        };

        let opened = self
            .os
            .open_application(&app)
            .await
            .map_err(|e| DispatchError::collab("system control", e))?;

        if opened {
            Ok(Reply::templated(format!("I've opened {} for you.", app)))
        } else {
            Ok(Reply::templated(format!(
                "Sorry, I couldn't open {}. Please check if the application is installed.",
                app
            )))
        }
    }
}
