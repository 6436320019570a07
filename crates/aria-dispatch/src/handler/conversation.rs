//! Conversation handler.
//!
//! The fallback intent: free-form dialogue with the language model. This is
//! the only handler that passes the bounded conversation window through to
//! generation, so follow-up questions resolve against recent exchanges.

use std::sync::Arc;

use async_trait::async_trait;

use aria_core::ConversationTurn;
use aria_intent::{ExtractedArgs, Intent};

use crate::collaborator::TextGenerator;
use crate::error::DispatchError;
use crate::handler::IntentHandler;
use crate::reply::Reply;

pub struct ConversationHandler {
    generator: Arc<dyn TextGenerator>,
}

impl ConversationHandler {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl IntentHandler for ConversationHandler {
    fn intent(&self) -> Intent {
        Intent::Conversation
    }

    async fn handle(
        &self,
        utterance: &str,
        _args: &ExtractedArgs,
        history: &[ConversationTurn],
    ) -> Result<Reply, DispatchError> {
        tracing::debug!(history_len = history.len(), "Handling conversation");

        let answer = self
            .generator
            .generate(utterance, history)
            .await
            .map_err(|e| DispatchError::collab("text generation", e))?;

        Ok(Reply::generated(answer))
    }
}
