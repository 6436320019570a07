//! Intent handler trait, registry, and dispatcher.
//!
//! Exactly one handler per intent; dispatch is a pure mapping with no
//! implicit fallthrough between handlers. The conversation fallback is the
//! classifier's job, not the dispatcher's.

pub mod conversation;
pub mod file_operation;
pub mod system_control;
pub mod system_info;
pub mod web_search;

use std::collections::HashMap;

use async_trait::async_trait;

use aria_core::{AssistantConfig, ConversationTurn};
use aria_intent::{ExtractedArgs, Intent};

use crate::collaborator::Services;
use crate::error::DispatchError;
use crate::reply::Reply;

pub use conversation::ConversationHandler;
pub use file_operation::FileOperationHandler;
pub use system_control::SystemControlHandler;
pub use system_info::SystemInfoHandler;
pub use web_search::WebSearchHandler;

/// Logic bound to one intent that produces a reply, possibly invoking one
/// or more collaborators.
#[async_trait]
pub trait IntentHandler: Send + Sync {
    /// The intent this handler serves.
    fn intent(&self) -> Intent;

    /// Produce a reply for one utterance.
    ///
    /// `history` is the bounded conversation window; only the conversation
    /// handler passes it to the generator. Collaborator failures surface as
    /// `DispatchError`; a missing argument is a clarification `Reply`, never
    /// an error.
    async fn handle(
        &self,
        utterance: &str,
        args: &ExtractedArgs,
        history: &[ConversationTurn],
    ) -> Result<Reply, DispatchError>;
}

/// Pipeline settings the handlers need, derived from the config.
#[derive(Debug, Clone)]
pub struct HandlerSettings {
    /// Search results requested per query.
    pub max_results: usize,
    /// Characters of file content shown before truncation.
    pub read_truncate_chars: usize,
    /// Directory entries shown per listing.
    pub list_limit: usize,
}

impl Default for HandlerSettings {
    fn default() -> Self {
        Self {
            max_results: 5,
            read_truncate_chars: 500,
            list_limit: 20,
        }
    }
}

impl From<&AssistantConfig> for HandlerSettings {
    fn from(config: &AssistantConfig) -> Self {
        Self {
            max_results: config.web.max_results,
            read_truncate_chars: config.assistant.read_truncate_chars,
            list_limit: config.assistant.list_limit,
        }
    }
}

/// Registry mapping each intent to its handler.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<Intent, Box<dyn IntentHandler>>,
}

impl HandlerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler under its own intent, replacing any previous one.
    pub fn register(&mut self, handler: Box<dyn IntentHandler>) {
        self.handlers.insert(handler.intent(), handler);
    }

    /// Register the default handler for every intent.
    pub fn register_defaults(&mut self, services: &Services, settings: &HandlerSettings) {
        self.register(Box::new(ConversationHandler::new(
            services.generator.clone(),
        )));
        self.register(Box::new(WebSearchHandler::new(
            services.web.clone(),
            services.generator.clone(),
            settings.max_results,
        )));
        self.register(Box::new(SystemControlHandler::new(services.os.clone())));
        self.register(Box::new(FileOperationHandler::new(
            services.os.clone(),
            settings.read_truncate_chars,
            settings.list_limit,
        )));
        self.register(Box::new(SystemInfoHandler::new(
            services.os.clone(),
            services.generator.clone(),
        )));
    }

    /// Look up the handler for an intent.
    pub fn get(&self, intent: Intent) -> Option<&dyn IntentHandler> {
        self.handlers.get(&intent).map(|h| h.as_ref())
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Routes a classified utterance to its handler.
pub struct Dispatcher {
    registry: HandlerRegistry,
}

impl Dispatcher {
    /// Create a dispatcher over an explicit registry.
    pub fn new(registry: HandlerRegistry) -> Self {
        Self { registry }
    }

    /// Create a dispatcher with the default handler set.
    pub fn with_defaults(services: &Services, settings: &HandlerSettings) -> Self {
        let mut registry = HandlerRegistry::new();
        registry.register_defaults(services, settings);
        Self::new(registry)
    }

    /// Dispatch one utterance to the handler for `intent`.
    pub async fn dispatch(
        &self,
        intent: Intent,
        args: &ExtractedArgs,
        utterance: &str,
        history: &[ConversationTurn],
    ) -> Result<Reply, DispatchError> {
        let handler = self
            .registry
            .get(intent)
            .ok_or(DispatchError::UnregisteredHandler(intent))?;
        handler.handle(utterance, args, history).await
    }
}
