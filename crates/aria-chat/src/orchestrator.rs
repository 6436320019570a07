//! Dialogue orchestrator: wires classifier, extractor, and dispatch into
//! the text-in/text-out pipeline.
//!
//! Two-phase startup: `new` wires everything up but the assistant refuses
//! input until `initialize` has brought the model up. Every user-visible
//! string leaves through `process`, which renders handler replies and
//! dispatch failures into the final text.

use aria_core::{AssistantConfig, Role};
use aria_dispatch::{Dispatcher, HandlerSettings, ReplyKind, Services};
use aria_intent::{ArgumentExtractor, Intent, RuleSet};

use crate::context::ConversationContext;
use crate::error::ChatError;
use crate::session::{Session, SessionState};

/// Reply when input arrives before `initialize` succeeded, or after
/// termination.
const NOT_INITIALIZED_REPLY: &str = "Error: Assistant not initialized";

/// Central coordinator for one assistant session.
pub struct Orchestrator {
    rules: RuleSet,
    extractor: ArgumentExtractor,
    dispatcher: Dispatcher,
    services: Services,
    context: ConversationContext,
    session: Session,
    config: AssistantConfig,
}

impl Orchestrator {
    /// Wire up the pipeline. The session stays uninitialized until
    /// [`Orchestrator::initialize`] is called.
    pub fn new(config: AssistantConfig, services: Services) -> Self {
        let rules = RuleSet::new();
        let extractor = ArgumentExtractor::new(config.system.allowed_applications.clone());
        let dispatcher = Dispatcher::with_defaults(&services, &HandlerSettings::from(&config));
        let context = ConversationContext::new(config.assistant.context_exchanges);

        Self {
            rules,
            extractor,
            dispatcher,
            services,
            context,
            session: Session::new(),
            config,
        }
    }

    /// Bring the model up. Failure is fatal: the session terminates and
    /// every later `process` call returns the not-initialized reply.
    pub async fn initialize(&mut self) -> Result<(), ChatError> {
        tracing::info!(assistant = %self.config.assistant.name, "Initializing assistant");
        match self.services.generator.load().await {
            Ok(()) => {
                self.session.transition(SessionState::Initialized)?;
                tracing::info!(session = %self.session.id, "Assistant initialized");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Model load failed");
                self.session.transition(SessionState::Terminated)?;
                Err(ChatError::Initialization(e.to_string()))
            }
        }
    }

    /// Process one utterance and return the user-facing reply text.
    ///
    /// Never fails: dispatch errors are rendered into the reply. Every
    /// exchange lands in the transcript; only generated conversation
    /// exchanges enter the bounded history window.
    pub async fn process(&mut self, utterance: &str) -> String {
        if !self.session.accepts_input() {
            return NOT_INITIALIZED_REPLY.to_string();
        }
        if self.session.state() == SessionState::Initialized {
            // First input starts the session proper.
            if let Err(e) = self.session.transition(SessionState::Running) {
                tracing::warn!(error = %e, "Session transition failed");
            }
        }

        let utterance = utterance.trim();
        let intent = self.rules.classify(utterance);
        let args = self.extractor.extract(intent, utterance);
        tracing::info!(intent = %intent, utterance = %utterance, "Processing input");

        match self
            .dispatcher
            .dispatch(intent, &args, utterance, self.context.window())
            .await
        {
            Ok(reply) => {
                if intent == Intent::Conversation && reply.kind == ReplyKind::Generated {
                    self.context.push_exchange(utterance, &reply.text);
                } else {
                    self.context.log_turn(Role::User, utterance);
                    self.context.log_turn(Role::Assistant, &reply.text);
                }
                reply.text
            }
            Err(e) => {
                tracing::error!(intent = %intent, error = %e, "Dispatch failed");
                let rendered = format!("I encountered an error: {}", e);
                self.context.log_turn(Role::User, utterance);
                self.context.log_turn(Role::Assistant, &rendered);
                rendered
            }
        }
    }

    /// Save the session transcript to `path` as readable text. A no-op when
    /// conversation logging is disabled in the config.
    pub fn save_transcript(&self, path: &std::path::Path) -> Result<(), ChatError> {
        if !self.config.assistant.log_conversations {
            tracing::debug!("Conversation logging disabled; transcript not saved");
            return Ok(());
        }
        self.context.save_transcript(path)
    }

    /// Terminate the session. Safe to call from any state; termination is
    /// final.
    pub fn shutdown(&mut self) {
        if self.session.state() != SessionState::Terminated {
            if let Err(e) = self.session.transition(SessionState::Terminated) {
                tracing::warn!(error = %e, "Shutdown transition failed");
            }
            tracing::info!(session = %self.session.id, "Session terminated");
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }
}
