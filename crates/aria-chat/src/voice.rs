//! Voice interaction loop.
//!
//! Listen, process, speak, repeat. Speech output is delivered blocking so
//! the microphone never captures the assistant's own voice. The loop ends
//! on a spoken quit command or an external shutdown signal.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;

use aria_dispatch::{SpeechToText, TextToSpeech};

use crate::error::ChatError;
use crate::orchestrator::Orchestrator;

/// Spoken commands that end the session.
const QUIT_COMMANDS: [&str; 3] = ["quit", "exit", "goodbye"];

const FAREWELL: &str = "Goodbye!";
const NOT_HEARD: &str = "Sorry, I didn't catch that.";

/// Interactive voice loop over an initialized orchestrator.
pub struct VoiceSession {
    orchestrator: Orchestrator,
    listener: Arc<dyn SpeechToText>,
    speaker: Arc<dyn TextToSpeech>,
    shutdown: Arc<Notify>,
}

impl VoiceSession {
    pub fn new(
        orchestrator: Orchestrator,
        listener: Arc<dyn SpeechToText>,
        speaker: Arc<dyn TextToSpeech>,
    ) -> Self {
        Self {
            orchestrator,
            listener,
            speaker,
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// Handle for requesting shutdown from another task. The loop exits at
    /// the next iteration boundary.
    pub fn shutdown_handle(&self) -> Arc<Notify> {
        self.shutdown.clone()
    }

    /// Run the loop until a quit command, a shutdown signal, or an
    /// unrecoverable capture error. Terminates the session on exit.
    pub async fn run(&mut self) -> Result<(), ChatError> {
        let timeout = Duration::from_secs(self.orchestrator.config().stt.timeout_seconds);
        let phrase_limit =
            Duration::from_secs(self.orchestrator.config().stt.phrase_time_limit_seconds);
        tracing::info!("Voice session started");

        let mut result = Ok(());
        loop {
            tokio::select! {
                biased;

                _ = self.shutdown.notified() => {
                    tracing::info!("Shutdown requested");
                    break;
                }
                heard = self.listener.listen(timeout, phrase_limit) => {
                    match heard {
                        Ok(Some(text)) => {
                            if QUIT_COMMANDS.contains(&text.trim().to_lowercase().as_str()) {
                                self.say(FAREWELL).await;
                                break;
                            }
                            let reply = self.orchestrator.process(&text).await;
                            if !self.say(&reply).await {
                                break;
                            }
                        }
                        Ok(None) => {
                            if !self.say(NOT_HEARD).await {
                                break;
                            }
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Speech capture failed");
                            result = Err(ChatError::Voice(e.to_string()));
                            break;
                        }
                    }
                }
            }
        }

        self.orchestrator.shutdown();
        tracing::info!("Voice session ended");
        result
    }

    /// Speak blocking so the next listen starts after playback ends. A
    /// shutdown signal interrupts the wait, halts playback, and returns
    /// `false` so the loop exits at once.
    async fn say(&self, text: &str) -> bool {
        tokio::select! {
            biased;

            _ = self.shutdown.notified() => {
                tracing::info!("Shutdown requested during playback");
                self.speaker.stop();
                false
            }
            result = self.speaker.speak(text, true) => {
                if let Err(e) = result {
                    tracing::warn!(error = %e, "Speech output failed");
                }
                true
            }
        }
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }
}
