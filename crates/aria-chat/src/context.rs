//! Conversation context management.
//!
//! Two records are kept per session. The *window* is the bounded recent
//! history fed back into generation; it holds complete user/assistant
//! exchanges and evicts the oldest pair once full, so it never contains a
//! dangling half of an exchange. The *transcript* is the unbounded log of
//! everything said, including templated replies and rendered errors, and
//! is what gets saved to disk.

use std::fs;
use std::path::Path;

use chrono::{Local, TimeZone};

use aria_core::{ConversationTurn, Role};

use crate::error::ChatError;

/// Bounded recent-history window plus full session transcript.
pub struct ConversationContext {
    /// Exchanges (user/assistant pairs) the window may hold.
    max_exchanges: usize,
    window: Vec<ConversationTurn>,
    transcript: Vec<ConversationTurn>,
}

impl ConversationContext {
    /// Create a context whose window holds at most `max_exchanges` pairs.
    pub fn new(max_exchanges: usize) -> Self {
        Self {
            max_exchanges,
            window: Vec::new(),
            transcript: Vec::new(),
        }
    }

    /// Append one turn to the transcript only.
    pub fn log_turn(&mut self, role: Role, text: &str) {
        self.transcript.push(ConversationTurn::now(role, text));
    }

    /// Record a complete exchange in both the transcript and the window,
    /// evicting the oldest pair if the window is full.
    pub fn push_exchange(&mut self, user: &str, assistant: &str) {
        self.log_turn(Role::User, user);
        self.log_turn(Role::Assistant, assistant);

        self.window.push(ConversationTurn::now(Role::User, user));
        self.window
            .push(ConversationTurn::now(Role::Assistant, assistant));
        while self.window.len() > self.max_exchanges * 2 {
            self.window.drain(..2);
        }
    }

    /// The bounded recent history, oldest first.
    pub fn window(&self) -> &[ConversationTurn] {
        &self.window
    }

    /// Everything said this session, oldest first.
    pub fn transcript(&self) -> &[ConversationTurn] {
        &self.transcript
    }

    /// Drop both the window and the transcript.
    pub fn clear(&mut self) {
        self.window.clear();
        self.transcript.clear();
    }

    /// Save the transcript as a readable text file.
    pub fn save_transcript(&self, path: &Path) -> Result<(), ChatError> {
        let mut out = format!(
            "Conversation saved: {}\n\n",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        for turn in &self.transcript {
            out.push_str(&format!(
                "[{}] {}: {}\n",
                format_time(turn.timestamp),
                turn.role,
                turn.text
            ));
        }
        fs::write(path, out)?;
        tracing::info!(path = %path.display(), turns = self.transcript.len(), "Transcript saved");
        Ok(())
    }

    /// Save the transcript as JSON.
    pub fn export_json(&self, path: &Path) -> Result<(), ChatError> {
        let json = serde_json::to_string_pretty(&self.transcript)?;
        fs::write(path, json)?;
        Ok(())
    }
}

fn format_time(timestamp: i64) -> String {
    Local
        .timestamp_opt(timestamp, 0)
        .single()
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}
