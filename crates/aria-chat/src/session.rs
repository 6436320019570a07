//! Session lifecycle tracking.
//!
//! A session moves through a fixed state machine: it starts uninitialized,
//! becomes initialized once the model is loaded, runs while processing
//! input, and terminates exactly once. An aborted startup goes straight
//! from uninitialized to terminated.

use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ChatError;

/// Lifecycle state of an assistant session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Uninitialized,
    Initialized,
    Running,
    Terminated,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SessionState::Uninitialized => "uninitialized",
            SessionState::Initialized => "initialized",
            SessionState::Running => "running",
            SessionState::Terminated => "terminated",
        };
        write!(f, "{}", s)
    }
}

impl SessionState {
    /// Whether the state machine permits moving from `self` to `to`.
    pub fn can_transition(self, to: SessionState) -> bool {
        use SessionState::*;
        matches!(
            (self, to),
            (Uninitialized, Initialized)
                | (Uninitialized, Terminated)
                | (Initialized, Running)
                | (Initialized, Terminated)
                | (Running, Terminated)
        )
    }
}

/// One assistant session with its lifecycle state.
#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    state: SessionState,
    pub started_at: i64,
}

impl Session {
    /// Create a fresh uninitialized session.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: SessionState::Uninitialized,
            started_at: Local::now().timestamp(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Move to `to`, rejecting transitions the state machine forbids.
    pub fn transition(&mut self, to: SessionState) -> Result<(), ChatError> {
        if !self.state.can_transition(to) {
            return Err(ChatError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        tracing::debug!(session = %self.id, from = %self.state, to = %to, "Session transition");
        self.state = to;
        Ok(())
    }

    /// Whether the session accepts input.
    pub fn accepts_input(&self) -> bool {
        matches!(
            self.state,
            SessionState::Initialized | SessionState::Running
        )
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- state machine ----

    #[test]
    fn test_happy_path() {
        let mut session = Session::new();
        assert_eq!(session.state(), SessionState::Uninitialized);
        session.transition(SessionState::Initialized).unwrap();
        session.transition(SessionState::Running).unwrap();
        session.transition(SessionState::Terminated).unwrap();
        assert_eq!(session.state(), SessionState::Terminated);
    }

    #[test]
    fn test_aborted_startup_terminates_directly() {
        let mut session = Session::new();
        session.transition(SessionState::Terminated).unwrap();
        assert_eq!(session.state(), SessionState::Terminated);
    }

    #[test]
    fn test_initialized_can_terminate_without_running() {
        let mut session = Session::new();
        session.transition(SessionState::Initialized).unwrap();
        session.transition(SessionState::Terminated).unwrap();
    }

    #[test]
    fn test_cannot_skip_initialization() {
        let mut session = Session::new();
        let err = session.transition(SessionState::Running).unwrap_err();
        assert!(matches!(err, ChatError::InvalidTransition { .. }));
        assert_eq!(session.state(), SessionState::Uninitialized);
    }

    #[test]
    fn test_terminated_is_final() {
        let mut session = Session::new();
        session.transition(SessionState::Terminated).unwrap();
        for to in [
            SessionState::Uninitialized,
            SessionState::Initialized,
            SessionState::Running,
            SessionState::Terminated,
        ] {
            assert!(session.transition(to).is_err());
        }
    }

    #[test]
    fn test_no_self_transitions() {
        assert!(!SessionState::Uninitialized.can_transition(SessionState::Uninitialized));
        assert!(!SessionState::Running.can_transition(SessionState::Running));
    }

    #[test]
    fn test_no_backward_transitions() {
        assert!(!SessionState::Running.can_transition(SessionState::Initialized));
        assert!(!SessionState::Initialized.can_transition(SessionState::Uninitialized));
    }

    // ---- session fields ----

    #[test]
    fn test_accepts_input() {
        let mut session = Session::new();
        assert!(!session.accepts_input());
        session.transition(SessionState::Initialized).unwrap();
        assert!(session.accepts_input());
        session.transition(SessionState::Running).unwrap();
        assert!(session.accepts_input());
        session.transition(SessionState::Terminated).unwrap();
        assert!(!session.accepts_input());
    }

    #[test]
    fn test_sessions_get_distinct_ids() {
        assert_ne!(Session::new().id, Session::new().id);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(SessionState::Uninitialized.to_string(), "uninitialized");
        assert_eq!(SessionState::Terminated.to_string(), "terminated");
    }

    #[test]
    fn test_state_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&SessionState::Running).unwrap(),
            "\"running\""
        );
        let state: SessionState = serde_json::from_str("\"initialized\"").unwrap();
        assert_eq!(state, SessionState::Initialized);
    }
}
