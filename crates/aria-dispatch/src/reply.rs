//! Typed handler replies.
//!
//! Handlers return a `Reply` tagged with how its text was produced, so the
//! orchestrator can distinguish generated answers from templated system
//! responses without re-parsing the text.

/// How a reply's text was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    /// Verbatim output of the text-generation service.
    Generated,
    /// Deterministic template; never touched the generator.
    Templated,
    /// The handler needs more information from the user.
    Clarification,
}

/// A handler's reply to one utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub kind: ReplyKind,
}

impl Reply {
    pub fn generated(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ReplyKind::Generated,
        }
    }

    pub fn templated(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ReplyKind::Templated,
        }
    }

    pub fn clarification(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ReplyKind::Clarification,
        }
    }
}
