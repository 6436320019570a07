//! Regex-based intent classification.
//!
//! Evaluates an ordered list of intent rule-groups against the lower-cased
//! utterance. The first group with any matching pattern wins; group order is
//! a fixed tie-break policy, not an implementation detail.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The classified purpose of a user utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Conversation,
    WebSearch,
    SystemControl,
    FileOperation,
    SystemInfo,
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Intent::Conversation => "conversation",
            Intent::WebSearch => "web_search",
            Intent::SystemControl => "system_control",
            Intent::FileOperation => "file_operation",
            Intent::SystemInfo => "system_info",
        };
        write!(f, "{}", s)
    }
}

/// One priority level: an intent and the OR-set of patterns that select it.
struct RuleGroup {
    intent: Intent,
    patterns: Vec<Regex>,
}

/// Ordered collection of intent rule-groups, compiled once and reused.
///
/// Priority order is significant and fixed: web_search, then system_control,
/// then file_operation, then system_info. An utterance matching none of the
/// groups classifies as `Intent::Conversation`.
pub struct RuleSet {
    groups: Vec<RuleGroup>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleSet {
    /// Build the rule set with all compiled patterns.
    pub fn new() -> Self {
        let groups = vec![
            RuleGroup {
                intent: Intent::WebSearch,
                patterns: compile(&[
                    r"search (for|about|up)",
                    r"look (up|for)",
                    r"find (information|info|out) (about|on)",
                    r"what is",
                    r"who is",
                    r"where is",
                    r"how to",
                ]),
            },
            RuleGroup {
                intent: Intent::SystemControl,
                patterns: compile(&[
                    r"open (application|app|program)",
                    r"launch",
                    r"start (application|app|program)",
                    r"run (application|app|program)",
                    r"open (notepad|calculator|explorer|chrome|firefox)",
                ]),
            },
            RuleGroup {
                intent: Intent::FileOperation,
                patterns: compile(&[
                    r"read (the |)file",
                    r"write (to |)file",
                    r"create (a |)file",
                    r"list (files|directory)",
                    r"show (files|directory)",
                ]),
            },
            RuleGroup {
                intent: Intent::SystemInfo,
                patterns: compile(&[
                    r"system (info|information)",
                    r"cpu usage",
                    r"memory usage",
                    r"disk space",
                    r"what are my system specs",
                ]),
            },
        ];

        Self { groups }
    }

    /// Classify an utterance into an intent.
    ///
    /// Deterministic, total, and pure: the same utterance always yields the
    /// same intent, and classification never fails.
    pub fn classify(&self, utterance: &str) -> Intent {
        let lower = utterance.to_lowercase();

        for group in &self.groups {
            if group.patterns.iter().any(|p| p.is_match(&lower)) {
                tracing::debug!(intent = %group.intent, "Classified utterance");
                return group.intent;
            }
        }

        Intent::Conversation
    }

    /// Whether the given intent's rule-group matches the utterance,
    /// independent of priority. Used to test group coverage in isolation.
    pub fn group_matches(&self, intent: Intent, utterance: &str) -> bool {
        let lower = utterance.to_lowercase();
        self.groups
            .iter()
            .find(|g| g.intent == intent)
            .map(|g| g.patterns.iter().any(|p| p.is_match(&lower)))
            .unwrap_or(false)
    }

    /// All intents whose rule-group matches, in priority order.
    pub fn matching_intents(&self, utterance: &str) -> Vec<Intent> {
        let lower = utterance.to_lowercase();
        self.groups
            .iter()
            .filter(|g| g.patterns.iter().any(|p| p.is_match(&lower)))
            .map(|g| g.intent)
            .collect()
    }
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("Invalid intent pattern"))
        .collect()
}
