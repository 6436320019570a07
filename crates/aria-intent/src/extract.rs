//! Per-intent argument extraction.
//!
//! Pulls the parameters a handler needs out of the raw utterance. Extraction
//! never fails: a missing argument yields a partial record, and the handler
//! decides how to ask the user for the rest.

use regex::Regex;

use crate::classifier::Intent;

/// Search phrases stripped from the front of a web-search query, checked in
/// this order; only the first match is stripped.
const SEARCH_PREFIXES: [&str; 4] = [
    "search for",
    "search about",
    "look up",
    "find information about",
];

/// Intent-specific arguments extracted from an utterance.
///
/// `Control` and `File` carry `Option` fields because extraction can miss;
/// handlers must respond with a clarification rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExtractedArgs {
    #[default]
    None,
    /// Query for the web-search handler.
    Search { query: String },
    /// Allow-listed application name for the system-control handler.
    Control { app: Option<String> },
    /// Path-shaped token for the file-operation handler.
    File { path: Option<String> },
}

/// Extracts handler arguments from utterances.
pub struct ArgumentExtractor {
    prefixes: Vec<Regex>,
    path_pattern: Regex,
    allowed_applications: Vec<String>,
}

impl ArgumentExtractor {
    /// Create an extractor. `allowed_applications` is the configured launch
    /// allow-list, scanned in order for system-control utterances.
    pub fn new(allowed_applications: Vec<String>) -> Self {
        let prefixes = SEARCH_PREFIXES
            .iter()
            .map(|p| {
                Regex::new(&format!("(?i){}", regex::escape(p)))
                    .expect("Invalid search prefix pattern")
            })
            .collect();
        // Drive-letter-rooted Windows path or POSIX absolute path
        let path_pattern =
            Regex::new(r"[A-Za-z]:\\[^\s]+|/[^\s]+").expect("Invalid path pattern");

        Self {
            prefixes,
            path_pattern,
            allowed_applications,
        }
    }

    /// Extract the arguments `intent`'s handler needs from `utterance`.
    pub fn extract(&self, intent: Intent, utterance: &str) -> ExtractedArgs {
        match intent {
            Intent::WebSearch => ExtractedArgs::Search {
                query: self.extract_query(utterance),
            },
            Intent::SystemControl => ExtractedArgs::Control {
                app: self.extract_app(utterance),
            },
            Intent::FileOperation => ExtractedArgs::File {
                path: self.extract_path(utterance),
            },
            Intent::SystemInfo | Intent::Conversation => ExtractedArgs::None,
        }
    }

    /// Strip the first recognized search phrase and return the remainder
    /// verbatim (original casing, trimmed). No phrase means the whole
    /// utterance is the query.
    fn extract_query(&self, utterance: &str) -> String {
        for prefix in &self.prefixes {
            if let Some(m) = prefix.find(utterance) {
                return utterance[m.end()..].trim().to_string();
            }
        }
        utterance.trim().to_string()
    }

    /// First allow-listed application name (in configured list order) found
    /// in the utterance as a case-insensitive substring.
    fn extract_app(&self, utterance: &str) -> Option<String> {
        let lower = utterance.to_lowercase();
        self.allowed_applications
            .iter()
            .find(|app| lower.contains(&app.to_lowercase()))
            .cloned()
    }

    /// First path-shaped token in the utterance, if any.
    fn extract_path(&self, utterance: &str) -> Option<String> {
        self.path_pattern
            .find(utterance)
            .map(|m| m.as_str().to_string())
    }
}
