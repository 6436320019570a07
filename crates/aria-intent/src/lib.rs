//! Intent classification and argument extraction for the assistant.
//!
//! Pure text analysis: no I/O, no collaborator calls. The classifier maps a
//! raw utterance to one of a fixed set of intents via ordered pattern
//! rule-groups; the extractor pulls the per-intent arguments a handler needs.

pub mod classifier;
pub mod extract;

pub use classifier::{Intent, RuleSet};
pub use extract::{ArgumentExtractor, ExtractedArgs};
