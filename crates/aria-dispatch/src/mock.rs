//! In-memory collaborator doubles.
//!
//! Kept in the library rather than behind `cfg(test)` so downstream crates'
//! tests can drive the full pipeline without real models, microphones, or
//! network access.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use aria_core::{ConversationTurn, SearchHit};

use crate::collaborator::{
    CollaboratorError, OsOps, SpeechToText, TextGenerator, TextToSpeech, WebSearch,
};

/// One recorded call to [`MockGenerator::generate`].
#[derive(Debug, Clone)]
pub struct GeneratorCall {
    pub prompt: String,
    pub history_len: usize,
}

/// Test double for the text-generation service.
#[derive(Default)]
pub struct MockGenerator {
    /// Canned reply; when unset, echoes `generated: {prompt}`.
    pub reply: Option<String>,
    pub fail_load: bool,
    /// When set, `generate` fails with this message.
    pub fail_generate: Option<String>,
    pub calls: Mutex<Vec<GeneratorCall>>,
}

impl MockGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<GeneratorCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn load(&self) -> Result<(), CollaboratorError> {
        if self.fail_load {
            return Err(CollaboratorError::Unavailable(
                "model failed to load".to_string(),
            ));
        }
        Ok(())
    }

    async fn generate(
        &self,
        prompt: &str,
        history: &[ConversationTurn],
    ) -> Result<String, CollaboratorError> {
        self.calls.lock().unwrap().push(GeneratorCall {
            prompt: prompt.to_string(),
            history_len: history.len(),
        });
        if let Some(msg) = &self.fail_generate {
            return Err(CollaboratorError::Failed(msg.clone()));
        }
        Ok(self
            .reply
            .clone()
            .unwrap_or_else(|| format!("generated: {}", prompt)))
    }
}

/// Test double for the web-search service.
#[derive(Default)]
pub struct MockWeb {
    pub hits: Vec<SearchHit>,
    pub pages: HashMap<String, String>,
    pub fail: bool,
    pub queries: Mutex<Vec<String>>,
}

impl MockWeb {
    pub fn with_hits(hits: Vec<SearchHit>) -> Self {
        Self {
            hits,
            ..Self::default()
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebSearch for MockWeb {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchHit>, CollaboratorError> {
        self.queries.lock().unwrap().push(query.to_string());
        if self.fail {
            return Err(CollaboratorError::Failed("search backend down".to_string()));
        }
        Ok(self.hits.iter().take(max_results).cloned().collect())
    }

    async fn fetch_page(&self, url: &str) -> Result<Option<String>, CollaboratorError> {
        if self.fail {
            return Err(CollaboratorError::Failed("fetch failed".to_string()));
        }
        Ok(self.pages.get(url).cloned())
    }
}

/// Test double for the OS-operations service.
#[derive(Default)]
pub struct MockOs {
    pub open_succeeds: bool,
    pub files: HashMap<String, String>,
    pub dirs: HashMap<String, Vec<String>>,
    pub info: Vec<(String, String)>,
    pub fail: bool,
    pub opened: Mutex<Vec<String>>,
}

impl MockOs {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl OsOps for MockOs {
    async fn open_application(&self, name: &str) -> Result<bool, CollaboratorError> {
        if self.fail {
            return Err(CollaboratorError::Failed("launcher failed".to_string()));
        }
        self.opened.lock().unwrap().push(name.to_string());
        Ok(self.open_succeeds)
    }

    async fn read_file(&self, path: &str) -> Result<Option<String>, CollaboratorError> {
        if self.fail {
            return Err(CollaboratorError::Failed("filesystem error".to_string()));
        }
        Ok(self.files.get(path).cloned())
    }

    async fn list_directory(
        &self,
        path: &str,
    ) -> Result<Option<Vec<String>>, CollaboratorError> {
        if self.fail {
            return Err(CollaboratorError::Failed("filesystem error".to_string()));
        }
        Ok(self.dirs.get(path).cloned())
    }

    async fn system_info(&self) -> Result<Vec<(String, String)>, CollaboratorError> {
        if self.fail {
            return Err(CollaboratorError::Failed("metrics unavailable".to_string()));
        }
        Ok(self.info.clone())
    }
}

/// Test double for the speech-to-text service: yields scripted utterances
/// in order, then `None`.
#[derive(Default)]
pub struct MockListener {
    pub utterances: Mutex<VecDeque<Option<String>>>,
}

impl MockListener {
    pub fn scripted(utterances: Vec<Option<&str>>) -> Self {
        Self {
            utterances: Mutex::new(
                utterances
                    .into_iter()
                    .map(|u| u.map(str::to_string))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl SpeechToText for MockListener {
    async fn listen(
        &self,
        _timeout: Duration,
        _phrase_time_limit: Duration,
    ) -> Result<Option<String>, CollaboratorError> {
        Ok(self.utterances.lock().unwrap().pop_front().flatten())
    }
}

/// Test double for the text-to-speech service: records what was spoken.
#[derive(Default)]
pub struct MockSpeaker {
    pub spoken: Mutex<Vec<(String, bool)>>,
    pub stopped: AtomicBool,
}

impl MockSpeaker {
    pub fn spoken(&self) -> Vec<(String, bool)> {
        self.spoken.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextToSpeech for MockSpeaker {
    async fn speak(&self, text: &str, blocking: bool) -> Result<(), CollaboratorError> {
        self.spoken
            .lock()
            .unwrap()
            .push((text.to_string(), blocking));
        Ok(())
    }

    fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    fn is_busy(&self) -> bool {
        false
    }
}
