use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{AriaError, Result};

/// Top-level configuration for the assistant.
///
/// Loaded from a TOML file. Each section is consumed only by its
/// collaborator or by the core pipeline settings derived from it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub llm: LlmConfig,
    pub tts: TtsConfig,
    pub stt: SttConfig,
    pub web: WebConfig,
    pub system: SystemConfig,
    pub assistant: AssistantSection,
}

impl AssistantConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AssistantConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| AriaError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// Local language model settings, consumed by the text-generation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Path to the model binary (GGUF or similar).
    pub model_path: String,
    /// Layers to offload to the GPU.
    pub n_gpu_layers: u32,
    /// Context window size in tokens.
    pub n_ctx: u32,
    /// Inference threads.
    pub n_threads: u32,
    /// Maximum tokens per generated reply.
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub repeat_penalty: f64,
    /// Persona preamble prepended to every prompt by the generator.
    pub system_prompt: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model_path: String::new(),
            n_gpu_layers: 35,
            n_ctx: 4096,
            n_threads: 8,
            max_tokens: 512,
            temperature: 0.7,
            top_p: 0.95,
            repeat_penalty: 1.1,
            system_prompt: "You are Aria, a helpful AI assistant with access to the internet \
                            and system controls. Be concise, helpful, and friendly in your \
                            responses."
                .to_string(),
        }
    }
}

/// Text-to-speech settings, consumed by the speech-output service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TtsConfig {
    pub enabled: bool,
    /// Speech rate in words per minute.
    pub rate: u32,
    /// Volume level, 0.0 to 1.0.
    pub volume: f64,
    /// Index into the platform voice list.
    pub voice_index: usize,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rate: 175,
            volume: 0.9,
            voice_index: 0,
        }
    }
}

/// Speech-to-text settings, consumed by the speech-input service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SttConfig {
    pub enabled: bool,
    /// Seconds to wait for speech to start before giving up.
    pub timeout_seconds: u64,
    /// Maximum seconds of speech captured per utterance.
    pub phrase_time_limit_seconds: u64,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_seconds: 10,
            phrase_time_limit_seconds: 15,
        }
    }
}

/// Web search settings, consumed by the web collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub search_engine: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_results: usize,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            search_engine: "duckduckgo".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
                .to_string(),
            timeout_seconds: 10,
            max_results: 5,
        }
    }
}

/// OS-operations settings. Allow-list enforcement happens in the
/// OS-operations service; the pipeline only reads `allowed_applications`
/// for argument extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Root directories file and directory operations are constrained to.
    pub allowed_directories: Vec<String>,
    /// Application names the assistant is allowed to launch.
    pub allowed_applications: Vec<String>,
    /// Ask the user before system actions.
    pub require_confirmation: bool,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            allowed_directories: vec![],
            allowed_applications: vec![
                "notepad".to_string(),
                "calculator".to_string(),
                "explorer".to_string(),
                "chrome".to_string(),
                "firefox".to_string(),
            ],
            require_confirmation: true,
        }
    }
}

/// Assistant-level settings consumed by the orchestration pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantSection {
    /// Display name used in the transcript and greetings.
    pub name: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// Keep an unbounded transcript of all turns.
    pub log_conversations: bool,
    /// Exchanges (user/assistant pairs) kept in the generation window.
    pub context_exchanges: usize,
    /// Characters of file content shown before truncation.
    pub read_truncate_chars: usize,
    /// Directory entries shown per listing.
    pub list_limit: usize,
}

impl Default for AssistantSection {
    fn default() -> Self {
        Self {
            name: "Aria".to_string(),
            log_level: "info".to_string(),
            log_conversations: true,
            context_exchanges: 10,
            read_truncate_chars: 500,
            list_limit: 20,
        }
    }
}
