//! Configuration file schema

use serde::{Deserialize, Serialize};

/// Top-level configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub generator: FileGeneratorConfig,
    pub engine: FileEngineConfig,
}

/// `[generator]` section: the OpenAI-compatible endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeneratorConfig {
    /// Full chat completions URL
    pub base_url: String,
    pub model: String,
    /// Key may also come from the environment; absent means offline
    pub api_key: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Per-call generation timeout
    pub timeout_secs: u64,
}

impl Default for FileGeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            temperature: 0.8,
            max_tokens: 300,
            timeout_secs: 20,
        }
    }
}

/// `[engine]` section: session defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEngineConfig {
    /// Default question limit for new sessions
    pub question_limit: u32,
    pub followups: bool,
}

impl Default for FileEngineConfig {
    fn default() -> Self {
        Self {
            question_limit: 10,
            followups: true,
        }
    }
}
