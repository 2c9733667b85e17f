//! Gemini API configuration.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_assessment_model() -> String {
    "gemini-3-pro-preview".to_string()
}

fn default_chat_model() -> String {
    "gemini-3-flash-preview".to_string()
}

/// Default per-request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    /// API key sent as `x-goog-api-key`.
    /// Falls back to the bare `GEMINI_API_KEY` / `API_KEY` environment variables.
    #[serde(default)]
    pub api_key: String,

    /// REST root, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used for structured assessments.
    #[serde(default = "default_assessment_model")]
    pub assessment_model: String,

    /// Model used for chat sessions.
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            assessment_model: default_assessment_model(),
            chat_model: default_chat_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GeminiConfig {
    /// An API key is the only thing the client cannot default.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}
