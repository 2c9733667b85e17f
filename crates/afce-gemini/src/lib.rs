//! # afce-gemini
//!
//! HTTP client for the Gemini `generateContent` REST API.
//!
//! [`GeminiClient`] implements both service traits from `afce-core`:
//! - [`AssessmentService`](afce_core::services::AssessmentService): one
//!   structured JSON assessment per call, on the assessment model.
//! - [`ChatService`](afce_core::services::ChatService): a [`ChatSession`]
//!   holding the system instruction and turn history, on the chat model.

pub mod assess;
pub mod chat;
pub mod wire;

mod error;
mod http;

pub use chat::ChatSession;
pub use error::GeminiError;

use std::fmt;
use std::time::Duration;

use afce_config::GeminiConfig;

use crate::http::check_response;
use crate::wire::{GenerateContentRequest, GenerateContentResponse};

/// Client for one API key and model pair. Cheap to clone.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    assessment_model: String,
    chat_model: String,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("assessment_model", &self.assessment_model)
            .field("chat_model", &self.chat_model)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Build a client from the `[gemini]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::NotConfigured`] when no API key is set, or
    /// [`GeminiError::Http`] if the underlying `reqwest::Client` fails to build.
    pub fn new(config: &GeminiConfig) -> Result<Self, GeminiError> {
        if !config.is_configured() {
            return Err(GeminiError::NotConfigured);
        }
        let http = reqwest::Client::builder()
            .user_agent(concat!("afce/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            assessment_model: config.assessment_model.clone(),
            chat_model: config.chat_model.clone(),
        })
    }

    #[must_use]
    pub fn assessment_model(&self) -> &str {
        &self.assessment_model
    }

    #[must_use]
    pub fn chat_model(&self) -> &str {
        &self.chat_model
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{model}:generateContent", self.base_url)
    }

    /// POST one `generateContent` request and return the first candidate's text.
    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest<'_>,
    ) -> Result<String, GeminiError> {
        tracing::debug!(model, turns = request.contents.len(), "gemini: generateContent");
        let resp = self
            .http
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;
        let body: GenerateContentResponse = check_response(resp).await?.json().await?;
        body.text().ok_or_else(|| {
            tracing::warn!(
                model,
                finish_reason = body.finish_reason().unwrap_or("none"),
                "gemini: response carried no text"
            );
            GeminiError::EmptyResponse
        })
    }
}
