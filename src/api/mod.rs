//! Thin wrappers over the external API surface: chat completions, audio
//! transcription, and image generation.
//!
//! [`Gateway`] is an enum over concrete backends. Enum dispatch keeps the
//! call sites free of trait-object machinery; adding a backend means a new
//! module plus a new match arm per operation.

pub mod dummy;
pub mod models;
pub mod openai;

use std::path::Path;

use thiserror::Error;

use crate::api::models::ChatMessage;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-success status from the provider, with the error body summarized.
    #[error("{0}")]
    Api(String),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("could not read file: {0}")]
    Io(#[from] std::io::Error),
}

/// All available API backends.
#[derive(Clone)]
pub enum Gateway {
    OpenAi(openai::OpenAiGateway),
    Dummy(dummy::DummyGateway),
}

impl Gateway {
    /// Send an ordered message list to the chat completions endpoint and
    /// return the reply text.
    pub async fn chat_completion(
        &self,
        model: &str,
        messages: Vec<ChatMessage>,
    ) -> Result<String, GatewayError> {
        match self {
            Gateway::OpenAi(g) => g.chat_completion(model, messages).await,
            Gateway::Dummy(g) => g.chat_completion(model, messages).await,
        }
    }

    /// Submit an audio file whole to the transcription endpoint and return
    /// the transcript.
    pub async fn transcribe(&self, path: &Path) -> Result<String, GatewayError> {
        match self {
            Gateway::OpenAi(g) => g.transcribe(path).await,
            Gateway::Dummy(g) => g.transcribe(path).await,
        }
    }

    /// Generate an image from a prompt and return the artifact reference
    /// (a URL, not the image bytes).
    pub async fn generate_image(&self, prompt: &str) -> Result<String, GatewayError> {
        match self {
            Gateway::OpenAi(g) => g.generate_image(prompt).await,
            Gateway::Dummy(g) => g.generate_image(prompt).await,
        }
    }

    /// Fetch the bytes behind an artifact reference, used when saving a
    /// generated image to a local file.
    pub async fn fetch_artifact(&self, url: &str) -> Result<Vec<u8>, GatewayError> {
        match self {
            Gateway::OpenAi(g) => g.fetch_artifact(url).await,
            Gateway::Dummy(g) => g.fetch_artifact(url).await,
        }
    }
}

fn extract_error_summary(value: &serde_json::Value) -> Option<String> {
    let summary = value
        .pointer("/error/message")
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .or_else(|| {
            value.get("error").and_then(|v| match v {
                serde_json::Value::String(s) => Some(s.to_string()),
                serde_json::Value::Object(map) => map
                    .get("message")
                    .and_then(|message| message.as_str().map(str::to_owned)),
                _ => None,
            })
        })
        .or_else(|| {
            value
                .get("message")
                .and_then(|v| v.as_str().map(str::to_owned))
        });

    summary.map(|text| {
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        collapsed.trim().to_string()
    })
}

/// Condense an error response body into a one-line message suitable for
/// inline display. Provider errors usually arrive as JSON with a nested
/// `error.message`; anything else is shown trimmed and as-is.
pub(crate) fn format_api_error(status: reqwest::StatusCode, body: &str) -> String {
    let trimmed = body.trim();

    if trimmed.is_empty() {
        return format!("API error ({status})");
    }

    if let Ok(json_value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        if let Some(summary) = extract_error_summary(&json_value) {
            if !summary.is_empty() {
                return format!("API error ({status}): {summary}");
            }
        }
    }

    format!("API error ({status}): {trimmed}")
}
