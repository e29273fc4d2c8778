//! OpenAI-compatible HTTP backend.

use std::path::Path;

use tracing::debug;

use crate::api::models::{
    ChatMessage, ChatRequest, ChatResponse, ImageGenerationRequest, ImageGenerationResponse,
    TranscriptionResponse,
};
use crate::api::{format_api_error, GatewayError};
use crate::core::constants::{IMAGE_MODEL, IMAGE_SIZE, TRANSCRIPTION_MODEL};
use crate::utils::url::construct_api_url;

#[derive(Clone)]
pub struct OpenAiGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenAiGateway {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    pub async fn chat_completion(
        &self,
        model: &str,
        messages: Vec<ChatMessage>,
    ) -> Result<String, GatewayError> {
        let request = ChatRequest {
            model: model.to_string(),
            messages,
            stream: false,
        };

        debug!(model, "sending chat completion request");
        let response = self
            .client
            .post(construct_api_url(&self.base_url, "chat/completions"))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let parsed = response.json::<ChatResponse>().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| GatewayError::Malformed("response contained no reply text".into()))
    }

    pub async fn transcribe(&self, path: &Path) -> Result<String, GatewayError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio".to_string());

        debug!(file = %file_name, bytes = bytes.len(), "sending transcription request");
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new()
            .text("model", TRANSCRIPTION_MODEL)
            .part("file", part);

        let response = self
            .client
            .post(construct_api_url(&self.base_url, "audio/transcriptions"))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .multipart(form)
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let parsed = response.json::<TranscriptionResponse>().await?;
        Ok(parsed.text)
    }

    pub async fn generate_image(&self, prompt: &str) -> Result<String, GatewayError> {
        let request = ImageGenerationRequest {
            model: IMAGE_MODEL.to_string(),
            prompt: prompt.to_string(),
            size: IMAGE_SIZE.to_string(),
        };

        debug!("sending image generation request");
        let response = self
            .client
            .post(construct_api_url(&self.base_url, "images/generations"))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let parsed = response.json::<ImageGenerationResponse>().await?;
        parsed
            .data
            .into_iter()
            .next()
            .and_then(|artifact| artifact.url)
            .ok_or_else(|| {
                GatewayError::Malformed("response contained no artifact reference".into())
            })
    }

    pub async fn fetch_artifact(&self, url: &str) -> Result<Vec<u8>, GatewayError> {
        let response = self.client.get(url).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(GatewayError::Api(format_api_error(status, &body)))
    }
}
