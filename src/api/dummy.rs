//! Dummy backend — answers locally without a real API key.
//!
//! Used by `--dummy` for trying the interface offline, and by tests that
//! need a scripted success or failure from every operation.

use std::path::Path;

use crate::api::models::{ChatMessage, MessageContent};
use crate::api::GatewayError;

#[derive(Debug, Clone, Default)]
pub struct DummyGateway {
    fail_with: Option<String>,
}

impl DummyGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway where every operation fails with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            fail_with: Some(message.into()),
        }
    }

    fn scripted_failure(&self) -> Result<(), GatewayError> {
        match &self.fail_with {
            Some(message) => Err(GatewayError::Api(message.clone())),
            None => Ok(()),
        }
    }

    pub async fn chat_completion(
        &self,
        _model: &str,
        messages: Vec<ChatMessage>,
    ) -> Result<String, GatewayError> {
        self.scripted_failure()?;
        let last = messages.last().and_then(|msg| match &msg.content {
            MessageContent::Text(text) => Some(text.as_str()),
            MessageContent::Parts(_) => None,
        });
        Ok(format!("[echo] {}", last.unwrap_or("(multimodal message)")))
    }

    pub async fn transcribe(&self, path: &Path) -> Result<String, GatewayError> {
        self.scripted_failure()?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio".to_string());
        Ok(format!("[transcript of {name}]"))
    }

    pub async fn generate_image(&self, prompt: &str) -> Result<String, GatewayError> {
        self.scripted_failure()?;
        let slug: String = prompt
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '-' })
            .take(32)
            .collect();
        Ok(format!("https://dummy.invalid/generated/{slug}.png"))
    }

    pub async fn fetch_artifact(&self, _url: &str) -> Result<Vec<u8>, GatewayError> {
        self.scripted_failure()?;
        Ok(b"\x89PNG\r\n\x1a\n".to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn chat_echoes_last_message() {
        let gateway = DummyGateway::new();
        let reply = gateway
            .chat_completion("any", vec![ChatMessage::user("hello")])
            .await
            .unwrap();
        assert_eq!(reply, "[echo] hello");
    }

    #[tokio::test]
    async fn failing_gateway_fails_every_operation() {
        let gateway = DummyGateway::failing("boom");
        assert!(gateway
            .chat_completion("any", vec![ChatMessage::user("hi")])
            .await
            .is_err());
        assert!(gateway.generate_image("whale").await.is_err());
        assert!(gateway.transcribe(Path::new("a.mp3")).await.is_err());
        assert!(gateway.fetch_artifact("https://x.invalid/a.png").await.is_err());
    }
}
