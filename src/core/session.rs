//! Per-session state: conversation history, upload and image records, and
//! the user-adjustable session settings.
//!
//! All history sequences are append-only for the lifetime of the session and
//! live only in memory. The state object is created once by the CLI entry
//! point and passed by mutable reference into each handler; there are no
//! process-wide globals.

use serde::{Deserialize, Serialize};

use crate::api::models::ChatMessage;
use crate::core::constants::SYSTEM_PERSONA;

/// One user/assistant exchange in chat mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatTurn {
    pub user_text: String,
    pub bot_text: String,
}

/// One processed file upload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadRecord {
    pub prompt: String,
    pub file_kind: String,
    pub response: String,
}

/// One generated image, identified by its artifact URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageRecord {
    pub prompt: String,
    pub url: String,
}

/// The four chat model identifiers offered by the model selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelId {
    #[default]
    Gpt4oMini,
    Gpt4o,
    Gpt4Turbo,
    Gpt35Turbo,
}

impl ModelId {
    pub const ALL: [ModelId; 4] = [
        ModelId::Gpt4oMini,
        ModelId::Gpt4o,
        ModelId::Gpt4Turbo,
        ModelId::Gpt35Turbo,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ModelId::Gpt4oMini => "gpt-4o-mini",
            ModelId::Gpt4o => "gpt-4o",
            ModelId::Gpt4Turbo => "gpt-4-turbo",
            ModelId::Gpt35Turbo => "gpt-3.5-turbo",
        }
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ModelId {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        ModelId::ALL
            .into_iter()
            .find(|model| model.as_str() == value)
            .ok_or_else(|| {
                let known: Vec<&str> = ModelId::ALL.iter().map(|m| m.as_str()).collect();
                format!("unknown model '{value}'. Available models: {}", known.join(", "))
            })
    }
}

/// Session settings mutated directly by user controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub model: ModelId,
    pub dark_mode: bool,
}

#[derive(Default)]
pub struct SessionState {
    chat_history: Vec<ChatTurn>,
    upload_history: Vec<UploadRecord>,
    image_history: Vec<ImageRecord>,
    pub config: SessionConfig,
}

impl SessionState {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn chat_history(&self) -> &[ChatTurn] {
        &self.chat_history
    }

    pub fn upload_history(&self) -> &[UploadRecord] {
        &self.upload_history
    }

    pub fn image_history(&self) -> &[ImageRecord] {
        &self.image_history
    }

    pub fn last_image(&self) -> Option<&ImageRecord> {
        self.image_history.last()
    }

    pub fn record_chat_turn(&mut self, user_text: impl Into<String>, bot_text: impl Into<String>) {
        self.chat_history.push(ChatTurn {
            user_text: user_text.into(),
            bot_text: bot_text.into(),
        });
    }

    pub fn record_upload(
        &mut self,
        prompt: impl Into<String>,
        file_kind: impl Into<String>,
        response: impl Into<String>,
    ) {
        self.upload_history.push(UploadRecord {
            prompt: prompt.into(),
            file_kind: file_kind.into(),
            response: response.into(),
        });
    }

    pub fn record_image(&mut self, prompt: impl Into<String>, url: impl Into<String>) {
        self.image_history.push(ImageRecord {
            prompt: prompt.into(),
            url: url.into(),
        });
    }

    /// Build the full wire transcript for a new chat input: the system
    /// persona, every prior turn interleaved in original order, then the
    /// input itself.
    pub fn transcript_with(&self, input: &str) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(self.chat_history.len() * 2 + 2);
        messages.push(ChatMessage::system(SYSTEM_PERSONA));
        for turn in &self.chat_history {
            messages.push(ChatMessage::user(turn.user_text.clone()));
            messages.push(ChatMessage::assistant(turn.bot_text.clone()));
        }
        messages.push(ChatMessage::user(input));
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_transcript_is_persona_plus_input() {
        let state = SessionState::default();
        let messages = state.transcript_with("Hello");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].text(), Some(SYSTEM_PERSONA));
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[1].text(), Some("Hello"));
    }

    #[test]
    fn transcript_interleaves_prior_turns_in_order() {
        let mut state = SessionState::default();
        state.record_chat_turn("first", "one");
        state.record_chat_turn("second", "two");

        let messages = state.transcript_with("third");
        let roles: Vec<&str> = messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(
            roles,
            ["system", "user", "assistant", "user", "assistant", "user"]
        );
        assert_eq!(messages[1].text(), Some("first"));
        assert_eq!(messages[2].text(), Some("one"));
        assert_eq!(messages[3].text(), Some("second"));
        assert_eq!(messages[4].text(), Some("two"));
        assert_eq!(messages[5].text(), Some("third"));
    }

    #[test]
    fn histories_preserve_insertion_order() {
        let mut state = SessionState::default();
        for i in 0..5 {
            state.record_chat_turn(format!("u{i}"), format!("b{i}"));
        }
        assert_eq!(state.chat_history().len(), 5);
        for (i, turn) in state.chat_history().iter().enumerate() {
            assert_eq!(turn.user_text, format!("u{i}"));
        }
    }

    #[test]
    fn last_image_is_most_recent() {
        let mut state = SessionState::default();
        assert!(state.last_image().is_none());
        state.record_image("a whale", "https://img.example/1.png");
        state.record_image("a reef", "https://img.example/2.png");
        assert_eq!(state.last_image().unwrap().url, "https://img.example/2.png");
    }

    #[test]
    fn model_id_round_trips_through_names() {
        for model in ModelId::ALL {
            assert_eq!(ModelId::try_from(model.as_str()), Ok(model));
        }
        assert!(ModelId::try_from("gpt-5").is_err());
    }

    #[test]
    fn default_model_is_gpt_4o_mini() {
        assert_eq!(ModelId::default().as_str(), "gpt-4o-mini");
    }
}
