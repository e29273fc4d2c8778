//! Per-action handlers shared by the interactive loop.
//!
//! Every handler follows the same shape: validate the input, make one
//! gateway call, and commit to session state only on success. A validation
//! failure returns [`Outcome::EmptyInput`] without touching the gateway; a
//! gateway failure propagates as an error and leaves every history list
//! unchanged.

use tracing::{debug, info};

use crate::api::models::{ChatMessage, ContentPart, ImageUrl};
use crate::api::{Gateway, GatewayError};
use crate::core::session::SessionState;
use crate::core::upload::{StagedUpload, UploadPayload};

/// The display payload of one completed interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Assistant reply text (chat and upload features).
    Reply(String),
    /// Artifact reference for a generated image.
    Image { url: String },
    /// Validation failure: nothing was sent, nothing was recorded.
    EmptyInput(&'static str),
}

/// Submit a chat message. On success the reply is recorded as a new turn.
pub async fn submit_chat(
    state: &mut SessionState,
    gateway: &Gateway,
    input: &str,
) -> Result<Outcome, GatewayError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Outcome::EmptyInput("Please enter a message."));
    }

    let messages = state.transcript_with(input);
    debug!(turns = state.chat_history().len(), "submitting chat message");
    let reply = gateway
        .chat_completion(state.config.model.as_str(), messages)
        .await?;

    state.record_chat_turn(input, reply.clone());
    info!(turns = state.chat_history().len(), "chat turn recorded");
    Ok(Outcome::Reply(reply))
}

/// The single-turn request content for a text or transcript upload.
pub fn upload_request_content(instruction: &str, content: &str) -> String {
    format!("{instruction}\n\nContent:\n{content}")
}

/// Process a staged upload with an instruction. Text and transcript content
/// goes out as a combined single-turn request; an image payload goes out as
/// a multimodal request. Exactly one of the two paths runs.
pub async fn submit_upload(
    state: &mut SessionState,
    gateway: &Gateway,
    staged: &StagedUpload,
    instruction: &str,
) -> Result<Outcome, GatewayError> {
    let instruction = instruction.trim();
    if instruction.is_empty() {
        return Ok(Outcome::EmptyInput("Please enter an instruction."));
    }

    let message = match &staged.payload {
        UploadPayload::Text(content) => {
            ChatMessage::user(upload_request_content(instruction, content))
        }
        UploadPayload::Image(data_uri) => ChatMessage::user_parts(vec![
            ContentPart::Text {
                text: instruction.to_string(),
            },
            ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: data_uri.clone(),
                },
            },
        ]),
    };

    debug!(kind = staged.kind.as_str(), file = %staged.file_name, "processing upload");
    let reply = gateway
        .chat_completion(state.config.model.as_str(), vec![message])
        .await?;

    state.record_upload(instruction, staged.kind.as_str(), reply.clone());
    Ok(Outcome::Reply(reply))
}

/// Generate an image from a prompt. On success the artifact reference is
/// recorded.
pub async fn submit_image(
    state: &mut SessionState,
    gateway: &Gateway,
    prompt: &str,
) -> Result<Outcome, GatewayError> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Ok(Outcome::EmptyInput("Please enter a prompt."));
    }

    let url = gateway.generate_image(prompt).await?;
    state.record_image(prompt, url.clone());
    info!(images = state.image_history().len(), "image recorded");
    Ok(Outcome::Image { url })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dummy::DummyGateway;
    use crate::core::upload::{FileKind, StagedUpload, UploadPayload};

    fn echo_gateway() -> Gateway {
        Gateway::Dummy(DummyGateway::new())
    }

    fn failing_gateway() -> Gateway {
        Gateway::Dummy(DummyGateway::failing("simulated outage"))
    }

    fn staged_text(content: &str) -> StagedUpload {
        StagedUpload {
            kind: FileKind::Text,
            file_name: "note.txt".to_string(),
            payload: UploadPayload::Text(content.to_string()),
        }
    }

    #[tokio::test]
    async fn n_submissions_yield_n_turns_in_order() {
        let mut state = SessionState::default();
        let gateway = echo_gateway();

        for i in 0..4 {
            let outcome = submit_chat(&mut state, &gateway, &format!("msg {i}"))
                .await
                .unwrap();
            assert!(matches!(outcome, Outcome::Reply(_)));
        }

        assert_eq!(state.chat_history().len(), 4);
        for (i, turn) in state.chat_history().iter().enumerate() {
            assert_eq!(turn.user_text, format!("msg {i}"));
            assert_eq!(turn.bot_text, format!("[echo] msg {i}"));
        }
    }

    #[tokio::test]
    async fn empty_chat_input_never_reaches_the_gateway() {
        let mut state = SessionState::default();
        // A failing gateway would error if called; the warning outcome
        // proves the call never happened.
        let gateway = failing_gateway();

        for input in ["", "   ", "\t\n"] {
            let outcome = submit_chat(&mut state, &gateway, input).await.unwrap();
            assert!(matches!(outcome, Outcome::EmptyInput(_)));
        }
        assert!(state.chat_history().is_empty());
    }

    #[tokio::test]
    async fn failed_chat_call_records_nothing() {
        let mut state = SessionState::default();
        state.record_chat_turn("earlier", "reply");

        let err = submit_chat(&mut state, &failing_gateway(), "hello").await;
        assert!(err.is_err());
        assert_eq!(state.chat_history().len(), 1);
    }

    #[test]
    fn upload_content_matches_fixed_format() {
        assert_eq!(
            upload_request_content("summarize", "abc"),
            "summarize\n\nContent:\nabc"
        );
    }

    #[tokio::test]
    async fn text_upload_sends_combined_single_turn_request() {
        let mut state = SessionState::default();
        let outcome = submit_upload(&mut state, &echo_gateway(), &staged_text("abc"), "summarize")
            .await
            .unwrap();

        // The dummy gateway echoes the single message it was sent.
        assert_eq!(
            outcome,
            Outcome::Reply("[echo] summarize\n\nContent:\nabc".to_string())
        );
        assert_eq!(state.upload_history().len(), 1);
        assert_eq!(state.upload_history()[0].file_kind, "text");
        assert_eq!(state.upload_history()[0].prompt, "summarize");
    }

    #[tokio::test]
    async fn image_upload_sends_multimodal_request() {
        let mut state = SessionState::default();
        let staged = StagedUpload {
            kind: FileKind::Image,
            file_name: "pic.png".to_string(),
            payload: UploadPayload::Image("data:image/png;base64,aGk=".to_string()),
        };

        let outcome = submit_upload(&mut state, &echo_gateway(), &staged, "describe")
            .await
            .unwrap();
        // Multimodal messages have no plain text for the echo to reflect.
        assert_eq!(outcome, Outcome::Reply("[echo] (multimodal message)".to_string()));
        assert_eq!(state.upload_history()[0].file_kind, "image");
    }

    #[tokio::test]
    async fn empty_instruction_records_nothing() {
        let mut state = SessionState::default();
        let outcome = submit_upload(&mut state, &failing_gateway(), &staged_text("abc"), "  ")
            .await
            .unwrap();
        assert!(matches!(outcome, Outcome::EmptyInput(_)));
        assert!(state.upload_history().is_empty());
    }

    #[tokio::test]
    async fn failed_upload_call_records_nothing() {
        let mut state = SessionState::default();
        let result =
            submit_upload(&mut state, &failing_gateway(), &staged_text("abc"), "summarize").await;
        assert!(result.is_err());
        assert!(state.upload_history().is_empty());
    }

    #[tokio::test]
    async fn image_generation_records_artifact_url() {
        let mut state = SessionState::default();
        let outcome = submit_image(&mut state, &echo_gateway(), "a whale at dusk")
            .await
            .unwrap();
        match outcome {
            Outcome::Image { url } => assert!(url.starts_with("https://")),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(state.image_history().len(), 1);
        assert_eq!(state.image_history()[0].prompt, "a whale at dusk");
    }

    #[tokio::test]
    async fn failed_generation_leaves_history_unchanged() {
        let mut state = SessionState::default();
        state.record_image("earlier", "https://img.example/0.png");

        let result = submit_image(&mut state, &failing_gateway(), "a reef").await;
        assert!(result.is_err());
        assert_eq!(state.image_history().len(), 1);
    }

    #[tokio::test]
    async fn empty_prompt_is_a_warning_not_an_error() {
        let mut state = SessionState::default();
        let outcome = submit_image(&mut state, &failing_gateway(), "").await.unwrap();
        assert!(matches!(outcome, Outcome::EmptyInput(_)));
        assert!(state.image_history().is_empty());
    }
}
