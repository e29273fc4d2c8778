//! Upload staging: detect what kind of file the user handed us and turn it
//! into content the completion endpoint can consume.
//!
//! Text files become plain UTF-8 content. Audio files are written to a
//! temporary path and submitted whole to the transcription endpoint; the
//! transcript becomes the content. Images become an inline base64 data URI
//! and derive no local text content. [`UploadPayload`] is an enum, so a
//! staged upload can never carry both text and image content at once.

use std::io::Write;
use std::path::Path;

use base64::Engine as _;
use thiserror::Error;
use tracing::debug;

use crate::api::{Gateway, GatewayError};

/// Extensions accepted by the upload control.
pub const ACCEPTED_EXTENSIONS: [&str; 7] = ["txt", "png", "jpg", "jpeg", "mp3", "wav", "m4a"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Text,
    Image,
    Audio,
}

impl FileKind {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "txt" => Some(FileKind::Text),
            "png" | "jpg" | "jpeg" => Some(FileKind::Image),
            "mp3" | "wav" | "m4a" => Some(FileKind::Audio),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FileKind::Text => "text",
            FileKind::Image => "image",
            FileKind::Audio => "audio",
        }
    }
}

/// Exactly one content path per staged file: derived text, or an inline
/// image data URI. Never both, never neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadPayload {
    Text(String),
    Image(String),
}

#[derive(Debug, Clone)]
pub struct StagedUpload {
    pub kind: FileKind,
    pub file_name: String,
    pub payload: UploadPayload,
}

impl StagedUpload {
    /// A short preview of the derived content for display after staging.
    pub fn preview(&self) -> Option<&str> {
        match &self.payload {
            UploadPayload::Text(content) => Some(content),
            UploadPayload::Image(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum StageError {
    #[error("unsupported file type '{0}'. Accepted: txt, png, jpg, jpeg, mp3, wav, m4a")]
    UnsupportedExtension(String),
    #[error("file is not valid UTF-8 text: {0}")]
    NotUtf8(String),
    #[error("could not read file: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

fn image_mime(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        _ => "image/png",
    }
}

/// Stage a file from disk for processing. Audio staging calls the
/// transcription endpoint, so this needs the gateway.
pub async fn stage_file(gateway: &Gateway, path: &Path) -> Result<StagedUpload, StageError> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();
    let kind = FileKind::from_extension(&ext)
        .ok_or_else(|| StageError::UnsupportedExtension(ext.clone()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    debug!(file = %file_name, kind = kind.as_str(), "staging upload");

    let payload = match kind {
        FileKind::Text => {
            let bytes = tokio::fs::read(path).await?;
            let content = String::from_utf8(bytes)
                .map_err(|e| StageError::NotUtf8(e.to_string()))?;
            UploadPayload::Text(content)
        }
        FileKind::Audio => {
            // Persist to a temporary path first, then submit the copy whole.
            let bytes = tokio::fs::read(path).await?;
            let mut temp = tempfile::Builder::new()
                .suffix(&format!(".{}", ext.to_ascii_lowercase()))
                .tempfile()?;
            temp.write_all(&bytes)?;
            temp.flush()?;
            let transcript = gateway.transcribe(temp.path()).await?;
            UploadPayload::Text(transcript)
        }
        FileKind::Image => {
            let bytes = tokio::fs::read(path).await?;
            let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
            UploadPayload::Image(format!("data:{};base64,{encoded}", image_mime(&ext)))
        }
    };

    Ok(StagedUpload {
        kind,
        file_name,
        payload,
    })
}
