//! History export: whole-history downloads as JSON or plain text, and
//! saving the most recently generated image to a local file.
//!
//! Saving an image fetches the artifact's bytes over HTTP before writing;
//! the artifact reference alone is a URL, not file content.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::Utc;

use crate::api::{Gateway, GatewayError};
use crate::core::session::{ChatTurn, SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Txt,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Txt => "txt",
        }
    }
}

impl TryFrom<&str> for ExportFormat {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "txt" | "text" => Ok(ExportFormat::Txt),
            _ => Err(format!("unknown export format '{value}'. Use json or txt")),
        }
    }
}

/// The chat history as pretty-printed JSON.
pub fn chat_history_json(state: &SessionState) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(state.chat_history())
}

/// The chat history as a plain-text join of "You: …" / "ORCA: …" per turn.
pub fn chat_history_txt(state: &SessionState) -> String {
    state
        .chat_history()
        .iter()
        .map(|turn| format!("You: {}\nORCA: {}", turn.user_text, turn.bot_text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse a JSON export back into turns.
pub fn parse_chat_history_json(contents: &str) -> Result<Vec<ChatTurn>, serde_json::Error> {
    serde_json::from_str(contents)
}

/// Timestamped default filename for an export, e.g. `orca-history-2026-08-30.json`.
pub fn default_export_filename(format: ExportFormat) -> String {
    let date = Utc::now().format("%Y-%m-%d");
    format!("orca-history-{date}.{}", format.extension())
}

/// Write export contents to a new file. Refuses to overwrite an existing
/// file so a repeated export cannot clobber an earlier one.
pub fn write_export(path: &Path, contents: &str) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() {
        return Err(format!("File already exists: {}", path.display()).into());
    }
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum SaveImageError {
    #[error("no generated image to save yet")]
    NoImage,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("could not write file: {0}")]
    Io(#[from] std::io::Error),
}

/// Fetch the most recently generated image and write it to `path`.
pub async fn save_last_image(
    gateway: &Gateway,
    state: &SessionState,
    path: &Path,
) -> Result<(), SaveImageError> {
    let record = state.last_image().ok_or(SaveImageError::NoImage)?;
    let bytes = gateway.fetch_artifact(&record.url).await?;
    std::fs::write(path, bytes)?;
    Ok(())
}
