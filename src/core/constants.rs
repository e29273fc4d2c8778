//! Shared constants used across the application

/// System persona prepended to every chat transcript.
pub const SYSTEM_PERSONA: &str = "You are ORCA, a wise ocean-inspired multilingual assistant.";

/// Model used for audio transcription uploads.
pub const TRANSCRIPTION_MODEL: &str = "whisper-1";

/// Model used for image generation.
pub const IMAGE_MODEL: &str = "gpt-image-1";

/// Target resolution for generated images.
pub const IMAGE_SIZE: &str = "1024x1024";

/// Default API base URL when `OPENAI_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
