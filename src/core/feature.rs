//! Feature selection: one of three modes, dispatching to exactly one
//! handler.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Feature {
    #[default]
    Chat,
    Upload,
    ImageGeneration,
}

impl Feature {
    pub const ALL: [Feature; 3] = [Feature::Chat, Feature::Upload, Feature::ImageGeneration];

    /// Short name used in the prompt and by `/mode`.
    pub fn as_str(self) -> &'static str {
        match self {
            Feature::Chat => "chat",
            Feature::Upload => "upload",
            Feature::ImageGeneration => "image",
        }
    }

    /// Human-readable label for menus.
    pub fn label(self) -> &'static str {
        match self {
            Feature::Chat => "Chat",
            Feature::Upload => "Upload (Text/Audio/Image)",
            Feature::ImageGeneration => "Image Generation",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Feature {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "chat" => Ok(Feature::Chat),
            "upload" => Ok(Feature::Upload),
            "image" | "imagegen" | "image-generation" => Ok(Feature::ImageGeneration),
            _ => Err(format!(
                "unknown mode '{value}'. Available modes: chat, upload, image"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mode_names_case_insensitively() {
        assert_eq!(Feature::try_from("Chat"), Ok(Feature::Chat));
        assert_eq!(Feature::try_from("UPLOAD"), Ok(Feature::Upload));
        assert_eq!(Feature::try_from("image"), Ok(Feature::ImageGeneration));
        assert_eq!(Feature::try_from("imagegen"), Ok(Feature::ImageGeneration));
        assert!(Feature::try_from("video").is_err());
    }

    #[test]
    fn default_mode_is_chat() {
        assert_eq!(Feature::default(), Feature::Chat);
    }
}
