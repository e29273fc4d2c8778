//! Slash-command parsing and execution for the interactive loop.
//!
//! Input that does not start with `/`, or that names no known command,
//! passes through as ordinary message text for the active feature.

mod registry;

pub use registry::{all_commands, CommandInvocation};

use crate::core::export::ExportFormat;
use crate::core::feature::Feature;
use crate::core::session::{ModelId, SessionState};

pub enum CommandResult {
    /// Command handled; show this line of feedback.
    Message(String),
    /// Command rejected; show this warning.
    Warning(String),
    /// Not a command: hand the text to the active feature's handler.
    ProcessAsMessage(String),
    /// Switch the active feature.
    SwitchFeature(Feature),
    /// Stage a file for the upload feature (needs the gateway, so the loop
    /// executes it).
    StageFile(String),
    /// Show the active feature's history.
    ShowHistory,
    /// Export the chat history in the given format.
    Export(ExportFormat),
    /// Save the last generated image, optionally to a given path.
    SaveImage(Option<String>),
    /// Leave the session.
    Quit,
}

pub fn process_input(state: &mut SessionState, input: &str) -> CommandResult {
    let trimmed = input.trim();

    if !trimmed.starts_with('/') {
        return CommandResult::ProcessAsMessage(input.to_string());
    }

    let mut parts = trimmed[1..].splitn(2, ' ');
    let command_name = match parts.next() {
        Some(name) if !name.is_empty() => name,
        _ => return CommandResult::ProcessAsMessage(input.to_string()),
    };
    let args = parts.next().unwrap_or("").trim();

    if let Some(command) = registry::find_command(command_name) {
        let invocation = CommandInvocation {
            input: trimmed,
            args,
        };
        (command.handler)(state, invocation)
    } else {
        CommandResult::ProcessAsMessage(input.to_string())
    }
}

pub(super) fn handle_help(
    _state: &mut SessionState,
    _invocation: CommandInvocation<'_>,
) -> CommandResult {
    let mut help = String::from("Commands:\n");
    for command in all_commands() {
        help.push_str(&format!("  /{:<8} {}\n", command.name, command.help));
    }
    help.push_str("Anything else is sent to the active feature.");
    CommandResult::Message(help)
}

pub(super) fn handle_mode(
    _state: &mut SessionState,
    invocation: CommandInvocation<'_>,
) -> CommandResult {
    if invocation.args.is_empty() {
        let modes: Vec<String> = Feature::ALL
            .iter()
            .map(|f| format!("{} ({})", f.as_str(), f.label()))
            .collect();
        return CommandResult::Message(format!("Modes: {}", modes.join(", ")));
    }
    match Feature::try_from(invocation.args) {
        Ok(feature) => CommandResult::SwitchFeature(feature),
        Err(message) => CommandResult::Warning(message),
    }
}

pub(super) fn handle_model(
    state: &mut SessionState,
    invocation: CommandInvocation<'_>,
) -> CommandResult {
    if invocation.args.is_empty() {
        let listing: Vec<String> = ModelId::ALL
            .iter()
            .map(|model| {
                if *model == state.config.model {
                    format!("{model} (current)")
                } else {
                    model.to_string()
                }
            })
            .collect();
        return CommandResult::Message(format!("Models: {}", listing.join(", ")));
    }
    match ModelId::try_from(invocation.args) {
        Ok(model) => {
            state.config.model = model;
            CommandResult::Message(format!("Model switched to {model}"))
        }
        Err(message) => CommandResult::Warning(message),
    }
}

pub(super) fn handle_theme(
    state: &mut SessionState,
    invocation: CommandInvocation<'_>,
) -> CommandResult {
    match invocation.args {
        "" => state.config.dark_mode = !state.config.dark_mode,
        "dark" => state.config.dark_mode = true,
        "light" => state.config.dark_mode = false,
        other => {
            return CommandResult::Warning(format!(
                "unknown theme '{other}'. Use /theme dark or /theme light"
            ))
        }
    }
    let name = if state.config.dark_mode { "dark" } else { "light" };
    CommandResult::Message(format!("Theme set to {name}"))
}

pub(super) fn handle_file(
    _state: &mut SessionState,
    invocation: CommandInvocation<'_>,
) -> CommandResult {
    if invocation.args.is_empty() {
        return CommandResult::Warning("Usage: /file <path>".to_string());
    }
    CommandResult::StageFile(invocation.args.to_string())
}

pub(super) fn handle_history(
    _state: &mut SessionState,
    _invocation: CommandInvocation<'_>,
) -> CommandResult {
    CommandResult::ShowHistory
}

pub(super) fn handle_export(
    _state: &mut SessionState,
    invocation: CommandInvocation<'_>,
) -> CommandResult {
    if invocation.args.is_empty() {
        return CommandResult::Warning("Usage: /export json | txt".to_string());
    }
    match ExportFormat::try_from(invocation.args) {
        Ok(format) => CommandResult::Export(format),
        Err(message) => CommandResult::Warning(message),
    }
}

pub(super) fn handle_save(
    _state: &mut SessionState,
    invocation: CommandInvocation<'_>,
) -> CommandResult {
    let path = if invocation.args.is_empty() {
        None
    } else {
        Some(invocation.args.to_string())
    };
    CommandResult::SaveImage(path)
}

pub(super) fn handle_quit(
    _state: &mut SessionState,
    _invocation: CommandInvocation<'_>,
) -> CommandResult {
    CommandResult::Quit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        let mut state = SessionState::default();
        match process_input(&mut state, "hello there") {
            CommandResult::ProcessAsMessage(text) => assert_eq!(text, "hello there"),
            _ => panic!("expected pass-through"),
        }
    }

    #[test]
    fn unknown_command_passes_through_as_text() {
        let mut state = SessionState::default();
        match process_input(&mut state, "/frobnicate now") {
            CommandResult::ProcessAsMessage(text) => assert_eq!(text, "/frobnicate now"),
            _ => panic!("expected pass-through"),
        }
    }

    #[test]
    fn mode_command_switches_feature() {
        let mut state = SessionState::default();
        match process_input(&mut state, "/mode image") {
            CommandResult::SwitchFeature(Feature::ImageGeneration) => {}
            _ => panic!("expected feature switch"),
        }
    }

    #[test]
    fn mode_command_rejects_unknown_mode() {
        let mut state = SessionState::default();
        assert!(matches!(
            process_input(&mut state, "/mode video"),
            CommandResult::Warning(_)
        ));
    }

    #[test]
    fn model_command_sets_session_model() {
        let mut state = SessionState::default();
        match process_input(&mut state, "/model gpt-4o") {
            CommandResult::Message(text) => assert!(text.contains("gpt-4o")),
            _ => panic!("expected confirmation message"),
        }
        assert_eq!(state.config.model, ModelId::Gpt4o);
    }

    #[test]
    fn theme_command_toggles_dark_mode() {
        let mut state = SessionState::default();
        assert!(!state.config.dark_mode);
        process_input(&mut state, "/theme");
        assert!(state.config.dark_mode);
        process_input(&mut state, "/theme light");
        assert!(!state.config.dark_mode);
    }

    #[test]
    fn export_command_requires_a_format() {
        let mut state = SessionState::default();
        assert!(matches!(
            process_input(&mut state, "/export"),
            CommandResult::Warning(_)
        ));
        assert!(matches!(
            process_input(&mut state, "/export json"),
            CommandResult::Export(ExportFormat::Json)
        ));
        assert!(matches!(
            process_input(&mut state, "/export txt"),
            CommandResult::Export(ExportFormat::Txt)
        ));
    }

    #[test]
    fn file_command_requires_a_path() {
        let mut state = SessionState::default();
        assert!(matches!(
            process_input(&mut state, "/file"),
            CommandResult::Warning(_)
        ));
        match process_input(&mut state, "/file notes.txt") {
            CommandResult::StageFile(path) => assert_eq!(path, "notes.txt"),
            _ => panic!("expected stage request"),
        }
    }

    #[test]
    fn save_command_takes_an_optional_path() {
        let mut state = SessionState::default();
        assert!(matches!(
            process_input(&mut state, "/save"),
            CommandResult::SaveImage(None)
        ));
        match process_input(&mut state, "/save out.png") {
            CommandResult::SaveImage(Some(path)) => assert_eq!(path, "out.png"),
            _ => panic!("expected save with path"),
        }
    }
}
