use super::CommandResult;
use crate::core::session::SessionState;

pub type CommandHandler = fn(&mut SessionState, CommandInvocation<'_>) -> CommandResult;

pub struct Command {
    pub name: &'static str,
    pub help: &'static str,
    pub handler: CommandHandler,
}

#[derive(Clone, Copy)]
pub struct CommandInvocation<'a> {
    pub input: &'a str,
    pub args: &'a str,
}

pub fn all_commands() -> &'static [Command] {
    COMMANDS
}

pub fn find_command(name: &str) -> Option<&'static Command> {
    all_commands()
        .iter()
        .find(|command| command.name.eq_ignore_ascii_case(name))
}

const COMMANDS: &[Command] = &[
    Command {
        name: "help",
        help: "Show available commands and usage information.",
        handler: super::handle_help,
    },
    Command {
        name: "mode",
        help: "Switch feature: /mode chat | upload | image.",
        handler: super::handle_mode,
    },
    Command {
        name: "model",
        help: "List models or switch: /model [name].",
        handler: super::handle_model,
    },
    Command {
        name: "theme",
        help: "Toggle dark mode, or set it: /theme [dark|light].",
        handler: super::handle_theme,
    },
    Command {
        name: "file",
        help: "Stage a file for the upload feature: /file <path>.",
        handler: super::handle_file,
    },
    Command {
        name: "history",
        help: "Show the current feature's history, newest first.",
        handler: super::handle_history,
    },
    Command {
        name: "export",
        help: "Export chat history: /export json | txt.",
        handler: super::handle_export,
    },
    Command {
        name: "save",
        help: "Save the last generated image: /save [path].",
        handler: super::handle_save,
    },
    Command {
        name: "quit",
        help: "Leave the session.",
        handler: super::handle_quit,
    },
];
