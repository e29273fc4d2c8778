//! The interactive loop: a rustyline editor with slash-command completion,
//! dispatching each line to the active feature's handler and re-rendering
//! that feature's history after every completed interaction.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::Path;

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use crate::api::Gateway;
use crate::commands::{self, CommandResult};
use crate::core::export::{self, ExportFormat};
use crate::core::feature::Feature;
use crate::core::handlers::{self, Outcome};
use crate::core::session::SessionState;
use crate::core::upload::{self, StagedUpload, UploadPayload};
use crate::ui::theme::{palette, Palette};

/// Line-editor helper providing completion, highlighting, and hints for
/// slash commands.
#[derive(Clone)]
struct ReplHelper {
    commands: Vec<String>,
}

impl ReplHelper {
    fn new() -> Self {
        Self {
            commands: commands::all_commands()
                .iter()
                .map(|command| format!("/{}", command.name))
                .collect(),
        }
    }
}

impl Helper for ReplHelper {}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for ReplHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for ReplHelper {}

/// Run the interactive session to completion.
pub async fn run(gateway: Gateway, mut state: SessionState) -> Result<(), Box<dyn std::error::Error>> {
    let mut feature = Feature::default();
    let mut staged: Option<StagedUpload> = None;

    let mut editor: Editor<ReplHelper, rustyline::history::DefaultHistory> = Editor::new()?;
    editor.set_helper(Some(ReplHelper::new()));

    {
        let colors = palette(state.config.dark_mode);
        println!("{}", "ORCA — ocean-inspired assistant".color(colors.accent).bold());
        println!(
            "{}",
            format!(
                "Model: {}. Type /help for commands, /mode to switch features.",
                state.config.model
            )
            .color(colors.info)
        );
    }

    loop {
        let prompt = format!("orca({})> ", feature.as_str());
        let line = match editor.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };

        if !line.trim().is_empty() {
            let _ = editor.add_history_entry(line.as_str());
        }

        let result = commands::process_input(&mut state, &line);
        let colors = palette(state.config.dark_mode);
        match result {
            CommandResult::Message(text) => println!("{}", text.color(colors.info)),
            CommandResult::Warning(text) => println!("{}", text.color(colors.warning)),
            CommandResult::Quit => break,
            CommandResult::SwitchFeature(next) => {
                if next != feature {
                    feature = next;
                    staged = None;
                }
                println!("{}", format!("Mode: {}", feature.label()).color(colors.info));
            }
            CommandResult::StageFile(path) => {
                if feature != Feature::Upload {
                    feature = Feature::Upload;
                    println!("{}", format!("Mode: {}", feature.label()).color(colors.info));
                }
                match upload::stage_file(&gateway, Path::new(&path)).await {
                    Ok(upload) => {
                        describe_staged(&upload, &colors);
                        staged = Some(upload);
                    }
                    Err(err) => println!("{}", format!("Error: {err}").color(colors.error)),
                }
            }
            CommandResult::ShowHistory => render_history(&state, feature, &colors),
            CommandResult::Export(format) => export_history(&state, format, &colors),
            CommandResult::SaveImage(path) => {
                let path = path.unwrap_or_else(|| "generated.png".to_string());
                match export::save_last_image(&gateway, &state, Path::new(&path)).await {
                    Ok(()) => {
                        println!("{}", format!("Saved image to {path}").color(colors.info))
                    }
                    Err(err) => println!("{}", format!("Error: {err}").color(colors.error)),
                }
            }
            CommandResult::ProcessAsMessage(text) => {
                dispatch_message(&mut state, &gateway, feature, staged.as_ref(), &text, &colors)
                    .await;
            }
        }
    }

    println!("Until next tide.");
    Ok(())
}

/// Route a plain message to the active feature's handler and render the
/// result.
async fn dispatch_message(
    state: &mut SessionState,
    gateway: &Gateway,
    feature: Feature,
    staged: Option<&StagedUpload>,
    text: &str,
    colors: &Palette,
) {
    let result = match feature {
        Feature::Chat => handlers::submit_chat(state, gateway, text).await,
        Feature::Upload => match staged {
            Some(upload) => handlers::submit_upload(state, gateway, upload, text).await,
            None => {
                println!(
                    "{}",
                    "Stage a file first with /file <path>.".color(colors.warning)
                );
                return;
            }
        },
        Feature::ImageGeneration => handlers::submit_image(state, gateway, text).await,
    };

    match result {
        Ok(Outcome::Reply(reply)) => {
            println!("{} {}", "ORCA:".color(colors.accent).bold(), reply.color(colors.assistant));
            render_history(state, feature, colors);
        }
        Ok(Outcome::Image { url }) => {
            println!(
                "{} {}",
                "Generated:".color(colors.accent).bold(),
                url.color(colors.assistant)
            );
            println!("{}", "Use /save to download it.".color(colors.info));
            render_history(state, feature, colors);
        }
        Ok(Outcome::EmptyInput(warning)) => println!("{}", warning.color(colors.warning)),
        Err(err) => println!("{}", format!("Error: {err}").color(colors.error)),
    }
}

fn describe_staged(upload: &StagedUpload, colors: &Palette) {
    println!(
        "{}",
        format!("Staged {} ({})", upload.file_name, upload.kind.as_str()).color(colors.info)
    );
    match &upload.payload {
        UploadPayload::Text(content) => {
            let preview: String = content.chars().take(300).collect();
            println!("{}", preview.color(colors.assistant));
            if content.chars().count() > 300 {
                println!("{}", "…".color(colors.info));
            }
        }
        UploadPayload::Image(_) => {
            println!("{}", "Image attached inline.".color(colors.info));
        }
    }
    println!(
        "{}",
        "What should ORCA do with this? Type an instruction.".color(colors.info)
    );
}

/// Re-display the active feature's history newest-first.
fn render_history(state: &SessionState, feature: Feature, colors: &Palette) {
    match feature {
        Feature::Chat => {
            if state.chat_history().is_empty() {
                println!("{}", "No chat history yet.".color(colors.info));
                return;
            }
            println!("{}", "Chat history (newest first):".color(colors.info));
            for turn in state.chat_history().iter().rev() {
                println!("{} {}", "You:".color(colors.user).bold(), turn.user_text.color(colors.user));
                println!(
                    "{} {}",
                    "ORCA:".color(colors.accent).bold(),
                    turn.bot_text.color(colors.assistant)
                );
                println!("{}", "---".color(colors.info));
            }
        }
        Feature::Upload => {
            if state.upload_history().is_empty() {
                println!("{}", "No upload history yet.".color(colors.info));
                return;
            }
            println!("{}", "Upload history (newest first):".color(colors.info));
            for record in state.upload_history().iter().rev() {
                println!(
                    "{} {} ({})",
                    "Prompt:".color(colors.user).bold(),
                    record.prompt.color(colors.user),
                    record.file_kind.color(colors.info)
                );
                println!(
                    "{} {}",
                    "ORCA:".color(colors.accent).bold(),
                    record.response.color(colors.assistant)
                );
                println!("{}", "---".color(colors.info));
            }
        }
        Feature::ImageGeneration => {
            if state.image_history().is_empty() {
                println!("{}", "No generated images yet.".color(colors.info));
                return;
            }
            println!("{}", "Image history (newest first):".color(colors.info));
            for record in state.image_history().iter().rev() {
                println!(
                    "{} {}",
                    "Prompt:".color(colors.user).bold(),
                    record.prompt.color(colors.user)
                );
                println!("  {}", record.url.color(colors.assistant));
                println!("{}", "---".color(colors.info));
            }
        }
    }
}

fn export_history(state: &SessionState, format: ExportFormat, colors: &Palette) {
    let contents = match format {
        ExportFormat::Json => match export::chat_history_json(state) {
            Ok(json) => json,
            Err(err) => {
                println!("{}", format!("Error: {err}").color(colors.error));
                return;
            }
        },
        ExportFormat::Txt => export::chat_history_txt(state),
    };

    let filename = export::default_export_filename(format);
    match export::write_export(Path::new(&filename), &contents) {
        Ok(()) => println!(
            "{}",
            format!("Exported chat history to {filename}").color(colors.info)
        ),
        Err(err) => println!("{}", format!("Error: {err}").color(colors.error)),
    }
}
