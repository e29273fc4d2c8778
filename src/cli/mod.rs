//! Command-line interface parsing and handling
//!
//! This module parses command-line arguments and dispatches either into the
//! interactive session or into the small preference-setting commands.

use std::error::Error;

use clap::{Parser, Subcommand};

use crate::api::{dummy::DummyGateway, openai::OpenAiGateway, Gateway};
use crate::core::config::{Credentials, Prefs};
use crate::core::session::{ModelId, SessionConfig, SessionState};
use crate::ui::repl;

#[derive(Parser)]
#[command(name = "orca")]
#[command(about = "A terminal assistant for chat, file processing, and image generation")]
#[command(
    long_about = "ORCA is a terminal assistant that connects chat, file-processing, and \
image-generation workflows to OpenAI-compatible APIs.\n\n\
Environment Variables:\n\
  OPENAI_API_KEY    Your API key (required; a .env file is also read)\n\
  OPENAI_BASE_URL   Custom API base URL (optional, defaults to https://api.openai.com/v1)\n\n\
Session commands:\n\
  /mode             Switch between chat, upload, and image generation\n\
  /model            Switch the chat model\n\
  /theme            Toggle dark mode\n\
  /export           Download the chat history as JSON or plain text\n\
  /save             Save the last generated image locally\n\
  /help             Show all commands"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Model to start the session with
    #[arg(short = 'm', long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Use the offline dummy backend (no API key required)
    #[arg(long)]
    pub dummy: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive session (default)
    Chat,
    /// Persist a preference: default-model or theme
    Set {
        /// Preference key to set
        key: String,
        /// Value to set for the key
        value: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    // Load .env if present; the file is optional.
    let _ = dotenvy::dotenv();
    crate::logging::init();

    let args = Args::parse();

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Set { key, value } => set_preference(&key, &value),
        Commands::Chat => run_session(args.model, args.dummy).await,
    }
}

fn set_preference(key: &str, value: &str) -> Result<(), Box<dyn Error>> {
    let mut prefs = Prefs::load()?;
    match key {
        "default-model" => {
            if let Err(message) = ModelId::try_from(value) {
                eprintln!("❌ {message}");
                std::process::exit(1);
            }
            prefs.default_model = Some(value.to_string());
            prefs.save()?;
            println!("✅ Set default-model to: {value}");
        }
        "theme" => {
            if value != "dark" && value != "light" {
                eprintln!("❌ Unknown theme: {value} (use dark or light)");
                std::process::exit(1);
            }
            prefs.theme = Some(value.to_string());
            prefs.save()?;
            println!("✅ Set theme to: {value}");
        }
        _ => {
            eprintln!("❌ Unknown preference key: {key}");
            std::process::exit(1);
        }
    }
    Ok(())
}

async fn run_session(model_arg: Option<String>, dummy: bool) -> Result<(), Box<dyn Error>> {
    let prefs = Prefs::load()?;

    let model_name = model_arg.or(prefs.default_model.clone());
    let model = match model_name {
        Some(name) => match ModelId::try_from(name.as_str()) {
            Ok(model) => model,
            Err(message) => {
                eprintln!("❌ {message}");
                std::process::exit(1);
            }
        },
        None => ModelId::default(),
    };

    let gateway = if dummy {
        Gateway::Dummy(DummyGateway::new())
    } else {
        match Credentials::from_env() {
            Ok(credentials) => Gateway::OpenAi(OpenAiGateway::new(
                credentials.api_key,
                credentials.base_url,
            )),
            Err(err) => {
                eprintln!("❌ {err}");
                std::process::exit(1);
            }
        }
    };

    let state = SessionState::new(SessionConfig {
        model,
        dark_mode: prefs.dark_mode(),
    });

    repl::run(gateway, state).await
}
