//! ORCA is a terminal assistant that forwards text, file, and image-generation
//! requests to OpenAI-compatible APIs.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns session state, the feature router, the per-action
//!   handlers, upload staging, and history export.
//! - [`api`] defines the wire payloads and the gateway backends that make
//!   the actual HTTP calls.
//! - [`commands`] implements slash-command parsing and execution used by
//!   the interactive loop.
//! - [`ui`] runs the interactive line editor and renders history and
//!   results.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which dispatches into [`ui::repl`] for
//! interactive sessions.

pub mod api;
pub mod cli;
pub mod commands;
pub mod core;
pub mod logging;
pub mod ui;
pub mod utils;
