//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads configuration and builds what the command needs
//! 2. Runs it
//! 3. Formats and displays output
//!
//! # Async Commands
//!
//! Cog operations drive the container engine asynchronously. The handler
//! creates a tokio runtime and blocks on the operation, racing it against
//! Ctrl-C so an interrupt drops (and kills) the engine process.

mod completion;
mod config_cmd;
mod operation;
mod secret;

pub use completion::completion;
pub use operation::{build_engine, operation};

use anyhow::Result;

use super::args::{Command, ConfigAction, SecretAction};
use super::Context;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Secret { action } => match action {
            SecretAction::Set { key, stdin } => secret::set(ctx, &key, stdin),
            SecretAction::Delete { key } => secret::delete(ctx, &key),
            SecretAction::Status { key } => secret::status(ctx, &key),
        },
        Command::Config { action } => match action {
            ConfigAction::Show => config_cmd::show(ctx),
            ConfigAction::Path => config_cmd::path(ctx),
            ConfigAction::Init { force } => config_cmd::init(ctx, force),
        },
        Command::Completion { shell } => completion(shell),
        Command::Operation(command) => {
            let (repo, invocation) = command.into_parts();
            operation(ctx, repo, invocation)
        }
    }
}
