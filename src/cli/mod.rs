//! cli
//!
//! Command-line interface layer for cogpipe.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install the tracing subscriber
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. Operation commands are turned into a
//! [`crate::cog::Invocation`] and handed to [`crate::cog::Cocogitto`];
//! everything the operation does happens there.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::PathBuf;

use anyhow::Result;
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::ui::output::{Format, Verbosity};

/// Global flags shared by every command handler.
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub config_path: Option<PathBuf>,
    pub debug: bool,
    pub quiet: bool,
    pub json: bool,
    pub explain: bool,
    /// Engine program from `--engine`; overrides the config file
    pub engine: Option<String>,
}

impl Context {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_quiet(self.quiet)
    }

    pub fn format(&self) -> Format {
        if self.json {
            Format::Json
        } else {
            Format::Plain
        }
    }
}

/// The user pressed Ctrl-C while an operation was running.
#[derive(Debug, Error)]
#[error("interrupted")]
pub struct Interrupted;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.debug);

    let ctx = Context {
        config_path: cli.config.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
        json: cli.json,
        explain: cli.explain,
        engine: cli.engine.clone(),
    };

    commands::dispatch(cli.command, &ctx)
}

/// Log to stderr. `--debug` wins over `RUST_LOG`, which wins over `warn`.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
