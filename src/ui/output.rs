//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Stdout carries only operation results so pipelines can capture them.
//! Status messages go to stderr and respect the quiet flag. When `--json` is
//! enabled, results are wrapped in a machine-readable envelope.

use std::fmt::Display;

use serde::Serialize;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - results only
    Quiet,
    /// Normal mode - results plus status messages
    Normal,
}

impl Verbosity {
    pub fn from_quiet(quiet: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else {
            Verbosity::Normal
        }
    }
}

/// Result format for operation output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Plain,
    Json,
}

/// JSON envelope for a finished operation.
#[derive(Debug, Serialize)]
struct ResultEnvelope<'a> {
    operation: &'a str,
    repository: &'a str,
    output: &'a str,
}

/// Render an operation result for stdout.
pub fn format_result(format: Format, operation: &str, repository: &str, output: &str) -> String {
    match format {
        Format::Plain => output.to_string(),
        Format::Json => serde_json::to_string(&ResultEnvelope {
            operation,
            repository,
            output,
        })
        .unwrap_or_else(|_| String::from("{}")),
    }
}

/// Print an operation result (always shown).
pub fn result(format: Format, operation: &str, repository: &str, output: &str) {
    let rendered = format_result(format, operation, repository, output);
    if !rendered.is_empty() {
        println!("{}", rendered);
    }
}

/// Print a status message to stderr (respects quiet mode).
pub fn status(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("{}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_result_is_raw_output() {
        assert_eq!(
            format_result(Format::Plain, "get-version", "repo", "1.2.3"),
            "1.2.3"
        );
    }

    #[test]
    fn json_result_is_an_envelope() {
        let rendered = format_result(
            Format::Json,
            "log",
            "https://github.com/acme/app",
            "line \"one\"\nline two",
        );
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["operation"], "log");
        assert_eq!(value["repository"], "https://github.com/acme/app");
        assert_eq!(value["output"], "line \"one\"\nline two");
    }

    #[test]
    fn verbosity_from_quiet_flag() {
        assert_eq!(Verbosity::from_quiet(true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_quiet(false), Verbosity::Normal);
    }
}
