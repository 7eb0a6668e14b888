//! ui
//!
//! User-facing output.
//!
//! All terminal output goes through [`output`] so results, status messages
//! and errors land on the right stream and honor `--quiet` / `--json`.

pub mod output;
