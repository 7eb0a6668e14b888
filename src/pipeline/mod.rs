//! pipeline
//!
//! The clone → provision → run chain every cog operation goes through.
//!
//! # Stages
//!
//! 1. [`clone`]: a git image clones the remote repository with the
//!    credentials templated into the URL
//! 2. [`provision`]: a toolchain image receives the checkout and installs
//!    cocogitto
//! 3. [`run`]: the assembled `cog` line runs and its stdout is returned
//!
//! Every stage takes and returns plain [`Container`](crate::container::Container)
//! values; nothing is shared between calls.

pub mod clone;
pub mod provision;
pub mod run;

pub use clone::{clone_repository, clone_url, git_base, CLONE_URL_ENV, REPOSITORY_DIR};
pub use provision::provision;
pub use run::{run, trim_trailing_newline};

/// Images, identity and tool settings for the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Image the clone runs in (Alpine based: uses `apk`)
    pub git_image: String,
    /// Image cocogitto is installed into (uses `cargo`)
    pub toolchain_image: String,
    pub git_user_name: String,
    pub git_user_email: String,
    /// Crate passed to `cargo install --locked`
    pub tool_crate: String,
    pub tool_version: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            git_image: "alpine:latest".to_string(),
            toolchain_image: "rust:latest".to_string(),
            git_user_name: "dagger".to_string(),
            git_user_email: "cicd@stackit.cloud".to_string(),
            tool_crate: "cocogitto".to_string(),
            tool_version: None,
        }
    }
}
