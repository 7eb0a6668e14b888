//! cog::options
//!
//! Per-operation option bundles.
//!
//! Optional strings are `Option<String>`; `Some("")` is treated the same as
//! `None` by the assemblers. Every bundle can carry a `cog_toml` host file
//! that replaces the repository's own `cog.toml` for the call.

use std::path::PathBuf;

/// `cog bump`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BumpOptions {
    /// Let cocogitto pick the increment
    pub auto: bool,
    pub major: bool,
    pub minor: bool,
    pub patch: bool,
    /// Explicit target version; overrides auto/major/minor/patch
    pub version: Option<String>,
    pub dry_run: bool,
    /// Pre-release metadata
    pub pre: Option<String>,
    /// Build metadata
    pub build: Option<String>,
    /// Add `[skip ci]` to the bump commit
    pub skip_ci: bool,
    pub cog_toml: Option<PathBuf>,
}

/// `cog changelog`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangelogOptions {
    /// Generate the changelog for a single tag
    pub at: Option<String>,
    /// `default`, `full_hash`, `remote`, or a template path
    pub template: Option<String>,
    /// Remote domain, e.g. github.com (remote template only)
    pub remote: Option<String>,
    /// Repository owner (remote template only)
    pub owner: Option<String>,
    /// Repository name (remote template only)
    pub repository: Option<String>,
    /// Revision range, e.g. `1.0.0..2.0.0`
    pub pattern: Option<String>,
    pub cog_toml: Option<PathBuf>,
}

/// `cog check`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckOptions {
    pub cog_toml: Option<PathBuf>,
}

/// `cog commit`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitOptions {
    /// Conventional commit type (`feat`, `fix`, ...); required
    pub commit_type: String,
    /// Commit subject; required
    pub message: String,
    pub scope: Option<String>,
    pub breaking_change: bool,
    pub cog_toml: Option<PathBuf>,
}

/// `cog get-version`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetVersionOptions {
    /// Version printed when no tag is found
    pub fallback: Option<String>,
    /// Monorepo package
    pub package: Option<String>,
    /// Print only the version (`-v`)
    pub silence: bool,
    pub cog_toml: Option<PathBuf>,
}

/// `cog install-hook`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallHooksOptions {
    /// Hook to install; all configured hooks when unset
    pub hook: Option<String>,
    pub cog_toml: Option<PathBuf>,
}

/// `cog log`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogOptions {
    pub authors: Vec<String>,
    pub commit_type: Option<String>,
    pub scope: Option<String>,
    pub no_error: bool,
    pub breaking_only: bool,
    pub cog_toml: Option<PathBuf>,
}

/// `cog verify`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyOptions {
    /// Message checked against the conventional commits grammar
    pub message: String,
    pub cog_toml: Option<PathBuf>,
}
