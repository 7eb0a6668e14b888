//! core::config::schema
//!
//! Configuration file schema.
//!
//! # Example
//!
//! ```toml
//! [engine]
//! program = "podman"
//! keep_images = false
//! reuse_layers = false
//!
//! [images]
//! git = "alpine:3.20"
//! toolchain = "rust:1.80"
//!
//! [git]
//! user_name = "release-bot"
//! user_email = "release-bot@example.com"
//!
//! [tool]
//! crate_name = "cocogitto"
//! version = "6.1.0"
//!
//! [secrets]
//! provider = "file"
//! ```
//!
//! Every field is optional; accessors on [`Config`](super::Config) fill in
//! defaults. Unknown fields are rejected.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::container::SUPPORTED_PROGRAMS;

/// Contents of a cogpipe config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub engine: Option<EngineConfig>,
    pub images: Option<ImagesConfig>,
    pub git: Option<GitIdentityConfig>,
    pub tool: Option<ToolConfig>,
    pub secrets: Option<SecretsConfig>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(engine) = &self.engine {
            engine.validate()?;
        }
        if let Some(images) = &self.images {
            images.validate()?;
        }
        if let Some(git) = &self.git {
            git.validate()?;
        }
        if let Some(tool) = &self.tool {
            tool.validate()?;
        }
        if let Some(secrets) = &self.secrets {
            secrets.validate()?;
        }
        Ok(())
    }
}

/// Container engine settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Engine CLI ("docker" or "podman")
    pub program: Option<String>,

    /// Keep built images after the run
    pub keep_images: Option<bool>,

    /// Allow the engine's layer cache between runs
    pub reuse_layers: Option<bool>,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(program) = &self.program {
            validate_program(program)?;
        }
        Ok(())
    }
}

/// Check an engine program name against the supported set.
pub fn validate_program(program: &str) -> Result<(), ConfigError> {
    if SUPPORTED_PROGRAMS.contains(&program) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue(format!(
            "invalid engine program '{}', must be one of: {}",
            program,
            SUPPORTED_PROGRAMS.join(", ")
        )))
    }
}

/// Base images for the clone and tool stages.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Image the repository is cloned in (needs `apk`)
    pub git: Option<String>,

    /// Image cocogitto is installed into (needs `cargo`)
    pub toolchain: Option<String>,
}

impl ImagesConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_empty("images.git", self.git.as_deref())?;
        non_empty("images.toolchain", self.toolchain.as_deref())
    }
}

/// Global git identity configured in the clone stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GitIdentityConfig {
    pub user_name: Option<String>,
    pub user_email: Option<String>,
}

impl GitIdentityConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_empty("git.user_name", self.user_name.as_deref())?;
        non_empty("git.user_email", self.user_email.as_deref())
    }
}

/// How the cocogitto binary is installed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Crate passed to `cargo install`
    pub crate_name: Option<String>,

    /// Exact crate version; latest when unset
    pub version: Option<String>,
}

impl ToolConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_empty("tool.crate_name", self.crate_name.as_deref())?;
        non_empty("tool.version", self.version.as_deref())
    }
}

/// Secrets configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SecretsConfig {
    /// Provider to use ("file" or "keychain")
    pub provider: Option<String>,
}

impl SecretsConfig {
    /// Valid secret providers.
    pub const VALID_PROVIDERS: &'static [&'static str] = &["file", "keychain"];

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(provider) = &self.provider {
            if !Self::VALID_PROVIDERS.contains(&provider.as_str()) {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid secrets provider '{}', must be one of: {}",
                    provider,
                    Self::VALID_PROVIDERS.join(", ")
                )));
            }
        }
        Ok(())
    }
}

fn non_empty(key: &str, value: Option<&str>) -> Result<(), ConfigError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(ConfigError::InvalidValue(format!(
            "{} cannot be empty",
            key
        ))),
        _ => Ok(()),
    }
}
