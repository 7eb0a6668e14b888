//! core::config
//!
//! Configuration loading and defaults.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. The config file
//! 3. CLI flags (not handled here)
//!
//! # Config Locations
//!
//! The first existing file wins:
//! 1. `--config <path>` (must exist)
//! 2. `$COGPIPE_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/cogpipe/config.toml`
//! 4. `~/.cogpipe/config.toml` (canonical write location)
//!
//! # Example
//!
//! ```no_run
//! use cogpipe::core::config::Config;
//!
//! let config = Config::load(None).unwrap();
//! println!("engine: {}", config.engine_program());
//! let pipeline = config.pipeline();
//! println!("tool image: {}", pipeline.toolchain_image);
//! ```

pub mod schema;

pub use schema::FileConfig;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::pipeline::PipelineConfig;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Loaded configuration plus where it came from.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub file: FileConfig,
    loaded_from: Option<PathBuf>,
}

impl Config {
    /// Load configuration from `explicit` or the standard locations.
    ///
    /// # Errors
    ///
    /// An explicit path that does not exist is an error; a missing file at
    /// the standard locations is not (defaults are used). Files that exist
    /// but fail to parse or validate are errors.
    pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
        let path = match explicit {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => Self::discover(),
        };

        let Some(path) = path else {
            debug!("no config file found, using defaults");
            return Ok(Config::default());
        };

        let file = Self::read_file(&path)?;
        file.validate()?;
        debug!(path = %path.display(), "loaded config");

        Ok(Config {
            file,
            loaded_from: Some(path),
        })
    }

    /// First existing file among the standard locations.
    fn discover() -> Option<PathBuf> {
        let mut candidates = Vec::new();
        if let Ok(path) = std::env::var("COGPIPE_CONFIG") {
            candidates.push(PathBuf::from(path));
        }
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            candidates.push(PathBuf::from(xdg_home).join("cogpipe/config.toml"));
        }
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".cogpipe/config.toml"));
        }
        candidates.into_iter().find(|path| path.exists())
    }

    fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Canonical write location: `~/.cogpipe/config.toml`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".cogpipe/config.toml"))
    }

    /// Write a config file atomically (temp file + rename).
    pub fn write(path: &Path, config: &FileConfig) -> Result<(), ConfigError> {
        config.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        let temp_path = path.with_extension("toml.tmp");
        let write_err = |source| ConfigError::WriteError {
            path: temp_path.clone(),
            source,
        };
        let mut file = fs::File::create(&temp_path).map_err(write_err)?;
        file.write_all(contents.as_bytes()).map_err(write_err)?;
        file.sync_all().map_err(write_err)?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Path the configuration was loaded from, if any.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }

    // =========================================================================
    // Accessors with defaults
    // =========================================================================

    /// Engine CLI. Defaults to "docker".
    pub fn engine_program(&self) -> &str {
        self.file
            .engine
            .as_ref()
            .and_then(|e| e.program.as_deref())
            .unwrap_or("docker")
    }

    pub fn keep_images(&self) -> bool {
        self.file
            .engine
            .as_ref()
            .and_then(|e| e.keep_images)
            .unwrap_or(false)
    }

    pub fn reuse_layers(&self) -> bool {
        self.file
            .engine
            .as_ref()
            .and_then(|e| e.reuse_layers)
            .unwrap_or(false)
    }

    /// Secret store provider. Defaults to "file".
    pub fn secrets_provider(&self) -> &str {
        self.file
            .secrets
            .as_ref()
            .and_then(|s| s.provider.as_deref())
            .unwrap_or(crate::secrets::DEFAULT_PROVIDER)
    }

    /// The immutable pipeline settings, defaults filled in.
    pub fn pipeline(&self) -> PipelineConfig {
        let mut pipeline = PipelineConfig::default();

        if let Some(images) = &self.file.images {
            if let Some(git) = &images.git {
                pipeline.git_image = git.clone();
            }
            if let Some(toolchain) = &images.toolchain {
                pipeline.toolchain_image = toolchain.clone();
            }
        }
        if let Some(identity) = &self.file.git {
            if let Some(name) = &identity.user_name {
                pipeline.git_user_name = name.clone();
            }
            if let Some(email) = &identity.user_email {
                pipeline.git_user_email = email.clone();
            }
        }
        if let Some(tool) = &self.file.tool {
            if let Some(crate_name) = &tool.crate_name {
                pipeline.tool_crate = crate_name.clone();
            }
            pipeline.tool_version = tool.version.clone();
        }

        pipeline
    }

    /// The effective configuration with every default written out.
    pub fn effective(&self) -> FileConfig {
        let pipeline = self.pipeline();
        FileConfig {
            engine: Some(schema::EngineConfig {
                program: Some(self.engine_program().to_string()),
                keep_images: Some(self.keep_images()),
                reuse_layers: Some(self.reuse_layers()),
            }),
            images: Some(schema::ImagesConfig {
                git: Some(pipeline.git_image),
                toolchain: Some(pipeline.toolchain_image),
            }),
            git: Some(schema::GitIdentityConfig {
                user_name: Some(pipeline.git_user_name),
                user_email: Some(pipeline.git_user_email),
            }),
            tool: Some(schema::ToolConfig {
                crate_name: Some(pipeline.tool_crate),
                version: pipeline.tool_version,
            }),
            secrets: Some(schema::SecretsConfig {
                provider: Some(self.secrets_provider().to_string()),
            }),
        }
    }
}
