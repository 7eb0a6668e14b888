//! cog
//!
//! The cocogitto operations: bump, changelog, check, commit, get-version,
//! install-hooks, log and verify.
//!
//! # Architecture
//!
//! Each operation is the same linear pipeline:
//!
//! ```text
//! options --[args]--> CogCommand
//! token ref --[secrets]--> plaintext --[clone]--> checkout --[provision]--> container
//! container + cog.toml + "sh -c <cog line>" --[engine]--> stdout
//! ```
//!
//! Local preconditions (only `commit` has any) are checked before the token
//! is resolved, so invalid calls never touch the network or the engine.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use cogpipe::cog::{Cocogitto, GetVersionOptions};
//! use cogpipe::container::DockerEngine;
//! use cogpipe::core::types::RemoteRepository;
//! use cogpipe::pipeline::PipelineConfig;
//! use cogpipe::secrets::{FileSecretStore, SecretResolver};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let cog = Cocogitto::new(
//!     Arc::new(DockerEngine::new("docker")),
//!     SecretResolver::new(Box::new(FileSecretStore::new()?)),
//!     PipelineConfig::default(),
//! );
//! let repo = RemoteRepository::new(
//!     "https://github.com/acme/app",
//!     "release-bot",
//!     "env:GIT_TOKEN".parse()?,
//! );
//! let version = cog
//!     .get_version(&repo, &GetVersionOptions { silence: true, ..Default::default() })
//!     .await?;
//! println!("{}", version);
//! # Ok(())
//! # }
//! ```

pub mod args;
mod error;
mod options;

pub use args::{CogCommand, Operation};
pub use error::CogError;
pub use options::{
    BumpOptions, ChangelogOptions, CheckOptions, CommitOptions, GetVersionOptions,
    InstallHooksOptions, LogOptions, VerifyOptions,
};

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::container::{Container, ContainerEngine};
use crate::core::types::RemoteRepository;
use crate::pipeline::{self, PipelineConfig};
use crate::secrets::SecretResolver;

/// File name cocogitto reads its configuration from.
pub const COG_TOML: &str = "cog.toml";

/// One operation with its options, for callers that dispatch dynamically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Bump(BumpOptions),
    Changelog(ChangelogOptions),
    Check(CheckOptions),
    Commit(CommitOptions),
    GetVersion(GetVersionOptions),
    InstallHooks(InstallHooksOptions),
    Log(LogOptions),
    Verify(VerifyOptions),
}

impl Invocation {
    pub fn operation(&self) -> Operation {
        match self {
            Invocation::Bump(_) => Operation::Bump,
            Invocation::Changelog(_) => Operation::Changelog,
            Invocation::Check(_) => Operation::Check,
            Invocation::Commit(_) => Operation::Commit,
            Invocation::GetVersion(_) => Operation::GetVersion,
            Invocation::InstallHooks(_) => Operation::InstallHooks,
            Invocation::Log(_) => Operation::Log,
            Invocation::Verify(_) => Operation::Verify,
        }
    }

    /// Use `path` as the call's `cog.toml`.
    pub fn with_cog_toml(mut self, path: Option<std::path::PathBuf>) -> Self {
        let slot = match &mut self {
            Invocation::Bump(o) => &mut o.cog_toml,
            Invocation::Changelog(o) => &mut o.cog_toml,
            Invocation::Check(o) => &mut o.cog_toml,
            Invocation::Commit(o) => &mut o.cog_toml,
            Invocation::GetVersion(o) => &mut o.cog_toml,
            Invocation::InstallHooks(o) => &mut o.cog_toml,
            Invocation::Log(o) => &mut o.cog_toml,
            Invocation::Verify(o) => &mut o.cog_toml,
        };
        *slot = path;
        self
    }
}

/// Runs cocogitto operations against remote repositories.
///
/// Holds no per-call state; concurrent calls provision independent
/// environments.
pub struct Cocogitto {
    engine: Arc<dyn ContainerEngine>,
    secrets: SecretResolver,
    config: PipelineConfig,
}

impl Cocogitto {
    pub fn new(
        engine: Arc<dyn ContainerEngine>,
        secrets: SecretResolver,
        config: PipelineConfig,
    ) -> Self {
        Self {
            engine,
            secrets,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Clone `repo` and provision the cocogitto container for it.
    pub fn environment(&self, repo: &RemoteRepository) -> Result<Container, CogError> {
        let token = self.secrets.resolve(&repo.token)?;
        let checkout = pipeline::clone_repository(&self.config, &repo.user, &repo.url, &token);
        Ok(pipeline::provision(&self.config, checkout))
    }

    async fn execute(
        &self,
        repo: &RemoteRepository,
        command: CogCommand,
        cog_toml: Option<&Path>,
    ) -> Result<String, CogError> {
        let mut container = self.environment(repo)?;
        if let Some(path) = cog_toml {
            container = container.with_file(COG_TOML, path);
        }

        let line = command.shell_line();
        info!(operation = %command.operation, %line, "running cog");

        pipeline::run(self.engine.as_ref(), container, &line)
            .await
            .map_err(|source| CogError::Engine {
                operation: command.operation,
                source,
            })
    }

    /// Bump the version (`cog bump`).
    #[instrument(skip_all, fields(repository = %repo.url))]
    pub async fn bump(
        &self,
        repo: &RemoteRepository,
        options: &BumpOptions,
    ) -> Result<String, CogError> {
        self.execute(repo, args::bump(options), options.cog_toml.as_deref())
            .await
    }

    /// Generate a changelog (`cog changelog`).
    #[instrument(skip_all, fields(repository = %repo.url))]
    pub async fn changelog(
        &self,
        repo: &RemoteRepository,
        options: &ChangelogOptions,
    ) -> Result<String, CogError> {
        self.execute(repo, args::changelog(options), options.cog_toml.as_deref())
            .await
    }

    /// Check the commit history against the conventional commits grammar.
    #[instrument(skip_all, fields(repository = %repo.url))]
    pub async fn check(
        &self,
        repo: &RemoteRepository,
        options: &CheckOptions,
    ) -> Result<String, CogError> {
        self.execute(repo, args::check(options), options.cog_toml.as_deref())
            .await
    }

    /// Create a conventional commit (`cog commit`).
    ///
    /// # Errors
    ///
    /// [`CogError::InvalidCommitType`] / [`CogError::EmptyCommitMessage`]
    /// before any other work when the type or message is blank.
    #[instrument(skip_all, fields(repository = %repo.url))]
    pub async fn commit(
        &self,
        repo: &RemoteRepository,
        options: &CommitOptions,
    ) -> Result<String, CogError> {
        let command = args::commit(options)?;
        self.execute(repo, command, options.cog_toml.as_deref())
            .await
    }

    /// Print the current version (`cog get-version`).
    #[instrument(skip_all, fields(repository = %repo.url))]
    pub async fn get_version(
        &self,
        repo: &RemoteRepository,
        options: &GetVersionOptions,
    ) -> Result<String, CogError> {
        self.execute(repo, args::get_version(options), options.cog_toml.as_deref())
            .await
    }

    /// Install one or all configured git hooks (`cog install-hook`).
    #[instrument(skip_all, fields(repository = %repo.url))]
    pub async fn install_hooks(
        &self,
        repo: &RemoteRepository,
        options: &InstallHooksOptions,
    ) -> Result<String, CogError> {
        self.execute(repo, args::install_hooks(options), options.cog_toml.as_deref())
            .await
    }

    /// Conventional-commit aware log (`cog log`).
    #[instrument(skip_all, fields(repository = %repo.url))]
    pub async fn log(
        &self,
        repo: &RemoteRepository,
        options: &LogOptions,
    ) -> Result<String, CogError> {
        self.execute(repo, args::log(options), options.cog_toml.as_deref())
            .await
    }

    /// Verify a message against the conventional commits grammar.
    #[instrument(skip_all, fields(repository = %repo.url))]
    pub async fn verify(
        &self,
        repo: &RemoteRepository,
        options: &VerifyOptions,
    ) -> Result<String, CogError> {
        self.execute(repo, args::verify(options), options.cog_toml.as_deref())
            .await
    }

    /// Run whichever operation `invocation` names.
    pub async fn invoke(
        &self,
        repo: &RemoteRepository,
        invocation: &Invocation,
    ) -> Result<String, CogError> {
        match invocation {
            Invocation::Bump(o) => self.bump(repo, o).await,
            Invocation::Changelog(o) => self.changelog(repo, o).await,
            Invocation::Check(o) => self.check(repo, o).await,
            Invocation::Commit(o) => self.commit(repo, o).await,
            Invocation::GetVersion(o) => self.get_version(repo, o).await,
            Invocation::InstallHooks(o) => self.install_hooks(repo, o).await,
            Invocation::Log(o) => self.log(repo, o).await,
            Invocation::Verify(o) => self.verify(repo, o).await,
        }
    }
}

impl fmt::Debug for Cocogitto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cocogitto")
            .field("engine", &self.engine.name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
