//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Use this config file
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Results only
//! - `--json`: Wrap results in a JSON envelope
//! - `--explain`: Print the build plan instead of running it
//! - `--engine <docker|podman>`: Override the configured engine

use std::path::PathBuf;

use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand};

use crate::cog::{
    BumpOptions, ChangelogOptions, CheckOptions, CommitOptions, GetVersionOptions,
    InstallHooksOptions, Invocation, LogOptions, VerifyOptions,
};
use crate::container::SUPPORTED_PROGRAMS;
use crate::secrets::{SecretError, SecretRef};

/// cogpipe - run cocogitto against remote repositories in throwaway containers
#[derive(Parser, Debug)]
#[command(name = "cogpipe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to use instead of the standard locations
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Print results only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Print the Dockerfile and run command instead of running them
    #[arg(long, global = true)]
    pub explain: bool,

    /// Container engine CLI (overrides the config file)
    #[arg(
        long,
        global = true,
        value_parser = PossibleValuesParser::new(SUPPORTED_PROGRAMS.iter().copied())
    )]
    pub engine: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Where to clone from and how to authenticate.
#[derive(Args, Debug, Clone)]
pub struct RepositoryArgs {
    /// HTTPS URL of the repository (the https:// prefix is optional)
    #[arg(long, env = "COGPIPE_REPOSITORY_URL", value_name = "URL")]
    pub repository_url: String,

    /// Account name for the clone credentials
    #[arg(long, env = "COGPIPE_USER")]
    pub user: String,

    /// Token reference: env:NAME, file:PATH or store:KEY
    ///
    /// Parsed after clap so a pasted token is never echoed in a usage error.
    #[arg(
        long,
        env = "COGPIPE_GIT_TOKEN",
        value_name = "REF",
        default_value = "env:GIT_TOKEN",
        hide_env_values = true
    )]
    pub git_token: String,

    /// cog.toml to use instead of the repository's own
    #[arg(long, value_name = "PATH")]
    pub cog_toml: Option<PathBuf>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(flatten)]
    Operation(OperationCommand),

    /// Manage stored git tokens
    #[command(
        name = "secret",
        long_about = "Manage tokens in the configured secret store.\n\n\
            Stored tokens are referenced from operations with --git-token store:KEY.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Store a token (prompted, not echoed)
    cogpipe secret set github

    # Store a token from a CI variable
    printf '%s' \"$TOKEN\" | cogpipe secret set github --stdin

    # Use it
    cogpipe check --repository-url github.com/acme/app --user bot --git-token store:github"
    )]
    Secret {
        #[command(subcommand)]
        action: SecretAction,
    },

    /// Inspect or create the configuration file
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash
    cogpipe completion bash > ~/.local/share/bash-completion/completions/cogpipe

    # Zsh
    cogpipe completion zsh > \"${fpath[1]}/_cogpipe\"

    # Fish
    cogpipe completion fish > ~/.config/fish/completions/cogpipe.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// The cocogitto operations.
#[derive(Subcommand, Debug)]
pub enum OperationCommand {
    /// Bump the version and tag it
    #[command(
        name = "bump",
        long_about = "Bump the repository version with `cog bump`.\n\n\
            Pick the increment with --auto, --major, --minor or --patch, or set \
            an exact version with --version (which overrides the increment flags).",
        after_help = "\
WORKFLOW EXAMPLES:
    # Let cocogitto derive the next version from the commit history
    cogpipe bump --repository-url github.com/acme/app --user bot --auto

    # Preview a minor bump without committing
    cogpipe bump --repository-url github.com/acme/app --user bot --minor --dry-run

    # Release candidate with an explicit version
    cogpipe bump --repository-url github.com/acme/app --user bot --version 2.0.0 --pre rc.1"
    )]
    Bump {
        #[command(flatten)]
        repo: RepositoryArgs,
        #[command(flatten)]
        args: BumpArgs,
    },

    /// Generate a changelog
    #[command(
        name = "changelog",
        after_help = "\
WORKFLOW EXAMPLES:
    # Changelog for the whole history
    cogpipe changelog --repository-url github.com/acme/app --user bot

    # Changelog for one tag, with links to the forge
    cogpipe changelog --repository-url github.com/acme/app --user bot \\
        --at 1.2.0 --template remote --remote github.com --owner acme --repository app

    # Changelog between two tags
    cogpipe changelog --repository-url github.com/acme/app --user bot 1.0.0..2.0.0"
    )]
    Changelog {
        #[command(flatten)]
        repo: RepositoryArgs,
        #[command(flatten)]
        args: ChangelogArgs,
    },

    /// Check the commit history against the conventional commits grammar
    #[command(name = "check")]
    Check {
        #[command(flatten)]
        repo: RepositoryArgs,
    },

    /// Create a conventional commit
    #[command(
        name = "commit",
        long_about = "Create a conventional commit with `cog commit`.\n\n\
            TYPE and MESSAGE are required and checked before anything is cloned.",
        after_help = "\
WORKFLOW EXAMPLES:
    cogpipe commit --repository-url github.com/acme/app --user bot feat \"add login\" auth
    cogpipe commit --repository-url github.com/acme/app --user bot fix \"drop v1 api\" -B"
    )]
    Commit {
        #[command(flatten)]
        repo: RepositoryArgs,
        #[command(flatten)]
        args: CommitArgs,
    },

    /// Print the current version
    #[command(
        name = "get-version",
        after_help = "\
WORKFLOW EXAMPLES:
    # Version only, for scripts
    VERSION=$(cogpipe -q get-version --repository-url github.com/acme/app --user bot -v)

    # Monorepo package with a fallback for untagged repositories
    cogpipe get-version --repository-url github.com/acme/app --user bot \\
        -v --package core --fallback 0.1.0"
    )]
    GetVersion {
        #[command(flatten)]
        repo: RepositoryArgs,
        #[command(flatten)]
        args: GetVersionArgs,
    },

    /// Install one or all configured git hooks
    #[command(name = "install-hooks", alias = "install-hook")]
    InstallHooks {
        #[command(flatten)]
        repo: RepositoryArgs,
        #[command(flatten)]
        args: InstallHooksArgs,
    },

    /// Show a conventional-commit aware log
    #[command(name = "log")]
    Log {
        #[command(flatten)]
        repo: RepositoryArgs,
        #[command(flatten)]
        args: LogArgs,
    },

    /// Verify a message against the conventional commits grammar
    #[command(name = "verify")]
    Verify {
        #[command(flatten)]
        repo: RepositoryArgs,
        #[command(flatten)]
        args: VerifyArgs,
    },

}

#[derive(Args, Debug, Clone, Default)]
pub struct BumpArgs {
    /// Derive the increment from the commit history
    #[arg(long)]
    pub auto: bool,

    #[arg(long)]
    pub major: bool,

    #[arg(long)]
    pub minor: bool,

    #[arg(long)]
    pub patch: bool,

    /// Exact version to release; overrides the increment flags
    #[arg(long = "version", id = "target_version", value_name = "VERSION")]
    pub target_version: Option<String>,

    /// Show the next version without committing or tagging
    #[arg(long)]
    pub dry_run: bool,

    /// Pre-release metadata
    #[arg(long)]
    pub pre: Option<String>,

    /// Build metadata
    #[arg(long)]
    pub build: Option<String>,

    /// Add [skip ci] to the bump commit
    #[arg(long)]
    pub skip_ci: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ChangelogArgs {
    /// Only the changes of this tag
    #[arg(long)]
    pub at: Option<String>,

    /// default, full_hash, remote, or a template path
    #[arg(short, long)]
    pub template: Option<String>,

    /// Forge domain (remote template only)
    #[arg(long)]
    pub remote: Option<String>,

    /// Repository owner (remote template only)
    #[arg(long)]
    pub owner: Option<String>,

    /// Repository name (remote template only)
    #[arg(long)]
    pub repository: Option<String>,

    /// Revision range, e.g. 1.0.0..2.0.0
    pub pattern: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CommitArgs {
    /// Conventional commit type (feat, fix, ...)
    #[arg(value_name = "TYPE")]
    pub commit_type: String,

    /// Commit subject
    pub message: String,

    pub scope: Option<String>,

    /// Mark the commit as a breaking change
    #[arg(short = 'B', long)]
    pub breaking_change: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GetVersionArgs {
    /// Version to print when no tag exists
    #[arg(long)]
    pub fallback: Option<String>,

    /// Monorepo package
    #[arg(long)]
    pub package: Option<String>,

    /// Print the version only
    #[arg(short = 'v', long)]
    pub silence: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct InstallHooksArgs {
    /// Hook to install; all configured hooks when omitted
    pub hook: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct LogArgs {
    /// Only commits by these authors
    #[arg(long = "author", num_args = 1..)]
    pub authors: Vec<String>,

    /// Only commits of this type
    #[arg(long = "type", value_name = "TYPE")]
    pub commit_type: Option<String>,

    /// Only commits with this scope
    #[arg(long)]
    pub scope: Option<String>,

    /// Skip commits that are not conventional
    #[arg(long)]
    pub no_error: bool,

    /// Only breaking changes
    #[arg(short = 'B', long)]
    pub breaking_change: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct VerifyArgs {
    /// Message to check
    pub message: String,
}

/// Secret store actions.
#[derive(Subcommand, Debug)]
pub enum SecretAction {
    /// Store a secret (prompted unless --stdin)
    Set {
        key: String,

        /// Read the value from stdin instead of prompting
        #[arg(long)]
        stdin: bool,
    },
    /// Remove a secret
    Delete { key: String },
    /// Report whether a secret is stored
    Status { key: String },
}

/// Configuration actions.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the path of the config file in use
    Path,
    /// Write a config file with every default spelled out
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

impl RepositoryArgs {
    /// The token reference, validated.
    pub fn token_ref(&self) -> Result<SecretRef, SecretError> {
        self.git_token.parse()
    }
}

impl OperationCommand {
    /// Split into the repository to clone and the invocation to run there.
    pub fn into_parts(self) -> (RepositoryArgs, Invocation) {
        let (repo, invocation) = match self {
            OperationCommand::Bump { repo, args } => (repo, Invocation::Bump(args.into())),
            OperationCommand::Changelog { repo, args } => {
                (repo, Invocation::Changelog(args.into()))
            }
            OperationCommand::Check { repo } => {
                (repo, Invocation::Check(CheckOptions::default()))
            }
            OperationCommand::Commit { repo, args } => (repo, Invocation::Commit(args.into())),
            OperationCommand::GetVersion { repo, args } => {
                (repo, Invocation::GetVersion(args.into()))
            }
            OperationCommand::InstallHooks { repo, args } => {
                (repo, Invocation::InstallHooks(args.into()))
            }
            OperationCommand::Log { repo, args } => (repo, Invocation::Log(args.into())),
            OperationCommand::Verify { repo, args } => (repo, Invocation::Verify(args.into())),
        };
        let cog_toml = repo.cog_toml.clone();
        (repo, invocation.with_cog_toml(cog_toml))
    }
}

impl From<BumpArgs> for BumpOptions {
    fn from(args: BumpArgs) -> Self {
        BumpOptions {
            auto: args.auto,
            major: args.major,
            minor: args.minor,
            patch: args.patch,
            version: args.target_version,
            dry_run: args.dry_run,
            pre: args.pre,
            build: args.build,
            skip_ci: args.skip_ci,
            cog_toml: None,
        }
    }
}

impl From<ChangelogArgs> for ChangelogOptions {
    fn from(args: ChangelogArgs) -> Self {
        ChangelogOptions {
            at: args.at,
            template: args.template,
            remote: args.remote,
            owner: args.owner,
            repository: args.repository,
            pattern: args.pattern,
            cog_toml: None,
        }
    }
}

impl From<CommitArgs> for CommitOptions {
    fn from(args: CommitArgs) -> Self {
        CommitOptions {
            commit_type: args.commit_type,
            message: args.message,
            scope: args.scope,
            breaking_change: args.breaking_change,
            cog_toml: None,
        }
    }
}

impl From<GetVersionArgs> for GetVersionOptions {
    fn from(args: GetVersionArgs) -> Self {
        GetVersionOptions {
            fallback: args.fallback,
            package: args.package,
            silence: args.silence,
            cog_toml: None,
        }
    }
}

impl From<InstallHooksArgs> for InstallHooksOptions {
    fn from(args: InstallHooksArgs) -> Self {
        InstallHooksOptions {
            hook: args.hook,
            cog_toml: None,
        }
    }
}

impl From<LogArgs> for LogOptions {
    fn from(args: LogArgs) -> Self {
        LogOptions {
            authors: args.authors,
            commit_type: args.commit_type,
            scope: args.scope,
            no_error: args.no_error,
            breaking_only: args.breaking_change,
            cog_toml: None,
        }
    }
}

impl From<VerifyArgs> for VerifyOptions {
    fn from(args: VerifyArgs) -> Self {
        VerifyOptions {
            message: args.message,
            cog_toml: None,
        }
    }
}
