//! cogpipe - cocogitto workflows against remote repositories
//!
//! cogpipe clones a remote git repository with basic-auth credentials,
//! provisions a throwaway container with cocogitto installed, runs one `cog`
//! subcommand in the checkout and returns what it printed.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to [`cog`])
//! - [`cog`] - The eight cocogitto operations and their command assembly
//! - [`pipeline`] - Clone, provision and run steps over a [`container::Container`]
//! - [`container`] - Immutable container pipelines and the engines that realize them
//! - [`core`] - Configuration and shared domain types
//! - [`secrets`] - Token references, resolution and storage
//! - [`ui`] - User-facing output
//!
//! # Invariants
//!
//! 1. Tokens never appear in argv, logs or error messages
//! 2. Every operation provisions a fresh environment; nothing is shared
//! 3. Local precondition failures happen before any container work

pub mod cli;
pub mod cog;
pub mod container;
pub mod core;
pub mod pipeline;
pub mod secrets;
pub mod ui;
