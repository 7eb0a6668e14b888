//! core
//!
//! Configuration and shared domain types.
//!
//! # Modules
//!
//! - [`config`] - Configuration schema and loading
//! - [`types`] - Domain types such as [`types::RemoteRepository`]

pub mod config;
pub mod types;
