//! container
//!
//! Container build pipelines and the engines that realize them.
//!
//! # Architecture
//!
//! - [`model`]: the immutable [`Container`] / [`Directory`] pipeline value
//! - [`engine`]: the [`ContainerEngine`] boundary and [`EngineError`]
//! - [`dockerfile`]: lowering a pipeline to a Dockerfile [`BuildPlan`]
//! - [`DockerEngine`]: runs plans with the docker or podman CLI
//! - [`ExplainEngine`]: prints plans without running them
//! - [`mock`]: recording engine for tests

pub mod dockerfile;
pub mod engine;
pub mod mock;
pub mod model;

mod docker;
mod explain;

pub use docker::DockerEngine;
pub use dockerfile::BuildPlan;
pub use engine::{ContainerEngine, EngineError};
pub use explain::ExplainEngine;
pub use model::{Container, Directory, Exec, Layer, SecretEnv};

/// Engine programs the CLI knows how to drive.
pub const SUPPORTED_PROGRAMS: &[&str] = &["docker", "podman"];
