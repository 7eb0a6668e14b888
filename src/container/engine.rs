//! container::engine
//!
//! The boundary to whatever realizes a [`Container`] pipeline.
//!
//! The trait is async because realization spawns long-running engine
//! processes (image pulls, package installs, clones).

use async_trait::async_trait;
use thiserror::Error;

use super::model::Container;

/// Errors from realizing a pipeline.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The pipeline does not end in a command whose output could be read.
    #[error("container pipeline has no command to run")]
    NoCommand,

    /// The engine binary could not be started.
    #[error("failed to start '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Building the image layers failed.
    #[error("image build failed ({}): {stderr}", describe_exit(.code))]
    Build { code: Option<i32>, stderr: String },

    /// The final command exited unsuccessfully.
    #[error("command failed ({}): {stderr}", describe_exit(.code))]
    Exec { code: Option<i32>, stderr: String },

    /// A host file or the temporary build context could not be prepared.
    #[error("failed to prepare build context: {0}")]
    Context(String),
}

impl EngineError {
    /// Exit code of the failed build or command, when there was one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            EngineError::Build { code, .. } | EngineError::Exec { code, .. } => *code,
            _ => None,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Realizes container pipelines.
#[async_trait]
pub trait ContainerEngine: Send + Sync {
    /// Short engine name for logs.
    fn name(&self) -> &str;

    /// Build everything up to the final exec, run it, and return its stdout.
    async fn stdout(&self, container: &Container) -> Result<String, EngineError>;
}
