//! cog::error

use thiserror::Error;

use super::args::Operation;
use crate::container::EngineError;
use crate::secrets::SecretError;

/// Errors from running a cocogitto operation.
#[derive(Debug, Error)]
pub enum CogError {
    /// `commit` was called without a commit type.
    #[error("invalid commit type: a conventional commit type such as 'feat' is required")]
    InvalidCommitType,

    /// `commit` was called without a message.
    #[error("commit message can not be empty")]
    EmptyCommitMessage,

    /// The git token reference could not be resolved.
    #[error("failed to resolve git token")]
    Secret(#[from] SecretError),

    /// Building the environment or running `cog` failed.
    #[error("cog {operation} failed")]
    Engine {
        operation: Operation,
        #[source]
        source: EngineError,
    },
}

impl CogError {
    /// Exit code of the failed container command, when there was one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            CogError::Engine { source, .. } => source.exit_code(),
            _ => None,
        }
    }
}
