//! container::mock
//!
//! Recording engine for deterministic tests.
//!
//! # Example
//!
//! ```
//! use cogpipe::container::mock::RecordingEngine;
//! use cogpipe::container::{Container, ContainerEngine};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let engine = RecordingEngine::with_output("1.2.3\n");
//! let container = Container::from("rust:latest").with_exec(["cog", "get-version"]);
//!
//! assert_eq!(engine.stdout(&container).await.unwrap(), "1.2.3\n");
//! assert_eq!(engine.containers().len(), 1);
//! # });
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::engine::{ContainerEngine, EngineError};
use super::model::Container;

/// Canned response for every call.
#[derive(Debug, Clone)]
enum Response {
    Output(String),
    Fail { code: Option<i32>, stderr: String },
}

/// Engine that records every pipeline it is asked to realize.
///
/// Clones share state, so a test can keep a handle while the code under test
/// owns another.
#[derive(Debug, Clone)]
pub struct RecordingEngine {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug)]
struct Inner {
    response: Response,
    containers: Vec<Container>,
}

impl RecordingEngine {
    /// Engine that answers every call with empty output.
    pub fn new() -> Self {
        Self::with_output("")
    }

    pub fn with_output(output: impl Into<String>) -> Self {
        Self::with_response(Response::Output(output.into()))
    }

    /// Engine whose final command always fails.
    pub fn failing(code: Option<i32>, stderr: impl Into<String>) -> Self {
        Self::with_response(Response::Fail {
            code,
            stderr: stderr.into(),
        })
    }

    fn with_response(response: Response) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                response,
                containers: Vec::new(),
            })),
        }
    }

    /// Pipelines realized so far, in call order.
    pub fn containers(&self) -> Vec<Container> {
        self.inner.lock().unwrap().containers.clone()
    }

    /// The shell line of the most recent call's final `sh -c` exec.
    pub fn last_shell_line(&self) -> Option<String> {
        let inner = self.inner.lock().unwrap();
        let container = inner.containers.last()?;
        let (_, exec) = container.split_last_exec()?;
        match exec.args.as_slice() {
            [sh, flag, line] if sh == "sh" && flag == "-c" => Some(line.clone()),
            _ => None,
        }
    }
}

impl Default for RecordingEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContainerEngine for RecordingEngine {
    fn name(&self) -> &str {
        "recording"
    }

    async fn stdout(&self, container: &Container) -> Result<String, EngineError> {
        let mut inner = self.inner.lock().unwrap();
        inner.containers.push(container.clone());

        if container.split_last_exec().is_none() {
            return Err(EngineError::NoCommand);
        }
        match &inner.response {
            Response::Output(output) => Ok(output.clone()),
            Response::Fail { code, stderr } => Err(EngineError::Exec {
                code: *code,
                stderr: stderr.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_calls_and_fails_on_demand() {
        let engine = RecordingEngine::failing(Some(2), "boom");
        let container = Container::from("x").with_exec(["sh", "-c", "cog check"]);

        let err = engine.stdout(&container).await.unwrap_err();
        assert_eq!(err.exit_code(), Some(2));
        assert_eq!(engine.containers().len(), 1);
        assert_eq!(engine.last_shell_line().as_deref(), Some("cog check"));
    }

    #[tokio::test]
    async fn clones_share_recordings() {
        let engine = RecordingEngine::new();
        let handle = engine.clone();

        engine
            .stdout(&Container::from("x").with_exec(["true"]))
            .await
            .unwrap();

        assert_eq!(handle.containers().len(), 1);
        assert_eq!(handle.last_shell_line(), None);
    }
}
