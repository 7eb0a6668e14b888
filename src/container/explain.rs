//! container::explain
//!
//! An engine that renders the build plan instead of running it.

use async_trait::async_trait;

use super::dockerfile::BuildPlan;
use super::engine::{ContainerEngine, EngineError};
use super::model::Container;

/// Returns the rendered Dockerfile and run command as the "output".
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplainEngine;

#[async_trait]
impl ContainerEngine for ExplainEngine {
    fn name(&self) -> &str {
        "explain"
    }

    async fn stdout(&self, container: &Container) -> Result<String, EngineError> {
        Ok(BuildPlan::from_container(container)?.explain())
    }
}
