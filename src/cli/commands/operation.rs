//! operation command - run one cog operation against a remote repository

use std::sync::Arc;

use anyhow::{Context as _, Result};
use tracing::debug;

use crate::cli::args::RepositoryArgs;
use crate::cli::{Context, Interrupted};
use crate::cog::{Cocogitto, Invocation};
use crate::container::{ContainerEngine, DockerEngine, ExplainEngine};
use crate::core::config::Config;
use crate::core::types::RemoteRepository;
use crate::secrets::{self, SecretResolver};
use crate::ui::output;

/// Pick the engine: `--explain` renders plans, otherwise the configured CLI.
///
/// `--engine` overrides `engine.program` from the config file.
pub fn build_engine(ctx: &Context, config: &Config) -> Arc<dyn ContainerEngine> {
    if config.keep_images() {
        output::warn(
            "engine.keep_images is set; built images keep the clone credentials in .git/config",
            ctx.verbosity(),
        );
    }
    if ctx.explain {
        return Arc::new(ExplainEngine);
    }
    let program = ctx
        .engine
        .as_deref()
        .unwrap_or_else(|| config.engine_program());
    let engine = DockerEngine::new(program)
        .keep_images(config.keep_images())
        .reuse_layers(config.reuse_layers());
    debug!(program = engine.program(), "using container engine");
    Arc::new(engine)
}

/// Run a cog operation and print its output.
pub fn operation(ctx: &Context, repo: RepositoryArgs, invocation: Invocation) -> Result<()> {
    let token = repo.token_ref()?;
    let config =
        Config::load(ctx.config_path.as_deref()).context("Failed to load configuration")?;
    let engine = build_engine(ctx, &config);
    let store = secrets::create_store(config.secrets_provider())
        .context("Failed to initialize secret store")?;
    let cog = Cocogitto::new(engine, SecretResolver::new(store), config.pipeline());
    debug!(?cog, "configured");

    let repository = RemoteRepository::new(repo.repository_url, repo.user, token);
    let op = invocation.operation();
    output::status(
        format!("Running cog {} against {}", op, repository.url),
        ctx.verbosity(),
    );

    let rt = tokio::runtime::Runtime::new()?;
    let stdout = rt.block_on(async {
        tokio::select! {
            result = cog.invoke(&repository, &invocation) => result.map_err(|err| {
                if let Some(code) = err.exit_code() {
                    debug!(operation = %op, code, "container command exited unsuccessfully");
                }
                anyhow::Error::from(err)
            }),
            Ok(()) = tokio::signal::ctrl_c() => Err(Interrupted.into()),
        }
    })?;

    output::result(ctx.format(), op.as_str(), &repository.url, &stdout);
    Ok(())
}
