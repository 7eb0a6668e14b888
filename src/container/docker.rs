//! container::docker
//!
//! Realizes pipelines with the `docker` (or `podman`) CLI via
//! [`tokio::process::Command`].
//!
//! Each call renders a [`BuildPlan`], stages a throwaway build context,
//! builds an image under a unique tag, runs the final command with `--rm`,
//! and removes the image again. Secret values reach the engine only through
//! the child process environment (`--secret id=N,env=N`, `--env N`).
//!
//! Killing the engine client does not stop the daemon's work, so a call that
//! is dropped mid-flight (Ctrl-C, a caller's timeout) leaves a
//! [`Leftovers`] guard behind that force-removes the run container and the
//! image from a detached process.

use std::path::Path;
use std::process::{Output, Stdio};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::dockerfile::BuildPlan;
use super::engine::{ContainerEngine, EngineError};
use super::model::{Container, SecretEnv};

/// Engine backed by a docker-compatible CLI.
#[derive(Debug, Clone)]
pub struct DockerEngine {
    program: String,
    keep_images: bool,
    reuse_layers: bool,
}

impl DockerEngine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            keep_images: false,
            reuse_layers: false,
        }
    }

    /// Leave built images behind for inspection.
    pub fn keep_images(mut self, keep: bool) -> Self {
        self.keep_images = keep;
        self
    }

    /// Allow the engine's layer cache. Off by default so every call re-clones.
    pub fn reuse_layers(mut self, reuse: bool) -> Self {
        self.reuse_layers = reuse;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.env("DOCKER_BUILDKIT", "1");
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);
        cmd
    }

    async fn output(&self, mut cmd: Command) -> Result<Output, EngineError> {
        cmd.output().await.map_err(|source| EngineError::Spawn {
            program: self.program.clone(),
            source,
        })
    }

    async fn stage_context(&self, plan: &BuildPlan, dir: &Path) -> Result<(), EngineError> {
        tokio::fs::write(dir.join("Dockerfile"), &plan.dockerfile)
            .await
            .map_err(|e| EngineError::Context(format!("cannot write Dockerfile: {}", e)))?;

        for file in &plan.context_files {
            tokio::fs::copy(&file.source, dir.join(&file.name))
                .await
                .map_err(|e| {
                    EngineError::Context(format!("cannot stage {}: {}", file.source.display(), e))
                })?;
        }
        Ok(())
    }

    #[instrument(skip(self, plan, context), fields(engine = %self.program))]
    async fn build(&self, plan: &BuildPlan, context: &Path, tag: &str) -> Result<(), EngineError> {
        let mut cmd = self.command();
        cmd.arg("build").arg("--quiet");
        if !self.reuse_layers {
            cmd.arg("--no-cache");
        }
        cmd.arg("--tag")
            .arg(tag)
            .arg("--file")
            .arg(context.join("Dockerfile"));
        attach_secrets(&mut cmd, &plan.build_secrets, SecretFlag::Build);
        cmd.arg(context);

        debug!("building image");
        let output = self.output(cmd).await?;
        if !output.status.success() {
            return Err(EngineError::Build {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        debug!("image built");
        Ok(())
    }

    #[instrument(skip(self, plan), fields(engine = %self.program))]
    async fn run(&self, plan: &BuildPlan, tag: &str, name: &str) -> Result<String, EngineError> {
        let mut cmd = self.command();
        cmd.arg("run").arg("--rm").arg("--name").arg(name);
        attach_secrets(&mut cmd, &plan.command_secrets, SecretFlag::Run);
        cmd.arg(tag).args(&plan.command);

        debug!("running command");
        let output = self.output(cmd).await?;
        if !output.status.success() {
            return Err(EngineError::Exec {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn remove_image(&self, tag: &str) {
        let mut cmd = self.command();
        cmd.arg("image").arg("rm").arg(tag);
        match self.output(cmd).await {
            Ok(output) if output.status.success() => debug!(%tag, "image removed"),
            Ok(output) => warn!(
                %tag,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "failed to remove image"
            ),
            Err(e) => warn!(%tag, error = %e, "failed to remove image"),
        }
    }
}

/// Engine objects a dropped call would otherwise leave behind.
///
/// Armed from the build until the call finishes normally.
struct Leftovers {
    program: String,
    container: String,
    image: Option<String>,
    armed: bool,
}

impl Leftovers {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for Leftovers {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        warn!(container = %self.container, "call dropped, scheduling engine cleanup");

        // Container first: the image cannot be removed while it is running.
        let mut script = String::from(r#""$1" rm --force "$2" >/dev/null 2>&1"#);
        if self.image.is_some() {
            script.push_str(r#"; "$1" image rm --force "$3" >/dev/null 2>&1"#);
        }
        let spawned = std::process::Command::new("sh")
            .arg("-c")
            .arg(script)
            .arg("cogpipe-cleanup")
            .arg(&self.program)
            .arg(&self.container)
            .args(self.image.as_deref())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        if let Err(e) = spawned {
            warn!(error = %e, "failed to schedule engine cleanup");
        }
    }
}

#[derive(Clone, Copy)]
enum SecretFlag {
    Build,
    Run,
}

fn attach_secrets(cmd: &mut Command, secrets: &[SecretEnv], flag: SecretFlag) {
    for secret in secrets {
        match flag {
            SecretFlag::Build => cmd
                .arg("--secret")
                .arg(format!("id={0},env={0}", secret.name)),
            SecretFlag::Run => cmd.arg("--env").arg(&secret.name),
        };
        cmd.env(&secret.name, secret.value.expose());
    }
}

#[async_trait]
impl ContainerEngine for DockerEngine {
    fn name(&self) -> &str {
        &self.program
    }

    async fn stdout(&self, container: &Container) -> Result<String, EngineError> {
        let plan = BuildPlan::from_container(container)?;

        let context = tempfile::Builder::new()
            .prefix("cogpipe-")
            .tempdir()
            .map_err(|e| EngineError::Context(format!("cannot create build context: {}", e)))?;
        self.stage_context(&plan, context.path()).await?;

        let id = Uuid::new_v4().simple();
        let tag = format!("cogpipe-build:{}", id);
        let name = format!("cogpipe-run-{}", id);
        let leftovers = Leftovers {
            program: self.program.clone(),
            container: name.clone(),
            image: (!self.keep_images).then(|| tag.clone()),
            armed: true,
        };

        if let Err(e) = self.build(&plan, context.path(), &tag).await {
            leftovers.disarm();
            return Err(e);
        }

        let result = self.run(&plan, &tag, &name).await;
        if !self.keep_images {
            self.remove_image(&tag).await;
        }
        leftovers.disarm();
        result
    }
}
