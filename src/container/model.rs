//! container::model
//!
//! The container build pipeline as a plain value.
//!
//! A [`Container`] is a base image plus an ordered list of [`Layer`]s. Every
//! builder method consumes the value and returns the extended one. The type
//! is `#[must_use]`, so discarding a builder's result is a compile-time
//! warning rather than a silently dropped layer. Nothing runs until a
//! [`ContainerEngine`](super::ContainerEngine) is asked for output.

use std::path::{Path, PathBuf};

use crate::secrets::Plaintext;

/// An environment variable whose value is a secret.
///
/// Engines must deliver it without writing it into image metadata, the
/// rendered build file, or process arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretEnv {
    pub name: String,
    pub value: Plaintext,
}

impl SecretEnv {
    pub fn new(name: impl Into<String>, value: Plaintext) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A command run inside the container (exec form, no implicit shell).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exec {
    pub args: Vec<String>,
    pub secret_env: Vec<SecretEnv>,
}

/// One step of the build pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layer {
    Exec(Exec),
    Workdir(String),
    /// Copy a directory produced by another pipeline to `path`.
    Directory { path: String, source: Directory },
    /// Copy a host file to `path` (relative paths land in the workdir).
    File { path: String, source: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "builder methods return the extended pipeline"]
pub struct Container {
    image: String,
    layers: Vec<Layer>,
}

impl Container {
    /// Start a pipeline from a base image reference.
    pub fn from(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            layers: Vec::new(),
        }
    }

    pub fn with_exec<I, S>(self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_secret_exec(args, Vec::new())
    }

    /// Run a command with secret environment variables visible only to it.
    pub fn with_secret_exec<I, S>(mut self, args: I, secret_env: Vec<SecretEnv>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.layers.push(Layer::Exec(Exec {
            args: args.into_iter().map(Into::into).collect(),
            secret_env,
        }));
        self
    }

    pub fn with_workdir(mut self, path: impl Into<String>) -> Self {
        self.layers.push(Layer::Workdir(path.into()));
        self
    }

    pub fn with_directory(mut self, path: impl Into<String>, source: Directory) -> Self {
        self.layers.push(Layer::Directory {
            path: path.into(),
            source,
        });
        self
    }

    pub fn with_file(mut self, path: impl Into<String>, source: impl AsRef<Path>) -> Self {
        self.layers.push(Layer::File {
            path: path.into(),
            source: source.as_ref().to_path_buf(),
        });
        self
    }

    /// Reference a directory of this pipeline's final filesystem.
    pub fn directory(&self, path: impl Into<String>) -> Directory {
        Directory {
            container: Box::new(self.clone()),
            path: path.into(),
        }
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// The most recently set working directory, if any.
    pub fn workdir(&self) -> Option<&str> {
        self.layers.iter().rev().find_map(|layer| match layer {
            Layer::Workdir(path) => Some(path.as_str()),
            _ => None,
        })
    }

    /// Split off the trailing exec whose output is requested.
    ///
    /// Returns `None` when the pipeline does not end in an exec.
    pub fn split_last_exec(&self) -> Option<(Container, &Exec)> {
        match self.layers.last() {
            Some(Layer::Exec(exec)) => Some((
                Container {
                    image: self.image.clone(),
                    layers: self.layers[..self.layers.len() - 1].to_vec(),
                },
                exec,
            )),
            _ => None,
        }
    }
}

/// A directory inside the filesystem produced by a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    container: Box<Container>,
    path: String,
}

impl Directory {
    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}
