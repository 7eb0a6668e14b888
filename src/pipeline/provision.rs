//! pipeline::provision
//!
//! Layer a checkout into the toolchain image and install cocogitto.

use crate::container::{Container, Directory};

use super::clone::REPOSITORY_DIR;
use super::PipelineConfig;

/// Toolchain image → checkout at [`REPOSITORY_DIR`] → workdir → `cargo install --locked`.
pub fn provision(config: &PipelineConfig, repository: Directory) -> Container {
    let mut install = vec![
        "cargo".to_string(),
        "install".to_string(),
        "--locked".to_string(),
        config.tool_crate.clone(),
    ];
    if let Some(version) = &config.tool_version {
        install.push("--version".to_string());
        install.push(version.clone());
    }

    Container::from(config.toolchain_image.as_str())
        .with_directory(REPOSITORY_DIR, repository)
        .with_workdir(REPOSITORY_DIR)
        .with_exec(install)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Layer;

    fn checkout() -> Directory {
        Container::from("alpine:latest").directory(REPOSITORY_DIR)
    }

    #[test]
    fn installs_cocogitto_locked() {
        let container = provision(&PipelineConfig::default(), checkout());

        assert_eq!(container.image(), "rust:latest");
        assert_eq!(container.workdir(), Some(REPOSITORY_DIR));
        assert!(matches!(
            &container.layers()[0],
            Layer::Directory { path, .. } if path == REPOSITORY_DIR
        ));
        let Some(Layer::Exec(exec)) = container.layers().last() else {
            panic!("install must be the last layer");
        };
        assert_eq!(exec.args, ["cargo", "install", "--locked", "cocogitto"]);
    }

    #[test]
    fn pins_configured_version() {
        let config = PipelineConfig {
            tool_version: Some("6.1.0".to_string()),
            ..Default::default()
        };
        let container = provision(&config, checkout());

        let Some(Layer::Exec(exec)) = container.layers().last() else {
            panic!("install must be the last layer");
        };
        assert_eq!(
            exec.args,
            ["cargo", "install", "--locked", "cocogitto", "--version", "6.1.0"]
        );
    }
}
