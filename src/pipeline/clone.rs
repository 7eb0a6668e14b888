//! pipeline::clone
//!
//! Credential-templated cloning.

use crate::container::{Container, Directory, SecretEnv};
use crate::secrets::Plaintext;

use super::PipelineConfig;

/// Where the checkout lives in every stage.
pub const REPOSITORY_DIR: &str = "/repository";

/// Secret env var carrying the authenticated clone URL.
pub const CLONE_URL_ENV: &str = "COGPIPE_CLONE_URL";

/// `https://{user}:{token}@{url without one leading "https://"}`.
///
/// No other validation; git reports malformed URLs itself.
pub fn clone_url(user: &str, url: &str, token: &str) -> String {
    let rest = url.strip_prefix("https://").unwrap_or(url);
    format!("https://{}:{}@{}", user, token, rest)
}

/// Alpine with git installed and a global identity configured.
pub fn git_base(config: &PipelineConfig) -> Container {
    Container::from(config.git_image.as_str())
        .with_exec(["apk", "update"])
        .with_exec(["apk", "upgrade"])
        .with_exec(["apk", "add", "git"])
        .with_exec([
            "git",
            "config",
            "--global",
            "user.name",
            config.git_user_name.as_str(),
        ])
        .with_exec([
            "git",
            "config",
            "--global",
            "user.email",
            config.git_user_email.as_str(),
        ])
}

/// Clone `url` into [`REPOSITORY_DIR`] and return that directory.
///
/// The authenticated URL is only passed as secret env; the shell expands it
/// inside the container.
pub fn clone_repository(
    config: &PipelineConfig,
    user: &str,
    url: &str,
    token: &Plaintext,
) -> Directory {
    let authenticated = Plaintext::new(clone_url(user, url, token.expose()));
    let script = format!("git clone \"${}\" .", CLONE_URL_ENV);

    git_base(config)
        .with_workdir(REPOSITORY_DIR)
        .with_secret_exec(
            ["sh".to_string(), "-c".to_string(), script],
            vec![SecretEnv::new(CLONE_URL_ENV, authenticated)],
        )
        .directory(REPOSITORY_DIR)
}
