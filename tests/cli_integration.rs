//! Integration tests for the cogpipe binary.
//!
//! Operations run with `--explain`, so the binary renders the build plan it
//! would hand to the container engine instead of starting containers. Each
//! test gets its own HOME so config discovery and the file secret store stay
//! inside a temp dir.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const TOKEN: &str = "ghp_integration_token_value";

/// A cogpipe command isolated from the user's config and secrets.
fn cogpipe(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cogpipe").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("xdg"))
        .env_remove("COGPIPE_CONFIG")
        .env_remove("COGPIPE_REPOSITORY_URL")
        .env_remove("COGPIPE_USER")
        .env_remove("COGPIPE_GIT_TOKEN")
        .env_remove("RUST_LOG")
        .env("GIT_TOKEN", TOKEN);
    cmd
}

fn operation<'a>(home: &TempDir, args: impl IntoIterator<Item = &'a str>) -> Command {
    let mut cmd = cogpipe(home);
    cmd.arg("--explain");
    let mut args = args.into_iter();
    if let Some(sub) = args.next() {
        cmd.arg(sub);
    }
    cmd.args([
        "--repository-url",
        "https://github.com/acme/app",
        "--user",
        "release-bot",
    ]);
    cmd.args(args);
    cmd
}

#[test]
fn version_flag_works() {
    let home = TempDir::new().unwrap();
    cogpipe(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cogpipe"));
}

#[test]
fn help_lists_operations() {
    let home = TempDir::new().unwrap();
    cogpipe(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("get-version"))
        .stdout(predicate::str::contains("install-hooks"));
}

#[test]
fn get_version_renders_the_cog_line() {
    let home = TempDir::new().unwrap();
    operation(
        &home,
        ["get-version", "-v", "--package", "core", "--fallback", "0.1.0"],
    )
    .assert()
    .success()
    .stdout(predicate::str::contains(
        "cog get-version -v --package core --fallback 0.1.0",
    ))
    .stdout(predicate::str::contains("FROM alpine:latest AS stage0"))
    .stdout(predicate::str::contains("cargo\",\"install\",\"--locked\",\"cocogitto\""));
}

#[test]
fn token_never_reaches_output() {
    let home = TempDir::new().unwrap();
    operation(&home, ["check", "--debug"])
        .assert()
        .success()
        .stdout(predicate::str::contains(TOKEN).not())
        .stderr(predicate::str::contains(TOKEN).not());
}

#[test]
fn explicit_version_wins_over_increments() {
    let home = TempDir::new().unwrap();
    operation(&home, ["bump", "--version", "2.0.0", "--auto", "--major"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cog bump --version 2.0.0"))
        .stdout(predicate::str::contains("--auto").not())
        .stdout(predicate::str::contains("--major").not());
}

#[test]
fn commit_with_empty_message_fails_locally() {
    let home = TempDir::new().unwrap();
    operation(&home, ["commit", "feat", ""])
        .env_remove("GIT_TOKEN")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("commit message can not be empty"));
}

#[test]
fn commit_with_empty_type_fails_locally() {
    let home = TempDir::new().unwrap();
    operation(&home, ["commit", "", "add login"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid commit type"));
}

#[test]
fn missing_token_is_reported_by_name() {
    let home = TempDir::new().unwrap();
    operation(&home, ["check"])
        .env_remove("GIT_TOKEN")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed to resolve git token"))
        .stderr(predicate::str::contains("GIT_TOKEN"));
}

#[test]
fn bare_token_value_is_rejected_without_echo() {
    let home = TempDir::new().unwrap();
    operation(&home, ["check", "--git-token", TOKEN])
        .assert()
        .failure()
        .stderr(predicate::str::contains("env:NAME"))
        .stderr(predicate::str::contains(TOKEN).not());
}

#[test]
fn json_envelope() {
    let home = TempDir::new().unwrap();
    let output = operation(&home, ["verify", "feat: add login", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["operation"], "verify");
    assert_eq!(value["repository"], "https://github.com/acme/app");
    assert!(value["output"]
        .as_str()
        .unwrap()
        .contains("cog verify \\\"feat: add login\\\""));
}

#[test]
fn cog_toml_is_copied_into_the_workdir() {
    let home = TempDir::new().unwrap();
    let cog_toml = home.child("cog.toml");
    cog_toml.write_str("tag_prefix = \"v\"\n").unwrap();

    operation(
        &home,
        ["check", "--cog-toml", cog_toml.path().to_str().unwrap()],
    )
    .assert()
    .success()
    .stdout(predicate::str::contains("COPY file0 cog.toml"));
}

#[test]
fn stored_token_is_used_by_reference() {
    let home = TempDir::new().unwrap();
    cogpipe(&home)
        .args(["secret", "set", "github", "--stdin"])
        .write_stdin("stored-token-value\n")
        .assert()
        .success();

    cogpipe(&home)
        .args(["secret", "status", "github"])
        .assert()
        .success()
        .stdout("github: stored\n");

    operation(&home, ["check", "--git-token", "store:github"])
        .env_remove("GIT_TOKEN")
        .assert()
        .success()
        .stdout(predicate::str::contains("cog check"))
        .stdout(predicate::str::contains("stored-token-value").not());

    cogpipe(&home)
        .args(["secret", "delete", "github"])
        .assert()
        .success();
    cogpipe(&home)
        .args(["secret", "status", "github"])
        .assert()
        .success()
        .stdout("github: not stored\n");
}

#[test]
fn config_file_changes_the_images() {
    let home = TempDir::new().unwrap();
    let config = home.child("cogpipe.toml");
    config
        .write_str("[images]\ngit = \"alpine:3.20\"\ntoolchain = \"rust:1.80\"\n\n[tool]\nversion = \"6.1.0\"\n")
        .unwrap();

    operation(&home, ["check"])
        .args(["--config", config.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("FROM alpine:3.20 AS stage0"))
        .stdout(predicate::str::contains("FROM rust:1.80 AS stage1"))
        .stdout(predicate::str::contains("\"--version\",\"6.1.0\""));
}

#[test]
fn invalid_config_is_an_error() {
    let home = TempDir::new().unwrap();
    let config = home.child("cogpipe.toml");
    config.write_str("[engine]\nprogram = \"nerdctl\"\n").unwrap();

    cogpipe(&home)
        .args(["--config", config.path().to_str().unwrap(), "config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nerdctl"));
}

#[test]
fn config_init_then_show() {
    let home = TempDir::new().unwrap();

    cogpipe(&home).args(["config", "init"]).assert().success();
    home.child(".cogpipe/config.toml")
        .assert(predicate::str::contains("program = \"docker\""));

    cogpipe(&home)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
    cogpipe(&home)
        .args(["config", "init", "--force"])
        .assert()
        .success();

    cogpipe(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".cogpipe/config.toml"));
    cogpipe(&home)
        .args(["-q", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("toolchain = \"rust:latest\""));
}

#[test]
fn completion_generates_script() {
    let home = TempDir::new().unwrap();
    cogpipe(&home)
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cogpipe"));
}

#[test]
fn kept_images_warn_unless_quiet() {
    let home = TempDir::new().unwrap();
    let config = home.child("cogpipe.toml");
    config.write_str("[engine]\nkeep_images = true\n").unwrap();
    let config = config.path().to_str().unwrap();

    operation(&home, ["check"])
        .args(["--config", config])
        .assert()
        .success()
        .stderr(predicate::str::contains("warning: engine.keep_images is set"));

    operation(&home, ["check", "-q"])
        .args(["--config", config])
        .assert()
        .success()
        .stderr(predicate::str::contains("keep_images").not());
}
