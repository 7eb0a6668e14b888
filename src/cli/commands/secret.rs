//! secret command - Store, remove, or inspect git tokens

use std::io::{self, Read};

use anyhow::{bail, Context as _, Result};

use crate::cli::Context;
use crate::core::config::Config;
use crate::secrets::{self, SecretStore};
use crate::ui::output;

fn open_store(ctx: &Context) -> Result<Box<dyn SecretStore>> {
    let config =
        Config::load(ctx.config_path.as_deref()).context("Failed to load configuration")?;
    secrets::create_store(config.secrets_provider()).context("Failed to initialize secret store")
}

/// Drop the line ending a terminal or `echo` leaves behind.
fn strip_line_ending(value: &str) -> &str {
    let value = value.strip_suffix('\n').unwrap_or(value);
    value.strip_suffix('\r').unwrap_or(value)
}

/// Store a secret, prompting without echo unless `from_stdin`.
pub fn set(ctx: &Context, key: &str, from_stdin: bool) -> Result<()> {
    let store = open_store(ctx)?;

    let value = if from_stdin {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read secret from stdin")?;
        buf
    } else {
        rpassword::prompt_password(format!("Value for '{}': ", key))
            .context("Failed to read secret")?
    };
    let value = strip_line_ending(&value);

    if value.is_empty() {
        bail!("No value provided for '{}'", key);
    }

    store.set(key, value).context("Failed to store secret")?;
    output::status(format!("Stored secret '{}'", key), ctx.verbosity());
    Ok(())
}

/// Remove a secret. Removing a missing key succeeds.
pub fn delete(ctx: &Context, key: &str) -> Result<()> {
    let store = open_store(ctx)?;
    store.delete(key).context("Failed to delete secret")?;
    output::status(format!("Removed secret '{}'", key), ctx.verbosity());
    Ok(())
}

/// Print whether a secret is stored. Never prints the value.
pub fn status(ctx: &Context, key: &str) -> Result<()> {
    let store = open_store(ctx)?;
    let stored = store.exists(key).context("Failed to read secret store")?;
    println!("{}: {}", key, if stored { "stored" } else { "not stored" });
    Ok(())
}
