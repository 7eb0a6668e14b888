//! config command - Show, locate, or create the configuration file

use anyhow::{bail, Context as _, Result};

use crate::cli::Context;
use crate::core::config::Config;
use crate::ui::output;

/// Print the effective configuration as TOML, defaults filled in.
pub fn show(ctx: &Context) -> Result<()> {
    let config =
        Config::load(ctx.config_path.as_deref()).context("Failed to load configuration")?;

    match config.loaded_from() {
        Some(path) => output::status(format!("# loaded from {}", path.display()), ctx.verbosity()),
        None => output::status("# no config file found, showing defaults", ctx.verbosity()),
    }

    let rendered =
        toml::to_string_pretty(&config.effective()).context("Failed to render configuration")?;
    print!("{}", rendered);
    Ok(())
}

/// Print the config file in use, or where `config init` would write one.
pub fn path(ctx: &Context) -> Result<()> {
    let config =
        Config::load(ctx.config_path.as_deref()).context("Failed to load configuration")?;
    let path = match config.loaded_from() {
        Some(path) => path.to_path_buf(),
        None => Config::default_path()?,
    };
    println!("{}", path.display());
    Ok(())
}

/// Write the default configuration to `--config` or the canonical location.
pub fn init(ctx: &Context, force: bool) -> Result<()> {
    let path = match &ctx.config_path {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };

    if path.exists() && !force {
        bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    Config::write(&path, &Config::default().effective())
        .context("Failed to write configuration")?;
    output::status(format!("Wrote {}", path.display()), ctx.verbosity());
    Ok(())
}
