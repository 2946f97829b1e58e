//! `vor config` subcommands.

use anyhow::{bail, Context, Result};

use vor::theme::current_theme;
use vor::Config;

/// Print the effective configuration as TOML.
///
/// Shows the merged result of the config file and built-in defaults, so
/// the output can be pasted back as a complete config file.
#[cfg(not(tarpaulin_include))]
pub fn handle_show() -> Result<()> {
    let theme = current_theme();
    let path = Config::config_path()?;
    let config = Config::load()?;

    if !path.exists() {
        println!(
            "{}",
            theme.secondary_text(&format!("# defaults ({} not found)", path.display()))
        );
    }
    println!("{}", theme.primary_text(&toml::to_string_pretty(&config)?));
    Ok(())
}

/// Print the config file location.
#[cfg(not(tarpaulin_include))]
pub fn handle_path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}

/// Open the config file in `$VISUAL`/`$EDITOR`, falling back to vi.
///
/// Writes the current defaults first when no file exists yet, so the
/// editor opens on a complete file instead of an empty buffer.
#[cfg(not(tarpaulin_include))]
pub fn handle_edit() -> Result<()> {
    let theme = current_theme();
    let path = Config::config_path()?;

    if !path.exists() {
        Config::default().save()?;
    }

    let editor = std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .unwrap_or_else(|_| "vi".to_string());

    println!(
        "{}",
        theme.secondary_text(&format!("Opening {} with {}", path.display(), editor))
    );

    let status = std::process::Command::new(&editor)
        .arg(&path)
        .status()
        .with_context(|| format!("Failed to launch editor: {editor}"))?;

    if !status.success() {
        bail!("Editor exited with {status}");
    }
    Ok(())
}
