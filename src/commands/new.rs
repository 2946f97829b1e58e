//! New session file subcommand handler

use std::path::Path;

use anyhow::{bail, Context, Result};

use vor::session::{format_timestamp, parse_clock, SessionFile, VideoMeta};
use vor::theme::current_theme;

/// Create a fresh `.marks` session file.
pub fn handle_new(
    path: &Path,
    title: &str,
    duration: &str,
    source: Option<String>,
    force: bool,
) -> Result<()> {
    let title = title.trim();
    if title.is_empty() {
        bail!("The video title must not be empty");
    }

    let duration = parse_duration(duration)?;

    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let file = SessionFile::new(VideoMeta {
        title: title.to_string(),
        source,
        duration,
    });
    file.write(path)?;

    let theme = current_theme();
    println!(
        "{}",
        theme.success_text(&format!("Created {}", path.display()))
    );
    println!(
        "{}",
        theme.secondary_text(&format!(
            "  {} ({})",
            file.header.video.title,
            format_timestamp(duration)
        ))
    );

    Ok(())
}

/// Accepts either plain seconds ("330") or a clock ("5:30").
fn parse_duration(text: &str) -> Result<f64> {
    let text = text.trim();
    let secs = match parse_clock(text) {
        Some(clock) => f64::from(clock),
        None => text
            .parse::<f64>()
            .ok()
            .filter(|s| s.is_finite())
            .with_context(|| format!("Invalid duration '{}': use seconds or mm:ss", text))?,
    };
    if secs <= 0.0 {
        bail!("The duration must be greater than zero");
    }
    Ok(secs)
}
