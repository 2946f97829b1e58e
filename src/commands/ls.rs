//! Session listing subcommand handler

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use humansize::{format_size, DECIMAL};

use vor::session::{format_timestamp, SessionFile};
use vor::theme::current_theme;
use vor::Config;

struct Row {
    name: String,
    duration: f64,
    markers: usize,
    size: u64,
}

/// List `.marks` files in a directory with duration, marker count and
/// file size. Falls back to the configured review dir, then the cwd.
pub fn handle_ls(dir: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let dir = dir
        .or(config.review_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    let theme = current_theme();
    let mut rows = Vec::new();
    let mut skipped = Vec::new();

    for entry in fs::read_dir(&dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("marks") {
            continue;
        }
        let name = file_name(&path);
        match SessionFile::parse(&path) {
            Ok(file) => rows.push(Row {
                name,
                duration: file.header.video.duration,
                markers: file.markers.len(),
                size: entry.metadata()?.len(),
            }),
            Err(_) => skipped.push(name),
        }
    }

    if rows.is_empty() && skipped.is_empty() {
        println!(
            "{}",
            theme.secondary_text(&format!("No .marks files in {}", dir.display()))
        );
        return Ok(());
    }

    rows.sort_by(|a, b| a.name.cmp(&b.name));

    println!(
        "{}",
        theme.accent_text(&format!("Review sessions in {}", dir.display()))
    );
    for row in &rows {
        let markers = format!("{:>3} markers", row.markers);
        println!(
            "  {}  {}  {}  {}",
            theme.primary_text(&format!("{:<28}", row.name)),
            theme.accent_text(&format!("{:>7}", format_timestamp(row.duration))),
            theme.primary_text(&markers),
            theme.secondary_text(&format_size(row.size, DECIMAL))
        );
    }
    for name in &skipped {
        println!(
            "  {}  {}",
            theme.primary_text(&format!("{:<28}", name)),
            theme.error_text("unreadable")
        );
    }

    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
