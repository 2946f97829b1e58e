//! Markers table subcommand handler

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;

use vor::session::{format_timestamp, Marker, MarkerKind, SessionFile};
use vor::theme::{current_theme, Theme};

/// Ordering for the printed marker table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MarkerSort {
    /// Ascending video timestamp
    Time,
    /// The order markers were added in
    Created,
}

/// Print a session's markers without entering the TUI.
pub fn handle_markers(path: &Path, sort: MarkerSort, kind: Option<&str>) -> Result<()> {
    let kind = kind
        .map(|k| k.parse::<MarkerKind>())
        .transpose()
        .context("Unknown marker kind")?;

    let file = SessionFile::parse(path)?;
    let theme = current_theme();

    println!(
        "{} {}",
        theme.accent_text(&file.header.video.title),
        theme.secondary_text(&format!(
            "({}, {} markers)",
            format_timestamp(file.header.video.duration),
            file.markers.len()
        ))
    );

    let markers: Vec<&Marker> = match sort {
        MarkerSort::Time => file.sorted_by_time(),
        MarkerSort::Created => file.markers.iter().collect(),
    };

    let mut shown = 0;
    for marker in markers {
        if let Some(kind) = kind {
            if marker.kind != kind {
                continue;
            }
        }
        println!("{}", marker_row(&theme, marker));
        shown += 1;
    }

    if shown == 0 {
        println!("{}", theme.secondary_text("  (no markers)"));
    }

    Ok(())
}

fn marker_row(theme: &Theme, marker: &Marker) -> String {
    let mut row = format!(
        "  {} {}  {}  {}",
        theme.kind_text(marker.kind, &marker.kind.glyph().to_string()),
        theme.accent_text(&format_timestamp(marker.time)),
        theme.secondary_text(&format!("{:<15}", marker.kind.label())),
        theme.primary_text(&marker.title)
    );
    if let Some(player) = &marker.player {
        row.push_str(&theme.secondary_text(&format!("  [{}]", player)));
    }
    if let Some(category) = &marker.category {
        row.push_str(&theme.secondary_text(&format!("  #{}", category)));
    }
    row
}
