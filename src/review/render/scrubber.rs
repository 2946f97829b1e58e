//! Scrubber row: progress bar with marker overlays.
//!
//! Cell math is shared between drawing and mouse hit-testing so a click
//! always resolves to exactly what is painted. Markers are placed in
//! time order (later timestamps win a contested cell) and the playhead
//! is painted last, over everything.

use ratatui::style::Modifier;
use ratatui::text::{Line, Span};

use crate::review::timeline::position_for_time;
use crate::session::{Marker, MarkerKind};
use crate::theme::Theme;

/// One cell of the scrubber bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrubCell {
    /// Played portion of the bar.
    Elapsed,
    /// Unplayed portion of the bar.
    Remaining,
    /// A marker glyph, colored by kind.
    Marker(MarkerKind),
    /// The playhead.
    Playhead,
}

/// Map a timestamp to a bar cell index.
pub fn cell_for_time(time: f64, duration: f64, width: usize) -> usize {
    if width == 0 {
        return 0;
    }
    let fraction = position_for_time(time, duration) / 100.0;
    ((fraction * width as f64) as usize).min(width - 1)
}

/// Map a bar cell back to a timestamp, for click-to-seek.
pub fn time_for_cell(cell: usize, width: usize, duration: f64) -> f64 {
    if width == 0 {
        return 0.0;
    }
    let ratio = cell as f64 / width as f64;
    (ratio * duration).clamp(0.0, duration.max(0.0))
}

/// Build the scrubber cells for the current frame.
///
/// `markers` must be in time order so overlapping markers resolve the
/// same way here and in `marker_at_cell`.
pub fn build_scrubber_cells(
    width: usize,
    current_time: f64,
    duration: f64,
    markers: &[&Marker],
) -> Vec<ScrubCell> {
    if width == 0 {
        return Vec::new();
    }

    let progress = position_for_time(current_time, duration) / 100.0;
    let filled = (progress * width as f64) as usize;

    let mut cells: Vec<ScrubCell> = (0..width)
        .map(|i| {
            if i < filled {
                ScrubCell::Elapsed
            } else {
                ScrubCell::Remaining
            }
        })
        .collect();

    for marker in markers {
        let pos = cell_for_time(marker.time, duration, width);
        cells[pos] = ScrubCell::Marker(marker.kind);
    }

    // Playhead wins its cell
    let playhead = filled.min(width - 1);
    cells[playhead] = ScrubCell::Playhead;

    cells
}

/// The marker a click on `cell` activates, if any.
///
/// Resolves ties exactly like `build_scrubber_cells`: the last marker in
/// time order painted on the cell. A marker hidden under the playhead is
/// still clickable.
pub fn marker_at_cell<'a>(
    cell: usize,
    width: usize,
    duration: f64,
    markers: &[&'a Marker],
) -> Option<&'a Marker> {
    let mut hit = None;
    for marker in markers {
        if cell_for_time(marker.time, duration, width) == cell {
            hit = Some(*marker);
        }
    }
    hit
}

/// Render the cells as a styled line, with one space of padding on each
/// side matching the hit-test geometry.
pub fn scrubber_line<'a>(theme: &Theme, cells: &[ScrubCell]) -> Line<'a> {
    let mut spans: Vec<Span> = Vec::with_capacity(cells.len() + 2);
    spans.push(Span::raw(" "));
    for cell in cells {
        spans.push(match cell {
            ScrubCell::Elapsed => Span::styled("━", theme.accent_style()),
            ScrubCell::Remaining => Span::styled("─", theme.text_secondary_style()),
            ScrubCell::Marker(kind) => Span::styled(
                kind.glyph().to_string(),
                theme.kind_style(*kind).add_modifier(Modifier::BOLD),
            ),
            ScrubCell::Playhead => Span::styled("⏺", theme.accent_bold_style()),
        });
    }
    spans.push(Span::raw(" "));
    Line::from(spans)
}
