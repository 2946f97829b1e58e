//! Marker list panel.
//!
//! Right-hand column of the review screen: every marker in time order,
//! one line each, with the marker behind the playhead highlighted.

use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::session::{format_timestamp, Marker};
use crate::theme::Theme;

/// Trim text to a display width, ending with an ellipsis when cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Build the panel body, one line per marker in time order.
///
/// `selected_id` highlights the marker the playhead last passed.
pub fn panel_lines<'a>(
    theme: &Theme,
    markers_by_time: &[&Marker],
    selected_id: Option<&str>,
    width: usize,
) -> Vec<Line<'a>> {
    if markers_by_time.is_empty() {
        return vec![
            Line::raw(""),
            Line::styled("  no markers yet", theme.text_secondary_style()),
            Line::styled("  press m to add one", theme.text_secondary_style()),
        ];
    }

    // " ⚑ 02:05 " prefix
    let title_width = width.saturating_sub(10);

    markers_by_time
        .iter()
        .map(|marker| {
            let spans = vec![
                Span::raw(" "),
                Span::styled(
                    marker.kind.glyph().to_string(),
                    theme.kind_style(marker.kind).add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(
                    format_timestamp(marker.time),
                    theme.text_secondary_style(),
                ),
                Span::raw(" "),
                Span::styled(
                    truncate_to_width(&marker.title, title_width),
                    theme.text_style(),
                ),
            ];

            let line = Line::from(spans);
            if selected_id == Some(marker.id.as_str()) {
                line.style(ratatui::style::Style::default().add_modifier(Modifier::REVERSED))
            } else {
                line
            }
        })
        .collect()
}
