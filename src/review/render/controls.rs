//! Transport line and key hints for the review screen.
//!
//! Text is built by plain functions so the line content is testable
//! without a terminal; drawing wraps the strings in themed lines.

use ratatui::text::Line;

use crate::engine::PlaybackEngine;
use crate::review::controller::{PlaybackController, PlaybackPhase};
use crate::session::format_timestamp;
use crate::theme::Theme;

/// A transient message shown in place of the key hints.
#[derive(Debug, Clone)]
pub struct StatusNote {
    pub text: String,
    pub error: bool,
}

impl StatusNote {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            error: true,
        }
    }
}

/// Compose the transport line: phase, clock, rate, volume, marker count.
pub fn controls_text<E: PlaybackEngine>(
    controller: &PlaybackController<E>,
    marker_count: usize,
) -> String {
    let symbol = match controller.phase() {
        PlaybackPhase::Unready => return " ⏳ waiting for engine".to_string(),
        PlaybackPhase::Playing => "▶",
        PlaybackPhase::Paused => "⏸",
    };

    let volume = if controller.is_muted() {
        "vol muted".to_string()
    } else {
        format!("vol {}%", controller.volume())
    };

    let markers = match marker_count {
        1 => "1 marker".to_string(),
        n => format!("{} markers", n),
    };

    format!(
        " {} {} / {} · {:.2}x · {} · {}",
        symbol,
        format_timestamp(controller.current_time()),
        format_timestamp(controller.duration()),
        controller.playback_rate(),
        volume,
        markers
    )
}

/// Key hints for the bottom row.
pub fn hints_text() -> &'static str {
    " space play · ←/→ skip · m marker · n/p jump · ↑/↓ vol · v mute · -/+ rate · ? help · q quit"
}

/// Themed transport line.
pub fn controls_line<'a, E: PlaybackEngine>(
    theme: &Theme,
    controller: &PlaybackController<E>,
    marker_count: usize,
) -> Line<'a> {
    Line::styled(controls_text(controller, marker_count), theme.text_style())
}

/// Themed bottom row: the status note when one is pending, hints
/// otherwise.
pub fn footer_line<'a>(theme: &Theme, status: Option<&StatusNote>, visible: bool) -> Line<'a> {
    match status {
        Some(note) => {
            let style = if note.error {
                theme.error_style()
            } else {
                theme.success_style()
            };
            Line::styled(format!(" {}", note.text), style)
        }
        // Hints follow control-surface visibility; a status note does not
        None if visible => Line::styled(hints_text(), theme.text_secondary_style()),
        None => Line::raw(""),
    }
}
