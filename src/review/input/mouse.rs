//! Mouse handling for the review screen.
//!
//! Every pointer event counts as activity for the control-surface idle
//! timer. Left clicks on the scrubber row seek: a marker glyph jumps to
//! exactly its timestamp, anywhere else maps the column back to a time.

use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use super::InputResult;
use crate::engine::PlaybackEngine;
use crate::review::render::scrubber_geometry;
use crate::review::ReviewSession;

/// Process a mouse event against the session.
pub fn handle_mouse_event<E: PlaybackEngine>(
    event: MouseEvent,
    session: &mut ReviewSession<E>,
    screen: Rect,
) -> InputResult {
    session.controls.note_activity(Instant::now());

    if event.kind != MouseEventKind::Down(MouseButton::Left) {
        return InputResult::Continue;
    }

    // Modals are keyboard-driven; clicks through them are ignored
    if session.editor.is_some() || session.show_help {
        return InputResult::Continue;
    }

    if let Some(geometry) = scrubber_geometry(screen) {
        let in_row = event.row == geometry.row;
        let in_bar = event.column >= geometry.x && event.column < geometry.x + geometry.width;
        if in_row && in_bar {
            let cell = (event.column - geometry.x) as usize;
            session.click_scrubber(cell, geometry.width as usize);
        }
    }

    InputResult::Continue
}
