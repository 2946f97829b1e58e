//! Keyboard handling for the review screen.
//!
//! Two scopes: the session scope drives transport and navigation, and
//! the form scope captures the full keyboard while the marker form is
//! open so typing never falls through to playback controls.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::InputResult;
use crate::engine::PlaybackEngine;
use crate::review::editor::FormField;
use crate::review::ReviewSession;

/// Process a key event against the session.
pub fn handle_key_event<E: PlaybackEngine>(
    key: KeyEvent,
    session: &mut ReviewSession<E>,
) -> InputResult {
    // Ctrl+C quits from any scope
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return InputResult::Quit;
    }

    if session.show_help {
        session.show_help = false;
        return InputResult::Continue;
    }

    if session.editor.is_some() {
        return handle_form_key(key, session);
    }

    match key.code {
        KeyCode::Char(' ') => session.controller.toggle_play_pause(),
        KeyCode::Esc | KeyCode::Char('q') => return InputResult::Quit,
        KeyCode::Left => session.controller.skip_backward(),
        KeyCode::Right => session.controller.skip_forward(),
        KeyCode::Up => session.controller.change_volume(session.volume_step),
        KeyCode::Down => session.controller.change_volume(-session.volume_step),
        KeyCode::Char('v') => session.controller.toggle_mute(),
        KeyCode::Char('+') | KeyCode::Char('=') => session.controller.rate_up(),
        KeyCode::Char('-') | KeyCode::Char('_') => session.controller.rate_down(),
        KeyCode::Char('m') => session.open_marker_form(),
        KeyCode::Char('n') => session.jump_next_marker(),
        KeyCode::Char('p') => session.jump_prev_marker(),
        KeyCode::Char('?') => session.show_help = true,
        _ => {}
    }

    InputResult::Continue
}

/// Key handling while the marker form is open.
fn handle_form_key<E: PlaybackEngine>(
    key: KeyEvent,
    session: &mut ReviewSession<E>,
) -> InputResult {
    match key.code {
        KeyCode::Esc => session.close_marker_form(),
        KeyCode::Enter => session.submit_marker_form(),
        KeyCode::Tab | KeyCode::Down => {
            if let Some(editor) = session.editor.as_mut() {
                editor.focus_next();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(editor) = session.editor.as_mut() {
                editor.focus_prev();
            }
        }
        KeyCode::Left => {
            if let Some(editor) = session.editor.as_mut() {
                if editor.focus == FormField::Kind {
                    editor.cycle_kind_backward();
                }
            }
        }
        KeyCode::Right => {
            if let Some(editor) = session.editor.as_mut() {
                if editor.focus == FormField::Kind {
                    editor.cycle_kind_forward();
                }
            }
        }
        KeyCode::Backspace => {
            if let Some(editor) = session.editor.as_mut() {
                editor.backspace();
            }
        }
        KeyCode::Char(c) => {
            if let Some(editor) = session.editor.as_mut() {
                editor.insert_char(c);
            }
        }
        _ => {}
    }

    InputResult::Continue
}
