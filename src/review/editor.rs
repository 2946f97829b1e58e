//! Marker entry form.
//!
//! Pure form state: field buffers, focus cycling, kind selection and
//! validation. Key routing lives in the input layer and drawing in the
//! render layer; this module decides what a submission produces.

use crate::session::{format_timestamp, parse_clock, MarkerDraft, MarkerKind};

/// Fields of the marker form, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Time,
    Title,
    Description,
    Kind,
    Player,
    Category,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Time,
        FormField::Title,
        FormField::Description,
        FormField::Kind,
        FormField::Player,
        FormField::Category,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Time => "Time",
            FormField::Title => "Title",
            FormField::Description => "Description",
            FormField::Kind => "Kind",
            FormField::Player => "Player",
            FormField::Category => "Category",
        }
    }

    fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// State of the open marker form.
#[derive(Debug)]
pub struct MarkerEditor {
    pub time_text: String,
    pub title: String,
    pub description: String,
    pub kind: MarkerKind,
    pub player: String,
    pub category: String,
    pub focus: FormField,
    /// Inline validation message from the last failed submit.
    pub error: Option<String>,
}

impl MarkerEditor {
    /// Open the form primed with the paused playhead time.
    ///
    /// Focus starts on the title since the time is already filled in.
    pub fn new(prefill_seconds: f64) -> Self {
        Self {
            time_text: format_timestamp(prefill_seconds),
            title: String::new(),
            description: String::new(),
            kind: MarkerKind::Important,
            player: String::new(),
            category: String::new(),
            focus: FormField::Title,
            error: None,
        }
    }

    /// The time field as seconds. Malformed input parses as 0 (documented
    /// fallback; the field shows what was typed until submit).
    pub fn parsed_time(&self) -> f64 {
        parse_clock(&self.time_text).map(f64::from).unwrap_or(0.0)
    }

    /// Read a field's text buffer for rendering.
    pub fn field_text(&self, field: FormField) -> &str {
        match field {
            FormField::Time => &self.time_text,
            FormField::Title => &self.title,
            FormField::Description => &self.description,
            FormField::Kind => self.kind.display_name(),
            FormField::Player => &self.player,
            FormField::Category => &self.category,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Cycle the kind selector. Only meaningful while Kind is focused.
    pub fn cycle_kind_forward(&mut self) {
        self.kind = self.kind.next();
    }

    pub fn cycle_kind_backward(&mut self) {
        self.kind = self.kind.prev();
    }

    /// Type a character into the focused text field.
    pub fn insert_char(&mut self, c: char) {
        self.error = None;
        if let Some(buffer) = self.focused_text_mut() {
            buffer.push(c);
        }
    }

    /// Delete the last character of the focused text field.
    pub fn backspace(&mut self) {
        self.error = None;
        if let Some(buffer) = self.focused_text_mut() {
            buffer.pop();
        }
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Time => Some(&mut self.time_text),
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::Kind => None,
            FormField::Player => Some(&mut self.player),
            FormField::Category => Some(&mut self.category),
        }
    }

    /// Whether to nudge for a player name: kind is player-specific but
    /// the player field is still blank. Advisory only, never blocks.
    pub fn wants_player_nudge(&self) -> bool {
        self.kind == MarkerKind::PlayerSpecific && self.player.trim().is_empty()
    }

    /// Assemble the draft from the current buffers.
    pub fn draft(&self) -> MarkerDraft {
        MarkerDraft {
            time: self.parsed_time(),
            title: self.title.clone(),
            description: self.description.clone(),
            kind: Some(self.kind),
            player: non_empty(&self.player),
            category: non_empty(&self.category),
        }
    }

    /// Validate and hand out the draft.
    ///
    /// On failure the form keeps everything the coach typed and shows
    /// the message inline; nothing is submitted.
    pub fn submit(&mut self, duration: f64) -> Option<MarkerDraft> {
        let draft = self.draft();
        match draft.validate(duration) {
            Ok(()) => {
                self.error = None;
                Some(draft)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    /// Clear the form for the next entry, primed with the playhead time.
    pub fn reset(&mut self, current_time: f64) {
        *self = Self::new(current_time);
    }
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
