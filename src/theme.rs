//! Colors and styles for the review screen and CLI output.
//!
//! A theme bundles ratatui styles for the TUI with ANSI string helpers
//! for plain command output. Marker kinds keep a fixed color mapping
//! across themes so a marker reads the same in every review room.

use ratatui::style::{Color, Modifier, Style};

use crate::session::MarkerKind;

/// Color palette for one look.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Main content text
    pub text_primary: Color,
    /// Dimmed text for hints and metadata
    pub text_secondary: Color,
    /// Highlights, focused fields, the playhead
    pub accent: Color,
    /// Failures and the error status line
    pub error: Color,
    /// Confirmations
    pub success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::broadcast()
    }
}

impl Theme {
    /// VOR's own look: light gray text with cyan accents, the usual
    /// broadcast-overlay palette. Standard ANSI colors only, so the
    /// terminal's color scheme stays in charge.
    pub fn broadcast() -> Self {
        Self {
            text_primary: Color::Gray,
            text_secondary: Color::DarkGray,
            accent: Color::Cyan,
            error: Color::Red,
            success: Color::Green,
        }
    }

    /// Plain white-on-default terminal look.
    pub fn classic() -> Self {
        Self {
            text_primary: Color::White,
            text_secondary: Color::DarkGray,
            accent: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
        }
    }

    /// Green-on-black for dim review rooms.
    pub fn night() -> Self {
        Self {
            text_primary: Color::Green,
            text_secondary: Color::DarkGray,
            accent: Color::LightGreen,
            error: Color::Red,
            success: Color::Green,
        }
    }

    /// Look up a theme by its config name. Unknown names fall back to
    /// the default theme.
    pub fn by_name(name: &str) -> Self {
        match name {
            "classic" => Self::classic(),
            "night" => Self::night(),
            _ => Self::broadcast(),
        }
    }

    // === ratatui styles ===

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    pub fn text_secondary_style(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Bold accent, used for key bindings and focused field labels.
    pub fn accent_bold_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    /// Color for a marker kind. The mapping is fixed across themes so a
    /// marker reads the same in every review room.
    pub fn kind_color(&self, kind: MarkerKind) -> Color {
        match kind {
            MarkerKind::Important => Color::Yellow,
            MarkerKind::Error => Color::Red,
            MarkerKind::Success => Color::Green,
            MarkerKind::Strategy => Color::Cyan,
            MarkerKind::PlayerSpecific => Color::Magenta,
        }
    }

    /// Style for a marker kind.
    pub fn kind_style(&self, kind: MarkerKind) -> Style {
        Style::default().fg(self.kind_color(kind))
    }

    // === ANSI strings for CLI output ===

    pub fn accent_text(&self, text: &str) -> String {
        paint(self.accent, text)
    }

    pub fn primary_text(&self, text: &str) -> String {
        paint(self.text_primary, text)
    }

    pub fn secondary_text(&self, text: &str) -> String {
        paint(self.text_secondary, text)
    }

    pub fn error_text(&self, text: &str) -> String {
        paint(self.error, text)
    }

    pub fn success_text(&self, text: &str) -> String {
        paint(self.success, text)
    }

    /// Tag CLI text with a marker kind's color.
    pub fn kind_text(&self, kind: MarkerKind, text: &str) -> String {
        paint(self.kind_color(kind), text)
    }
}

const ANSI_RESET: &str = "\x1b[0m";

fn paint(color: Color, text: &str) -> String {
    format!("{}{}{}", ansi_code(color), text, ANSI_RESET)
}

/// ANSI escape for a standard terminal color. RGB and indexed colors are
/// not part of any theme and come back empty.
fn ansi_code(color: Color) -> &'static str {
    match color {
        Color::Black => "\x1b[30m",
        Color::Red => "\x1b[31m",
        Color::Green => "\x1b[32m",
        Color::Yellow => "\x1b[33m",
        Color::Blue => "\x1b[34m",
        Color::Magenta => "\x1b[35m",
        Color::Cyan => "\x1b[36m",
        Color::Gray => "\x1b[37m",
        Color::DarkGray => "\x1b[90m",
        Color::LightRed => "\x1b[91m",
        Color::LightGreen => "\x1b[92m",
        Color::LightYellow => "\x1b[93m",
        Color::LightBlue => "\x1b[94m",
        Color::LightMagenta => "\x1b[95m",
        Color::LightCyan => "\x1b[96m",
        Color::White => "\x1b[97m",
        Color::Reset => "\x1b[0m",
        _ => "",
    }
}

/// Global theme instance, resolved from config when available.
pub fn current_theme() -> Theme {
    match crate::config::Config::load() {
        Ok(config) => Theme::by_name(&config.theme),
        Err(_) => Theme::default(),
    }
}
