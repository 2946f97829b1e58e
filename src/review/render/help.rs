//! Help overlay.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::theme::Theme;

/// Key bindings shown in the overlay, in display order.
const KEY_BINDINGS: &[(&str, &str)] = &[
    ("space", "play / pause"),
    ("← / →", "skip back / forward"),
    ("↑ / ↓", "volume up / down"),
    ("v", "mute / unmute"),
    ("- / +", "playback rate down / up"),
    ("m", "add a marker at the current time"),
    ("n / p", "jump to next / previous marker"),
    ("click bar", "seek; marker glyphs jump exactly"),
    ("?", "toggle this help"),
    ("q / esc", "close the session"),
];

/// Build the overlay body.
pub fn help_lines<'a>(theme: &Theme) -> Vec<Line<'a>> {
    let mut lines = vec![Line::raw("")];
    for (key, description) in KEY_BINDINGS {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<12}", key), theme.accent_bold_style()),
            Span::styled(*description, theme.text_style()),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "  any key closes this overlay",
        theme.text_secondary_style(),
    ));
    lines
}

/// Draw the overlay centered on the screen.
pub fn render_help(f: &mut Frame, theme: &Theme, screen: Rect) {
    let width = 52u16.min(screen.width);
    let height = (KEY_BINDINGS.len() as u16 + 5).min(screen.height);
    let area = Rect {
        x: screen.x + (screen.width.saturating_sub(width)) / 2,
        y: screen.y + (screen.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Keys ")
        .border_style(theme.accent_style());

    f.render_widget(Paragraph::new(help_lines(theme)).block(block), area);
}
