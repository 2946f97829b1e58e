//! Marker form modal.
//!
//! Drawn over the review screen while a marker is being written. The
//! line content is built separately from drawing so tests can check the
//! form without a terminal.

use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::review::editor::{FormField, MarkerEditor};
use crate::theme::Theme;

const FORM_WIDTH: u16 = 56;
const FORM_HEIGHT: u16 = 15;

/// Centered modal rect, shrunk to fit small terminals.
pub fn form_area(area: Rect) -> Rect {
    let width = FORM_WIDTH.min(area.width);
    let height = FORM_HEIGHT.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

fn field_line<'a>(theme: &Theme, editor: &MarkerEditor, field: FormField) -> Line<'a> {
    let focused = editor.focus == field;

    let label_style = if focused {
        theme.accent_bold_style()
    } else {
        theme.text_secondary_style()
    };

    let mut spans = vec![Span::styled(
        format!("  {:<12}", field.label()),
        label_style,
    )];

    if field == FormField::Kind {
        let name = editor.kind.display_name();
        let value = if focused {
            format!("◀ {} ▶", name)
        } else {
            name.to_string()
        };
        spans.push(Span::styled(value, theme.kind_style(editor.kind)));
    } else {
        spans.push(Span::styled(
            editor.field_text(field).to_string(),
            theme.text_style(),
        ));
        if focused {
            spans.push(Span::styled("_", theme.accent_style()));
        }
    }

    Line::from(spans)
}

/// Build the form body.
pub fn form_lines<'a>(theme: &Theme, editor: &MarkerEditor) -> Vec<Line<'a>> {
    let mut lines = vec![Line::raw("")];

    for field in FormField::ALL {
        lines.push(field_line(theme, editor, field));
    }

    lines.push(Line::raw(""));

    if let Some(error) = &editor.error {
        lines.push(Line::styled(
            format!("  ✖ {}", error),
            theme.error_style(),
        ));
    } else if editor.wants_player_nudge() {
        lines.push(Line::styled(
            "  ⚑ player-specific marker without a player",
            theme.kind_style(crate::session::MarkerKind::Important),
        ));
    } else {
        lines.push(Line::raw(""));
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "  Enter save · Tab next · ←/→ kind · Esc close",
        theme.text_secondary_style(),
    ));

    lines
}

/// Draw the modal over the given screen area.
pub fn render_form(f: &mut Frame, theme: &Theme, editor: &MarkerEditor, screen: Rect) {
    let area = form_area(screen);
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Add marker ")
        .border_style(theme.accent_style());

    let paragraph = Paragraph::new(form_lines(theme, editor))
        .block(block)
        .alignment(Alignment::Left);

    f.render_widget(paragraph, area);
}
