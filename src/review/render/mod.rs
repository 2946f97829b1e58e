//! Frame composition for the review screen.
//!
//! Layout, top to bottom: header, body (detail pane + marker panel),
//! then three chrome rows (scrubber, transport, hints). The chrome rows
//! blank out while the control surface is hidden; a pending status note
//! stays visible regardless. Modals draw last, over everything.

pub mod controls;
pub mod form;
pub mod help;
pub mod panel;
pub mod scrubber;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::engine::PlaybackEngine;
use crate::review::controller::PlaybackPhase;
use crate::review::ReviewSession;
use crate::session::format_timestamp;

/// Width of the marker panel column.
pub const PANEL_WIDTH: u16 = 34;

/// Where the scrubber cells live on screen. Shared with mouse
/// hit-testing so clicks resolve against exactly what was painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrubberGeometry {
    pub row: u16,
    pub x: u16,
    pub width: u16,
}

/// Scrubber geometry for a screen, or None when the terminal is too
/// small to show chrome at all.
pub fn scrubber_geometry(area: Rect) -> Option<ScrubberGeometry> {
    if area.height < 6 || area.width < 10 {
        return None;
    }
    Some(ScrubberGeometry {
        row: area.y + area.height - 3,
        x: area.x + 1,
        width: area.width - 2,
    })
}

/// Draw one frame of the review screen.
pub fn draw<E: PlaybackEngine>(f: &mut Frame, session: &ReviewSession<E>) {
    let area = f.area();
    let theme = &session.theme;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(0),    // body
            Constraint::Length(1), // scrubber
            Constraint::Length(1), // transport
            Constraint::Length(1), // hints / status
        ])
        .split(area);

    render_header(f, session, rows[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(PANEL_WIDTH)])
        .split(rows[1]);
    render_detail_pane(f, session, body[0]);
    render_marker_panel(f, session, body[1]);

    let visible = session.controls.is_visible();
    if visible {
        if let Some(geometry) = scrubber_geometry(area) {
            let sorted = session.timeline.sorted_by_time();
            let cells = scrubber::build_scrubber_cells(
                geometry.width as usize,
                session.controller.current_time(),
                session.controller.duration(),
                &sorted,
            );
            f.render_widget(
                Paragraph::new(scrubber::scrubber_line(theme, &cells)),
                rows[2],
            );
        }
        f.render_widget(
            Paragraph::new(controls::controls_line(
                theme,
                &session.controller,
                session.timeline.len(),
            )),
            rows[3],
        );
    }

    f.render_widget(
        Paragraph::new(controls::footer_line(theme, session.status.as_ref(), visible)),
        rows[4],
    );

    if let Some(editor) = &session.editor {
        form::render_form(f, theme, editor, area);
    }
    if session.show_help {
        help::render_help(f, theme, area);
    }
}

fn render_header<E: PlaybackEngine>(f: &mut Frame, session: &ReviewSession<E>, area: Rect) {
    let theme = &session.theme;
    let mut spans = vec![
        Span::styled(" ⏺ REVIEW ", theme.accent_bold_style()),
        Span::styled(session.video.title.clone(), theme.text_style()),
    ];
    if let Some(source) = &session.video.source {
        spans.push(Span::styled(
            format!("  ·  {}", source),
            theme.text_secondary_style(),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_detail_pane<E: PlaybackEngine>(f: &mut Frame, session: &ReviewSession<E>, area: Rect) {
    let theme = &session.theme;
    let controller = &session.controller;

    let phase = match controller.phase() {
        PlaybackPhase::Unready => "waiting for engine",
        PlaybackPhase::Playing => "playing",
        PlaybackPhase::Paused => "paused",
    };

    let mut lines = vec![
        Line::raw(""),
        Line::from(vec![
            Span::styled(
                format!(
                    "  {} / {}",
                    format_timestamp(controller.current_time()),
                    format_timestamp(controller.duration())
                ),
                theme.accent_bold_style(),
            ),
            Span::styled(
                format!("   {} · {:.2}x", phase, controller.playback_rate()),
                theme.text_secondary_style(),
            ),
        ]),
        Line::raw(""),
    ];

    if let Some(marker) = session
        .timeline
        .latest_at_or_before(controller.current_time())
    {
        lines.push(Line::styled("  at the playhead", theme.text_secondary_style()));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!("{} {} ", marker.kind.glyph(), format_timestamp(marker.time)),
                theme.kind_style(marker.kind),
            ),
            Span::styled(marker.title.clone(), theme.text_style()),
        ]));
        lines.push(Line::styled(
            format!("     {}", marker.description),
            theme.text_style(),
        ));

        let mut tags = Vec::new();
        if let Some(player) = &marker.player {
            tags.push(format!("player: {}", player));
        }
        if let Some(category) = &marker.category {
            tags.push(format!("category: {}", category));
        }
        if !tags.is_empty() {
            lines.push(Line::styled(
                format!("     {}", tags.join(" · ")),
                theme.text_secondary_style(),
            ));
        }
    }

    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_marker_panel<E: PlaybackEngine>(f: &mut Frame, session: &ReviewSession<E>, area: Rect) {
    let theme = &session.theme;
    let sorted = session.timeline.sorted_by_time();
    let selected_id = session
        .timeline
        .latest_at_or_before(session.controller.current_time())
        .map(|m| m.id.as_str());

    let mut lines = panel::panel_lines(theme, &sorted, selected_id, area.width as usize);

    // Keep the highlighted marker on screen
    let view_rows = area.height.saturating_sub(2) as usize;
    let scroll = match (selected_id, view_rows) {
        (Some(id), rows) if rows > 0 => sorted
            .iter()
            .position(|m| m.id == id)
            .map(|idx| idx.saturating_sub(rows.saturating_sub(1)))
            .unwrap_or(0),
        _ => 0,
    };

    let block = Block::default()
        .borders(Borders::LEFT)
        .title(Span::styled(
            format!(" Markers ({}) ", session.timeline.len()),
            theme.accent_style(),
        ));

    let mut body = vec![Line::raw("")];
    body.append(&mut lines);

    f.render_widget(
        Paragraph::new(body)
            .block(block)
            .scroll((scroll as u16, 0)),
        area,
    );
}
