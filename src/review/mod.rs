//! Interactive review session.
//!
//! Wires the playback controller, marker timeline and marker form
//! together and runs the terminal loop: tick the engine mirror and the
//! idle timer, draw a frame, route input. All session behavior lives on
//! `ReviewSession` so tests can drive it without a terminal.

pub mod controller;
pub mod controls;
pub mod editor;
pub mod input;
pub mod render;
pub mod timeline;

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::cursor;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use tracing::{info, warn};

use crate::config::Config;
use crate::engine::{ClockEngine, PlaybackEngine};
use crate::session::{format_timestamp, Marker, MarkerSink, SessionFile, SessionFileSink, VideoMeta};
use crate::theme::Theme;

use controller::{ControllerOptions, PlaybackController};
use controls::ControlsVisibility;
use editor::MarkerEditor;
use input::InputResult;
use render::controls::StatusNote;
use render::scrubber;
use timeline::MarkerTimeline;

/// How long the loop waits for input before ticking again.
const TICK: Duration = Duration::from_millis(250);

/// Session tuning, sourced from config.
#[derive(Debug, Clone)]
pub struct ReviewOptions {
    pub autoplay: bool,
    pub seek_step: f64,
    pub volume_step: i16,
    pub poll_interval: Duration,
    pub idle_hide: Duration,
    pub theme: Theme,
}

impl Default for ReviewOptions {
    fn default() -> Self {
        Self {
            autoplay: false,
            seek_step: 10.0,
            volume_step: 5,
            poll_interval: Duration::from_secs(1),
            idle_hide: Duration::from_secs(3),
            theme: Theme::default(),
        }
    }
}

impl From<&Config> for ReviewOptions {
    fn from(config: &Config) -> Self {
        Self {
            autoplay: config.autoplay,
            seek_step: config.seek_step_secs,
            volume_step: config.volume_step,
            poll_interval: Duration::from_secs(config.poll_interval_secs),
            idle_hide: Duration::from_secs(config.idle_hide_secs),
            theme: Theme::by_name(&config.theme),
        }
    }
}

/// What a finished session reports back to the CLI.
#[derive(Debug)]
pub struct ReviewSummary {
    pub markers_added: usize,
    pub path: PathBuf,
}

/// One open review: playback mirror, markers, form and chrome state.
pub struct ReviewSession<E: PlaybackEngine> {
    pub(crate) controller: PlaybackController<E>,
    pub(crate) timeline: MarkerTimeline,
    pub(crate) controls: ControlsVisibility,
    /// Some while the marker form is open.
    pub(crate) editor: Option<MarkerEditor>,
    pub(crate) show_help: bool,
    pub(crate) status: Option<StatusNote>,
    pub(crate) video: VideoMeta,
    pub(crate) theme: Theme,
    pub(crate) volume_step: i16,
    sink: Box<dyn MarkerSink>,
    markers_added: usize,
}

impl<E: PlaybackEngine> ReviewSession<E> {
    /// Assemble a session around an engine and the session file's
    /// markers. The engine's ready event arrives on the first tick.
    pub fn new(
        engine: E,
        video: VideoMeta,
        markers: Vec<Marker>,
        sink: Box<dyn MarkerSink>,
        options: ReviewOptions,
    ) -> Self {
        let controller = PlaybackController::new(
            engine,
            ControllerOptions {
                autoplay: options.autoplay,
                seek_step: options.seek_step,
                poll_interval: options.poll_interval,
            },
        );

        Self {
            controller,
            timeline: MarkerTimeline::from_markers(markers),
            controls: ControlsVisibility::new(options.idle_hide, Instant::now()),
            editor: None,
            show_help: false,
            status: None,
            video,
            theme: options.theme,
            volume_step: options.volume_step,
            sink,
            markers_added: 0,
        }
    }

    /// Markers created during this session (not the loaded ones).
    pub fn markers_added(&self) -> usize {
        self.markers_added
    }

    /// Advance timers: engine mirror and control-surface idle.
    pub fn tick(&mut self, now: Instant) {
        self.controller.tick(now);
        self.controls.tick(now);
    }

    /// Open the marker form at the exact playhead time, pausing
    /// playback. Inert until the engine is ready.
    pub fn open_marker_form(&mut self) {
        if !self.controller.is_ready() || self.editor.is_some() {
            return;
        }
        let time = self.controller.exact_current_time();
        self.editor = Some(MarkerEditor::new(time));
        self.status = None;
    }

    /// Discard the form without saving.
    pub fn close_marker_form(&mut self) {
        self.editor = None;
    }

    /// Validate the form; on success append to the timeline, hand the
    /// marker to the sink and reset the form for the next entry.
    ///
    /// The timeline keeps the marker even when the save fails; the
    /// failure only surfaces as a status note.
    pub fn submit_marker_form(&mut self) {
        let duration = self.controller.duration();
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        let Some(draft) = editor.submit(duration) else {
            return;
        };

        match draft.into_marker(duration) {
            Ok(marker) => {
                let saved = self.timeline.add(marker);
                self.markers_added += 1;

                match self.sink.save(saved) {
                    Ok(()) => {
                        self.status = Some(StatusNote::info(format!(
                            "marker saved at {}",
                            format_timestamp(saved.time)
                        )));
                    }
                    Err(e) => {
                        warn!(error = %e, "marker save failed");
                        self.status =
                            Some(StatusNote::error(format!("save failed: {:#}", e)));
                    }
                }

                let time = self.controller.current_time();
                if let Some(editor) = self.editor.as_mut() {
                    editor.reset(time);
                }
            }
            Err(e) => {
                if let Some(editor) = self.editor.as_mut() {
                    editor.error = Some(e.to_string());
                }
            }
        }
    }

    /// Seek to the next marker after the playhead.
    pub fn jump_next_marker(&mut self) {
        let target = self
            .timeline
            .next_after(self.controller.current_time())
            .map(|m| m.time);
        if let Some(time) = target {
            self.controller.seek_to(time);
        }
    }

    /// Seek to the previous marker before the playhead.
    pub fn jump_prev_marker(&mut self) {
        let target = self
            .timeline
            .prev_before(self.controller.current_time())
            .map(|m| m.time);
        if let Some(time) = target {
            self.controller.seek_to(time);
        }
    }

    /// Resolve a click on the scrubber: a marker cell jumps exactly to
    /// the marker, anywhere else maps the cell back to a timestamp.
    pub(crate) fn click_scrubber(&mut self, cell: usize, width: usize) {
        let duration = self.controller.duration();
        let sorted = self.timeline.sorted_by_time();
        let target = match scrubber::marker_at_cell(cell, width, duration, &sorted) {
            Some(marker) => marker.time,
            None => scrubber::time_for_cell(cell, width, duration),
        };
        self.controller.seek_to(target);
    }

    /// Tear the session down. Idempotent.
    pub fn close(&mut self) {
        self.controller.close();
    }
}

/// Terminal guard: raw mode + alternate screen + mouse capture, with an
/// idempotent restore that also runs on drop.
#[cfg(not(tarpaulin_include))]
struct Tui {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    restored: bool,
}

#[cfg(not(tarpaulin_include))]
impl Tui {
    fn new() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture, cursor::Hide)
            .context("Failed to enter alternate screen")?;
        let terminal =
            Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")?;
        Ok(Self {
            terminal,
            restored: false,
        })
    }

    fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode().context("Failed to disable raw mode")?;
        crossterm::execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            cursor::Show
        )
        .context("Failed to leave alternate screen")?;
        Ok(())
    }
}

#[cfg(not(tarpaulin_include))]
impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Open a `.marks` file and run the interactive review session.
pub fn run_review(path: &Path, config: &Config) -> Result<ReviewSummary> {
    let file = SessionFile::parse(path)?;
    info!(path = ?path, markers = file.markers.len(), "opening review session");

    let engine = ClockEngine::new(file.header.video.duration);
    let sink = Box::new(SessionFileSink::new(path));
    let mut session = ReviewSession::new(
        engine,
        file.header.video.clone(),
        file.markers,
        sink,
        ReviewOptions::from(config),
    );

    let result = run_loop(&mut session);
    session.close();

    let summary = ReviewSummary {
        markers_added: session.markers_added(),
        path: path.to_path_buf(),
    };
    info!(added = summary.markers_added, "review session closed");

    result.map(|_| summary)
}

#[cfg(not(tarpaulin_include))]
fn run_loop<E: PlaybackEngine>(session: &mut ReviewSession<E>) -> Result<()> {
    let mut tui = Tui::new()?;

    loop {
        session.tick(Instant::now());

        let size = tui.terminal.size().context("Failed to read terminal size")?;
        let screen = Rect::new(0, 0, size.width, size.height);

        tui.terminal.draw(|f| render::draw(f, session))?;

        if event::poll(TICK).context("Failed to poll input")? {
            match event::read().context("Failed to read input")? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if input::keyboard::handle_key_event(key, session) == InputResult::Quit {
                        break;
                    }
                }
                Event::Mouse(mouse) => {
                    input::mouse::handle_mouse_event(mouse, session, screen);
                }
                _ => {}
            }
        }
    }

    tui.restore()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MarkerKind;
    use anyhow::bail;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent,
                           MouseEventKind};
    use input::keyboard::handle_key_event;
    use input::mouse::handle_mouse_event;
    use std::sync::{Arc, Mutex};

    struct MemorySink {
        saved: Arc<Mutex<Vec<Marker>>>,
        fail: bool,
    }

    impl MarkerSink for MemorySink {
        fn save(&mut self, marker: &Marker) -> Result<()> {
            if self.fail {
                bail!("disk full");
            }
            self.saved.lock().unwrap().push(marker.clone());
            Ok(())
        }
    }

    fn test_session_with(
        duration: f64,
        fail_saves: bool,
    ) -> (ReviewSession<ClockEngine>, Arc<Mutex<Vec<Marker>>>) {
        let saved = Arc::new(Mutex::new(Vec::new()));
        let sink = Box::new(MemorySink {
            saved: saved.clone(),
            fail: fail_saves,
        });
        let video = VideoMeta {
            title: "Scrim vs Northern Lights".to_string(),
            source: None,
            duration,
        };
        let mut session = ReviewSession::new(
            ClockEngine::new(duration),
            video,
            Vec::new(),
            sink,
            ReviewOptions::default(),
        );
        // Deliver the engine's ready event
        session.tick(Instant::now());
        (session, saved)
    }

    fn test_session(duration: f64) -> (ReviewSession<ClockEngine>, Arc<Mutex<Vec<Marker>>>) {
        test_session_with(duration, false)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(session: &mut ReviewSession<ClockEngine>, text: &str) {
        for c in text.chars() {
            handle_key_event(key(KeyCode::Char(c)), session);
        }
    }

    #[test]
    fn opening_the_form_pauses_at_the_playhead() {
        let (mut session, _) = test_session(2700.0);
        session.controller.seek_to(125.0);
        session.controller.toggle_play_pause();

        handle_key_event(key(KeyCode::Char('m')), &mut session);
        assert!(session.editor.is_some());
        assert!(!session.controller.is_playing());
        assert_eq!(session.editor.as_ref().unwrap().time_text, "02:05");
    }

    #[test]
    fn full_marker_entry_flow_saves_and_resets() {
        let (mut session, saved) = test_session(2700.0);
        session.controller.seek_to(125.0);

        handle_key_event(key(KeyCode::Char('m')), &mut session);
        type_text(&mut session, "Missed smoke");
        handle_key_event(key(KeyCode::Tab), &mut session);
        type_text(&mut session, "Mid smoke landed short");
        handle_key_event(key(KeyCode::Enter), &mut session);

        assert_eq!(session.timeline.len(), 1);
        assert_eq!(session.markers_added(), 1);
        let stored = saved.lock().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title, "Missed smoke");
        assert_eq!(stored[0].time, 125.0);
        drop(stored);

        // Form stays open, cleared and reprimed with the playhead time
        let editor = session.editor.as_ref().unwrap();
        assert!(editor.title.is_empty());
        assert_eq!(editor.time_text, "02:05");
        assert!(session.status.as_ref().is_some_and(|s| !s.error));
    }

    #[test]
    fn empty_title_is_rejected_without_a_save() {
        let (mut session, saved) = test_session(600.0);
        handle_key_event(key(KeyCode::Char('m')), &mut session);
        handle_key_event(key(KeyCode::Enter), &mut session);

        assert_eq!(session.timeline.len(), 0);
        assert!(saved.lock().unwrap().is_empty());
        let editor = session.editor.as_ref().unwrap();
        assert_eq!(editor.error.as_deref(), Some("title must not be empty"));
    }

    #[test]
    fn failed_save_keeps_the_optimistic_marker() {
        let (mut session, saved) = test_session_with(600.0, true);
        handle_key_event(key(KeyCode::Char('m')), &mut session);
        type_text(&mut session, "t");
        handle_key_event(key(KeyCode::Tab), &mut session);
        type_text(&mut session, "d");
        handle_key_event(key(KeyCode::Enter), &mut session);

        assert_eq!(session.timeline.len(), 1);
        assert!(saved.lock().unwrap().is_empty());
        assert!(session.status.as_ref().is_some_and(|s| s.error));
    }

    #[test]
    fn form_captures_transport_keys() {
        let (mut session, _) = test_session(600.0);
        handle_key_event(key(KeyCode::Char('m')), &mut session);

        // 'q' types into the title instead of quitting
        let result = handle_key_event(key(KeyCode::Char('q')), &mut session);
        assert_eq!(result, InputResult::Continue);
        assert_eq!(session.editor.as_ref().unwrap().title, "q");

        // Space types too, playback stays paused
        handle_key_event(key(KeyCode::Char(' ')), &mut session);
        assert!(!session.controller.is_playing());
    }

    #[test]
    fn escape_closes_the_form_before_quitting() {
        let (mut session, _) = test_session(600.0);
        handle_key_event(key(KeyCode::Char('m')), &mut session);

        let result = handle_key_event(key(KeyCode::Esc), &mut session);
        assert_eq!(result, InputResult::Continue);
        assert!(session.editor.is_none());

        let result = handle_key_event(key(KeyCode::Esc), &mut session);
        assert_eq!(result, InputResult::Quit);
    }

    #[test]
    fn kind_cycles_with_arrows_in_the_form() {
        let (mut session, _) = test_session(600.0);
        handle_key_event(key(KeyCode::Char('m')), &mut session);

        // Focus the kind selector: Title -> Description -> Kind
        handle_key_event(key(KeyCode::Tab), &mut session);
        handle_key_event(key(KeyCode::Tab), &mut session);
        handle_key_event(key(KeyCode::Right), &mut session);

        assert_eq!(session.editor.as_ref().unwrap().kind, MarkerKind::Error);
    }

    #[test]
    fn added_error_marker_renders_on_the_scrubber_and_is_clickable() {
        let (mut session, _) = test_session(100.0);
        session.controller.seek_to(50.0);

        session.open_marker_form();
        {
            let editor = session.editor.as_mut().unwrap();
            editor.title = "Lost duel".to_string();
            editor.description = "Overpeeked mid".to_string();
            editor.kind = MarkerKind::Error;
        }
        session.submit_marker_form();
        session.controller.seek_to(0.0);

        let width = 10;
        let sorted = session.timeline.sorted_by_time();
        let cells = scrubber::build_scrubber_cells(width, 0.0, 100.0, &sorted);
        assert_eq!(cells[5], scrubber::ScrubCell::Marker(MarkerKind::Error));
        drop(sorted);

        session.click_scrubber(5, width);
        assert_eq!(session.controller.current_time(), 50.0);
    }

    #[test]
    fn scrubber_click_outside_markers_seeks_by_ratio() {
        let (mut session, _) = test_session(100.0);
        session.click_scrubber(5, 10);
        assert_eq!(session.controller.current_time(), 50.0);
    }

    #[test]
    fn marker_navigation_keys_jump_between_markers() {
        let (mut session, _) = test_session(600.0);
        for (time, title) in [(30.0, "a"), (125.0, "b")] {
            session.controller.seek_to(time);
            session.open_marker_form();
            {
                let editor = session.editor.as_mut().unwrap();
                editor.title = title.to_string();
                editor.description = "d".to_string();
            }
            session.submit_marker_form();
            session.close_marker_form();
        }

        session.controller.seek_to(0.0);
        handle_key_event(key(KeyCode::Char('n')), &mut session);
        assert_eq!(session.controller.current_time(), 30.0);
        handle_key_event(key(KeyCode::Char('n')), &mut session);
        assert_eq!(session.controller.current_time(), 125.0);
        handle_key_event(key(KeyCode::Char('p')), &mut session);
        assert_eq!(session.controller.current_time(), 30.0);
    }

    #[test]
    fn help_overlay_swallows_the_next_key() {
        let (mut session, _) = test_session(600.0);
        handle_key_event(key(KeyCode::Char('?')), &mut session);
        assert!(session.show_help);

        // Any key closes the overlay without acting
        let result = handle_key_event(key(KeyCode::Char('q')), &mut session);
        assert_eq!(result, InputResult::Continue);
        assert!(!session.show_help);
        assert!(session.editor.is_none());
    }

    #[test]
    fn mouse_activity_revives_hidden_controls() {
        let (mut session, _) = test_session(600.0);
        let start = Instant::now();
        session.controls.tick(start + Duration::from_secs(10));
        assert!(!session.controls.is_visible());

        let event = MouseEvent {
            kind: MouseEventKind::Moved,
            column: 5,
            row: 5,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse_event(event, &mut session, Rect::new(0, 0, 80, 24));
        assert!(session.controls.is_visible());
    }

    #[test]
    fn scrubber_click_via_mouse_event_seeks() {
        let (mut session, _) = test_session(100.0);
        let screen = Rect::new(0, 0, 80, 24);
        let geometry = render::scrubber_geometry(screen).unwrap();

        let event = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: geometry.x + geometry.width / 2,
            row: geometry.row,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse_event(event, &mut session, screen);

        assert!((session.controller.current_time() - 50.0).abs() < 2.0);
    }

    #[test]
    fn clicks_off_the_scrubber_row_do_not_seek() {
        let (mut session, _) = test_session(100.0);
        let event = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 10,
            row: 2,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse_event(event, &mut session, Rect::new(0, 0, 80, 24));
        assert_eq!(session.controller.current_time(), 0.0);
    }

    #[test]
    fn close_is_idempotent_and_late_ticks_do_nothing() {
        let (mut session, _) = test_session(600.0);
        session.controller.seek_to(42.0);
        session.close();
        session.close();

        session.tick(Instant::now() + Duration::from_secs(5));
        assert_eq!(session.controller.current_time(), 42.0);
        assert!(session.controller.is_closed());

        handle_key_event(key(KeyCode::Char(' ')), &mut session);
        assert!(!session.controller.is_playing());
    }

    #[test]
    fn volume_keys_step_and_clamp() {
        let (mut session, _) = test_session(600.0);
        handle_key_event(key(KeyCode::Up), &mut session);
        assert_eq!(session.controller.volume(), 100);

        handle_key_event(key(KeyCode::Down), &mut session);
        handle_key_event(key(KeyCode::Down), &mut session);
        assert_eq!(session.controller.volume(), 90);
    }

    #[test]
    fn rate_keys_step_through_the_supported_set() {
        let (mut session, _) = test_session(600.0);
        handle_key_event(key(KeyCode::Char('+')), &mut session);
        assert_eq!(session.controller.playback_rate(), 1.25);
        handle_key_event(key(KeyCode::Char('-')), &mut session);
        handle_key_event(key(KeyCode::Char('-')), &mut session);
        assert_eq!(session.controller.playback_rate(), 0.75);
    }
}
