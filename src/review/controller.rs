//! Playback control and engine mirroring.
//!
//! `PlaybackController` wraps a `PlaybackEngine` and keeps a mirror of
//! its state for rendering. The engine is authoritative: user commands
//! update the mirror optimistically for a snappy UI, and engine events
//! drained on every tick reconcile the mirror afterwards. Position
//! sampling runs on a poll deadline that exists only while the mirror is
//! in the Playing phase.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::engine::{is_supported_rate, next_rate, prev_rate, EngineEvent, EngineState,
                    PlaybackEngine};

/// Top-level playback phase mirrored from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    /// Engine has not signalled ready; every control is inert.
    Unready,
    Paused,
    Playing,
}

/// Tuning for a controller, sourced from config.
#[derive(Debug, Clone, Copy)]
pub struct ControllerOptions {
    /// Start playing as soon as the engine reports ready.
    pub autoplay: bool,
    /// Seconds moved by one skip.
    pub seek_step: f64,
    /// How often the live position is sampled while playing.
    pub poll_interval: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            autoplay: false,
            seek_step: 10.0,
            poll_interval: Duration::from_secs(1),
        }
    }
}

/// Drives a playback engine and mirrors its state.
#[derive(Debug)]
pub struct PlaybackController<E: PlaybackEngine> {
    engine: E,
    options: ControllerOptions,

    // === Engine mirror ===
    phase: PlaybackPhase,
    current_time: f64,
    duration: f64,
    volume: u8,
    muted: bool,
    rate: f64,

    /// Next position sample. Armed only while Playing.
    next_poll: Option<Instant>,
    /// Set once by close(); everything afterwards is a no-op.
    closed: bool,
}

impl<E: PlaybackEngine> PlaybackController<E> {
    /// Wrap an engine. The controller stays in the Unready phase until
    /// the engine's ready event arrives through `tick`.
    pub fn new(engine: E, options: ControllerOptions) -> Self {
        Self {
            engine,
            options,
            phase: PlaybackPhase::Unready,
            current_time: 0.0,
            duration: 0.0,
            volume: 100,
            muted: false,
            rate: 1.0,
            next_poll: None,
            closed: false,
        }
    }

    // === Accessors ===

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase != PlaybackPhase::Unready
    }

    pub fn is_playing(&self) -> bool {
        self.phase == PlaybackPhase::Playing
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Last sampled playback position in seconds.
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn playback_rate(&self) -> f64 {
        self.rate
    }

    pub fn seek_step(&self) -> f64 {
        self.options.seek_step
    }

    fn can_control(&self) -> bool {
        !self.closed && self.phase != PlaybackPhase::Unready
    }

    // === Event pump ===

    /// Drain engine events and run the position poll.
    ///
    /// Call once per UI loop iteration. Engine-originated state always
    /// wins over whatever the mirror assumed in the meantime.
    pub fn tick(&mut self, now: Instant) {
        if self.closed {
            return;
        }

        for event in self.engine.poll_events() {
            self.apply_engine_event(event, now);
        }

        if self.phase == PlaybackPhase::Playing {
            if let Some(at) = self.next_poll {
                if now >= at {
                    self.current_time = self.engine.current_time();
                    self.next_poll = Some(now + self.options.poll_interval);
                }
            }
        }
    }

    fn apply_engine_event(&mut self, event: EngineEvent, now: Instant) {
        match event {
            EngineEvent::Ready { duration, volume } => {
                self.duration = duration.max(0.0);
                self.volume = volume.min(100);
                self.current_time = 0.0;
                debug!(duration = self.duration, "engine ready");
                if self.options.autoplay {
                    self.engine.play();
                    self.set_phase(PlaybackPhase::Playing, now);
                } else {
                    self.set_phase(PlaybackPhase::Paused, now);
                }
            }
            EngineEvent::StateChange(state) => self.apply_engine_state(state, now),
        }
    }

    fn apply_engine_state(&mut self, state: EngineState, now: Instant) {
        match state {
            EngineState::Playing => self.set_phase(PlaybackPhase::Playing, now),
            EngineState::Paused => self.set_phase(PlaybackPhase::Paused, now),
            EngineState::Ended => {
                self.current_time = self.duration;
                self.set_phase(PlaybackPhase::Paused, now);
            }
            // Position holds during buffering; the phase stays put
            EngineState::Buffering => {}
            EngineState::Cued => {
                if self.is_ready() {
                    self.set_phase(PlaybackPhase::Paused, now);
                }
            }
            EngineState::Unstarted => {}
        }
    }

    fn set_phase(&mut self, phase: PlaybackPhase, now: Instant) {
        if self.phase != phase {
            debug!(?phase, "playback phase");
        }
        self.phase = phase;
        if phase == PlaybackPhase::Playing {
            if self.next_poll.is_none() {
                self.next_poll = Some(now + self.options.poll_interval);
            }
        } else {
            self.next_poll = None;
        }
    }

    // === Transport ===

    /// Flip between playing and paused. Inert before ready and after
    /// close; the engine's own events settle the final word.
    pub fn toggle_play_pause(&mut self) {
        if !self.can_control() {
            return;
        }
        match self.phase {
            PlaybackPhase::Playing => {
                self.engine.pause();
                self.set_phase(PlaybackPhase::Paused, Instant::now());
            }
            PlaybackPhase::Paused => {
                self.engine.play();
                self.set_phase(PlaybackPhase::Playing, Instant::now());
            }
            PlaybackPhase::Unready => {}
        }
    }

    /// Jump to an absolute position, clamped to `[0, duration]`.
    ///
    /// The mirror updates optimistically so the scrubber lands on the
    /// target immediately; the next poll reconciles any drift.
    pub fn seek_to(&mut self, seconds: f64) {
        if !self.can_control() || !seconds.is_finite() {
            return;
        }
        let clamped = seconds.clamp(0.0, self.duration);
        self.engine.seek_to(clamped, true);
        self.current_time = clamped;
    }

    /// Skip forward by the configured seek step.
    pub fn skip_forward(&mut self) {
        self.seek_to(self.current_time + self.options.seek_step);
    }

    /// Skip backward by the configured seek step.
    pub fn skip_backward(&mut self) {
        self.seek_to(self.current_time - self.options.seek_step);
    }

    // === Audio ===

    /// Set the volume, clamped to `[0, 100]`. Volume 0 counts as muted.
    pub fn set_volume(&mut self, volume: i16) {
        if !self.can_control() {
            return;
        }
        let clamped = volume.clamp(0, 100) as u8;
        self.engine.set_volume(clamped);
        self.volume = clamped;
        self.muted = clamped == 0;
    }

    /// Nudge the volume by a signed step.
    pub fn change_volume(&mut self, delta: i16) {
        self.set_volume(self.volume as i16 + delta);
    }

    /// Toggle mute. Unmuting restores the volume from the engine's
    /// reported value rather than a cached copy.
    pub fn toggle_mute(&mut self) {
        if !self.can_control() {
            return;
        }
        if self.muted {
            self.engine.unmute();
            self.volume = self.engine.volume().min(100);
            self.muted = false;
        } else {
            self.engine.mute();
            self.muted = true;
        }
    }

    // === Rate ===

    /// Set the playback rate. Values outside the supported set are
    /// ignored and the current rate stays in force.
    pub fn set_playback_rate(&mut self, rate: f64) {
        if !self.can_control() {
            return;
        }
        if !is_supported_rate(rate) {
            debug!(rate, "ignoring unsupported playback rate");
            return;
        }
        self.engine.set_playback_rate(rate);
        self.rate = rate;
    }

    /// Step to the next faster supported rate.
    pub fn rate_up(&mut self) {
        self.set_playback_rate(next_rate(self.rate));
    }

    /// Step to the next slower supported rate.
    pub fn rate_down(&mut self) {
        self.set_playback_rate(prev_rate(self.rate));
    }

    // === Marker support ===

    /// Read the engine's live position and pause playback.
    ///
    /// Used when the marker form opens: the marker should pin the frame
    /// on screen right now, not the last poll sample.
    pub fn exact_current_time(&mut self) -> f64 {
        if !self.can_control() {
            return self.current_time;
        }
        let time = self.engine.current_time();
        self.engine.pause();
        self.current_time = time;
        self.set_phase(PlaybackPhase::Paused, Instant::now());
        time
    }

    // === Teardown ===

    /// Shut the controller down. Idempotent; once closed, ticks and
    /// commands are no-ops and no further engine events are processed.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.next_poll = None;
        self.engine.pause();
        debug!("playback controller closed");
    }
}
