//! Wall-clock playback engine.
//!
//! `ClockEngine` keeps review time with a monotonic clock instead of an
//! embedded video surface. Play starts the clock, pause freezes it, seeks
//! move the base position, and the playback rate scales elapsed wall time.
//! The coach lines it up with a VOD playing in any external viewer and the
//! scrubber stays in sync.

use std::time::Instant;

use super::{EngineEvent, EngineState, PlaybackEngine};

/// Volume reported before anyone touches the slider.
const DEFAULT_VOLUME: u8 = 100;

/// In-process playback timebase.
///
/// Emits `Ready` once on creation and `StateChange` events as commands
/// land, so callers see the same notification flow an embedded player
/// would produce.
#[derive(Debug)]
pub struct ClockEngine {
    duration: f64,
    volume: u8,
    muted: bool,
    rate: f64,
    /// Position at the last play/pause/seek/rate change.
    base_position: f64,
    /// When playback resumed. None while paused or ended.
    resumed_at: Option<Instant>,
    ended: bool,
    pending: Vec<EngineEvent>,
}

impl ClockEngine {
    /// Create an engine for a video of `duration` seconds.
    pub fn new(duration: f64) -> Self {
        let duration = duration.max(0.0);
        Self {
            duration,
            volume: DEFAULT_VOLUME,
            muted: false,
            rate: 1.0,
            base_position: 0.0,
            resumed_at: None,
            pending: vec![EngineEvent::Ready {
                duration,
                volume: DEFAULT_VOLUME,
            }],
            ended: false,
        }
    }

    /// Whether the clock is currently running.
    pub fn is_running(&self) -> bool {
        self.resumed_at.is_some()
    }

    /// Whether output is muted. The volume value is kept through mute.
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    fn position_now(&self) -> f64 {
        let elapsed = self
            .resumed_at
            .map(|at| at.elapsed().as_secs_f64() * self.rate)
            .unwrap_or(0.0);
        (self.base_position + elapsed).clamp(0.0, self.duration)
    }

    /// Shift the running clock into the past, as if `seconds` of playback
    /// had already elapsed.
    #[cfg(test)]
    fn backdate(&mut self, seconds: f64) {
        let at = self.resumed_at.expect("backdate requires a running clock");
        self.resumed_at = Some(
            at.checked_sub(std::time::Duration::from_secs_f64(seconds))
                .expect("backdate beyond clock range"),
        );
    }
}

impl PlaybackEngine for ClockEngine {
    fn play(&mut self) {
        if self.resumed_at.is_some() {
            return;
        }
        if self.ended {
            // Playing a finished video restarts it, matching embedded players
            self.base_position = 0.0;
            self.ended = false;
        }
        self.resumed_at = Some(Instant::now());
        self.pending
            .push(EngineEvent::StateChange(EngineState::Playing));
    }

    fn pause(&mut self) {
        if self.resumed_at.is_none() {
            return;
        }
        self.base_position = self.position_now();
        self.resumed_at = None;
        self.pending
            .push(EngineEvent::StateChange(EngineState::Paused));
    }

    fn seek_to(&mut self, seconds: f64, _allow_seek_ahead: bool) {
        self.base_position = seconds.clamp(0.0, self.duration);
        if self.resumed_at.is_some() {
            self.resumed_at = Some(Instant::now());
        }
        if self.ended && self.base_position < self.duration {
            self.ended = false;
        }
    }

    fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(100);
    }

    fn mute(&mut self) {
        self.muted = true;
    }

    fn unmute(&mut self) {
        self.muted = false;
    }

    fn set_playback_rate(&mut self, rate: f64) {
        if rate <= 0.0 {
            return;
        }
        // Rebase so the new rate applies from here, not retroactively
        self.base_position = self.position_now();
        if self.resumed_at.is_some() {
            self.resumed_at = Some(Instant::now());
        }
        self.rate = rate;
    }

    fn current_time(&self) -> f64 {
        self.position_now()
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn volume(&self) -> u8 {
        self.volume
    }

    fn poll_events(&mut self) -> Vec<EngineEvent> {
        if self.resumed_at.is_some() && self.duration > 0.0 && self.position_now() >= self.duration
        {
            self.base_position = self.duration;
            self.resumed_at = None;
            self.ended = true;
            self.pending
                .push(EngineEvent::StateChange(EngineState::Ended));
        }
        std::mem::take(&mut self.pending)
    }
}
