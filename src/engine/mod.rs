//! Video engine abstraction.
//!
//! The review screen never talks to a concrete video backend directly.
//! Everything goes through the `PlaybackEngine` trait: commands flow in
//! (play, pause, seek, volume, rate) and notifications flow back out as
//! `EngineEvent`s drained via `poll_events`. The engine is the source of
//! truth for playback state; callers keep a mirror and reconcile it from
//! the event stream.
//!
//! The shipped implementation is [`ClockEngine`], a wall-clock timebase
//! that stands in for an embedded player so a review session can run
//! alongside a VOD playing in any external viewer.

pub mod clock;

pub use clock::ClockEngine;

/// Playback rates the engine accepts, in ascending order.
pub const PLAYBACK_RATES: [f64; 6] = [0.5, 0.75, 1.0, 1.25, 1.5, 2.0];

/// Check a rate against the fixed set of supported playback rates.
pub fn is_supported_rate(rate: f64) -> bool {
    PLAYBACK_RATES.contains(&rate)
}

/// Next faster rate in the supported set, saturating at the fastest.
pub fn next_rate(rate: f64) -> f64 {
    PLAYBACK_RATES
        .iter()
        .copied()
        .find(|&r| r > rate)
        .unwrap_or(PLAYBACK_RATES[PLAYBACK_RATES.len() - 1])
}

/// Next slower rate in the supported set, saturating at the slowest.
pub fn prev_rate(rate: f64) -> f64 {
    PLAYBACK_RATES
        .iter()
        .rev()
        .copied()
        .find(|&r| r < rate)
        .unwrap_or(PLAYBACK_RATES[0])
}

/// Raw playback state as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Loaded but playback never started.
    Unstarted,
    /// Playback ran off the end of the video.
    Ended,
    Playing,
    Paused,
    /// Engine is waiting on data; position does not advance.
    Buffering,
    /// A video is cued and ready to start.
    Cued,
}

/// Asynchronous notification from the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The engine finished loading: duration and initial volume are known.
    Ready { duration: f64, volume: u8 },
    /// The engine's playback state changed.
    StateChange(EngineState),
}

/// A video playback backend.
///
/// Commands are fire-and-forget: the engine applies them on its own time
/// and reports the outcome through `poll_events`. Getters return the
/// engine's live values, which may be ahead of any mirror kept by the
/// caller.
pub trait PlaybackEngine {
    /// Start or resume playback. After the video has ended this restarts
    /// from the beginning.
    fn play(&mut self);

    /// Pause playback, holding the current position.
    fn pause(&mut self);

    /// Jump to an absolute position in seconds.
    ///
    /// `allow_seek_ahead` mirrors embedded-player APIs where seeking past
    /// the buffered range is an explicit choice. Engines without a buffer
    /// ignore it.
    fn seek_to(&mut self, seconds: f64, allow_seek_ahead: bool);

    /// Set the volume (0-100). Values above 100 are clamped by the engine.
    fn set_volume(&mut self, volume: u8);

    /// Silence output without touching the volume value.
    fn mute(&mut self);

    /// Restore audible output at the engine's current volume value.
    fn unmute(&mut self);

    /// Set the playback rate. Engines may ignore unsupported values.
    fn set_playback_rate(&mut self, rate: f64);

    /// Live playback position in seconds.
    fn current_time(&self) -> f64;

    /// Total video duration in seconds.
    fn duration(&self) -> f64;

    /// The engine's volume value (0-100). Unchanged by mute.
    fn volume(&self) -> u8;

    /// Drain pending notifications, oldest first.
    fn poll_events(&mut self) -> Vec<EngineEvent>;
}
