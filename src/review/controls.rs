//! Control-surface visibility.
//!
//! The transport chrome (scrubber, controls line, key hints) hides after
//! a few seconds without pointer activity and comes back on the next
//! move. The timer is independent of play/pause state.

use std::time::{Duration, Instant};

/// Idle-driven visibility for the control surface.
#[derive(Debug)]
pub struct ControlsVisibility {
    visible: bool,
    /// When the surface hides. None while already hidden.
    hide_at: Option<Instant>,
    delay: Duration,
}

impl ControlsVisibility {
    /// Start visible, with the hide timer already running.
    pub fn new(delay: Duration, now: Instant) -> Self {
        Self {
            visible: true,
            hide_at: Some(now + delay),
            delay,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Pointer activity: show the surface and restart the timer.
    pub fn note_activity(&mut self, now: Instant) {
        self.visible = true;
        self.hide_at = Some(now + self.delay);
    }

    /// Advance the timer; hides the surface once the deadline passes.
    pub fn tick(&mut self, now: Instant) {
        if let Some(at) = self.hide_at {
            if now >= at {
                self.visible = false;
                self.hide_at = None;
            }
        }
    }
}
