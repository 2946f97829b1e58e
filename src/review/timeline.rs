//! Marker timeline for the review screen.
//!
//! Holds the session's markers in creation order and answers the
//! questions rendering and navigation ask: where does a timestamp land
//! on the scrubber, which marker comes next, which one is behind the
//! playhead. Time ordering is always computed at the call site view,
//! never baked into storage.

use crate::session::Marker;

/// Tolerance for next/prev navigation so the marker just jumped to is
/// not matched again.
const NAV_EPSILON: f64 = 0.1;

/// Map a timestamp to its percent position along the video.
///
/// Zero-length videos map everything to 0 so layout math stays finite.
pub fn position_for_time(time: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return 0.0;
    }
    (time / duration * 100.0).clamp(0.0, 100.0)
}

/// The session's markers, in creation order.
#[derive(Debug, Default)]
pub struct MarkerTimeline {
    markers: Vec<Marker>,
}

impl MarkerTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a timeline from markers loaded out of a session file.
    pub fn from_markers(markers: Vec<Marker>) -> Self {
        Self { markers }
    }

    /// Markers in creation order.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Append a marker, returning a reference to the stored entry.
    pub fn add(&mut self, marker: Marker) -> &Marker {
        self.markers.push(marker);
        &self.markers[self.markers.len() - 1]
    }

    /// Markers sorted by timestamp, earliest first.
    pub fn sorted_by_time(&self) -> Vec<&Marker> {
        let mut sorted: Vec<&Marker> = self.markers.iter().collect();
        sorted.sort_by(|a, b| a.time.total_cmp(&b.time));
        sorted
    }

    /// The first marker after `time`, for forward navigation.
    pub fn next_after(&self, time: f64) -> Option<&Marker> {
        self.markers
            .iter()
            .filter(|m| m.time > time + NAV_EPSILON)
            .min_by(|a, b| a.time.total_cmp(&b.time))
    }

    /// The last marker before `time`, for backward navigation.
    pub fn prev_before(&self, time: f64) -> Option<&Marker> {
        self.markers
            .iter()
            .filter(|m| m.time < time - NAV_EPSILON)
            .max_by(|a, b| a.time.total_cmp(&b.time))
    }

    /// The most recent marker at or behind the playhead, if any.
    ///
    /// Drives the detail pane and the highlight in the marker list.
    pub fn latest_at_or_before(&self, time: f64) -> Option<&Marker> {
        self.markers
            .iter()
            .filter(|m| m.time <= time)
            .max_by(|a, b| a.time.total_cmp(&b.time))
    }
}
