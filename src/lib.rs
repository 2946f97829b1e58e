//! VOR - VOD review sessions with timestamped coaching markers.
//!
//! The library side of the `vor` binary: the playback engine seam and
//! its wall-clock implementation, the review session (controller,
//! marker timeline, entry form, rendering, input routing), the `.marks`
//! session file format and configuration.

pub mod config;
pub mod engine;
pub mod review;
pub mod session;
pub mod theme;

pub use config::Config;
pub use session::{Marker, MarkerDraft, MarkerKind, SessionFile};
