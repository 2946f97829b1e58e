//! Input handling for the review screen.

pub mod keyboard;
pub mod mouse;

/// Result of processing an input event.
///
/// Returned by input handlers to signal control flow decisions to the
/// session loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Keep the session running
    Continue,
    /// Close the review session
    Quit,
}
