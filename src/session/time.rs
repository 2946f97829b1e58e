//! Clock formatting and parsing for review timestamps.

/// Format seconds as MM:SS.
///
/// Minutes are not wrapped at the hour, so 3661 seconds renders as
/// "61:01". Matches how review timestamps are spoken in a coaching room.
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let minutes = total / 60;
    let secs = total % 60;
    format!("{:02}:{:02}", minutes, secs)
}

/// Parse a strict `mm:ss` clock string.
///
/// Expects exactly two colon-separated integer parts. Returns None for
/// anything else; callers decide their own fallback.
pub fn parse_clock(text: &str) -> Option<u32> {
    let mut parts = text.trim().split(':');
    let minutes: u32 = parts.next()?.trim().parse().ok()?;
    let seconds: u32 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    minutes.checked_mul(60)?.checked_add(seconds)
}
