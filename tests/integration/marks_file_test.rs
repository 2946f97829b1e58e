//! Tests for the `.marks` session file format through the public API.

use vor::session::{MarkerDraft, MarkerKind, VideoMeta};
use vor::SessionFile;

use crate::helpers::sample_session_text;

fn draft(time: f64, title: &str, kind: MarkerKind) -> MarkerDraft {
    MarkerDraft {
        time,
        title: title.to_string(),
        description: "what happened".to_string(),
        kind: Some(kind),
        player: None,
        category: None,
    }
}

// ============================================================================
// Wire Format Tests
// ============================================================================

#[test]
fn parses_the_documented_format() {
    let file = SessionFile::parse_str(&sample_session_text()).unwrap();

    assert_eq!(file.header.version, 1);
    assert_eq!(file.header.video.title, "Scrim vs Northern Lights");
    assert_eq!(file.header.video.duration, 2700.0);

    assert_eq!(file.markers.len(), 2);
    assert_eq!(file.markers[0].kind, MarkerKind::Error);
    assert_eq!(file.markers[1].player.as_deref(), Some("jax"));
    assert_eq!(file.markers[1].category.as_deref(), Some("macro"));
}

#[test]
fn written_sessions_parse_back_identically() {
    let mut file = SessionFile::new(VideoMeta {
        title: "Playoffs day 1".to_string(),
        source: None,
        duration: 1800.0,
    });
    for (time, title, kind) in [
        (300.0, "Overextended top", MarkerKind::Error),
        (90.0, "Clean trade", MarkerKind::Success),
    ] {
        file.markers.push(draft(time, title, kind).into_marker(1800.0).unwrap());
    }

    let mut buffer = Vec::new();
    file.write_to(&mut buffer).unwrap();
    let reparsed = SessionFile::parse_str(std::str::from_utf8(&buffer).unwrap()).unwrap();

    assert_eq!(reparsed.header.video.title, file.header.video.title);
    assert_eq!(reparsed.markers, file.markers);
}

#[test]
fn optional_fields_are_omitted_from_the_file() {
    let marker = draft(10.0, "t", MarkerKind::Important)
        .into_marker(100.0)
        .unwrap();
    let json = marker.to_json().unwrap();

    assert!(!json.contains("player"));
    assert!(!json.contains("category"));
}

#[test]
fn markers_keep_creation_order_in_storage() {
    let file = SessionFile::parse_str(&sample_session_text()).unwrap();

    // File order is creation order: 125s was written before 64s
    assert_eq!(file.markers[0].time, 125.0);
    assert_eq!(file.markers[1].time, 64.0);

    let sorted = file.sorted_by_time();
    assert_eq!(sorted[0].time, 64.0);
    assert_eq!(sorted[1].time, 125.0);
}

#[test]
fn appended_marker_lines_parse_on_reload() {
    let mut content = sample_session_text();
    let late = draft(2650.0, "Base race call", MarkerKind::Strategy)
        .into_marker(2700.0)
        .unwrap();
    content.push_str(&late.to_json().unwrap());
    content.push('\n');

    let file = SessionFile::parse_str(&content).unwrap();
    assert_eq!(file.markers.len(), 3);
    assert_eq!(file.markers[2].title, "Base race call");
}

// ============================================================================
// Rejection Tests
// ============================================================================

#[test]
fn rejects_future_format_versions() {
    let content = sample_session_text().replacen("\"version\":1", "\"version\":2", 1);

    let err = SessionFile::parse_str(&content).unwrap_err();
    assert!(format!("{:#}", err).contains("v1 session files are supported"));
}

#[test]
fn rejects_a_negative_duration() {
    let content = sample_session_text().replacen("2700.0", "-5.0", 1);

    let err = SessionFile::parse_str(&content).unwrap_err();
    assert!(format!("{:#}", err).contains("invalid video duration"));
}

#[test]
fn reports_the_line_of_a_broken_marker() {
    let mut content = sample_session_text();
    content.push_str("{\"broken\":true}\n");

    let err = SessionFile::parse_str(&content).unwrap_err();
    assert!(format!("{:#}", err).contains("line 4"));
}

#[test]
fn rejects_unknown_marker_kinds() {
    let content = sample_session_text().replacen("\"kind\":\"error\"", "\"kind\":\"clutch\"", 1);

    let err = SessionFile::parse_str(&content).unwrap_err();
    assert!(format!("{:#}", err).contains("clutch"));
}

#[test]
fn rejects_an_empty_file() {
    let err = SessionFile::parse_str("").unwrap_err();
    assert!(format!("{:#}", err).contains("empty"));
}
