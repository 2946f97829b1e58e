//! Marker persistence.
//!
//! Saving is handed to a `MarkerSink` so the review screen never blocks
//! on storage details. The timeline keeps its optimistic entry even when
//! a save fails; the failure only surfaces as a status notice.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use super::Marker;

/// Destination for saved markers.
pub trait MarkerSink {
    /// Persist one marker. Called once per successful form submission.
    fn save(&mut self, marker: &Marker) -> Result<()>;
}

/// Appends markers to a `.marks` session file, one JSON line each.
///
/// The file must already exist with a valid header; a vanished file is
/// reported as an error instead of silently recreated without one.
pub struct SessionFileSink {
    path: PathBuf,
}

impl SessionFileSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MarkerSink for SessionFileSink {
    fn save(&mut self, marker: &Marker) -> Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open session file: {:?}", self.path))?;

        writeln!(file, "{}", marker.to_json()?)
            .with_context(|| format!("Failed to append marker to {:?}", self.path))?;

        debug!(path = ?self.path, marker_id = %marker.id, "marker appended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MarkerDraft, MarkerKind, SessionFile, VideoMeta};

    fn draft(time: f64, title: &str) -> MarkerDraft {
        MarkerDraft {
            time,
            title: title.to_string(),
            description: "details".to_string(),
            kind: Some(MarkerKind::Strategy),
            ..Default::default()
        }
    }

    #[test]
    fn appends_markers_to_existing_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scrim.marks");

        let session = SessionFile::new(VideoMeta {
            title: "Scrim".to_string(),
            source: None,
            duration: 600.0,
        });
        session.write(&path).unwrap();

        let mut sink = SessionFileSink::new(&path);
        sink.save(&draft(12.0, "first").into_marker(600.0).unwrap())
            .unwrap();
        sink.save(&draft(48.0, "second").into_marker(600.0).unwrap())
            .unwrap();

        let reloaded = SessionFile::parse(&path).unwrap();
        assert_eq!(reloaded.markers.len(), 2);
        assert_eq!(reloaded.markers[0].title, "first");
        assert_eq!(reloaded.markers[1].title, "second");
    }

    #[test]
    fn save_fails_when_session_file_is_gone() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = SessionFileSink::new(dir.path().join("missing.marks"));
        let marker = draft(1.0, "t").into_marker(10.0).unwrap();
        assert!(sink.save(&marker).is_err());
    }
}
