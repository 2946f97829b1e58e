//! `.marks` review session files
//!
//! A session file is JSON Lines: the first line is the session header
//! (format version plus video metadata), every following line is one
//! saved marker. The layout is append-friendly on purpose: saving a
//! marker during a live review is a single line written to the end of
//! the file, so a crash never loses previously saved markers.

pub mod sink;
pub mod time;

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use sink::{MarkerSink, SessionFileSink};
pub use time::{format_timestamp, parse_clock};

/// `.marks` format version
pub const SESSION_VERSION: u8 = 1;

/// Validation failure while building a marker.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarkerError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("timestamp {time:.0}s is past the end of the video ({duration:.0}s)")]
    TimeOutOfRange { time: f64, duration: f64 },
    #[error("unknown marker kind: {0}")]
    UnknownKind(String),
}

/// Category of a review marker.
///
/// The set is closed: files carrying any other kind string are rejected
/// at parse time rather than silently coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerKind {
    Important,
    Error,
    Success,
    Strategy,
    PlayerSpecific,
}

impl MarkerKind {
    /// All kinds, in form cycling order.
    pub const ALL: [MarkerKind; 5] = [
        MarkerKind::Important,
        MarkerKind::Error,
        MarkerKind::Success,
        MarkerKind::Strategy,
        MarkerKind::PlayerSpecific,
    ];

    /// The wire label, as stored in `.marks` files.
    pub fn label(&self) -> &'static str {
        match self {
            MarkerKind::Important => "important",
            MarkerKind::Error => "error",
            MarkerKind::Success => "success",
            MarkerKind::Strategy => "strategy",
            MarkerKind::PlayerSpecific => "player-specific",
        }
    }

    /// Human-readable name for tables and the marker form.
    pub fn display_name(&self) -> &'static str {
        match self {
            MarkerKind::Important => "Important",
            MarkerKind::Error => "Error",
            MarkerKind::Success => "Success",
            MarkerKind::Strategy => "Strategy",
            MarkerKind::PlayerSpecific => "Player-specific",
        }
    }

    /// Single-character glyph used on the scrubber and in lists.
    pub fn glyph(&self) -> char {
        match self {
            MarkerKind::Important => '⚑',
            MarkerKind::Error => '✖',
            MarkerKind::Success => '✔',
            MarkerKind::Strategy => '◆',
            MarkerKind::PlayerSpecific => '●',
        }
    }

    /// Next kind in cycling order, wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&k| k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous kind in cycling order, wrapping around.
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&k| k == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::str::FromStr for MarkerKind {
    type Err = MarkerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "important" => Ok(MarkerKind::Important),
            "error" => Ok(MarkerKind::Error),
            "success" => Ok(MarkerKind::Success),
            "strategy" => Ok(MarkerKind::Strategy),
            "player-specific" => Ok(MarkerKind::PlayerSpecific),
            other => Err(MarkerError::UnknownKind(other.to_string())),
        }
    }
}

impl std::fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A saved review annotation, pinned to a video timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: String,
    /// Seconds from the start of the video.
    pub time: f64,
    pub title: String,
    pub description: String,
    pub kind: MarkerKind,
    /// Player the note addresses, for player-specific coaching.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub player: Option<String>,
    /// Free-form tag ("macro", "utility", "positioning", ...).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Marker {
    /// Parse a marker from one JSON line of a session file.
    pub fn from_json(line: &str) -> Result<Self> {
        let marker: Marker =
            serde_json::from_str(line).context("Failed to parse marker JSON")?;
        if !marker.time.is_finite() || marker.time < 0.0 {
            bail!("Marker time must be a non-negative number");
        }
        Ok(marker)
    }

    /// Serialize the marker as one JSON line.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize marker")
    }
}

/// Marker fields as collected by the form, before validation.
#[derive(Debug, Clone, Default)]
pub struct MarkerDraft {
    pub time: f64,
    pub title: String,
    pub description: String,
    pub kind: Option<MarkerKind>,
    pub player: Option<String>,
    pub category: Option<String>,
}

impl MarkerDraft {
    /// Check the draft against the session's video duration.
    ///
    /// Title and description must be non-empty after trimming, and the
    /// timestamp has to land inside the video.
    pub fn validate(&self, duration: f64) -> Result<(), MarkerError> {
        if self.title.trim().is_empty() {
            return Err(MarkerError::EmptyTitle);
        }
        if self.description.trim().is_empty() {
            return Err(MarkerError::EmptyDescription);
        }
        if !self.time.is_finite() || self.time < 0.0 || self.time > duration {
            return Err(MarkerError::TimeOutOfRange {
                time: self.time,
                duration,
            });
        }
        Ok(())
    }

    /// Validate and promote the draft to a saved marker.
    ///
    /// Assigns a fresh id and creation timestamp. Text fields are stored
    /// trimmed; empty optional fields collapse to None.
    pub fn into_marker(self, duration: f64) -> Result<Marker, MarkerError> {
        self.validate(duration)?;

        Ok(Marker {
            id: Uuid::new_v4().to_string(),
            time: self.time,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            kind: self.kind.unwrap_or(MarkerKind::Important),
            player: normalize_optional(self.player),
            category: normalize_optional(self.category),
            created_at: Utc::now(),
        })
    }
}

fn normalize_optional(field: Option<String>) -> Option<String> {
    field
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Video metadata recorded in the session header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoMeta {
    pub title: String,
    /// Where the VOD lives (URL or local path), informational only.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub source: Option<String>,
    /// Video length in seconds.
    pub duration: f64,
}

/// `.marks` session header, the first line of the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionHeader {
    pub version: u8,
    pub video: VideoMeta,
    pub created_at: DateTime<Utc>,
}

/// Complete session file representation.
#[derive(Debug, Clone)]
pub struct SessionFile {
    pub header: SessionHeader,
    /// Markers in file (creation) order. Views sort by time where needed.
    pub markers: Vec<Marker>,
}

impl SessionFile {
    /// Create an empty session for the given video.
    pub fn new(video: VideoMeta) -> Self {
        Self {
            header: SessionHeader {
                version: SESSION_VERSION,
                video,
                created_at: Utc::now(),
            },
            markers: Vec::new(),
        }
    }

    /// Parse a `.marks` session file from a path.
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file =
            fs::File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
        let reader = BufReader::new(file);

        Self::parse_reader(reader)
    }

    /// Parse a session file from a reader.
    pub fn parse_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines();

        // First line is the header
        let header_line = lines
            .next()
            .context("File is empty")?
            .context("Failed to read header line")?;

        let header: SessionHeader =
            serde_json::from_str(&header_line).context("Failed to parse session header")?;

        if header.version != SESSION_VERSION {
            bail!(
                "Only .marks v{} session files are supported (got version {})",
                SESSION_VERSION,
                header.version
            );
        }

        if !header.video.duration.is_finite() || header.video.duration < 0.0 {
            bail!("Session header has an invalid video duration");
        }

        // Remaining lines are markers
        let mut markers = Vec::new();
        for (line_num, line_result) in lines.enumerate() {
            let line =
                line_result.with_context(|| format!("Failed to read line {}", line_num + 2))?;

            if line.trim().is_empty() {
                continue;
            }

            let marker = Marker::from_json(&line)
                .with_context(|| format!("Failed to parse marker on line {}", line_num + 2))?;
            markers.push(marker);
        }

        Ok(SessionFile { header, markers })
    }

    /// Parse from a string.
    pub fn parse_str(content: &str) -> Result<Self> {
        let reader = BufReader::new(content.as_bytes());
        Self::parse_reader(reader)
    }

    /// Write the session file to a path.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut file =
            fs::File::create(path).with_context(|| format!("Failed to create file: {:?}", path))?;

        self.write_to(&mut file)
    }

    /// Write the session file to a writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let header_json =
            serde_json::to_string(&self.header).context("Failed to serialize header")?;
        writeln!(writer, "{}", header_json)?;

        for marker in &self.markers {
            writeln!(writer, "{}", marker.to_json()?)?;
        }

        Ok(())
    }

    /// Markers sorted by timestamp, earliest first.
    ///
    /// Storage keeps creation order; time order is a view concern.
    pub fn sorted_by_time(&self) -> Vec<&Marker> {
        let mut sorted: Vec<&Marker> = self.markers.iter().collect();
        sorted.sort_by(|a, b| a.time.total_cmp(&b.time));
        sorted
    }
}
