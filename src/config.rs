//! Configuration loading and persistence.
//!
//! `Config` is stored as TOML in the platform config directory
//! (`~/.config/vor/config.toml` on Linux). Every field has a default so
//! a partial or missing file still loads.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Start playback as soon as the engine reports ready
    pub autoplay: bool,
    /// Arrow-key skip distance in seconds
    pub seek_step_secs: f64,
    /// Position poll cadence while playing, in seconds
    pub poll_interval_secs: u64,
    /// Idle time before the control surface hides, in seconds
    pub idle_hide_secs: u64,
    /// Volume change per arrow press, in percent
    pub volume_step: i16,
    /// Color theme: "broadcast", "classic" or "night"
    pub theme: String,
    /// Directory scanned by `vor ls` when none is given
    pub review_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            autoplay: false,
            seek_step_secs: 10.0,
            poll_interval_secs: 1,
            idle_hide_secs: 3,
            volume_step: 5,
            theme: "broadcast".to_string(),
            review_dir: None,
        }
    }
}

impl Config {
    /// Path of the config file inside the platform config directory.
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("vor").join("config.toml"))
    }

    /// Load from the default location. A missing file yields defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Write to the default location, creating the directory if needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}
