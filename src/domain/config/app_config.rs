//! Application configuration value object

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::recording::DEFAULT_SAMPLE_RATE;

/// Default bundled audio source
pub const DEFAULT_SOURCE: &str = "assets/piano.mp3";

/// Default view refresh interval (30ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 30;

/// Accepted poll interval range in milliseconds
pub const POLL_INTERVAL_RANGE_MS: std::ops::RangeInclusive<u64> = 1..=1000;

/// Accepted capture sample rates
pub const SAMPLE_RATE_RANGE: std::ops::RangeInclusive<u32> = 8_000..=192_000;

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub source: Option<String>,
    pub recordings_dir: Option<String>,
    pub poll_interval_ms: Option<u64>,
    pub sample_rate: Option<u32>,
    pub recording_enabled: Option<bool>,
}

impl AppConfig {
    /// Create config with default values.
    /// `recordings_dir` stays unset: its default depends on the platform data directory.
    pub fn defaults() -> Self {
        Self {
            source: Some(DEFAULT_SOURCE.to_string()),
            recordings_dir: None,
            poll_interval_ms: Some(DEFAULT_POLL_INTERVAL_MS),
            sample_rate: Some(DEFAULT_SAMPLE_RATE),
            recording_enabled: Some(true),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            source: other.source.or(self.source),
            recordings_dir: other.recordings_dir.or(self.recordings_dir),
            poll_interval_ms: other.poll_interval_ms.or(self.poll_interval_ms),
            sample_rate: other.sample_rate.or(self.sample_rate),
            recording_enabled: other.recording_enabled.or(self.recording_enabled),
        }
    }

    /// Get the source path, or the bundled default
    pub fn source_or_default(&self) -> PathBuf {
        PathBuf::from(self.source.as_deref().unwrap_or(DEFAULT_SOURCE))
    }

    /// Get the configured recordings directory, if any
    pub fn recordings_dir(&self) -> Option<PathBuf> {
        self.recordings_dir.as_ref().map(PathBuf::from)
    }

    /// Get the poll interval, or 30ms if not set/out of range
    pub fn poll_interval_or_default(&self) -> Duration {
        let ms = self
            .poll_interval_ms
            .filter(|ms| POLL_INTERVAL_RANGE_MS.contains(ms))
            .unwrap_or(DEFAULT_POLL_INTERVAL_MS);
        Duration::from_millis(ms)
    }

    /// Get the capture sample rate, or 44.1kHz if not set/out of range
    pub fn sample_rate_or_default(&self) -> u32 {
        self.sample_rate
            .filter(|rate| SAMPLE_RATE_RANGE.contains(rate))
            .unwrap_or(DEFAULT_SAMPLE_RATE)
    }

    /// Get recording setting, or true if not set
    pub fn recording_enabled_or_default(&self) -> bool {
        self.recording_enabled.unwrap_or(true)
    }
}
