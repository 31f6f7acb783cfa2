//! Recording destination naming
//!
//! Each recording is written to `<dir>/<timestamp>.wav`. The timestamp is an
//! ISO 8601 basic-format local time with milliseconds and UTC offset, which
//! keeps names sortable and free of characters some filesystems reject.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};

/// File extension for captured audio
pub const RECORDING_EXTENSION: &str = "wav";

/// Timestamp stem for a recording name, e.g. `20261018T174601.123+0200`
pub fn timestamp_stem<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    at.format("%Y%m%dT%H%M%S%.3f%z").to_string()
}

/// Generates recording file names that never repeat the previous one.
#[derive(Debug, Default)]
pub struct DestinationNamer {
    last_stem: Option<String>,
    repeats: u32,
}

impl DestinationNamer {
    /// Create a namer with no history
    pub fn new() -> Self {
        Self::default()
    }

    /// File name for a recording started at `at`.
    ///
    /// Two calls within the same millisecond get `-1`, `-2`, ... suffixes.
    pub fn name_at<Tz>(&mut self, at: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let stem = timestamp_stem(at);

        let name = if self.last_stem.as_deref() == Some(stem.as_str()) {
            self.repeats += 1;
            format!("{}-{}", stem, self.repeats)
        } else {
            self.repeats = 0;
            stem.clone()
        };

        self.last_stem = Some(stem);
        format!("{}.{}", name, RECORDING_EXTENSION)
    }

    /// Fresh destination path inside `dir` that does not exist yet
    pub fn next_path(&mut self, dir: &Path) -> PathBuf {
        loop {
            let path = dir.join(self.name_at(&Local::now()));
            if !path.exists() {
                return path;
            }
        }
    }
}
