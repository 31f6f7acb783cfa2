//! In-progress recording entity

use std::path::{Path, PathBuf};

/// A capture that has been started and not yet finished.
///
/// Lives from a successful capture start until the recorder reports the
/// file finished (or failed). On success the destination becomes the
/// source of the next playback session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingSession {
    destination: PathBuf,
}

impl RecordingSession {
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
        }
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn into_destination(self) -> PathBuf {
        self.destination
    }
}
