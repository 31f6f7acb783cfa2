//! Playback port interfaces

use std::path::Path;
use std::time::Duration;

use thiserror::Error;

/// Playback errors
#[derive(Debug, Clone, Error)]
pub enum PlaybackError {
    #[error("Failed to load audio source {path}: {message}")]
    LoadFailed { path: String, message: String },

    #[error("Audio output device not available: {0}")]
    DeviceUnavailable(String),

    #[error("Playback failed: {0}")]
    PlaybackFailed(String),

    #[error("Failed to decode audio: {0}")]
    Decode(String),
}

impl PlaybackError {
    /// Build a load failure for `path`
    pub fn load_failed(path: &Path, message: impl ToString) -> Self {
        Self::LoadFailed {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }
}

/// A loaded audio source.
///
/// Elapsed time advances only while playing and reads zero again once the
/// source has played to its end. Completion is reported asynchronously as a
/// `PlaybackFinished` event.
pub trait PlaybackSession {
    /// Start or resume playback. Restarts from the beginning after the end was reached.
    fn play(&mut self) -> Result<(), PlaybackError>;

    /// Pause playback. No-op when not playing.
    fn pause(&mut self);

    /// Check if currently playing
    fn is_playing(&self) -> bool;

    /// Position within the source
    fn elapsed(&self) -> Duration;

    /// Total length of the source
    fn duration(&self) -> Duration;
}

/// Port for opening audio sources
pub trait MediaLoader {
    type Session: PlaybackSession;

    /// Load the audio file at `path` into a paused session.
    ///
    /// # Returns
    /// The session, or an error if the file is missing, unreadable or cannot be decoded
    fn load(&self, path: &Path) -> Result<Self::Session, PlaybackError>;
}
