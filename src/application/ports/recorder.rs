//! Recording port interfaces

use std::path::Path;

use thiserror::Error;

use crate::domain::recording::CaptureFormat;

/// Recording errors
#[derive(Debug, Clone, Error)]
pub enum RecordingError {
    #[error("Failed to start recording: {0}")]
    StartFailed(String),

    #[error("No audio device available")]
    NoAudioDevice,

    #[error("Failed to encode recording: {0}")]
    EncodeFailed(String),

    #[error("Failed to discard recording {path}: {message}")]
    DiscardFailed { path: String, message: String },
}

/// Port for microphone capture to a file.
///
/// `start` either begins capturing or fails without leaving a file behind.
/// `stop` returns immediately; the recorder finishes writing the file in the
/// background and then reports `RecordingFinished` (or `EncodeError`).
pub trait CaptureBackend {
    /// Begin capturing into `destination`. May block briefly while the device opens.
    fn start(&mut self, destination: &Path, format: CaptureFormat) -> Result<(), RecordingError>;

    /// Stop capturing. No-op when not recording.
    fn stop(&mut self);

    /// Check if currently recording
    fn is_recording(&self) -> bool;

    /// Remove a recording file that is no longer needed. Missing files are not an error.
    fn discard(&mut self, path: &Path) -> Result<(), RecordingError>;
}
