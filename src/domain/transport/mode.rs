//! Transport mode and guard errors

use std::fmt;
use thiserror::Error;

/// Transport modes.
///
/// Never stored on its own: derived from the player's and the recorder's
/// flags, which are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransportMode {
    #[default]
    Idle,
    Playing,
    Recording,
}

impl TransportMode {
    /// Derive the mode from the backend flags.
    /// Recording wins if both are ever reported.
    pub const fn from_flags(is_playing: bool, is_recording: bool) -> Self {
        if is_recording {
            Self::Recording
        } else if is_playing {
            Self::Playing
        } else {
            Self::Idle
        }
    }

    /// Whether the poll timer should be running in this mode
    pub const fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Playing => "playing",
            Self::Recording => "recording",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A toggle rejected by a transport guard. The mode is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidTransition {
    #[error("Invalid transition: cannot {action} while {current_mode}")]
    Blocked {
        current_mode: TransportMode,
        action: String,
    },

    #[error("Recording is disabled in play-only mode")]
    RecordingDisabled,

    #[error("Cannot start playback while a recording is being saved")]
    SavingRecording,
}
