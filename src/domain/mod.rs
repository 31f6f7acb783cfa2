//! Domain layer - Core transport logic
//!
//! Contains value objects, the view projection, and domain errors.
//! This layer has no dependencies on audio devices or the runtime.

pub mod config;
pub mod error;
pub mod recording;
pub mod transport;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use recording::{CaptureFormat, DestinationNamer, RecordingSession};
pub use transport::{
    format_timecode, render, InvalidTransition, Timecode, TransportMode, ViewInputs, ViewSnapshot,
};
