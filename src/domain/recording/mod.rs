//! Recording domain module

mod destination;
mod format;
mod session;

pub use destination::{timestamp_stem, DestinationNamer, RECORDING_EXTENSION};
pub use format::{CaptureFormat, DEFAULT_SAMPLE_RATE};
pub use session::RecordingSession;
