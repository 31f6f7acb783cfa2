//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod player;
pub mod recorder;
pub mod timer;
pub mod view;

// Re-export common types
pub use config::ConfigStore;
pub use player::{MediaLoader, PlaybackError, PlaybackSession};
pub use recorder::{CaptureBackend, RecordingError};
pub use timer::PollTimer;
pub use view::TransportView;
