//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with audio devices, the tokio timer and the filesystem.

pub mod config;
pub mod playback;
pub mod recording;
pub mod timer;

// Re-export adapters
pub use config::XdgConfigStore;
pub use playback::{RodioMediaLoader, RodioPlayer};
pub use recording::CpalRecorder;
pub use timer::TokioPollTimer;
