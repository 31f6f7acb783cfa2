//! SimpleRecorder - audio playback and recording screen
//!
//! Plays a bundled track, records from the microphone, and plays the latest
//! recording back, with playback and recording mutually exclusive.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Transport modes, timecode formatting, the view projection, config values
//! - **Application**: The transport state machine, its events, and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (rodio, cpal, tokio timer, XDG config)
//! - **CLI**: Argument parsing, config commands, terminal view and the screen runner

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
