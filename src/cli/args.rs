//! CLI argument definitions using Clap

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::domain::recording::CaptureFormat;

/// SimpleRecorder - play a track, record from the microphone, play it back
#[derive(Parser, Debug)]
#[command(name = "simple-recorder")]
#[command(version)]
#[command(about = "Minimal audio playback and recording screen for the terminal")]
#[command(long_about = None)]
pub struct Cli {
    /// Audio file played until the first recording replaces it
    #[arg(short = 's', long, value_name = "FILE", env = "SIMPLE_RECORDER_SOURCE")]
    pub source: Option<String>,

    /// Directory new recordings are written to
    #[arg(short = 'o', long, value_name = "DIR")]
    pub recordings_dir: Option<String>,

    /// View refresh interval while playing or recording, in milliseconds
    #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..=1000))]
    pub poll_interval: Option<u64>,

    /// Play-only screen without a record control
    #[arg(long)]
    pub play_only: bool,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed screen options
#[derive(Debug, Clone)]
pub struct ScreenOptions {
    pub source: PathBuf,
    pub recordings_dir: PathBuf,
    pub poll_interval: Duration,
    pub capture_format: CaptureFormat,
    pub recording_enabled: bool,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "source",
    "recordings_dir",
    "poll_interval_ms",
    "sample_rate",
    "recording_enabled",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
