//! Domain error types

use thiserror::Error;

/// Error when parsing a timecode string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid timecode: \"{input}\". Expected format: mm:ss (e.g., 00:07, 02:05)")]
pub struct TimecodeParseError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
