//! CLI presenter for output formatting

use colored::*;

/// Presenter for CLI output formatting
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Print the screen's command help
    pub fn controls(&self, recording_enabled: bool) {
        let mut keys = vec![format!("{} play/pause", "p".bold())];
        if recording_enabled {
            keys.push(format!("{} record/stop", "r".bold()));
        }
        keys.push(format!("{} quit", "q".bold()));
        eprintln!("{} {}", "ℹ".cyan(), keys.join("  "));
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
