//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! the terminal view and the screen runner.

pub mod app;
pub mod args;
pub mod commands;
pub mod config_cmd;
pub mod presenter;
pub mod signals;
pub mod terminal_view;

// Re-export commonly used types
pub use app::{
    cli_config, load_merged_config, run_screen, screen_options, EXIT_ERROR, EXIT_SUCCESS,
    EXIT_USAGE_ERROR,
};
pub use args::{Cli, Commands, ConfigAction, ScreenOptions};
pub use config_cmd::handle_config_command;
pub use presenter::Presenter;
pub use terminal_view::TerminalView;
