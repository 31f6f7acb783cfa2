//! SimpleRecorder CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use simple_recorder::cli::{
    app::{cli_config, load_merged_config, run_screen, screen_options, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use simple_recorder::infrastructure::XdgConfigStore;

// cpal and rodio streams are not Send, so the screen stays on one thread
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let presenter = Presenter::new();

    // Handle subcommands
    if let Some(Commands::Config { action }) = cli.command {
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    // Merge config
    let config = load_merged_config(cli_config(&cli)).await;
    let options = screen_options(&config);

    if options.recordings_dir.exists() && !options.recordings_dir.is_dir() {
        presenter.error(&format!(
            "Recordings directory is not a directory: {}",
            options.recordings_dir.display()
        ));
        return ExitCode::from(EXIT_USAGE_ERROR);
    }

    run_screen(options).await
}
