//! Screen runner

use std::process::ExitCode;
use std::time::Duration;

use tokio::time::{timeout_at, Instant};
use tracing::{debug, info, warn};

use crate::application::ports::ConfigStore;
use crate::application::{event_channel, TransportConfig, TransportController, TransportEvent};
use crate::domain::config::AppConfig;
use crate::domain::recording::CaptureFormat;
use crate::infrastructure::config::{default_recordings_dir, resolve_source};
use crate::infrastructure::{CpalRecorder, RodioMediaLoader, TokioPollTimer, XdgConfigStore};

use super::args::{Cli, ScreenOptions};
use super::commands::spawn_command_reader;
use super::presenter::Presenter;
use super::signals::spawn_shutdown_listener;
use super::terminal_view::TerminalView;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// How long quitting waits for a stopped recording to be written
const SAVE_TIMEOUT: Duration = Duration::from_secs(5);

/// Run the playback/record screen until quit
pub async fn run_screen(options: ScreenOptions) -> ExitCode {
    let presenter = Presenter::new();
    let (events, mut receiver) = event_channel();

    let config = TransportConfig {
        recordings_dir: options.recordings_dir.clone(),
        poll_interval: options.poll_interval,
        capture_format: options.capture_format,
        recording_enabled: options.recording_enabled,
    };

    presenter.info(&format!("Source: {}", options.source.display()));
    if options.recording_enabled {
        presenter.info(&format!(
            "Recordings: {}",
            options.recordings_dir.display()
        ));
    }
    presenter.controls(options.recording_enabled);

    let mut controller = TransportController::new(
        RodioMediaLoader::new(events.clone()),
        CpalRecorder::new(events.clone()),
        TokioPollTimer::new(events.clone()),
        TerminalView::new(),
        config,
    );

    if !controller.load_source(&options.source) {
        presenter.warn(&format!(
            "Could not load {}, playback disabled",
            options.source.display()
        ));
    }

    if let Err(e) = spawn_shutdown_listener(events.clone()) {
        presenter.error(&format!("Failed to setup signal handler: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }
    spawn_command_reader(events);

    while let Some(event) = receiver.recv().await {
        let quit = event == TransportEvent::Shutdown;
        controller.handle(event);
        if quit {
            break;
        }
    }

    // A stopped capture is still being written
    let deadline = Instant::now() + SAVE_TIMEOUT;
    while controller.is_saving() {
        match timeout_at(deadline, receiver.recv()).await {
            Ok(Some(
                event @ (TransportEvent::RecordingFinished { .. } | TransportEvent::EncodeError(_)),
            )) => controller.handle(event),
            Ok(Some(other)) => debug!(event = ?other, "Ignoring event during shutdown"),
            Ok(None) => break,
            Err(_) => {
                warn!("Timed out waiting for recording to be saved");
                break;
            }
        }
    }

    controller.view().finish();
    if let Some(path) = controller.recorded_file() {
        presenter.success(&format!("Last recording: {}", path.display()));
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Config values given on the command line
pub fn cli_config(cli: &Cli) -> AppConfig {
    AppConfig {
        source: cli.source.clone(),
        recordings_dir: cli.recordings_dir.clone(),
        poll_interval_ms: cli.poll_interval,
        sample_rate: None,
        recording_enabled: cli.play_only.then_some(false),
    }
}

/// Load and merge configuration from file and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %store.path().display(), error = %e, "Ignoring unreadable config file");
            AppConfig::empty()
        }
    };

    // Merge: defaults < file < cli
    AppConfig::defaults().merge(file_config).merge(cli_config)
}

/// Resolve a merged config into screen options
pub fn screen_options(config: &AppConfig) -> ScreenOptions {
    let source = resolve_source(&config.source_or_default());
    let recordings_dir = config
        .recordings_dir()
        .unwrap_or_else(default_recordings_dir);

    info!(source = %source.display(), recordings_dir = %recordings_dir.display(), "Screen options resolved");

    ScreenOptions {
        source,
        recordings_dir,
        poll_interval: config.poll_interval_or_default(),
        capture_format: CaptureFormat::mono(config.sample_rate_or_default()),
        recording_enabled: config.recording_enabled_or_default(),
    }
}
