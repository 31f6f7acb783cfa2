//! Transport controller
//!
//! Owns the current playback session, the in-progress recording, the
//! capture backend and the poll timer, and keeps them consistent:
//!
//!   IDLE <-> PLAYING   (toggle_playback, guarded by "not recording")
//!   IDLE <-> RECORDING (toggle_recording, guarded by "not playing")
//!   PLAYING -> IDLE    (playback finished)
//!   recording finished -> new playback session from the captured file
//!
//! The timer runs iff the mode is not idle, and every transition and every
//! tick re-renders the view. Backend failures are logged and absorbed.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::domain::config::DEFAULT_POLL_INTERVAL_MS;
use crate::domain::recording::{CaptureFormat, DestinationNamer, RecordingSession};
use crate::domain::transport::{
    render, InvalidTransition, TransportMode, ViewInputs, ViewSnapshot,
};

use super::events::TransportEvent;
use super::ports::{CaptureBackend, MediaLoader, PlaybackSession, PollTimer, TransportView};

/// Settings for the transport
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Directory new recordings are written to
    pub recordings_dir: PathBuf,
    /// View refresh interval while playing or recording
    pub poll_interval: Duration,
    /// Format of new recordings
    pub capture_format: CaptureFormat,
    /// False for the play-only screen
    pub recording_enabled: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            recordings_dir: PathBuf::from("recordings"),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            capture_format: CaptureFormat::default(),
            recording_enabled: true,
        }
    }
}

/// Transport state machine
pub struct TransportController<L, C, T, V>
where
    L: MediaLoader,
    C: CaptureBackend,
    T: PollTimer,
    V: TransportView,
{
    loader: L,
    capture: C,
    timer: T,
    view: V,
    playback: Option<L::Session>,
    recording: Option<RecordingSession>,
    /// Most recent finished recording still on disk
    recorded_file: Option<PathBuf>,
    namer: DestinationNamer,
    config: TransportConfig,
}

impl<L, C, T, V> TransportController<L, C, T, V>
where
    L: MediaLoader,
    C: CaptureBackend,
    T: PollTimer,
    V: TransportView,
{
    /// Create an idle transport with no source loaded and render it once
    pub fn new(loader: L, capture: C, timer: T, view: V, config: TransportConfig) -> Self {
        let mut controller = Self {
            loader,
            capture,
            timer,
            view,
            playback: None,
            recording: None,
            recorded_file: None,
            namer: DestinationNamer::new(),
            config,
        };
        controller.refresh();
        controller
    }

    /// Current mode, derived from the backends
    pub fn mode(&self) -> TransportMode {
        TransportMode::from_flags(self.is_playing(), self.is_recording())
    }

    /// Check if the loaded source is playing
    pub fn is_playing(&self) -> bool {
        self.playback.as_ref().is_some_and(|s| s.is_playing())
    }

    /// Check if the recorder is capturing
    pub fn is_recording(&self) -> bool {
        self.capture.is_recording()
    }

    /// Check if the poll timer is running
    pub fn is_timer_active(&self) -> bool {
        self.timer.is_active()
    }

    /// Check if a playback source is loaded
    pub fn has_source(&self) -> bool {
        self.playback.is_some()
    }

    /// Check if a capture has started and its file is not finished yet
    pub fn is_saving(&self) -> bool {
        self.recording.is_some()
    }

    /// Destination of the capture in progress
    pub fn recording_destination(&self) -> Option<&Path> {
        self.recording.as_ref().map(RecordingSession::destination)
    }

    /// File behind the most recent finished recording
    pub fn recorded_file(&self) -> Option<&Path> {
        self.recorded_file.as_deref()
    }

    /// The view collaborator
    pub fn view(&self) -> &V {
        &self.view
    }

    /// State read by the view projection
    pub fn view_inputs(&self) -> ViewInputs {
        let (elapsed, duration) = self
            .playback
            .as_ref()
            .map(|s| (s.elapsed(), s.duration()))
            .unwrap_or_default();

        ViewInputs {
            elapsed,
            duration,
            is_playing: self.is_playing(),
            is_recording: self.is_recording(),
            recording_enabled: self.config.recording_enabled,
        }
    }

    /// Current projection
    pub fn snapshot(&self) -> ViewSnapshot {
        render(&self.view_inputs())
    }

    /// Replace the playback session with `path`.
    ///
    /// On failure the session is left unset and playback toggles become no-ops.
    pub fn load_source(&mut self, path: &Path) -> bool {
        let loaded = match self.loader.load(path) {
            Ok(session) => {
                info!(
                    source = %path.display(),
                    duration_secs = session.duration().as_secs_f64(),
                    "Audio source loaded"
                );
                self.playback = Some(session);
                true
            }
            Err(e) => {
                warn!(source = %path.display(), error = %e, "Failed to load audio source, playback disabled");
                self.playback = None;
                false
            }
        };

        self.sync_timer();
        self.refresh();
        loaded
    }

    /// Play or pause the loaded source
    pub fn toggle_playback(&mut self) -> Result<TransportMode, InvalidTransition> {
        if self.is_recording() {
            return Err(InvalidTransition::Blocked {
                current_mode: TransportMode::Recording,
                action: "toggle playback".to_string(),
            });
        }
        // The loaded session is replaced once the saved file lands
        if self.is_saving() {
            return Err(InvalidTransition::SavingRecording);
        }

        match self.playback.as_mut() {
            None => debug!("No audio source loaded, ignoring playback toggle"),
            Some(session) if session.is_playing() => {
                session.pause();
                debug!("Playback paused");
            }
            Some(session) => match session.play() {
                Ok(()) => debug!("Playback started"),
                Err(e) => warn!(error = %e, "Failed to start playback"),
            },
        }

        self.sync_timer();
        self.refresh();
        Ok(self.mode())
    }

    /// Start a new recording or stop the current one
    pub fn toggle_recording(&mut self) -> Result<TransportMode, InvalidTransition> {
        if !self.config.recording_enabled {
            return Err(InvalidTransition::RecordingDisabled);
        }
        if self.is_playing() {
            return Err(InvalidTransition::Blocked {
                current_mode: TransportMode::Playing,
                action: "toggle recording".to_string(),
            });
        }

        if self.capture.is_recording() {
            self.capture.stop();
            info!("Recording stopped");
        } else {
            self.start_capture();
        }

        self.sync_timer();
        self.refresh();
        Ok(self.mode())
    }

    fn start_capture(&mut self) {
        if let Some(session) = &self.recording {
            info!(
                destination = %session.destination().display(),
                "Previous recording is still being saved, ignoring record toggle"
            );
            return;
        }

        let destination = self.namer.next_path(&self.config.recordings_dir);
        match self.capture.start(&destination, self.config.capture_format) {
            Ok(()) => {
                info!(destination = %destination.display(), "Recording started");
                self.recording = Some(RecordingSession::new(destination));
            }
            Err(e) => warn!(destination = %destination.display(), error = %e, "Failed to start recording"),
        }
    }

    /// Poll timer fired
    pub fn on_tick(&mut self) {
        if !self.mode().is_active() {
            debug!("Tick while idle, ignoring");
        }
        self.sync_timer();
        self.refresh();
    }

    /// The player reached the end of its source
    pub fn on_playback_finished(&mut self, successfully: bool) {
        if successfully {
            debug!("Playback finished");
        } else {
            warn!("Playback finished unsuccessfully");
        }
        self.sync_timer();
        self.refresh();
    }

    /// The recorder finished writing its file
    pub fn on_recording_finished(&mut self, successfully: bool) {
        let Some(session) = self.recording.take() else {
            debug!("Recording finished without a capture in progress, ignoring");
            return;
        };

        if !successfully {
            warn!(
                destination = %session.destination().display(),
                "Recording did not finish successfully, keeping previous source"
            );
            self.discard_file(session.destination());
            self.sync_timer();
            self.refresh();
            return;
        }

        let destination = session.into_destination();
        self.playback = match self.loader.load(&destination) {
            Ok(session) => {
                info!(
                    source = %destination.display(),
                    duration_secs = session.duration().as_secs_f64(),
                    "Recording loaded for playback"
                );
                Some(session)
            }
            Err(e) => {
                warn!(source = %destination.display(), error = %e, "Failed to load recording, playback disabled");
                None
            }
        };

        let previous = self.recorded_file.replace(destination);
        if let Some(previous) = previous.filter(|p| Some(p.as_path()) != self.recorded_file()) {
            self.discard_file(&previous);
        }

        self.sync_timer();
        self.refresh();
    }

    /// The player failed while decoding
    pub fn on_decode_error(&mut self, message: &str) {
        error!(error = message, "Audio player decode error");
        if let Some(session) = self.playback.as_mut() {
            session.pause();
        }
        self.sync_timer();
        self.refresh();
    }

    /// The recorder failed while capturing or encoding
    pub fn on_encode_error(&mut self, message: &str) {
        error!(error = message, "Audio recorder encode error");
        self.capture.stop();
        if let Some(session) = self.recording.take() {
            self.discard_file(session.destination());
        }
        self.sync_timer();
        self.refresh();
    }

    /// Pause playback, stop capture and the timer
    pub fn shutdown(&mut self) {
        if let Some(session) = self.playback.as_mut() {
            session.pause();
        }
        self.capture.stop();
        self.timer.cancel();
        self.refresh();
    }

    /// Dispatch an event to its handler
    pub fn handle(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::TogglePlayback => {
                if let Err(e) = self.toggle_playback() {
                    debug!(error = %e, "Playback toggle rejected");
                }
            }
            TransportEvent::ToggleRecording => {
                if let Err(e) = self.toggle_recording() {
                    debug!(error = %e, "Recording toggle rejected");
                }
            }
            TransportEvent::Tick => self.on_tick(),
            TransportEvent::PlaybackFinished { successfully } => {
                self.on_playback_finished(successfully)
            }
            TransportEvent::RecordingFinished { successfully } => {
                self.on_recording_finished(successfully)
            }
            TransportEvent::DecodeError(message) => self.on_decode_error(&message),
            TransportEvent::EncodeError(message) => self.on_encode_error(&message),
            TransportEvent::Shutdown => self.shutdown(),
        }
    }

    fn discard_file(&mut self, path: &Path) {
        match self.capture.discard(path) {
            Ok(()) => debug!(path = %path.display(), "Recording discarded"),
            Err(e) => warn!(error = %e, "Failed to discard recording"),
        }
    }

    fn sync_timer(&mut self) {
        if self.mode().is_active() {
            if !self.timer.is_active() {
                self.timer.start(self.config.poll_interval);
            }
        } else {
            self.timer.cancel();
        }
    }

    fn refresh(&mut self) {
        let snapshot = self.snapshot();
        self.view.apply(&snapshot);
    }
}
