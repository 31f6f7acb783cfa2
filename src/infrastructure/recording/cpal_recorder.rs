//! Microphone recorder using cpal
//!
//! The stream is owned by a dedicated capture thread, since cpal::Stream is
//! not Send. The thread collects interleaved i16 samples until the recording
//! flag is cleared, then mixes down, resamples and writes the WAV file, and
//! reports the outcome on the event channel.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{sync_channel, SyncSender};
use std::sync::{Arc, Mutex as StdMutex};
use std::thread::JoinHandle;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SampleRate, SizedSample, StreamConfig};
use tracing::{debug, error, info, warn};

use super::wav::{self, WavFileWriter};
use crate::application::events::{EventSender, TransportEvent};
use crate::application::ports::{CaptureBackend, RecordingError};
use crate::domain::recording::CaptureFormat;

/// How long `start` waits for the device to open.
/// The caller's thread is blocked for that long, so queued commands and
/// signals are handled only after the device opens or the wait runs out.
const START_TIMEOUT: Duration = Duration::from_secs(2);

/// How often the capture thread checks the recording flag
const FLAG_POLL_INTERVAL: Duration = Duration::from_millis(20);

type SampleBuffer = Arc<StdMutex<Vec<i16>>>;

/// Microphone recorder writing 16-bit PCM WAV files
pub struct CpalRecorder {
    /// Recording state, shared with the capture thread and stream callback
    is_recording: Arc<AtomicBool>,
    /// Capture thread of the current or last recording
    worker: Option<JoinHandle<()>>,
    events: EventSender,
}

impl CpalRecorder {
    /// Create a recorder that reports completion on `events`
    pub fn new(events: EventSender) -> Self {
        Self {
            is_recording: Arc::new(AtomicBool::new(false)),
            worker: None,
            events,
        }
    }

    /// Check if the last capture thread is still writing its file
    pub fn is_saving(&self) -> bool {
        self.worker.as_ref().is_some_and(|w| !w.is_finished())
    }

    /// Get the default input device
    fn get_input_device() -> Result<cpal::Device, RecordingError> {
        let host = cpal::default_host();
        host.default_input_device()
            .ok_or(RecordingError::NoAudioDevice)
    }

    /// Get an input configuration, preferring fewer channels and the target rate
    fn get_input_config(
        device: &cpal::Device,
        target_rate: u32,
    ) -> Result<(StreamConfig, SampleFormat), RecordingError> {
        let supported_configs = device
            .supported_input_configs()
            .map_err(|e| RecordingError::StartFailed(format!("Failed to get configs: {}", e)))?;

        let includes_target = |config: &cpal::SupportedStreamConfigRange| {
            config.min_sample_rate().0 <= target_rate && config.max_sample_rate().0 >= target_rate
        };

        let mut best_config: Option<cpal::SupportedStreamConfigRange> = None;

        for config in supported_configs {
            if !matches!(
                config.sample_format(),
                SampleFormat::I16 | SampleFormat::F32
            ) {
                continue;
            }

            let is_better = match &best_config {
                None => true,
                Some(current) => {
                    let fewer_channels = config.channels() < current.channels();
                    let better_rate = includes_target(&config) && !includes_target(current);
                    better_rate || (fewer_channels && includes_target(&config) == includes_target(current))
                }
            };
            if is_better {
                best_config = Some(config);
            }
        }

        let config_range = best_config
            .ok_or_else(|| RecordingError::StartFailed("No suitable input config found".into()))?;

        let sample_rate = if includes_target(&config_range) {
            SampleRate(target_rate)
        } else {
            config_range.max_sample_rate()
        };

        let sample_format = config_range.sample_format();
        let config = StreamConfig {
            channels: config_range.channels(),
            sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        Ok((config, sample_format))
    }

    /// Build an input stream that appends samples to `buffer` while recording
    fn build_stream<T>(
        device: &cpal::Device,
        config: &StreamConfig,
        buffer: SampleBuffer,
        is_recording: Arc<AtomicBool>,
        events: EventSender,
    ) -> Result<cpal::Stream, RecordingError>
    where
        T: SizedSample,
        i16: FromSample<T>,
    {
        device
            .build_input_stream(
                config,
                move |data: &[T], _: &cpal::InputCallbackInfo| {
                    if is_recording.load(Ordering::SeqCst) {
                        if let Ok(mut buffer) = buffer.lock() {
                            buffer.extend(data.iter().map(|&s| s.to_sample::<i16>()));
                        }
                    }
                },
                move |err| {
                    error!(error = %err, "Audio input stream error");
                    let _ = events.send(TransportEvent::EncodeError(err.to_string()));
                },
                None,
            )
            .map_err(|e| RecordingError::StartFailed(e.to_string()))
    }

    /// Open the default input device and start streaming into `buffer`
    fn open_stream(
        target_rate: u32,
        buffer: SampleBuffer,
        is_recording: Arc<AtomicBool>,
        events: EventSender,
    ) -> Result<(cpal::Stream, u32, u16), RecordingError> {
        let device = Self::get_input_device()?;
        let (config, sample_format) = Self::get_input_config(&device, target_rate)?;

        let stream = match sample_format {
            SampleFormat::I16 => {
                Self::build_stream::<i16>(&device, &config, buffer, is_recording, events)?
            }
            SampleFormat::F32 => {
                Self::build_stream::<f32>(&device, &config, buffer, is_recording, events)?
            }
            other => {
                return Err(RecordingError::StartFailed(format!(
                    "Unsupported sample format: {:?}",
                    other
                )))
            }
        };

        stream
            .play()
            .map_err(|e| RecordingError::StartFailed(e.to_string()))?;

        debug!(
            sample_rate = config.sample_rate.0,
            channels = config.channels,
            "Input stream opened"
        );
        Ok((stream, config.sample_rate.0, config.channels))
    }

    /// Capture thread body
    fn run_capture(
        writer: WavFileWriter,
        destination: PathBuf,
        format: CaptureFormat,
        is_recording: Arc<AtomicBool>,
        ready: SyncSender<Result<(), RecordingError>>,
        events: EventSender,
    ) {
        let buffer: SampleBuffer = Arc::new(StdMutex::new(Vec::new()));

        let opened = Self::open_stream(
            format.sample_rate,
            Arc::clone(&buffer),
            Arc::clone(&is_recording),
            events.clone(),
        );
        let (stream, device_rate, channels) = match opened {
            Ok(opened) => opened,
            Err(e) => {
                let _ = ready.send(Err(e));
                return;
            }
        };
        let _ = ready.send(Ok(()));

        while is_recording.load(Ordering::SeqCst) {
            std::thread::sleep(FLAG_POLL_INTERVAL);
        }
        drop(stream);

        let samples = match buffer.lock() {
            Ok(mut buffer) => std::mem::take(&mut *buffer),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        };

        let captured = !samples.is_empty();
        let result = wav::resample(&wav::mix_to_mono(&samples, channels), device_rate, format.sample_rate)
            .and_then(|mono| wav::finish(writer, &mono));

        let event = match result {
            Ok(()) if captured => {
                info!(destination = %destination.display(), "Recording saved");
                TransportEvent::RecordingFinished { successfully: true }
            }
            Ok(()) => {
                warn!(destination = %destination.display(), "No audio captured");
                TransportEvent::RecordingFinished { successfully: false }
            }
            Err(e) => {
                error!(destination = %destination.display(), error = %e, "Failed to write recording");
                TransportEvent::EncodeError(e.to_string())
            }
        };
        let _ = events.send(event);
    }

    fn remove_partial(destination: &Path) {
        if let Err(e) = std::fs::remove_file(destination) {
            debug!(path = %destination.display(), error = %e, "No partial recording to remove");
        }
    }
}

impl CaptureBackend for CpalRecorder {
    /// Blocks until the capture thread has opened the input stream,
    /// at most `START_TIMEOUT`
    fn start(&mut self, destination: &Path, format: CaptureFormat) -> Result<(), RecordingError> {
        if self.is_recording.load(Ordering::SeqCst) {
            return Err(RecordingError::StartFailed(
                "Recording already in progress".to_string(),
            ));
        }
        if self.is_saving() {
            return Err(RecordingError::StartFailed(
                "Previous recording is still being saved".to_string(),
            ));
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }

        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                RecordingError::StartFailed(format!("Cannot create {}: {}", parent.display(), e))
            })?;
        }
        let writer = wav::create_writer(destination, format)?;

        self.is_recording.store(true, Ordering::SeqCst);

        let (ready_tx, ready_rx) = sync_channel(1);
        let is_recording = Arc::clone(&self.is_recording);
        let events = self.events.clone();
        let path = destination.to_path_buf();

        let spawned = std::thread::Builder::new()
            .name("capture".to_string())
            .spawn(move || Self::run_capture(writer, path, format, is_recording, ready_tx, events));

        let worker = match spawned {
            Ok(worker) => worker,
            Err(e) => {
                self.is_recording.store(false, Ordering::SeqCst);
                Self::remove_partial(destination);
                return Err(RecordingError::StartFailed(e.to_string()));
            }
        };

        let started = match ready_rx.recv_timeout(START_TIMEOUT) {
            Ok(result) => result,
            Err(_) => Err(RecordingError::StartFailed(
                "Timed out opening input device".to_string(),
            )),
        };

        if let Err(e) = started {
            self.is_recording.store(false, Ordering::SeqCst);
            let _ = worker.join();
            Self::remove_partial(destination);
            return Err(e);
        }

        self.worker = Some(worker);
        Ok(())
    }

    fn stop(&mut self) {
        self.is_recording.store(false, Ordering::SeqCst);
    }

    fn is_recording(&self) -> bool {
        self.is_recording.load(Ordering::SeqCst)
    }

    fn discard(&mut self, path: &Path) -> Result<(), RecordingError> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(RecordingError::DiscardFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            }),
        }
    }
}

impl Drop for CpalRecorder {
    fn drop(&mut self) {
        self.is_recording.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::events::event_channel;
    use tempfile::TempDir;

    #[test]
    fn recorder_default_state() {
        let (tx, _rx) = event_channel();
        let recorder = CpalRecorder::new(tx);
        assert!(!recorder.is_recording());
        assert!(!recorder.is_saving());
    }

    #[test]
    fn stop_when_idle_is_noop() {
        let (tx, _rx) = event_channel();
        let mut recorder = CpalRecorder::new(tx);
        recorder.stop();
        assert!(!recorder.is_recording());
    }

    #[test]
    fn discard_removes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("take.wav");
        std::fs::write(&path, b"RIFF").unwrap();

        let (tx, _rx) = event_channel();
        let mut recorder = CpalRecorder::new(tx);
        recorder.discard(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn discard_missing_file_is_ok() {
        let dir = TempDir::new().unwrap();
        let (tx, _rx) = event_channel();
        let mut recorder = CpalRecorder::new(tx);
        assert!(recorder.discard(&dir.path().join("gone.wav")).is_ok());
    }

    #[test]
    fn start_fails_when_destination_unwritable() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();

        let (tx, _rx) = event_channel();
        let mut recorder = CpalRecorder::new(tx);
        let result = recorder.start(&blocker.join("take.wav"), CaptureFormat::default());

        assert!(matches!(result, Err(RecordingError::StartFailed(_))));
        assert!(!recorder.is_recording());
    }

    #[test]
    #[ignore = "Requires audio hardware"]
    fn records_to_wav_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("take.wav");

        let (tx, mut rx) = event_channel();
        let mut recorder = CpalRecorder::new(tx);
        recorder.start(&path, CaptureFormat::default()).unwrap();
        assert!(recorder.is_recording());

        std::thread::sleep(Duration::from_millis(300));
        recorder.stop();

        let event = rx.blocking_recv().unwrap();
        assert_eq!(event, TransportEvent::RecordingFinished { successfully: true });

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().channels, 1);
        assert_eq!(reader.spec().sample_rate, 44_100);
    }
}
