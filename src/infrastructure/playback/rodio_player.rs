//! Rodio-based playback adapter
//!
//! Files are read into memory once at load time and decoded again on every
//! restart. Completion is detected by an empty callback source queued after
//! the decoder. Elapsed time is the sink's own position, so it follows what
//! the output device has actually consumed.

use std::io::Cursor;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rodio::source::{EmptyCallback, Source};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use crate::application::events::{EventSender, TransportEvent};
use crate::application::ports::{MediaLoader, PlaybackError, PlaybackSession};

type AudioBytes = Cursor<Arc<[u8]>>;

/// Opens audio files on the default output device
pub struct RodioMediaLoader {
    output: Result<(OutputStream, OutputStreamHandle), String>,
    events: EventSender,
}

impl RodioMediaLoader {
    /// Open the default output device. A missing device is reported on each load.
    pub fn new(events: EventSender) -> Self {
        let output = OutputStream::try_default().map_err(|e| e.to_string());
        if let Err(e) = &output {
            warn!(error = %e, "No audio output device, playback unavailable");
        }
        Self { output, events }
    }

    fn handle(&self) -> Result<&OutputStreamHandle, PlaybackError> {
        self.output
            .as_ref()
            .map(|(_, handle)| handle)
            .map_err(|e| PlaybackError::DeviceUnavailable(e.clone()))
    }
}

impl MediaLoader for RodioMediaLoader {
    type Session = RodioPlayer;

    fn load(&self, path: &Path) -> Result<RodioPlayer, PlaybackError> {
        let handle = self.handle()?;

        let bytes: Arc<[u8]> = std::fs::read(path)
            .map_err(|e| PlaybackError::load_failed(path, e))?
            .into();

        let duration = probe_duration(&bytes)?;
        let sink = Sink::try_new(handle).map_err(|e| PlaybackError::DeviceUnavailable(e.to_string()))?;
        sink.pause();

        debug!(path = %path.display(), ?duration, "Decoded audio source");

        Ok(RodioPlayer {
            sink,
            bytes,
            duration,
            finished: Arc::new(AtomicBool::new(false)),
            events: self.events.clone(),
        })
    }
}

fn decoder(bytes: &Arc<[u8]>) -> Result<Decoder<AudioBytes>, PlaybackError> {
    Decoder::new(Cursor::new(Arc::clone(bytes))).map_err(|e| PlaybackError::Decode(e.to_string()))
}

/// Total length of an encoded source
fn probe_duration(bytes: &Arc<[u8]>) -> Result<Duration, PlaybackError> {
    let source = decoder(bytes)?;
    if let Some(duration) = source.total_duration() {
        return Ok(duration);
    }

    let channels = source.channels().max(1) as u64;
    let sample_rate = source.sample_rate().max(1) as u64;
    let frames = source.count() as u64 / channels;
    Ok(Duration::from_secs_f64(frames as f64 / sample_rate as f64))
}

/// A loaded source on its own sink
pub struct RodioPlayer {
    sink: Sink,
    bytes: Arc<[u8]>,
    duration: Duration,
    /// Set from the audio thread once the source has played out
    finished: Arc<AtomicBool>,
    events: EventSender,
}

impl RodioPlayer {
    fn has_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    /// Queue the source from the beginning
    fn enqueue(&mut self) -> Result<(), PlaybackError> {
        let source = decoder(&self.bytes)?;

        self.sink.clear();
        self.finished.store(false, Ordering::SeqCst);

        let finished = Arc::clone(&self.finished);
        let events = self.events.clone();
        let on_end = EmptyCallback::<i16>::new(Box::new(move || {
            finished.store(true, Ordering::SeqCst);
            let _ = events.send(TransportEvent::PlaybackFinished { successfully: true });
        }));

        self.sink.append(source);
        self.sink.append(on_end);
        Ok(())
    }
}

impl PlaybackSession for RodioPlayer {
    fn play(&mut self) -> Result<(), PlaybackError> {
        if self.has_finished() || self.sink.empty() {
            if let Err(e) = self.enqueue() {
                if let PlaybackError::Decode(message) = &e {
                    let _ = self.events.send(TransportEvent::DecodeError(message.clone()));
                }
                return Err(e);
            }
        }
        self.sink.play();
        Ok(())
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn is_playing(&self) -> bool {
        is_audible(self.sink.is_paused(), self.has_finished())
    }

    fn elapsed(&self) -> Duration {
        position(self.sink.get_pos(), self.duration, self.has_finished())
    }

    fn duration(&self) -> Duration {
        self.duration
    }
}

fn is_audible(paused: bool, finished: bool) -> bool {
    !paused && !finished
}

/// Sink position clamped to the source, back to zero once it has played out
fn position(sink_pos: Duration, duration: Duration, finished: bool) -> Duration {
    if finished {
        Duration::ZERO
    } else {
        sink_pos.min(duration)
    }
}
