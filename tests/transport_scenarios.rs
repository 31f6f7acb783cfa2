//! Transport scenarios driven through the event channel with in-memory backends

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use simple_recorder::application::ports::{
    CaptureBackend, MediaLoader, PlaybackError, PlaybackSession, PollTimer, RecordingError,
    TransportView,
};
use simple_recorder::application::{
    event_channel, EventReceiver, EventSender, TransportConfig, TransportController,
    TransportEvent,
};
use simple_recorder::domain::recording::CaptureFormat;
use simple_recorder::domain::transport::{TransportMode, ViewSnapshot};

const BUNDLED: &str = "assets/piano.mp3";

/// A source as the fake device sees it
struct Track {
    path: PathBuf,
    duration: Duration,
    elapsed: Duration,
    playing: bool,
}

type SharedTrack = Rc<RefCell<Track>>;

struct FakeSession {
    track: SharedTrack,
}

impl PlaybackSession for FakeSession {
    fn play(&mut self) -> Result<(), PlaybackError> {
        let mut track = self.track.borrow_mut();
        if track.elapsed >= track.duration {
            track.elapsed = Duration::ZERO;
        }
        track.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.track.borrow_mut().playing = false;
    }

    fn is_playing(&self) -> bool {
        self.track.borrow().playing
    }

    fn elapsed(&self) -> Duration {
        self.track.borrow().elapsed
    }

    fn duration(&self) -> Duration {
        self.track.borrow().duration
    }
}

/// Files on the fake disk, by path
#[derive(Clone, Default)]
struct Disk {
    files: Rc<RefCell<HashMap<PathBuf, Duration>>>,
    loaded: Rc<RefCell<Vec<SharedTrack>>>,
}

impl Disk {
    fn current(&self) -> SharedTrack {
        Rc::clone(self.loaded.borrow().last().expect("nothing loaded"))
    }
}

struct FakeLoader {
    disk: Disk,
}

impl MediaLoader for FakeLoader {
    type Session = FakeSession;

    fn load(&self, path: &Path) -> Result<FakeSession, PlaybackError> {
        let duration = *self
            .disk
            .files
            .borrow()
            .get(path)
            .ok_or_else(|| PlaybackError::load_failed(path, "no such file"))?;

        let track = Rc::new(RefCell::new(Track {
            path: path.to_path_buf(),
            duration,
            elapsed: Duration::ZERO,
            playing: false,
        }));
        self.disk.loaded.borrow_mut().push(Rc::clone(&track));
        Ok(FakeSession { track })
    }
}

/// Writes a fixed-length file on stop and reports it on the channel
struct FakeMic {
    disk: Disk,
    events: EventSender,
    current: Option<PathBuf>,
    destinations: Rc<RefCell<Vec<PathBuf>>>,
}

impl CaptureBackend for FakeMic {
    fn start(&mut self, destination: &Path, _format: CaptureFormat) -> Result<(), RecordingError> {
        self.current = Some(destination.to_path_buf());
        self.destinations
            .borrow_mut()
            .push(destination.to_path_buf());
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(path) = self.current.take() {
            self.disk
                .files
                .borrow_mut()
                .insert(path, Duration::from_secs(4));
            let _ = self
                .events
                .send(TransportEvent::RecordingFinished { successfully: true });
        }
    }

    fn is_recording(&self) -> bool {
        self.current.is_some()
    }

    fn discard(&mut self, path: &Path) -> Result<(), RecordingError> {
        self.disk.files.borrow_mut().remove(path);
        Ok(())
    }
}

#[derive(Default)]
struct FakeTimer {
    active: Rc<RefCell<bool>>,
}

impl PollTimer for FakeTimer {
    fn start(&mut self, _interval: Duration) {
        *self.active.borrow_mut() = true;
    }

    fn cancel(&mut self) {
        *self.active.borrow_mut() = false;
    }

    fn is_active(&self) -> bool {
        *self.active.borrow()
    }
}

#[derive(Default)]
struct Screen {
    frames: Rc<RefCell<Vec<ViewSnapshot>>>,
}

impl TransportView for Screen {
    fn apply(&mut self, view: &ViewSnapshot) {
        self.frames.borrow_mut().push(view.clone());
    }
}

struct Rig {
    controller: TransportController<FakeLoader, FakeMic, FakeTimer, Screen>,
    events: EventSender,
    receiver: EventReceiver,
    disk: Disk,
    frames: Rc<RefCell<Vec<ViewSnapshot>>>,
    timer: Rc<RefCell<bool>>,
    destinations: Rc<RefCell<Vec<PathBuf>>>,
}

impl Rig {
    fn new(bundled_duration: Duration) -> Self {
        let (events, receiver) = event_channel();
        let disk = Disk::default();
        disk.files
            .borrow_mut()
            .insert(PathBuf::from(BUNDLED), bundled_duration);

        let screen = Screen::default();
        let frames = Rc::clone(&screen.frames);
        let timer = FakeTimer::default();
        let timer_flag = Rc::clone(&timer.active);
        let destinations = Rc::new(RefCell::new(Vec::new()));

        let mic = FakeMic {
            disk: disk.clone(),
            events: events.clone(),
            current: None,
            destinations: Rc::clone(&destinations),
        };
        let config = TransportConfig {
            recordings_dir: PathBuf::from("/recordings"),
            ..Default::default()
        };

        let controller = TransportController::new(
            FakeLoader { disk: disk.clone() },
            mic,
            timer,
            screen,
            config,
        );

        Self {
            controller,
            events,
            receiver,
            disk,
            frames,
            timer: timer_flag,
            destinations,
        }
    }

    fn post(&self, event: TransportEvent) {
        self.events.send(event).unwrap();
    }

    /// Hand every queued event to the controller, in order
    fn pump(&mut self) {
        while let Ok(event) = self.receiver.try_recv() {
            self.controller.handle(event);
            assert!(!(self.controller.is_playing() && self.controller.is_recording()));
            assert_eq!(*self.timer.borrow(), self.controller.mode().is_active());
        }
    }

    fn frame(&self) -> ViewSnapshot {
        self.frames.borrow().last().cloned().unwrap()
    }
}

#[test]
fn fresh_start_then_source_loads() {
    let mut rig = Rig::new(Duration::from_secs(125));

    assert_eq!(rig.controller.mode(), TransportMode::Idle);
    let frame = rig.frame();
    assert!(frame.play.enabled);
    assert!(frame.record.enabled);
    assert_eq!(frame.time_label, "00:00");
    assert_eq!(frame.remaining_label, "-00:00");

    assert!(rig.controller.load_source(Path::new(BUNDLED)));
    let frame = rig.frame();
    assert_eq!(frame.time_label, "00:00");
    assert_eq!(frame.remaining_label, "-02:05");
}

#[test]
fn playback_advances_labels() {
    let mut rig = Rig::new(Duration::from_secs(10));
    rig.controller.load_source(Path::new(BUNDLED));

    rig.post(TransportEvent::TogglePlayback);
    rig.pump();
    assert_eq!(rig.controller.mode(), TransportMode::Playing);
    assert!(!rig.frame().record.enabled);

    rig.disk.current().borrow_mut().elapsed = Duration::from_secs(3);
    rig.post(TransportEvent::Tick);
    rig.pump();

    assert_eq!(rig.frame().time_label, "00:03");
    assert_eq!(rig.frame().remaining_label, "-00:07");
}

#[test]
fn record_rejected_while_playing() {
    let mut rig = Rig::new(Duration::from_secs(10));
    rig.controller.load_source(Path::new(BUNDLED));

    rig.post(TransportEvent::TogglePlayback);
    rig.post(TransportEvent::ToggleRecording);
    rig.pump();

    assert_eq!(rig.controller.mode(), TransportMode::Playing);
    assert!(rig.destinations.borrow().is_empty());
}

#[test]
fn recordings_get_unique_destinations() {
    let mut rig = Rig::new(Duration::from_secs(10));
    rig.controller.load_source(Path::new(BUNDLED));

    rig.post(TransportEvent::ToggleRecording);
    rig.pump();
    assert_eq!(rig.controller.mode(), TransportMode::Recording);
    assert!(!rig.frame().play.enabled);

    // Stop, let the file land, and record again
    rig.post(TransportEvent::ToggleRecording);
    rig.pump();
    rig.post(TransportEvent::ToggleRecording);
    rig.pump();

    let destinations = rig.destinations.borrow();
    assert_eq!(destinations.len(), 2);
    assert_ne!(destinations[0], destinations[1]);
    assert!(destinations.iter().all(|d| d.starts_with("/recordings")));
}

#[test]
fn new_recording_replaces_source() {
    let mut rig = Rig::new(Duration::from_secs(10));
    rig.controller.load_source(Path::new(BUNDLED));

    rig.post(TransportEvent::ToggleRecording);
    rig.post(TransportEvent::ToggleRecording);
    rig.pump();

    assert_eq!(rig.controller.mode(), TransportMode::Idle);
    let recorded = rig.destinations.borrow()[0].clone();
    assert_eq!(rig.disk.current().borrow().path, recorded);
    assert_eq!(rig.frame().remaining_label, "-00:04");

    rig.post(TransportEvent::TogglePlayback);
    rig.pump();
    assert_eq!(rig.controller.mode(), TransportMode::Playing);
    assert!(rig.disk.current().borrow().playing);
    assert_eq!(rig.disk.current().borrow().path, recorded);

    // The bundled source is still on disk
    assert!(rig.disk.files.borrow().contains_key(Path::new(BUNDLED)));
}

#[test]
fn end_of_source_returns_to_idle() {
    let mut rig = Rig::new(Duration::from_secs(10));
    rig.controller.load_source(Path::new(BUNDLED));

    rig.post(TransportEvent::TogglePlayback);
    rig.pump();
    assert!(*rig.timer.borrow());

    {
        let track = rig.disk.current();
        let mut track = track.borrow_mut();
        track.playing = false;
        track.elapsed = Duration::ZERO;
    }
    rig.post(TransportEvent::PlaybackFinished { successfully: true });
    rig.pump();

    assert_eq!(rig.controller.mode(), TransportMode::Idle);
    assert!(!*rig.timer.borrow());
    assert_eq!(rig.frame().time_label, "00:00");
    assert_eq!(rig.frame().remaining_label, "-00:10");
}

#[test]
fn replaced_recording_is_discarded() {
    let mut rig = Rig::new(Duration::from_secs(10));
    rig.controller.load_source(Path::new(BUNDLED));

    for _ in 0..2 {
        rig.post(TransportEvent::ToggleRecording);
        rig.post(TransportEvent::ToggleRecording);
        rig.pump();
    }

    let destinations = rig.destinations.borrow();
    let files = rig.disk.files.borrow();
    assert!(!files.contains_key(&destinations[0]));
    assert!(files.contains_key(&destinations[1]));
    assert!(files.contains_key(Path::new(BUNDLED)));
}

#[test]
fn missing_source_keeps_screen_inert() {
    let mut rig = Rig::new(Duration::from_secs(10));
    assert!(!rig.controller.load_source(Path::new("elsewhere.mp3")));

    rig.post(TransportEvent::TogglePlayback);
    rig.post(TransportEvent::Tick);
    rig.pump();

    assert_eq!(rig.controller.mode(), TransportMode::Idle);
    assert_eq!(rig.frame().remaining_label, "-00:00");
}

#[test]
fn shutdown_mid_recording_saves_file() {
    let mut rig = Rig::new(Duration::from_secs(10));
    rig.controller.load_source(Path::new(BUNDLED));

    rig.post(TransportEvent::ToggleRecording);
    rig.post(TransportEvent::Shutdown);
    rig.pump();

    assert_eq!(rig.controller.mode(), TransportMode::Idle);
    assert!(!rig.controller.is_saving());
    assert!(rig.controller.recorded_file().is_some());
}
