//! Transport events
//!
//! Everything that can change the transport arrives as one of these, in
//! order, on a single channel: user commands, timer ticks, and backend
//! completion reports from audio threads.

use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// Play/pause pressed
    TogglePlayback,
    /// Record/stop pressed
    ToggleRecording,
    /// Poll timer fired
    Tick,
    /// The player reached the end of its source
    PlaybackFinished { successfully: bool },
    /// The recorder finished writing its file
    RecordingFinished { successfully: bool },
    /// The player failed while decoding
    DecodeError(String),
    /// The recorder failed while capturing or encoding
    EncodeError(String),
    /// Leave the screen
    Shutdown,
}

pub type EventSender = mpsc::UnboundedSender<TransportEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<TransportEvent>;

/// Create the transport event channel
pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
