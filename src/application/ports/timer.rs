//! Poll timer port

use std::time::Duration;

/// Repeating timer that delivers `Tick` events to the transport.
///
/// The timer never owns the transport; it only holds a way to post events.
pub trait PollTimer {
    /// Start ticking every `interval`. No-op when already running.
    fn start(&mut self, interval: Duration);

    /// Stop ticking. Safe to call when already stopped.
    fn cancel(&mut self);

    /// Check if the timer is running
    fn is_active(&self) -> bool;
}
