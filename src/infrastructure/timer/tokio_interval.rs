//! Poll timer backed by a tokio interval task

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::trace;

use crate::application::events::{EventSender, TransportEvent};
use crate::application::ports::PollTimer;

/// Posts `Tick` events to the transport channel while active.
///
/// Must be started from within a tokio runtime.
pub struct TokioPollTimer {
    events: EventSender,
    task: Option<JoinHandle<()>>,
}

impl TokioPollTimer {
    pub fn new(events: EventSender) -> Self {
        Self { events, task: None }
    }
}

impl PollTimer for TokioPollTimer {
    fn start(&mut self, period: Duration) {
        if self.is_active() {
            return;
        }

        let events = self.events.clone();
        let period = period.max(Duration::from_millis(1));

        self.task = Some(tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // First tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if events.send(TransportEvent::Tick).is_err() {
                    break;
                }
            }
        }));
        trace!(?period, "Poll timer started");
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            trace!("Poll timer cancelled");
        }
    }

    fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for TokioPollTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
