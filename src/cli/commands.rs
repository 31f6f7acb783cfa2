//! Typed screen commands read from stdin

use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::application::events::{EventSender, TransportEvent};

/// A line typed on the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenCommand {
    TogglePlayback,
    ToggleRecording,
    Quit,
}

impl ScreenCommand {
    /// Transport event the command posts
    pub fn event(self) -> TransportEvent {
        match self {
            Self::TogglePlayback => TransportEvent::TogglePlayback,
            Self::ToggleRecording => TransportEvent::ToggleRecording,
            Self::Quit => TransportEvent::Shutdown,
        }
    }
}

/// Parse a typed line. Blank or unknown input yields `None`.
pub fn parse_command(line: &str) -> Option<ScreenCommand> {
    match line.trim().to_lowercase().as_str() {
        "p" | "play" | "pause" => Some(ScreenCommand::TogglePlayback),
        "r" | "rec" | "record" | "stop" => Some(ScreenCommand::ToggleRecording),
        "q" | "quit" | "exit" => Some(ScreenCommand::Quit),
        _ => None,
    }
}

/// Read commands from stdin until EOF or quit, posting them as transport events
pub fn spawn_command_reader(events: EventSender) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(io::stdin()).lines();

        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    debug!(error = %e, "Failed to read command");
                    break;
                }
            };

            match parse_command(&line) {
                Some(ScreenCommand::Quit) => break,
                Some(command) => {
                    if events.send(command.event()).is_err() {
                        return;
                    }
                }
                None if line.trim().is_empty() => {}
                None => debug!(input = %line.trim(), "Unknown command"),
            }
        }

        let _ = events.send(TransportEvent::Shutdown);
    });
}
