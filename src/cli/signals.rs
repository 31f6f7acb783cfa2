//! Shutdown signal handling for the screen

use colored::Colorize;
use tracing::warn;

use crate::application::events::{EventSender, TransportEvent};

/// Post `Shutdown` to the transport on Ctrl+C (and SIGTERM on unix)
pub fn spawn_shutdown_listener(events: EventSender) -> Result<(), std::io::Error> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate())?;
        let tx_term = events.clone();
        tokio::spawn(async move {
            sigterm.recv().await;
            eprintln!("{} Received SIGTERM (shutdown)", "↓".cyan());
            let _ = tx_term.send(TransportEvent::Shutdown);
        });
    }

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                eprintln!("{} Received SIGINT (shutdown)", "↓".cyan());
                let _ = events.send(TransportEvent::Shutdown);
            }
            Err(e) => warn!(error = %e, "Failed to listen for Ctrl+C"),
        }
    });

    Ok(())
}
