//! Application layer - Transport use case and port interfaces
//!
//! Contains the transport state machine, its event type, and trait
//! definitions for the audio devices, timer and view it drives.

pub mod events;
pub mod ports;
pub mod transport;

// Re-export use cases
pub use events::{event_channel, EventReceiver, EventSender, TransportEvent};
pub use transport::{TransportConfig, TransportController};
