//! Transport domain module

mod mode;
mod timecode;
mod view;

pub use mode::{InvalidTransition, TransportMode};
pub use timecode::{format_duration, format_timecode, parse_timecode, Timecode};
pub use view::{render, SliderState, ToggleState, ViewInputs, ViewSnapshot};
