//! View projection
//!
//! Pure mapping from transport state to the observable screen fields.
//! Nothing here mutates session state.

use std::time::Duration;

use super::timecode::format_duration;

/// Transport state read by the projection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewInputs {
    /// Elapsed time of the loaded source (zero when none is loaded)
    pub elapsed: Duration,
    /// Duration of the loaded source (zero when none is loaded)
    pub duration: Duration,
    pub is_playing: bool,
    pub is_recording: bool,
    /// False in play-only mode
    pub recording_enabled: bool,
}

impl Default for ViewInputs {
    fn default() -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration: Duration::ZERO,
            is_playing: false,
            is_recording: false,
            recording_enabled: true,
        }
    }
}

/// Selected/enabled state of a toggle control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleState {
    pub selected: bool,
    pub enabled: bool,
}

/// Scrub slider range and value, in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderState {
    pub min: f64,
    pub max: f64,
    pub value: f64,
}

/// Everything the screen shows
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot {
    pub play: ToggleState,
    pub record: ToggleState,
    pub time_label: String,
    pub remaining_label: String,
    pub slider: SliderState,
}

/// Project transport state onto the screen fields
pub fn render(inputs: &ViewInputs) -> ViewSnapshot {
    let elapsed = inputs.elapsed;
    let total = inputs.duration;
    let remaining = total.saturating_sub(elapsed);

    let max = total.as_secs_f64();

    ViewSnapshot {
        play: ToggleState {
            selected: inputs.is_playing,
            enabled: !inputs.is_recording,
        },
        record: ToggleState {
            selected: inputs.is_recording,
            enabled: !inputs.is_playing && inputs.recording_enabled,
        },
        time_label: format_duration(elapsed),
        remaining_label: format!("-{}", format_duration(remaining)),
        slider: SliderState {
            min: 0.0,
            max,
            value: elapsed.as_secs_f64().min(max),
        },
    }
}
