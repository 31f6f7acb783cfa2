//! Terminal rendering of the transport screen
//!
//! The scrub slider is an indicatif bar measured in milliseconds; the
//! controls and time labels are drawn as its message.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::application::ports::TransportView;
use crate::domain::transport::{ToggleState, ViewSnapshot};

const BAR_TEMPLATE: &str = "{msg} [{bar:30.cyan/blue}]";

/// Draws snapshots on stderr
pub struct TerminalView {
    bar: ProgressBar,
    last: Option<ViewSnapshot>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::with_bar(ProgressBar::new(0))
    }

    /// View drawing nowhere, for tests
    pub fn hidden() -> Self {
        Self::with_bar(ProgressBar::hidden())
    }

    fn with_bar(bar: ProgressBar) -> Self {
        let style = ProgressStyle::with_template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        bar.set_style(style);
        Self { bar, last: None }
    }

    /// Last snapshot drawn
    pub fn last(&self) -> Option<&ViewSnapshot> {
        self.last.as_ref()
    }

    /// Leave the final frame on screen
    pub fn finish(&self) {
        self.bar.abandon();
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

impl TransportView for TerminalView {
    fn apply(&mut self, view: &ViewSnapshot) {
        if self.last.as_ref() == Some(view) {
            return;
        }

        self.bar.set_length(seconds_to_ms(view.slider.max));
        self.bar.set_position(seconds_to_ms(view.slider.value));
        self.bar.set_message(format_status(view));
        self.last = Some(view.clone());
    }
}

fn seconds_to_ms(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0) as u64
    } else {
        0
    }
}

/// Controls and time labels of a snapshot
pub fn format_status(view: &ViewSnapshot) -> String {
    format!(
        "{} {} {} {}",
        control_label("play", &view.play),
        control_label("rec", &view.record),
        view.time_label,
        view.remaining_label
    )
}

fn control_label(name: &str, state: &ToggleState) -> String {
    let label = format!("[{}]", name);
    if !state.enabled {
        label.dimmed().to_string()
    } else if state.selected {
        label.green().bold().to_string()
    } else {
        label
    }
}
