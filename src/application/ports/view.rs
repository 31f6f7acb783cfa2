//! View port

use crate::domain::transport::ViewSnapshot;

/// Port for whatever draws the screen
pub trait TransportView {
    /// Show the latest projection
    fn apply(&mut self, view: &ViewSnapshot);
}
