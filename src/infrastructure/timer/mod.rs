//! Timer infrastructure module

mod tokio_interval;

pub use tokio_interval::TokioPollTimer;
