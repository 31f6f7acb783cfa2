//! Configuration domain module

mod app_config;

pub use app_config::{
    AppConfig, DEFAULT_POLL_INTERVAL_MS, DEFAULT_SOURCE, POLL_INTERVAL_RANGE_MS, SAMPLE_RATE_RANGE,
};
