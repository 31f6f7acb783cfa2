//! Configuration infrastructure module

mod xdg;

pub use xdg::{
    data_dir, default_recordings_dir, resolve_source, source_candidates, XdgConfigStore,
    APP_DIR_NAME,
};
