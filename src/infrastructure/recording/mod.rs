//! Recording infrastructure module
//!
//! Microphone capture through cpal, stored as mono 16-bit PCM WAV.

mod cpal_recorder;
mod wav;

pub use cpal_recorder::CpalRecorder;
pub use wav::{mix_to_mono, resample, wav_spec};
