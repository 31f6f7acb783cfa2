//! Capture format

/// Default capture sample rate (44.1kHz)
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Output format of a recording. Always 16-bit signed PCM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureFormat {
    pub sample_rate: u32,
    pub channels: u16,
}

impl CaptureFormat {
    pub const BITS_PER_SAMPLE: u16 = 16;

    /// Mono at the given rate
    pub const fn mono(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            channels: 1,
        }
    }

    /// Calculate number of samples for a given duration in seconds
    pub fn samples_for_duration(&self, seconds: f32) -> usize {
        (self.sample_rate as f32 * seconds) as usize * self.channels as usize
    }
}

impl Default for CaptureFormat {
    fn default() -> Self {
        Self::mono(DEFAULT_SAMPLE_RATE)
    }
}
