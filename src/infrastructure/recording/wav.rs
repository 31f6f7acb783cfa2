//! PCM post-processing and WAV output
//!
//! Captured audio arrives interleaved at the device rate; recordings are
//! stored mono at the configured rate as 16-bit PCM.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};
use rubato::{FftFixedIn, Resampler};

use crate::application::ports::RecordingError;
use crate::domain::recording::CaptureFormat;

pub type WavFileWriter = WavWriter<BufWriter<File>>;

/// Resampler chunk size in frames
const CHUNK_SIZE: usize = 1024;

/// WAV header for a capture format
pub fn wav_spec(format: CaptureFormat) -> WavSpec {
    WavSpec {
        channels: format.channels,
        sample_rate: format.sample_rate,
        bits_per_sample: CaptureFormat::BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    }
}

/// Create the destination file and write its header
pub fn create_writer(path: &Path, format: CaptureFormat) -> Result<WavFileWriter, RecordingError> {
    WavWriter::create(path, wav_spec(format)).map_err(|e| {
        RecordingError::StartFailed(format!("Cannot create {}: {}", path.display(), e))
    })
}

/// Mix interleaved frames down to mono
pub fn mix_to_mono(samples: &[i16], channels: u16) -> Vec<i16> {
    if channels <= 1 {
        return samples.to_vec();
    }

    samples
        .chunks(channels as usize)
        .map(|frame| {
            let sum: i32 = frame.iter().map(|&s| s as i32).sum();
            (sum / frame.len() as i32) as i16
        })
        .collect()
}

/// Resample mono audio between rates
pub fn resample(samples: &[i16], from_rate: u32, to_rate: u32) -> Result<Vec<i16>, RecordingError> {
    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let samples_f32: Vec<f32> = samples.iter().map(|&s| s as f32 / 32768.0).collect();

    let ratio = to_rate as f64 / from_rate as f64;
    let output_len = (samples_f32.len() as f64 * ratio).ceil() as usize;

    let mut resampler = FftFixedIn::<f32>::new(
        from_rate as usize,
        to_rate as usize,
        CHUNK_SIZE,
        2, // Sub-chunks
        1, // Mono
    )
    .map_err(|e| RecordingError::EncodeFailed(format!("Resampler init failed: {}", e)))?;

    let mut output = Vec::with_capacity(output_len);
    let mut input_pos = 0;

    while input_pos < samples_f32.len() {
        let frames_needed = resampler.input_frames_next();
        let end_pos = (input_pos + frames_needed).min(samples_f32.len());

        let mut chunk = samples_f32[input_pos..end_pos].to_vec();
        chunk.resize(frames_needed, 0.0);

        let resampled = resampler
            .process(&[chunk], None)
            .map_err(|e| RecordingError::EncodeFailed(format!("Resampling failed: {}", e)))?;

        output.extend(
            resampled[0]
                .iter()
                .map(|&s| (s.clamp(-1.0, 1.0) * 32767.0) as i16),
        );
        input_pos = end_pos;
    }

    output.truncate(output_len);

    Ok(output)
}

/// Write samples and finalize the header
pub fn finish(mut writer: WavFileWriter, samples: &[i16]) -> Result<(), RecordingError> {
    for &sample in samples {
        writer
            .write_sample(sample)
            .map_err(|e| RecordingError::EncodeFailed(e.to_string()))?;
    }
    writer
        .finalize()
        .map_err(|e| RecordingError::EncodeFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::WavReader;
    use tempfile::TempDir;

    #[test]
    fn mix_to_mono_single_channel() {
        let mono = vec![100i16, 200, 300];
        assert_eq!(mix_to_mono(&mono, 1), mono);
    }

    #[test]
    fn mix_to_mono_two_channels() {
        let stereo = vec![100i16, 200, 300, 400];
        assert_eq!(mix_to_mono(&stereo, 2), vec![150, 350]);
    }

    #[test]
    fn mix_to_mono_partial_frame() {
        let samples = vec![100i16, 200, 300];
        assert_eq!(mix_to_mono(&samples, 2), vec![150, 300]);
    }

    #[test]
    fn resample_same_rate_is_identity() {
        let samples = vec![1i16, 2, 3, 4];
        assert_eq!(resample(&samples, 44_100, 44_100).unwrap(), samples);
    }

    #[test]
    fn resample_changes_length_by_ratio() {
        let samples = vec![0i16; 48_000];
        let output = resample(&samples, 48_000, 44_100).unwrap();
        assert!(output.len() <= 44_100);
        assert!(output.len() > 43_000);
    }

    #[test]
    fn spec_matches_capture_format() {
        let spec = wav_spec(CaptureFormat::default());
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 44_100);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, SampleFormat::Int);
    }

    #[test]
    fn finish_writes_readable_wav() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("take.wav");
        let format = CaptureFormat::mono(8_000);

        let writer = create_writer(&path, format).unwrap();
        finish(writer, &[0, 1000, -1000, 32767]).unwrap();

        let mut reader = WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_rate, 8_000);
        let samples: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();
        assert_eq!(samples, vec![0, 1000, -1000, 32767]);
    }

    #[test]
    fn create_writer_fails_for_missing_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("take.wav");

        let result = create_writer(&path, CaptureFormat::default());
        assert!(matches!(result, Err(RecordingError::StartFailed(_))));
    }
}
