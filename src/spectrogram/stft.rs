//! Short-time Fourier transform
//!
//! Frames are transformed independently (in parallel with rayon); within a
//! frame the FFT and magnitude computation are sequential, so the output is
//! bit-identical across runs and thread counts.

use rayon::prelude::*;
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use super::window::hann_window;
use super::{frame_count, Spectrogram};
use crate::config::{DEFAULT_FRAME_SIZE, DEFAULT_HOP_SIZE};
use crate::error::FingerprintError;

/// Compute a magnitude spectrogram with the default 2048/512 frame/hop sizes
///
/// # Errors
///
/// Returns `InvalidInput` if `samples` is empty or `sample_rate` is zero.
pub fn compute_spectrogram(samples: &[f32], sample_rate: u32) -> Result<Spectrogram, FingerprintError> {
    compute_spectrogram_with_sizes(samples, sample_rate, DEFAULT_FRAME_SIZE, DEFAULT_HOP_SIZE)
}

/// Compute a magnitude spectrogram
///
/// # Arguments
///
/// * `samples` - Mono audio samples
/// * `sample_rate` - Sample rate in Hz
/// * `frame_size` - FFT frame size
/// * `hop_size` - Hop between consecutive frames
///
/// # Returns
///
/// `floor((len - frame_size) / hop_size) + 1` frames of `frame_size / 2 + 1`
/// magnitude bins. Inputs shorter than `frame_size` are zero-padded to one frame;
/// trailing samples that do not fill a whole frame are not analyzed.
///
/// # Errors
///
/// Returns `InvalidInput` if `samples` is empty, `sample_rate` is zero, or
/// either size is zero.
pub fn compute_spectrogram_with_sizes(
    samples: &[f32],
    sample_rate: u32,
    frame_size: usize,
    hop_size: usize,
) -> Result<Spectrogram, FingerprintError> {
    if samples.is_empty() {
        return Err(FingerprintError::InvalidInput(
            "Empty audio samples".to_string(),
        ));
    }

    if sample_rate == 0 {
        return Err(FingerprintError::InvalidInput(
            "Invalid sample rate: 0".to_string(),
        ));
    }

    if frame_size == 0 || hop_size == 0 {
        return Err(FingerprintError::InvalidInput(format!(
            "Invalid STFT sizes: frame={}, hop={}",
            frame_size, hop_size
        )));
    }

    if samples.len() < frame_size {
        log::warn!(
            "Input of {} samples is shorter than one frame ({}), zero-padding",
            samples.len(),
            frame_size
        );
    }

    let n_frames = frame_count(samples.len(), frame_size, hop_size);
    let n_bins = frame_size / 2 + 1;

    log::debug!(
        "Computing spectrogram: {} samples at {} Hz -> {} frames x {} bins",
        samples.len(),
        sample_rate,
        n_frames,
        n_bins
    );

    let window = hann_window(frame_size);
    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(frame_size);

    let frames: Vec<Vec<f32>> = (0..n_frames)
        .into_par_iter()
        .map(|frame_idx| {
            let start = frame_idx * hop_size;
            let end = (start + frame_size).min(samples.len());

            let mut buffer = vec![Complex::new(0.0f32, 0.0); frame_size];
            for (i, (&s, &w)) in samples[start..end].iter().zip(window.iter()).enumerate() {
                buffer[i] = Complex::new(s * w, 0.0);
            }

            fft.process(&mut buffer);

            buffer[..n_bins].iter().map(|c| c.norm()).collect()
        })
        .collect();

    Ok(Spectrogram {
        frames,
        sample_rate,
        frame_size,
        hop_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f32, seconds: f32, sample_rate: u32) -> Vec<f32> {
        let n = (seconds * sample_rate as f32) as usize;
        (0..n)
            .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate as f32).sin() * 0.5)
            .collect()
    }

    #[test]
    fn test_spectrogram_shape() {
        let samples = sine(440.0, 1.0, 44100);
        let spec = compute_spectrogram(&samples, 44100).unwrap();
        assert_eq!(spec.n_frames(), (44100 - 2048) / 512 + 1);
        assert!(spec.frames.iter().all(|f| f.len() == 1025));
    }

    #[test]
    fn test_spectrogram_peak_at_tone() {
        let samples = sine(1000.0, 0.5, 44100);
        let spec = compute_spectrogram(&samples, 44100).unwrap();
        let frame = &spec.frames[3];
        let (peak_bin, _) = frame
            .iter()
            .enumerate()
            .fold((0, 0.0f32), |best, (i, &m)| if m > best.1 { (i, m) } else { best });
        let peak_freq = spec.bin_frequency(peak_bin);
        assert!(
            (peak_freq - 1000.0).abs() < 25.0,
            "Peak should be near 1000 Hz, got {:.1}",
            peak_freq
        );
    }

    #[test]
    fn test_spectrogram_short_input_zero_padded() {
        let samples = vec![0.25f32; 100];
        let spec = compute_spectrogram(&samples, 44100).unwrap();
        assert_eq!(spec.n_frames(), 1);
        assert_eq!(spec.frames[0].len(), 1025);
    }

    #[test]
    fn test_spectrogram_invalid_input() {
        assert!(compute_spectrogram(&[], 44100).is_err());
        assert!(compute_spectrogram(&[0.0; 4096], 0).is_err());
        assert!(compute_spectrogram_with_sizes(&[0.0; 4096], 44100, 2048, 0).is_err());
    }

    #[test]
    fn test_spectrogram_deterministic() {
        let samples = sine(523.25, 0.75, 22050);
        let a = compute_spectrogram(&samples, 22050).unwrap();
        let b = compute_spectrogram(&samples, 22050).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_spectrogram_silence_is_zero() {
        let spec = compute_spectrogram(&vec![0.0f32; 8192], 44100).unwrap();
        assert!(spec.frames.iter().flatten().all(|&m| m == 0.0));
    }
}
