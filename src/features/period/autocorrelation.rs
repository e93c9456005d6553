//! Autocorrelation-based tempo estimation
//!
//! Finds the dominant periodicity of the onset-strength envelope.
//!
//! # Algorithm
//!
//! 1. Remove the envelope mean
//! 2. Compute autocorrelation with FFT acceleration: `ACF = IFFT(|FFT(signal)|²)`
//! 3. Normalize by `ACF[0]` so values are comparable across clips
//! 4. Pick the strongest lag inside the BPM range and convert:
//!    `BPM = 60 * sample_rate / (hop_size * lag)`
//!
//! # Reference
//!
//! Ellis, D. P. W., & Pikrakis, A. (2006). Real-time Beat Induction.
//! *Proceedings of the International Conference on Music Information Retrieval*.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use super::TempoEstimate;

const EPSILON: f32 = 1e-10;

/// Estimate tempo from an onset-strength envelope
///
/// # Arguments
///
/// * `envelope` - Onset strength per frame
/// * `sample_rate` - Sample rate in Hz
/// * `hop_size` - Hop size of the envelope frames in samples
/// * `min_bpm` - Minimum BPM to consider (e.g. 40.0)
/// * `max_bpm` - Maximum BPM to consider (e.g. 220.0)
/// * `confidence_threshold` - Minimum normalized ACF value at the chosen lag
///
/// # Returns
///
/// `None` when the envelope carries no energy, the clip is too short to cover
/// the lag range, or the best lag is below `confidence_threshold`.
pub fn estimate_tempo_from_envelope(
    envelope: &[f32],
    sample_rate: u32,
    hop_size: usize,
    min_bpm: f32,
    max_bpm: f32,
    confidence_threshold: f32,
) -> Option<TempoEstimate> {
    if envelope.len() < 2 || sample_rate == 0 || hop_size == 0 || min_bpm <= 0.0 || min_bpm >= max_bpm {
        return None;
    }

    let mean = envelope.iter().sum::<f32>() / envelope.len() as f32;
    let centered: Vec<f32> = envelope.iter().map(|&x| x - mean).collect();

    let acf = compute_autocorrelation_fft(&centered);
    let energy = acf[0];
    if energy < EPSILON {
        log::debug!("Onset envelope has no variance, no tempo");
        return None;
    }

    // lag = (60 * sample_rate) / (BPM * hop_size)
    let frames_per_minute = 60.0 * sample_rate as f32 / hop_size as f32;
    let lag_min = ((frames_per_minute / max_bpm).ceil() as usize).max(1);
    let lag_max = ((frames_per_minute / min_bpm).floor() as usize).min(acf.len() - 1);

    if lag_min > lag_max {
        log::warn!(
            "Lag range [{}, {}] unavailable for envelope of {} frames",
            lag_min,
            lag_max,
            envelope.len()
        );
        return None;
    }

    let mut best_lag = lag_min;
    let mut best_value = f32::MIN;
    for (lag, &value) in acf.iter().enumerate().take(lag_max + 1).skip(lag_min) {
        if value > best_value {
            best_lag = lag;
            best_value = value;
        }
    }

    let confidence = (best_value / energy).clamp(0.0, 1.0);
    let bpm = frames_per_minute / best_lag as f32;

    log::debug!(
        "Autocorrelation tempo: lag={} -> {:.2} BPM, confidence={:.3} (threshold {:.2})",
        best_lag,
        bpm,
        confidence,
        confidence_threshold
    );

    if confidence < confidence_threshold {
        return None;
    }

    Some(TempoEstimate { bpm, confidence })
}

/// Compute autocorrelation using FFT acceleration
///
/// Uses the identity: ACF = IFFT(|FFT(signal)|²), zero-padded to avoid
/// circular wrap-around.
///
/// # Returns
///
/// Autocorrelation function (same length as input)
fn compute_autocorrelation_fft(signal: &[f32]) -> Vec<f32> {
    let n = signal.len();

    // FFT size: next power of 2 >= 2*n (for zero-padding)
    let fft_size = (2 * n).next_power_of_two();

    let mut fft_input: Vec<Complex<f32>> = signal.iter().map(|&x| Complex::new(x, 0.0)).collect();
    fft_input.resize(fft_size, Complex::new(0.0, 0.0));

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(fft_size);
    fft.process(&mut fft_input);

    for x in &mut fft_input {
        *x = *x * x.conj();
    }

    let ifft = planner.plan_fft_inverse(fft_size);
    ifft.process(&mut fft_input);

    let scale = 1.0 / (fft_size as f32);
    fft_input[..n].iter().map(|x| x.re * scale).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pulse_envelope(period_frames: usize, n_frames: usize) -> Vec<f32> {
        (0..n_frames)
            .map(|i| if i % period_frames == 0 { 1.0 } else { 0.0 })
            .collect()
    }

    #[test]
    fn test_tempo_120bpm_pulses() {
        // 120 BPM at 44.1kHz, 512 hop: ~43 frames per beat
        let envelope = pulse_envelope(43, 860);
        let estimate = estimate_tempo_from_envelope(&envelope, 44100, 512, 40.0, 220.0, 0.3)
            .expect("Pulse train should have a tempo");

        assert!(
            (estimate.bpm - 120.0).abs() < 3.0,
            "BPM should be close to 120, got {:.2}",
            estimate.bpm
        );
        assert!(estimate.confidence > 0.5);
    }

    #[test]
    fn test_tempo_90bpm_pulses() {
        // 90 BPM: 44100 * 60 / 90 / 512 ~= 57.4 frames
        let envelope = pulse_envelope(57, 1200);
        let estimate = estimate_tempo_from_envelope(&envelope, 44100, 512, 40.0, 220.0, 0.3).unwrap();
        assert!((estimate.bpm - 90.0).abs() < 3.0, "got {:.2}", estimate.bpm);
    }

    #[test]
    fn test_tempo_silence_is_none() {
        let envelope = vec![0.0f32; 500];
        assert!(estimate_tempo_from_envelope(&envelope, 44100, 512, 40.0, 220.0, 0.3).is_none());
    }

    #[test]
    fn test_tempo_too_short_is_none() {
        let envelope = pulse_envelope(43, 20);
        assert!(estimate_tempo_from_envelope(&envelope, 44100, 512, 40.0, 220.0, 0.3).is_none());
    }

    #[test]
    fn test_tempo_invalid_params() {
        let envelope = pulse_envelope(43, 500);
        assert!(estimate_tempo_from_envelope(&envelope, 0, 512, 40.0, 220.0, 0.3).is_none());
        assert!(estimate_tempo_from_envelope(&envelope, 44100, 0, 40.0, 220.0, 0.3).is_none());
        assert!(estimate_tempo_from_envelope(&envelope, 44100, 512, 220.0, 40.0, 0.3).is_none());
    }

    #[test]
    fn test_compute_autocorrelation_fft() {
        let signal = vec![1.0, 0.0, 1.0, 0.0, 1.0, 0.0];
        let acf = compute_autocorrelation_fft(&signal);

        assert_eq!(acf.len(), signal.len());
        assert!((acf[0] - 3.0).abs() < 1e-4);
        assert!((acf[1]).abs() < 1e-4);
        assert!((acf[2] - 2.0).abs() < 1e-4);
    }
}
