//! Spectral flux onset strength
//!
//! Onset strength per frame is the summed positive magnitude increase over the
//! previous frame (half-wave rectified spectral flux).

use crate::spectrogram::Spectrogram;

/// Compute the onset-strength envelope of a spectrogram
///
/// # Returns
///
/// One value per frame; frame 0 has no predecessor and is 0.0
pub fn spectral_flux_envelope(spectrogram: &Spectrogram) -> Vec<f32> {
    let frames = &spectrogram.frames;
    let mut envelope = Vec::with_capacity(frames.len());

    if frames.is_empty() {
        return envelope;
    }

    envelope.push(0.0);
    for pair in frames.windows(2) {
        let flux: f32 = pair[1]
            .iter()
            .zip(pair[0].iter())
            .map(|(&curr, &prev)| (curr - prev).max(0.0))
            .sum();
        envelope.push(flux);
    }

    log::debug!(
        "Spectral flux envelope: {} frames, max={:.4}",
        envelope.len(),
        envelope.iter().copied().fold(0.0f32, f32::max)
    );

    envelope
}

/// Ratio of total onset strength to total spectral magnitude
///
/// Steady tones have flux orders of magnitude below their magnitude (rounding
/// noise only); rhythmic material does not. Returns 0.0 for silence.
pub fn flux_to_magnitude_ratio(spectrogram: &Spectrogram, envelope: &[f32]) -> f32 {
    let total_magnitude: f32 = spectrogram
        .frames
        .iter()
        .map(|frame| frame.iter().sum::<f32>())
        .sum();
    if total_magnitude <= 0.0 {
        return 0.0;
    }
    envelope.iter().sum::<f32>() / total_magnitude
}
