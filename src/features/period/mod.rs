//! Period estimation (tempo)
//!
//! Convert the onset-strength envelope into a BPM estimate using
//! autocorrelation over the configured BPM range.

pub mod autocorrelation;

pub use autocorrelation::estimate_tempo_from_envelope;

use crate::config::FingerprintConfig;
use crate::features::onset::{flux_to_magnitude_ratio, spectral_flux_envelope};
use crate::spectrogram::Spectrogram;

/// Below this flux-to-magnitude ratio the clip is treated as steady (no onsets)
const MIN_FLUX_RATIO: f32 = 1e-3;

/// Tempo estimate with confidence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TempoEstimate {
    /// BPM estimate
    pub bpm: f32,

    /// Normalized autocorrelation at the chosen lag (0.0-1.0)
    pub confidence: f32,
}

/// Detect the tempo of a spectrogram
///
/// Returns `None` for silence, steady tones and arrhythmic material rather
/// than guessing.
pub fn detect_tempo(spectrogram: &Spectrogram, config: &FingerprintConfig) -> Option<TempoEstimate> {
    let envelope = spectral_flux_envelope(spectrogram);

    let ratio = flux_to_magnitude_ratio(spectrogram, &envelope);
    if ratio < MIN_FLUX_RATIO {
        log::debug!("Flux ratio {:.2e} below {:.0e}, no rhythmic content", ratio, MIN_FLUX_RATIO);
        return None;
    }

    estimate_tempo_from_envelope(
        &envelope,
        spectrogram.sample_rate,
        spectrogram.hop_size,
        config.min_bpm,
        config.max_bpm,
        config.tempo_confidence_threshold,
    )
}
