//! Fingerprint generation
//!
//! Pipeline: validation -> spectrogram -> {peaks, chroma + key, MFCC, tempo}
//! -> hash. The extractors are independent pure functions of the same
//! read-only spectrogram and run as a rayon fan-out; results are joined
//! before assembly, so either a complete record or an error comes back.

use std::time::Instant;

use rayon::prelude::*;

use super::record::AudioFingerprint;
use crate::config::FingerprintConfig;
use crate::error::FingerprintError;
use crate::features::chroma::extract_chroma;
use crate::features::key::{detect_key, KEY_TEMPLATES};
use crate::features::mfcc::extract_mfcc;
use crate::features::peaks::extract_peaks;
use crate::features::period::detect_tempo;
use crate::hashing::hash_peaks;
use crate::preprocessing::validation::validate_samples;
use crate::spectrogram::compute_spectrogram_with_sizes;

/// Generate a fingerprint with the default configuration
///
/// # Arguments
///
/// * `samples` - Decoded mono PCM samples
/// * `sample_rate` - Sample rate in Hz
///
/// # Errors
///
/// - `InvalidInput` for an empty buffer or zero sample rate
/// - `DecodeError` for NaN or infinite samples
///
/// # Example
///
/// ```
/// use stratum_fingerprint::generate_fingerprint;
///
/// let samples: Vec<f32> = (0..44100)
///     .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 44100.0).sin())
///     .collect();
/// let fp = generate_fingerprint(&samples, 44100)?;
/// assert!((fp.duration - 1.0).abs() < 1e-6);
/// # Ok::<(), stratum_fingerprint::FingerprintError>(())
/// ```
pub fn generate_fingerprint(samples: &[f32], sample_rate: u32) -> Result<AudioFingerprint, FingerprintError> {
    generate_fingerprint_with_config(samples, sample_rate, &FingerprintConfig::default())
}

/// Generate a fingerprint with explicit configuration
///
/// # Errors
///
/// As [`generate_fingerprint`], plus `InvalidInput` for an invalid `config`.
pub fn generate_fingerprint_with_config(
    samples: &[f32],
    sample_rate: u32,
    config: &FingerprintConfig,
) -> Result<AudioFingerprint, FingerprintError> {
    let start_time = Instant::now();

    config.validate()?;
    validate_samples(samples, sample_rate)?;

    log::debug!(
        "Starting fingerprint generation: {} samples at {} Hz",
        samples.len(),
        sample_rate
    );

    let spectrogram =
        compute_spectrogram_with_sizes(samples, sample_rate, config.frame_size, config.hop_size)?;

    let ((frequency_peaks, (chroma_features, key)), (mfcc_data, tempo)) = rayon::join(
        || {
            rayon::join(
                || {
                    extract_peaks(
                        &spectrogram,
                        config.peak_neighborhood,
                        config.peak_noise_floor,
                        config.peaks_per_frame,
                        config.peak_level_step_db,
                    )
                },
                || {
                    let chroma = extract_chroma(
                        &spectrogram,
                        config.reference_frequency,
                        config.chroma_min_frequency,
                        config.chroma_max_frequency,
                    );
                    let key = detect_key(&chroma, &KEY_TEMPLATES, config.key_confidence_floor);
                    (chroma, key)
                },
            )
        },
        || {
            rayon::join(
                || extract_mfcc(&spectrogram, config.n_mel_bands, config.n_mfcc),
                || detect_tempo(&spectrogram, config),
            )
        },
    );

    let spectrogram_hash = hash_peaks(&frequency_peaks, config.hash_decimals);

    let fingerprint = AudioFingerprint {
        spectrogram_hash,
        frequency_peaks,
        chroma_features,
        mfcc_data,
        tempo_signature: tempo.map(|t| t.bpm),
        key_signature: key.map(|k| k.key),
        duration: samples.len() as f32 / sample_rate as f32,
        sample_rate,
        hop_size: spectrogram.hop_size,
    };

    log::debug!(
        "Fingerprint ready: {} frames, tempo={:?}, key={:?}, hash={}.. in {:.2}ms",
        fingerprint.n_frames(),
        fingerprint.tempo_signature,
        fingerprint.key_signature.map(|k| k.name()),
        &fingerprint.spectrogram_hash[..12],
        start_time.elapsed().as_secs_f32() * 1000.0
    );

    Ok(fingerprint)
}

/// Fingerprint many clips in parallel, one result per input in input order
///
/// Throughput comes from parallelism across clips; a failing clip does not
/// affect the others.
pub fn generate_fingerprint_batch(
    inputs: &[(&[f32], u32)],
    config: &FingerprintConfig,
) -> Vec<Result<AudioFingerprint, FingerprintError>> {
    log::debug!("Fingerprinting batch of {} clips", inputs.len());

    inputs
        .par_iter()
        .map(|(samples, sample_rate)| generate_fingerprint_with_config(samples, *sample_rate, config))
        .collect()
}
