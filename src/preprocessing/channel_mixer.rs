//! Channel mixing utilities (multi-channel to mono conversion)

use crate::error::FingerprintError;

/// Channel mixing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMixMode {
    /// Simple average: (L + R) / 2
    Average,
    /// Keep the louder channel per sample
    Dominant,
}

/// Convert stereo to mono
///
/// # Arguments
///
/// * `left` - Left channel samples
/// * `right` - Right channel samples
/// * `mode` - Mixing mode
///
/// # Returns
///
/// Mono samples
///
/// # Errors
///
/// Returns `InvalidInput` if the channels differ in length.
pub fn stereo_to_mono(
    left: &[f32],
    right: &[f32],
    mode: ChannelMixMode,
) -> Result<Vec<f32>, FingerprintError> {
    if left.len() != right.len() {
        return Err(FingerprintError::InvalidInput(format!(
            "Channel length mismatch: left={}, right={}",
            left.len(),
            right.len()
        )));
    }

    log::debug!("Converting {} stereo samples to mono using {:?}", left.len(), mode);

    let mono = left
        .iter()
        .zip(right.iter())
        .map(|(&l, &r)| match mode {
            ChannelMixMode::Average => (l + r) * 0.5,
            ChannelMixMode::Dominant => {
                if l.abs() >= r.abs() {
                    l
                } else {
                    r
                }
            }
        })
        .collect();

    Ok(mono)
}

/// Average interleaved multi-channel samples down to mono
///
/// A trailing partial frame (fewer than `channels` samples) is dropped.
pub fn interleaved_to_mono(samples: &[f32], channels: usize) -> Result<Vec<f32>, FingerprintError> {
    if channels == 0 {
        return Err(FingerprintError::InvalidInput(
            "Channel count must be non-zero".to_string(),
        ));
    }

    if channels == 1 {
        return Ok(samples.to_vec());
    }

    let scale = 1.0 / channels as f32;
    Ok(samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() * scale)
        .collect())
}
