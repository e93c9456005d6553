//! Chroma vector extraction
//!
//! Converts FFT magnitude spectrogram to 12-element chroma vectors.

use super::normalization::l2_normalize;
use super::{ChromaVector, N_PITCH_CLASSES};
use crate::spectrogram::Spectrogram;

/// Semitones from C up to A
const A_PITCH_CLASS: i32 = 9;

/// Extract chroma vectors from a magnitude spectrogram
///
/// Each bin whose center frequency lies in `[min_frequency, max_frequency]` is
/// mapped to `round(12 * log2(f / reference_frequency))` semitones from A and
/// its magnitude accumulated into that pitch class. Frames are L2-normalized;
/// frames with no energy stay all-zero.
///
/// # Arguments
///
/// * `spectrogram` - Magnitude spectrogram
/// * `reference_frequency` - Tuning of A4 in Hz (typically 440.0)
/// * `min_frequency` - Lowest bin frequency folded in
/// * `max_frequency` - Highest bin frequency folded in
///
/// # Returns
///
/// One chroma vector per frame (C-based indexing)
pub fn extract_chroma(
    spectrogram: &Spectrogram,
    reference_frequency: f32,
    min_frequency: f32,
    max_frequency: f32,
) -> Vec<ChromaVector> {
    log::debug!(
        "Extracting chroma: {} frames, reference={:.1} Hz, range=[{:.1}, {:.1}] Hz",
        spectrogram.n_frames(),
        reference_frequency,
        min_frequency,
        max_frequency
    );

    let pitch_classes =
        bin_pitch_classes(spectrogram, reference_frequency, min_frequency, max_frequency);

    spectrogram
        .frames
        .iter()
        .map(|frame| {
            let mut chroma = [0.0f32; N_PITCH_CLASSES];
            for (&magnitude, pitch_class) in frame.iter().zip(pitch_classes.iter()) {
                if let Some(pc) = pitch_class {
                    chroma[*pc] += magnitude;
                }
            }
            l2_normalize(&mut chroma);
            chroma
        })
        .collect()
}

/// Pitch class (C = 0) of every bin, `None` outside the frequency range
fn bin_pitch_classes(
    spectrogram: &Spectrogram,
    reference_frequency: f32,
    min_frequency: f32,
    max_frequency: f32,
) -> Vec<Option<usize>> {
    (0..spectrogram.n_bins())
        .map(|bin| {
            let freq = spectrogram.bin_frequency(bin);
            if freq <= 0.0 || freq < min_frequency || freq > max_frequency {
                return None;
            }
            Some(pitch_class(freq, reference_frequency))
        })
        .collect()
}

/// Pitch class (C = 0 .. B = 11) nearest to `freq`
pub fn pitch_class(freq: f32, reference_frequency: f32) -> usize {
    let semitones_from_a = (12.0 * (freq / reference_frequency).log2()).round() as i32;
    (semitones_from_a + A_PITCH_CLASS).rem_euclid(N_PITCH_CLASSES as i32) as usize
}
