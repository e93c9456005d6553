//! Spectral peak picking
//!
//! Each analysis frame keeps its strongest local maxima over a `±neighborhood`
//! window that exceed the noise floor: the dominant bin plus up to
//! `peaks_per_frame - 1` weaker partials, each tagged with its level relative
//! to the dominant peak. Frames without such a bin keep their slot with
//! `bin: None` so every feature stays frame-aligned.

use crate::fingerprint::{FrequencyPeak, PeakPartial};
use crate::spectrogram::Spectrogram;

/// Extract the peak constellation of every spectrogram frame
///
/// # Arguments
///
/// * `spectrogram` - Magnitude spectrogram
/// * `neighborhood` - Half-width of the local-maximum window in bins (e.g. 2)
/// * `noise_floor` - Minimum magnitude for a peak
/// * `peaks_per_frame` - Local maxima kept per frame, dominant included (e.g. 5)
/// * `level_step_db` - Quantization step of relative levels in dB (e.g. 6.0)
///
/// # Returns
///
/// Exactly `spectrogram.n_frames()` entries, in frame order
pub fn extract_peaks(
    spectrogram: &Spectrogram,
    neighborhood: usize,
    noise_floor: f32,
    peaks_per_frame: usize,
    level_step_db: f32,
) -> Vec<FrequencyPeak> {
    let peaks: Vec<FrequencyPeak> = spectrogram
        .frames
        .iter()
        .enumerate()
        .map(|(frame, magnitudes)| {
            frame_peaks(frame, magnitudes, neighborhood, noise_floor, peaks_per_frame, level_step_db)
        })
        .collect();

    log::debug!(
        "Extracted peaks: {} frames, {} without a peak above floor {:.2e}, {} partials",
        peaks.len(),
        peaks.iter().filter(|p| p.bin.is_none()).count(),
        noise_floor,
        peaks.iter().map(|p| p.partials.len()).sum::<usize>()
    );

    peaks
}

fn frame_peaks(
    frame: usize,
    magnitudes: &[f32],
    neighborhood: usize,
    noise_floor: f32,
    peaks_per_frame: usize,
    level_step_db: f32,
) -> FrequencyPeak {
    let mut maxima = local_maxima(magnitudes, neighborhood, noise_floor);
    // Stable sort: equal magnitudes keep ascending bin order
    maxima.sort_by(|a, b| b.1.total_cmp(&a.1));
    maxima.truncate(peaks_per_frame);

    let Some(&(dominant_bin, dominant_value)) = maxima.first() else {
        return FrequencyPeak::dominant(frame, None);
    };

    let partials = maxima[1..]
        .iter()
        .map(|&(bin, value)| PeakPartial {
            bin,
            relative_level: relative_level(value, dominant_value, level_step_db),
        })
        .collect();

    FrequencyPeak {
        frame,
        bin: Some(dominant_bin),
        partials,
    }
}

/// `(bin, magnitude)` of every local maximum above the floor, in bin order
fn local_maxima(magnitudes: &[f32], neighborhood: usize, noise_floor: f32) -> Vec<(usize, f32)> {
    magnitudes
        .iter()
        .enumerate()
        .filter(|&(i, &value)| value > noise_floor && is_local_max(magnitudes, i, neighborhood))
        .map(|(i, &value)| (i, value))
        .collect()
}

/// Level of `value` below `reference` in whole `step_db` steps
fn relative_level(value: f32, reference: f32, step_db: f32) -> i32 {
    let db = 20.0 * (value / reference).log10();
    (db / step_db).round() as i32
}

/// `magnitudes[i]` is >= every neighbor and strictly greater than earlier ones,
/// so a flat plateau reports only its first bin.
fn is_local_max(magnitudes: &[f32], i: usize, neighborhood: usize) -> bool {
    let value = magnitudes[i];
    let lo = i.saturating_sub(neighborhood);
    let hi = (i + neighborhood).min(magnitudes.len() - 1);

    magnitudes[lo..i].iter().all(|&m| value > m) && magnitudes[i + 1..=hi].iter().all(|&m| value >= m)
}
