//! Mel-scaled triangular filterbank

/// Hz to mel (HTK formula)
#[inline]
pub fn hz_to_mel(hz: f32) -> f32 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

/// Mel to Hz (HTK formula)
#[inline]
pub fn mel_to_hz(mel: f32) -> f32 {
    700.0 * (10.0_f32.powf(mel / 2595.0) - 1.0)
}

/// One triangular band stored sparsely from its first non-zero bin
#[derive(Debug, Clone)]
struct MelBand {
    start_bin: usize,
    weights: Vec<f32>,
}

/// Triangular filters evenly spaced on the mel scale between 0 Hz and Nyquist
///
/// Built once per analysis and shared read-only by every frame.
#[derive(Debug, Clone)]
pub struct MelFilterbank {
    bands: Vec<MelBand>,
}

impl MelFilterbank {
    /// Build `n_bands` filters for an FFT of `frame_size` at `sample_rate`
    ///
    /// Weights are evaluated at each bin's center frequency, so bands narrower
    /// than the bin spacing (the lowest ones at 128 bands / 2048-point FFT) may
    /// have no support and always report zero energy.
    pub fn new(n_bands: usize, frame_size: usize, sample_rate: u32) -> Self {
        let n_bins = frame_size / 2 + 1;
        let bin_hz = sample_rate as f32 / frame_size as f32;
        let mel_max = hz_to_mel(sample_rate as f32 / 2.0);

        let hz_points: Vec<f32> = (0..n_bands + 2)
            .map(|i| mel_to_hz(mel_max * i as f32 / (n_bands + 1) as f32))
            .collect();

        let bands = (0..n_bands)
            .map(|m| {
                let (lo, center, hi) = (hz_points[m], hz_points[m + 1], hz_points[m + 2]);
                let mut start_bin = None;
                let mut weights = Vec::new();

                for bin in 0..n_bins {
                    let freq = bin as f32 * bin_hz;
                    if freq <= lo || freq >= hi {
                        if start_bin.is_some() && freq >= hi {
                            break;
                        }
                        continue;
                    }
                    let weight = if freq <= center {
                        (freq - lo) / (center - lo)
                    } else {
                        (hi - freq) / (hi - center)
                    };
                    if start_bin.is_none() {
                        start_bin = Some(bin);
                    }
                    weights.push(weight.max(0.0));
                }

                MelBand {
                    start_bin: start_bin.unwrap_or(0),
                    weights,
                }
            })
            .collect();

        Self { bands }
    }

    /// Number of bands
    pub fn n_bands(&self) -> usize {
        self.bands.len()
    }

    /// Weighted energy of `power_spectrum` in each band
    pub fn apply(&self, power_spectrum: &[f32]) -> Vec<f32> {
        self.bands
            .iter()
            .map(|band| {
                band.weights
                    .iter()
                    .zip(power_spectrum.iter().skip(band.start_bin))
                    .map(|(w, p)| w * p)
                    .sum()
            })
            .collect()
    }
}
