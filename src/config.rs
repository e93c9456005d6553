//! Configuration parameters for fingerprint generation and comparison

use serde::{Deserialize, Serialize};

use crate::error::FingerprintError;

/// Default STFT frame size in samples
pub const DEFAULT_FRAME_SIZE: usize = 2048;

/// Default STFT hop size in samples (75% overlap)
pub const DEFAULT_HOP_SIZE: usize = 512;

/// Default chunk duration for partial matching, in seconds
pub const DEFAULT_CHUNK_DURATION_SECS: f32 = 5.0;

/// Default similarity threshold for a match decision
pub const DEFAULT_MATCH_THRESHOLD: f32 = 0.85;

/// Number of mel bands in the MFCC filterbank
pub const DEFAULT_MEL_BANDS: usize = 128;

/// Number of cepstral coefficients kept per frame
pub const DEFAULT_MFCC_COEFFICIENTS: usize = 13;

/// Spectral peaks kept per frame, dominant peak included
pub const DEFAULT_PEAKS_PER_FRAME: usize = 5;

/// How chunk boundaries are derived from a fingerprint's frame arrays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChunkAlignment {
    /// `ceil(frames / chunk_count)` frames per chunk, last chunk takes the remainder.
    ///
    /// Chunk `n` of two fingerprints with different total durations may cover
    /// different wall-clock windows.
    Proportional,

    /// Chunk `n` starts at frame `round(n * chunk_duration * frame_rate)`.
    TimeExact,
}

/// Fingerprint generation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FingerprintConfig {
    // STFT parameters
    /// Frame size for STFT (default: 2048)
    pub frame_size: usize,

    /// Hop size for STFT (default: 512)
    pub hop_size: usize,

    // Peaks
    /// Half-width of the local-maximum neighborhood in bins (default: 2)
    pub peak_neighborhood: usize,

    /// Minimum magnitude for a bin to count as a peak (default: 1e-3)
    pub peak_noise_floor: f32,

    /// Local maxima kept per frame, strongest first (default: 5)
    pub peaks_per_frame: usize,

    /// Quantization step of peak levels relative to the dominant peak (default: 6.0 dB)
    pub peak_level_step_db: f32,

    // Chroma and key
    /// Reference frequency for pitch-class mapping (default: 440.0 Hz, A4)
    pub reference_frequency: f32,

    /// Lowest bin frequency folded into chroma (default: 27.5 Hz, A0)
    pub chroma_min_frequency: f32,

    /// Highest bin frequency folded into chroma (default: 4186.0 Hz, C8)
    pub chroma_max_frequency: f32,

    /// Minimum Pearson correlation for a key to be reported (default: 0.5)
    pub key_confidence_floor: f32,

    // MFCC
    /// Number of triangular mel bands between 0 Hz and Nyquist (default: 128)
    pub n_mel_bands: usize,

    /// Number of cepstral coefficients kept, coefficient 0 excluded (default: 13)
    pub n_mfcc: usize,

    // Tempo
    /// Minimum BPM to consider (default: 40.0)
    pub min_bpm: f32,

    /// Maximum BPM to consider (default: 220.0)
    pub max_bpm: f32,

    /// Minimum normalized autocorrelation for a tempo to be reported (default: 0.3)
    pub tempo_confidence_threshold: f32,

    // Hashing and chunking
    /// Decimal places values are rounded to before hashing (default: 4)
    pub hash_decimals: u32,

    /// Chunk duration in seconds (default: 5.0)
    pub chunk_duration_secs: f32,

    /// Chunk boundary policy (default: Proportional)
    pub chunk_alignment: ChunkAlignment,
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            frame_size: DEFAULT_FRAME_SIZE,
            hop_size: DEFAULT_HOP_SIZE,
            peak_neighborhood: 2,
            peak_noise_floor: 1e-3,
            peaks_per_frame: DEFAULT_PEAKS_PER_FRAME,
            peak_level_step_db: 6.0,
            reference_frequency: 440.0,
            chroma_min_frequency: 27.5,
            chroma_max_frequency: 4186.0,
            key_confidence_floor: 0.5,
            n_mel_bands: DEFAULT_MEL_BANDS,
            n_mfcc: DEFAULT_MFCC_COEFFICIENTS,
            min_bpm: 40.0,
            max_bpm: 220.0,
            tempo_confidence_threshold: 0.3,
            hash_decimals: 4,
            chunk_duration_secs: DEFAULT_CHUNK_DURATION_SECS,
            chunk_alignment: ChunkAlignment::Proportional,
        }
    }
}

impl FingerprintConfig {
    /// Check that the parameters describe a usable analysis setup
    ///
    /// # Errors
    ///
    /// Returns `FingerprintError::InvalidInput` naming the first offending field.
    pub fn validate(&self) -> Result<(), FingerprintError> {
        if self.frame_size == 0 || self.hop_size == 0 {
            return Err(FingerprintError::InvalidInput(format!(
                "Frame and hop size must be non-zero (frame={}, hop={})",
                self.frame_size, self.hop_size
            )));
        }

        if self.hop_size > self.frame_size {
            return Err(FingerprintError::InvalidInput(format!(
                "Hop size {} exceeds frame size {}",
                self.hop_size, self.frame_size
            )));
        }

        if self.peaks_per_frame == 0 || !(self.peak_level_step_db > 0.0) {
            return Err(FingerprintError::InvalidInput(format!(
                "Need at least one peak per frame and a positive level step, got {} and {} dB",
                self.peaks_per_frame, self.peak_level_step_db
            )));
        }

        if !(self.chunk_duration_secs > 0.0) {
            return Err(FingerprintError::InvalidInput(format!(
                "Chunk duration must be positive, got {}",
                self.chunk_duration_secs
            )));
        }

        if self.min_bpm <= 0.0 || self.min_bpm >= self.max_bpm {
            return Err(FingerprintError::InvalidInput(format!(
                "Invalid BPM range: [{:.1}, {:.1}]",
                self.min_bpm, self.max_bpm
            )));
        }

        if self.n_mel_bands == 0 || self.n_mfcc == 0 || self.n_mfcc >= self.n_mel_bands {
            return Err(FingerprintError::InvalidInput(format!(
                "Need 0 < n_mfcc < n_mel_bands, got n_mfcc={} n_mel_bands={}",
                self.n_mfcc, self.n_mel_bands
            )));
        }

        if !(self.reference_frequency > 0.0)
            || self.chroma_min_frequency >= self.chroma_max_frequency
        {
            return Err(FingerprintError::InvalidInput(format!(
                "Invalid chroma frequency setup: reference={} range=[{}, {}]",
                self.reference_frequency, self.chroma_min_frequency, self.chroma_max_frequency
            )));
        }

        Ok(())
    }
}

/// Per-feature weights of the combined similarity score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityWeights {
    /// Spectral peak agreement (default: 0.35)
    pub peaks: f32,
    /// Chroma cosine similarity (default: 0.25)
    pub chroma: f32,
    /// MFCC cosine similarity (default: 0.25)
    pub mfcc: f32,
    /// Tempo agreement (default: 0.10)
    pub tempo: f32,
    /// Key agreement (default: 0.05)
    pub key: f32,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            peaks: 0.35,
            chroma: 0.25,
            mfcc: 0.25,
            tempo: 0.10,
            key: 0.05,
        }
    }
}

impl SimilarityWeights {
    /// Sum of all weights
    pub fn total(&self) -> f32 {
        self.peaks + self.chroma + self.mfcc + self.tempo + self.key
    }
}

/// Comparison parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonConfig {
    /// Similarity at or above which two fingerprints match (default: 0.85)
    pub match_threshold: f32,

    /// Maximum bin distance for two frame peaks to agree (default: 2)
    pub peak_tolerance_bins: usize,

    /// Feature weights
    pub weights: SimilarityWeights,

    /// Tempo score when either side has no tempo (default: 0.5)
    pub tempo_neutral: f32,

    /// Key score when both keys are known but differ (default: 0.3)
    pub key_mismatch: f32,

    /// Key score when either side has no key (default: 0.5)
    pub key_neutral: f32,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            peak_tolerance_bins: 2,
            weights: SimilarityWeights::default(),
            tempo_neutral: 0.5,
            key_mismatch: 0.3,
            key_neutral: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(FingerprintConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_sizes() {
        let config = FingerprintConfig {
            hop_size: 0,
            ..FingerprintConfig::default()
        };
        assert!(config.validate().is_err());

        let config = FingerprintConfig {
            hop_size: 4096,
            ..FingerprintConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_ranges() {
        let config = FingerprintConfig {
            min_bpm: 200.0,
            max_bpm: 100.0,
            ..FingerprintConfig::default()
        };
        assert!(config.validate().is_err());

        let config = FingerprintConfig {
            n_mfcc: 128,
            ..FingerprintConfig::default()
        };
        assert!(config.validate().is_err());

        let config = FingerprintConfig {
            chunk_duration_secs: 0.0,
            ..FingerprintConfig::default()
        };
        assert!(config.validate().is_err());

        let config = FingerprintConfig {
            peaks_per_frame: 0,
            ..FingerprintConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let weights = SimilarityWeights::default();
        assert!((weights.total() - 1.0).abs() < 1e-6);
    }
}
