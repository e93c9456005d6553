//! Fingerprint record types
//!
//! Pure value records: produced in one pass over the input samples and never
//! mutated afterwards. New audio means a new fingerprint.

use serde::{Deserialize, Serialize};

use super::key::Key;
use crate::error::FingerprintError;
use crate::features::chroma::ChromaVector;

/// Weaker local maximum kept next to the dominant peak of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeakPartial {
    /// FFT bin of the local maximum
    pub bin: usize,

    /// Level below the dominant peak, in quantization steps (always <= 0)
    pub relative_level: i32,
}

/// Spectral peaks of one analysis frame
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrequencyPeak {
    /// Frame index in the parent fingerprint
    pub frame: usize,

    /// FFT bin of the strongest peak, `None` when no bin cleared the noise floor
    pub bin: Option<usize>,

    /// Remaining local maxima, strongest first; empty when `bin` is `None`
    #[serde(default)]
    pub partials: Vec<PeakPartial>,
}

impl FrequencyPeak {
    /// Frame carrying only a dominant peak
    pub fn dominant(frame: usize, bin: Option<usize>) -> Self {
        Self {
            frame,
            bin,
            partials: Vec::new(),
        }
    }
}

/// Full-track audio fingerprint
///
/// `frequency_peaks`, `chroma_features` and `mfcc_data` hold one entry per
/// analysis frame, in the same frame order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioFingerprint {
    /// SHA-256 digest of the peak sequence
    pub spectrogram_hash: String,

    /// Peaks of each frame, dominant bin first
    pub frequency_peaks: Vec<FrequencyPeak>,

    /// One 12-element chroma vector per frame
    pub chroma_features: Vec<ChromaVector>,

    /// One MFCC vector per frame
    pub mfcc_data: Vec<Vec<f32>>,

    /// Estimated BPM, `None` without reliable periodicity
    pub tempo_signature: Option<f32>,

    /// Estimated key, `None` without a confident tonal center
    pub key_signature: Option<Key>,

    /// Duration of the analyzed audio in seconds
    pub duration: f32,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// STFT hop the frames were computed with, in samples
    pub hop_size: usize,
}

impl AudioFingerprint {
    /// Number of analysis frames
    pub fn n_frames(&self) -> usize {
        self.frequency_peaks.len()
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, FingerprintError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, FingerprintError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Fixed-duration slice of a fingerprint used for segment-level matching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FingerprintChunk {
    /// 0-based, sequential position of the chunk
    pub chunk_index: usize,

    /// Duration covered by this chunk in seconds (shorter for the last chunk)
    pub chunk_duration: f32,

    /// Index of the first frame of this chunk in the parent fingerprint
    pub start_frame: usize,

    /// Digest of this chunk's peak slice only
    pub spectrogram_hash: String,

    /// Peak slice
    pub frequency_peaks: Vec<FrequencyPeak>,

    /// Chroma slice
    pub chroma_features: Vec<ChromaVector>,

    /// MFCC slice
    pub mfcc_data: Vec<Vec<f32>>,

    /// Parent's tempo, copied unchanged
    pub tempo_signature: Option<f32>,

    /// Parent's key, copied unchanged
    pub key_signature: Option<Key>,
}

impl FingerprintChunk {
    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, FingerprintError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, FingerprintError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fingerprint() -> AudioFingerprint {
        AudioFingerprint {
            spectrogram_hash: "ab".repeat(32),
            frequency_peaks: vec![
                FrequencyPeak {
                    frame: 0,
                    bin: Some(20),
                    partials: vec![PeakPartial { bin: 61, relative_level: -2 }],
                },
                FrequencyPeak::dominant(1, None),
            ],
            chroma_features: vec![[0.0; 12], [1.0; 12]],
            mfcc_data: vec![vec![0.5; 13], vec![-0.5; 13]],
            tempo_signature: Some(120.0),
            key_signature: Some(Key::Minor(9)),
            duration: 1.5,
            sample_rate: 44100,
            hop_size: 512,
        }
    }

    #[test]
    fn test_fingerprint_json_field_names() {
        let json = sample_fingerprint().to_json().unwrap();
        assert!(json.contains("\"spectrogramHash\""));
        assert!(json.contains("\"keySignature\":\"A minor\""));
        assert!(json.contains("\"tempoSignature\":120.0"));
        assert!(json.contains("\"bin\":null"));
        assert!(json.contains("\"relativeLevel\":-2"));
        assert!(json.contains("\"hopSize\":512"));
    }

    #[test]
    fn test_fingerprint_from_json() {
        let fp = sample_fingerprint();
        let restored = AudioFingerprint::from_json(&fp.to_json().unwrap()).unwrap();
        assert_eq!(restored, fp);
        assert_eq!(restored.n_frames(), 2);
    }

    #[test]
    fn test_peak_without_partials_field_deserializes() {
        let peak: FrequencyPeak = serde_json::from_str("{\"frame\":3,\"bin\":7}").unwrap();
        assert_eq!(peak, FrequencyPeak::dominant(3, Some(7)));
    }

    #[test]
    fn test_from_json_rejects_bad_key() {
        let json = sample_fingerprint()
            .to_json()
            .unwrap()
            .replace("A minor", "Q minor");
        let result = AudioFingerprint::from_json(&json);
        assert!(matches!(result, Err(FingerprintError::SerializationError(_))));
    }
}
