//! Whole-fingerprint comparison

use super::features::{frame_cosine_similarity, key_similarity, peak_similarity, tempo_similarity};
use super::{FeatureScores, SimilarityResult};
use crate::config::ComparisonConfig;
use crate::fingerprint::AudioFingerprint;

/// Compare two fingerprints with the default weights and 0.85 threshold
///
/// Never fails: any pair of fingerprints produces a score in [0, 1].
/// Fingerprints with equal `spectrogram_hash` score exactly 1.0.
///
/// # Example
///
/// ```
/// use stratum_fingerprint::{compare_fingerprints, generate_fingerprint};
///
/// let samples: Vec<f32> = (0..22050)
///     .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 22050.0).sin())
///     .collect();
/// let fp = generate_fingerprint(&samples, 22050)?;
/// let result = compare_fingerprints(&fp, &fp);
/// assert_eq!(result.similarity, 1.0);
/// assert!(result.is_match);
/// # Ok::<(), stratum_fingerprint::FingerprintError>(())
/// ```
pub fn compare_fingerprints(a: &AudioFingerprint, b: &AudioFingerprint) -> SimilarityResult {
    compare_fingerprints_with_config(a, b, &ComparisonConfig::default())
}

/// Compare two fingerprints with explicit weights, neutral scores and threshold
pub fn compare_fingerprints_with_config(
    a: &AudioFingerprint,
    b: &AudioFingerprint,
    config: &ComparisonConfig,
) -> SimilarityResult {
    if a.spectrogram_hash == b.spectrogram_hash {
        log::debug!("Identical spectrogram hash, skipping feature comparison");
        return SimilarityResult {
            similarity: 1.0,
            matched_chunks: 1,
            total_chunks: 1,
            is_match: true,
            feature_scores: None,
        };
    }

    let scores = FeatureScores {
        peaks: peak_similarity(&a.frequency_peaks, &b.frequency_peaks, config.peak_tolerance_bins),
        chroma: frame_cosine_similarity(&a.chroma_features, &b.chroma_features),
        mfcc: frame_cosine_similarity(&a.mfcc_data, &b.mfcc_data),
        tempo: tempo_similarity(a.tempo_signature, b.tempo_signature, config.tempo_neutral),
        key: key_similarity(
            a.key_signature,
            b.key_signature,
            config.key_mismatch,
            config.key_neutral,
        ),
    };

    let similarity = weighted_similarity(&scores, config);
    let is_match = similarity >= config.match_threshold;

    log::debug!(
        "Similarity {:.4} (peaks={:.3}, chroma={:.3}, mfcc={:.3}, tempo={:.3}, key={:.3}), match={}",
        similarity,
        scores.peaks,
        scores.chroma,
        scores.mfcc,
        scores.tempo,
        scores.key,
        is_match
    );

    SimilarityResult {
        similarity,
        matched_chunks: usize::from(is_match),
        total_chunks: 1,
        is_match,
        feature_scores: Some(scores),
    }
}

/// Weighted mean of the feature scores, normalized by the weight total
fn weighted_similarity(scores: &FeatureScores, config: &ComparisonConfig) -> f32 {
    let w = &config.weights;
    let total = w.total();
    if total <= 0.0 {
        log::warn!("Similarity weights sum to {}, reporting 0 similarity", total);
        return 0.0;
    }

    let sum = w.peaks * scores.peaks
        + w.chroma * scores.chroma
        + w.mfcc * scores.mfcc
        + w.tempo * scores.tempo
        + w.key * scores.key;

    (sum / total).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimilarityWeights;
    use crate::fingerprint::{FrequencyPeak, Key};

    fn fingerprint(hash: &str, bin: usize, chroma_pc: usize, tempo: Option<f32>, key: Option<Key>) -> AudioFingerprint {
        let n = 20;
        let mut chroma = [0.0f32; 12];
        chroma[chroma_pc] = 1.0;
        AudioFingerprint {
            spectrogram_hash: hash.to_string(),
            frequency_peaks: (0..n).map(|frame| FrequencyPeak::dominant(frame, Some(bin))).collect(),
            chroma_features: vec![chroma; n],
            mfcc_data: vec![vec![1.0, -2.0, 0.5]; n],
            tempo_signature: tempo,
            key_signature: key,
            duration: 1.0,
            sample_rate: 22050,
            hop_size: 512,
        }
    }

    #[test]
    fn test_equal_hash_shortcut() {
        let a = fingerprint("same", 10, 0, None, None);
        let b = fingerprint("same", 90, 5, Some(120.0), Some(Key::Minor(2)));
        let result = compare_fingerprints(&a, &b);
        assert_eq!(result.similarity, 1.0);
        assert!(result.is_match);
        assert_eq!(result.matched_chunks, 1);
        assert_eq!(result.total_chunks, 1);
        assert!(result.feature_scores.is_none());
    }

    #[test]
    fn test_identical_features_neutral_tempo_and_key() {
        let a = fingerprint("a", 10, 0, None, None);
        let b = fingerprint("b", 10, 0, None, None);
        let result = compare_fingerprints(&a, &b);

        // 0.35 + 0.25 + 0.25 + 0.10 * 0.5 + 0.05 * 0.5
        assert!((result.similarity - 0.925).abs() < 1e-5, "got {}", result.similarity);
        assert!(result.is_match);
        let scores = result.feature_scores.unwrap();
        assert_eq!(scores.tempo, 0.5);
        assert_eq!(scores.key, 0.5);
    }

    #[test]
    fn test_different_content_does_not_match() {
        let a = fingerprint("a", 10, 0, Some(100.0), Some(Key::Major(0)));
        let b = fingerprint("b", 40, 6, Some(150.0), Some(Key::Major(6)));
        let result = compare_fingerprints(&a, &b);

        // peaks 0, chroma 0, mfcc 1, tempo 2/3, key 0.3
        let expected = 0.25 + 0.10 * (1.0 - 50.0 / 150.0) + 0.05 * 0.3;
        assert!((result.similarity - expected).abs() < 1e-5, "got {}", result.similarity);
        assert!(!result.is_match);
        assert_eq!(result.matched_chunks, 0);
    }

    #[test]
    fn test_comparison_is_symmetric() {
        let a = fingerprint("a", 10, 0, Some(100.0), Some(Key::Major(0)));
        let b = fingerprint("b", 11, 4, Some(120.0), None);
        let ab = compare_fingerprints(&a, &b);
        let ba = compare_fingerprints(&b, &a);
        assert!((ab.similarity - ba.similarity).abs() < 1e-6);
    }

    #[test]
    fn test_custom_weights_are_normalized() {
        let a = fingerprint("a", 10, 0, None, None);
        let b = fingerprint("b", 40, 0, None, None);
        let config = ComparisonConfig {
            weights: SimilarityWeights {
                peaks: 2.0,
                chroma: 2.0,
                mfcc: 0.0,
                tempo: 0.0,
                key: 0.0,
            },
            ..ComparisonConfig::default()
        };
        let result = compare_fingerprints_with_config(&a, &b, &config);
        assert!((result.similarity - 0.5).abs() < 1e-6);
    }
}
