//! Chunk-sequence comparison for segment-level matching

use super::features::peak_similarity;
use super::{ChunkDenominator, SimilarityResult};
use crate::config::ComparisonConfig;
use crate::fingerprint::FingerprintChunk;

/// Compare two chunk sequences index by index
///
/// Similarity is `matched / max(len_a, len_b)`, so a short excerpt of a
/// longer track scores low; see [`compare_fingerprint_chunks_with_denominator`]
/// for excerpt detection.
pub fn compare_fingerprint_chunks(a: &[FingerprintChunk], b: &[FingerprintChunk]) -> SimilarityResult {
    compare_fingerprint_chunks_with_config(a, b, &ComparisonConfig::default())
}

/// Compare two chunk sequences with an explicit threshold and peak tolerance
pub fn compare_fingerprint_chunks_with_config(
    a: &[FingerprintChunk],
    b: &[FingerprintChunk],
    config: &ComparisonConfig,
) -> SimilarityResult {
    compare_fingerprint_chunks_with_denominator(a, b, config, ChunkDenominator::Max)
}

/// Compare two chunk sequences, choosing the ratio denominator
///
/// Chunk `i` matches when its hash equals the other's chunk `i`, or when
/// their peak similarity reaches `config.match_threshold`. Empty input on
/// either side gives similarity 0 and no match.
pub fn compare_fingerprint_chunks_with_denominator(
    a: &[FingerprintChunk],
    b: &[FingerprintChunk],
    config: &ComparisonConfig,
    denominator: ChunkDenominator,
) -> SimilarityResult {
    let compared = a.len().min(b.len());
    let total_chunks = match denominator {
        ChunkDenominator::Max => a.len().max(b.len()),
        ChunkDenominator::Min => compared,
    };

    if compared == 0 {
        log::debug!("Chunk comparison with empty sequence ({} vs {})", a.len(), b.len());
        return SimilarityResult {
            similarity: 0.0,
            matched_chunks: 0,
            total_chunks,
            is_match: false,
            feature_scores: None,
        };
    }

    let matched_chunks = a
        .iter()
        .zip(b.iter())
        .filter(|(ca, cb)| {
            ca.spectrogram_hash == cb.spectrogram_hash
                || peak_similarity(&ca.frequency_peaks, &cb.frequency_peaks, config.peak_tolerance_bins)
                    >= config.match_threshold
        })
        .count();

    let similarity = matched_chunks as f32 / total_chunks as f32;
    let is_match = similarity >= config.match_threshold;

    log::debug!(
        "Chunk comparison: {}/{} matched ({:?} denominator), similarity {:.3}",
        matched_chunks,
        total_chunks,
        denominator,
        similarity
    );

    SimilarityResult {
        similarity,
        matched_chunks,
        total_chunks,
        is_match,
        feature_scores: None,
    }
}
