//! Fingerprint similarity
//!
//! Compare fingerprints using:
//! - Per-feature scores (peaks, chroma, MFCC, tempo, key)
//! - Weighted combination with a match threshold
//! - Chunk-by-chunk matching for segment-level comparison

pub mod chunks;
pub mod comparator;
pub mod features;

pub use chunks::{
    compare_fingerprint_chunks, compare_fingerprint_chunks_with_config,
    compare_fingerprint_chunks_with_denominator,
};
pub use comparator::{compare_fingerprints, compare_fingerprints_with_config};

use serde::{Deserialize, Serialize};

/// Per-feature similarity breakdown, each score in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureScores {
    /// Fraction of frames whose peaks agree within the bin tolerance
    pub peaks: f32,
    /// Cosine similarity of the chroma frames
    pub chroma: f32,
    /// Cosine similarity of the MFCC frames
    pub mfcc: f32,
    /// Tempo agreement
    pub tempo: f32,
    /// Key agreement
    pub key: f32,
}

/// Result of a fingerprint or chunk-sequence comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityResult {
    /// Similarity in [0, 1]
    pub similarity: f32,

    /// Matched chunks (0 or 1 for whole-fingerprint comparison)
    pub matched_chunks: usize,

    /// Chunks considered (1 for whole-fingerprint comparison)
    pub total_chunks: usize,

    /// `similarity >= match_threshold`
    pub is_match: bool,

    /// Per-feature breakdown
    ///
    /// `None` for chunk comparisons and for the identical-hash shortcut.
    pub feature_scores: Option<FeatureScores>,
}

/// Denominator of the chunk similarity ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChunkDenominator {
    /// `matched / max(len_a, len_b)`: length mismatches lower the score.
    ///
    /// Suited to duplicate detection; an excerpt of a longer track scores low.
    Max,

    /// `matched / min(len_a, len_b)`: an excerpt fully contained in the other
    /// sequence can score 1.0.
    Min,
}
