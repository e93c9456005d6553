//! # Stratum Fingerprint
//!
//! A multi-feature audio fingerprinting engine for duplicate and
//! near-duplicate detection, combining spectral peaks, chroma, MFCC, tempo
//! and key into one comparable record.
//!
//! ## Features
//!
//! - **Spectral Peaks**: Dominant STFT bin per frame, hashed into a stable digest
//! - **Chroma & Key**: 12-bin pitch-class profiles with Krumhansl-Schmuckler key estimation
//! - **MFCC**: 13 cepstral coefficients per frame over a 128-band mel filterbank
//! - **Tempo**: Spectral-flux autocorrelation, absent for arrhythmic material
//! - **Similarity**: Weighted per-feature comparison and chunk-level matching
//!
//! ## Quick Start
//!
//! ```no_run
//! use stratum_fingerprint::{compare_fingerprints, generate_fingerprint};
//!
//! // Decoded mono samples
//! let original: Vec<f32> = vec![]; // Your audio data
//! let candidate: Vec<f32> = vec![];
//!
//! let a = generate_fingerprint(&original, 44100)?;
//! let b = generate_fingerprint(&candidate, 44100)?;
//!
//! let result = compare_fingerprints(&a, &b);
//! println!("Similarity: {:.3} (match: {})", result.similarity, result.is_match);
//! # Ok::<(), stratum_fingerprint::FingerprintError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Samples → Spectrogram → {Peaks, Chroma + Key, MFCC, Tempo} → AudioFingerprint → Chunks
//!                                                                     ↓
//!                                                           Similarity Comparator
//! ```
//!
//! The extractors are pure functions of the same read-only spectrogram and
//! run in parallel on the rayon thread pool.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod features;
pub mod fingerprint;
pub mod hashing;
pub mod preprocessing;
pub mod similarity;
pub mod spectrogram;

// Re-export main types
pub use config::{ChunkAlignment, ComparisonConfig, FingerprintConfig, SimilarityWeights};
pub use error::FingerprintError;
pub use fingerprint::{AudioFingerprint, FingerprintChunk, FrequencyPeak, Key, PeakPartial};
pub use similarity::{ChunkDenominator, FeatureScores, SimilarityResult};

// Re-export main operations
pub use fingerprint::{
    generate_fingerprint, generate_fingerprint_batch, generate_fingerprint_chunks,
    generate_fingerprint_chunks_with_config, generate_fingerprint_with_config,
};
pub use similarity::{
    compare_fingerprint_chunks, compare_fingerprint_chunks_with_config,
    compare_fingerprint_chunks_with_denominator, compare_fingerprints,
    compare_fingerprints_with_config,
};
