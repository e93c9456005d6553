//! Fingerprint assembly
//!
//! Orchestrates the spectrogram, feature extractors and hasher into an
//! [`AudioFingerprint`], and slices fingerprints into [`FingerprintChunk`]s.

pub mod assembler;
pub mod chunking;
pub mod key;
pub mod record;

pub use assembler::{generate_fingerprint, generate_fingerprint_batch, generate_fingerprint_with_config};
pub use chunking::{generate_fingerprint_chunks, generate_fingerprint_chunks_with_config};
pub use key::Key;
pub use record::{AudioFingerprint, FingerprintChunk, FrequencyPeak, PeakPartial};
