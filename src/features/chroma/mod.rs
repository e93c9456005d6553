//! Chroma extraction modules
//!
//! Fold the magnitude spectrum into a 12-element pitch-class distribution:
//! - Bin to pitch-class mapping and accumulation
//! - Per-frame normalization

pub mod extractor;
pub mod normalization;

pub use extractor::extract_chroma;

/// Number of pitch classes in a chroma vector
pub const N_PITCH_CLASSES: usize = 12;

/// One chroma vector, index 0 = C, 9 = A
pub type ChromaVector = [f32; N_PITCH_CLASSES];
