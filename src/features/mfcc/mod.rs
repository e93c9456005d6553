//! MFCC extraction modules
//!
//! Timbre descriptors from the magnitude spectrogram:
//! - Triangular mel filterbank (0 Hz to Nyquist)
//! - Log band energies and DCT-II

pub mod extractor;
pub mod filterbank;

pub use extractor::extract_mfcc;
pub use filterbank::MelFilterbank;
