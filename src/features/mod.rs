//! Feature extraction modules
//!
//! Per-frame and track-level features computed from one spectrogram:
//! - Dominant frequency peaks
//! - Chroma (pitch-class energy)
//! - MFCC (timbre)
//! - Onset strength and period estimation (tempo)
//! - Key detection

pub mod chroma;
pub mod key;
pub mod mfcc;
pub mod onset;
pub mod peaks;
pub mod period;
