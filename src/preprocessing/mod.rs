//! Audio preprocessing modules
//!
//! Utilities for preparing decoded audio for fingerprinting:
//! - Input validation (empty buffers, sample rate, non-finite samples)
//! - Channel mixing (stereo and interleaved to mono)

pub mod channel_mixer;
pub mod validation;
