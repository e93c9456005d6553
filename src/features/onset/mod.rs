//! Onset strength
//!
//! Frame-wise onset strength used for tempo estimation:
//! - Spectral flux envelope
//! - Flux-to-magnitude ratio (rhythmic content gate)

pub mod spectral_flux;

pub use spectral_flux::{flux_to_magnitude_ratio, spectral_flux_envelope};
