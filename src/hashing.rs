//! Deterministic content hashing of numeric feature arrays
//!
//! Values are rounded to a fixed number of decimal places and encoded as
//! little-endian `i64` before SHA-256, so numerically equal inputs hash the
//! same on every platform regardless of float formatting or `-0.0`.

use sha2::{Digest, Sha256};

use crate::fingerprint::FrequencyPeak;

/// Value hashed in place of a frame's dominant bin when it has no peak
pub const NO_PEAK_SENTINEL: f64 = -1.0;

/// Hash a numeric sequence into a 64-character hex digest
///
/// # Arguments
///
/// * `values` - Flattened numeric sequence (order-sensitive)
/// * `decimals` - Decimal places kept before hashing
///
/// # Example
///
/// ```
/// use stratum_fingerprint::hashing::hash_array;
///
/// let a = hash_array(&[0.1 + 0.2, 1.0], 4);
/// let b = hash_array(&[0.3, 1.0], 4);
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 64);
/// ```
pub fn hash_array(values: &[f64], decimals: u32) -> String {
    let scale = 10f64.powi(decimals as i32);
    let mut hasher = Sha256::new();

    hasher.update((values.len() as u64).to_le_bytes());
    for &v in values {
        let fixed = (v * scale).round() as i64;
        hasher.update(fixed.to_le_bytes());
    }

    hex::encode(hasher.finalize())
}

/// Hash the peak constellation of a peak slice
///
/// Each frame contributes its dominant bin (`-1` when missing), its partial
/// count, then a `(bin, relative_level)` pair per partial. Frame indices do
/// not take part, so equal peak patterns hash the same wherever they sit in
/// the parent fingerprint.
pub fn hash_peaks(peaks: &[FrequencyPeak], decimals: u32) -> String {
    let mut values = Vec::with_capacity(peaks.len() * 2);
    for peak in peaks {
        values.push(peak.bin.map(|b| b as f64).unwrap_or(NO_PEAK_SENTINEL));
        values.push(peak.partials.len() as f64);
        for partial in &peak.partials {
            values.push(partial.bin as f64);
            values.push(partial.relative_level as f64);
        }
    }
    hash_array(&values, decimals)
}
