//! Per-feature similarity scores
//!
//! Frame arrays of unequal length are truncated to the shorter one; all
//! scores are symmetric in their two arguments.

use crate::fingerprint::{FrequencyPeak, Key};

/// Fraction of aligned frames whose dominant bins lie within `tolerance` bins
///
/// Only the first `min(len_a, len_b)` frames are compared. Frames where
/// neither side has a peak agree; a peak against no peak does not.
pub fn peak_similarity(a: &[FrequencyPeak], b: &[FrequencyPeak], tolerance: usize) -> f32 {
    let n = a.len().min(b.len());
    if n == 0 {
        return if a.is_empty() && b.is_empty() { 1.0 } else { 0.0 };
    }

    let agreeing = a
        .iter()
        .zip(b.iter())
        .filter(|(pa, pb)| match (pa.bin, pb.bin) {
            (Some(x), Some(y)) => x.abs_diff(y) <= tolerance,
            (None, None) => true,
            _ => false,
        })
        .count();

    agreeing as f32 / n as f32
}

/// Cosine similarity over flattened frames, clamped to [0, 1]
///
/// Two all-zero inputs count as identical; an all-zero input against a
/// non-zero one scores 0.
pub fn frame_cosine_similarity<V: AsRef<[f32]>>(a: &[V], b: &[V]) -> f32 {
    let n = a.len().min(b.len());
    if n == 0 {
        return if a.is_empty() && b.is_empty() { 1.0 } else { 0.0 };
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (fa, fb) in a[..n].iter().zip(b[..n].iter()) {
        for (&x, &y) in fa.as_ref().iter().zip(fb.as_ref().iter()) {
            let (x, y) = (x as f64, y as f64);
            dot += x * y;
            norm_a += x * x;
            norm_b += y * y;
        }
    }

    match (norm_a > 0.0, norm_b > 0.0) {
        (false, false) => 1.0,
        (true, true) => (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(0.0, 1.0) as f32,
        _ => 0.0,
    }
}

/// `1 - |a - b| / max(a, b)`, or `neutral` when either tempo is unknown
pub fn tempo_similarity(a: Option<f32>, b: Option<f32>, neutral: f32) -> f32 {
    match (a, b) {
        (Some(x), Some(y)) => {
            let max = x.max(y);
            if max <= 0.0 {
                return neutral;
            }
            (1.0 - (x - y).abs() / max).clamp(0.0, 1.0)
        }
        _ => neutral,
    }
}

/// 1.0 on equal keys, `mismatch` on different keys, `neutral` when either is unknown
pub fn key_similarity(a: Option<Key>, b: Option<Key>, mismatch: f32, neutral: f32) -> f32 {
    match (a, b) {
        (Some(x), Some(y)) if x == y => 1.0,
        (Some(_), Some(_)) => mismatch,
        _ => neutral,
    }
}
