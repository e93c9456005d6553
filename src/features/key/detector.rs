//! Key detection algorithm
//!
//! Averages chroma across all frames and correlates the resulting profile
//! against the 24 Krumhansl-Schmuckler templates (Pearson correlation).

use super::templates::KeyTemplates;
use super::KeyDetectionResult;
use crate::features::chroma::{ChromaVector, N_PITCH_CLASSES};
use crate::fingerprint::Key;

const EPSILON: f32 = 1e-9;

/// Detect the musical key of a sequence of chroma vectors
///
/// # Arguments
///
/// * `chroma_vectors` - One 12-element chroma vector per frame
/// * `templates` - Key templates
/// * `confidence_floor` - Minimum correlation for a key to be reported
///
/// # Returns
///
/// `None` if there are no frames, the averaged profile is flat (silence or
/// perfectly uniform energy), or the best correlation is below
/// `confidence_floor`. Ties go to the first key in C..B major, C..B minor order.
pub fn detect_key(
    chroma_vectors: &[ChromaVector],
    templates: &KeyTemplates,
    confidence_floor: f32,
) -> Option<KeyDetectionResult> {
    if chroma_vectors.is_empty() {
        return None;
    }

    let mut profile = [0.0f32; N_PITCH_CLASSES];
    for chroma in chroma_vectors {
        for (acc, &v) in profile.iter_mut().zip(chroma.iter()) {
            *acc += v;
        }
    }
    let n = chroma_vectors.len() as f32;
    for v in profile.iter_mut() {
        *v /= n;
    }

    let mut scores = Vec::with_capacity(24);
    for key_idx in 0..12 {
        let r = pearson(&profile, templates.get_major_template(key_idx))?;
        scores.push((Key::major(key_idx), r));
    }
    for key_idx in 0..12 {
        let r = pearson(&profile, templates.get_minor_template(key_idx))?;
        scores.push((Key::minor(key_idx), r));
    }

    // Stable sort keeps enumeration order among equal scores
    scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    let (key, correlation) = scores[0];

    log::debug!(
        "Key correlation: best {} (r={:.3}), runner-up {} (r={:.3}), floor {:.2}",
        key,
        correlation,
        scores[1].0,
        scores[1].1,
        confidence_floor
    );

    if correlation < confidence_floor {
        return None;
    }

    Some(KeyDetectionResult {
        key,
        confidence: correlation,
        all_scores: scores,
    })
}

/// Pearson correlation, `None` when either side has no variance
fn pearson(a: &[f32; 12], b: &[f32; 12]) -> Option<f32> {
    let mean_a = a.iter().sum::<f32>() / 12.0;
    let mean_b = b.iter().sum::<f32>() / 12.0;

    let mut cov = 0.0f32;
    let mut var_a = 0.0f32;
    let mut var_b = 0.0f32;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    if var_a < EPSILON || var_b < EPSILON {
        return None;
    }
    Some(cov / (var_a.sqrt() * var_b.sqrt()))
}
