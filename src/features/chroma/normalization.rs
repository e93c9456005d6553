//! Chroma normalization

/// Numerical stability epsilon
const EPSILON: f32 = 1e-10;

/// Scale a chroma vector to unit L2 norm in place
///
/// Vectors with (near) zero energy are left untouched so silent frames stay
/// all-zero instead of becoming NaN.
pub fn l2_normalize(chroma: &mut [f32]) {
    let norm = chroma.iter().map(|&x| x * x).sum::<f32>().sqrt();
    if norm > EPSILON {
        for x in chroma.iter_mut() {
            *x /= norm;
        }
    }
}
