//! Input contract checks for decoded PCM

use crate::error::FingerprintError;

/// Validate a mono PCM buffer before analysis
///
/// # Errors
///
/// - `InvalidInput` if `samples` is empty or `sample_rate` is zero
/// - `DecodeError` if any sample is NaN or infinite
pub fn validate_samples(samples: &[f32], sample_rate: u32) -> Result<(), FingerprintError> {
    if samples.is_empty() {
        return Err(FingerprintError::InvalidInput(
            "Empty audio samples".to_string(),
        ));
    }

    if sample_rate == 0 {
        return Err(FingerprintError::InvalidInput(
            "Invalid sample rate: 0".to_string(),
        ));
    }

    if let Some(idx) = samples.iter().position(|s| !s.is_finite()) {
        return Err(FingerprintError::DecodeError(format!(
            "Non-finite sample value {} at index {}",
            samples[idx], idx
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_empty() {
        let result = validate_samples(&[], 44100);
        assert!(matches!(result, Err(FingerprintError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_zero_rate() {
        let result = validate_samples(&[0.1, 0.2], 0);
        assert!(matches!(result, Err(FingerprintError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_non_finite() {
        let result = validate_samples(&[0.1, f32::NAN, 0.2], 44100);
        assert!(matches!(result, Err(FingerprintError::DecodeError(_))));

        let result = validate_samples(&[f32::INFINITY], 44100);
        assert!(matches!(result, Err(FingerprintError::DecodeError(_))));
    }

    #[test]
    fn test_validate_ok() {
        assert!(validate_samples(&[0.0, -1.0, 1.0], 48000).is_ok());
    }
}
