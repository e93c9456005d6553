//! MFCC computation
//!
//! Per frame: power spectrum -> mel band energies -> natural log -> DCT-II.
//! Coefficient 0 (overall log energy) is dropped so that clips matching only
//! in loudness do not look alike; coefficients `1..=n_mfcc` are kept.

use std::f32::consts::PI;

use super::filterbank::MelFilterbank;
use crate::spectrogram::Spectrogram;

/// Floor applied to band energies before the logarithm
const LOG_FLOOR: f32 = 1e-10;

/// Extract MFCC vectors from a magnitude spectrogram
///
/// # Arguments
///
/// * `spectrogram` - Magnitude spectrogram
/// * `n_mel_bands` - Number of mel bands (e.g. 128)
/// * `n_mfcc` - Number of coefficients kept per frame (e.g. 13)
///
/// # Returns
///
/// One `n_mfcc`-element vector per frame
pub fn extract_mfcc(spectrogram: &Spectrogram, n_mel_bands: usize, n_mfcc: usize) -> Vec<Vec<f32>> {
    log::debug!(
        "Extracting MFCC: {} frames, {} mel bands, {} coefficients",
        spectrogram.n_frames(),
        n_mel_bands,
        n_mfcc
    );

    let filterbank = MelFilterbank::new(n_mel_bands, spectrogram.frame_size, spectrogram.sample_rate);
    let basis = dct_basis(n_mel_bands, n_mfcc);

    spectrogram
        .frames
        .iter()
        .map(|frame| {
            let power: Vec<f32> = frame.iter().map(|&m| m * m).collect();
            let log_energies: Vec<f32> = filterbank
                .apply(&power)
                .into_iter()
                .map(|e| e.max(LOG_FLOOR).ln())
                .collect();

            basis
                .iter()
                .map(|row| row.iter().zip(log_energies.iter()).map(|(b, e)| b * e).sum())
                .collect()
        })
        .collect()
}

/// Orthonormal DCT-II rows `1..=n_coefficients` for an input of length `n`
fn dct_basis(n: usize, n_coefficients: usize) -> Vec<Vec<f32>> {
    let scale = (2.0 / n as f32).sqrt();
    (1..=n_coefficients)
        .map(|k| {
            (0..n)
                .map(|i| scale * (PI * k as f32 * (i as f32 + 0.5) / n as f32).cos())
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone_spectrogram(bin: usize, gain: f32) -> Spectrogram {
        let mut frame = vec![0.0f32; 1025];
        frame[bin] = gain;
        frame[bin + 1] = gain * 0.5;
        Spectrogram {
            frames: vec![frame; 3],
            sample_rate: 44100,
            frame_size: 2048,
            hop_size: 512,
        }
    }

    #[test]
    fn test_mfcc_shape() {
        let mfcc = extract_mfcc(&tone_spectrogram(40, 1.0), 128, 13);
        assert_eq!(mfcc.len(), 3);
        assert!(mfcc.iter().all(|v| v.len() == 13));
        assert!(mfcc.iter().flatten().all(|v| v.is_finite()));
    }

    #[test]
    fn test_mfcc_silence_is_flat() {
        let spec = Spectrogram {
            frames: vec![vec![0.0; 1025]; 2],
            sample_rate: 44100,
            frame_size: 2048,
            hop_size: 512,
        };
        // Constant log energies have no energy outside coefficient 0
        let mfcc = extract_mfcc(&spec, 128, 13);
        let log_floor = LOG_FLOOR.ln().abs();
        assert!(mfcc.iter().flatten().all(|v| v.abs() < log_floor * 1e-3));
    }

    #[test]
    fn test_mfcc_differs_between_timbres() {
        let low = extract_mfcc(&tone_spectrogram(20, 1.0), 128, 13);
        let high = extract_mfcc(&tone_spectrogram(400, 1.0), 128, 13);
        assert_ne!(low[0], high[0]);
    }

    #[test]
    fn test_dct_basis_orthonormal_rows() {
        let basis = dct_basis(32, 5);
        for row in &basis {
            let norm: f32 = row.iter().map(|x| x * x).sum();
            assert!((norm - 1.0).abs() < 1e-4);
        }
        let dot: f32 = basis[0].iter().zip(basis[1].iter()).map(|(a, b)| a * b).sum();
        assert!(dot.abs() < 1e-4);
    }
}
