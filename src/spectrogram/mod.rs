//! Time-frequency analysis
//!
//! Converts mono PCM into a magnitude spectrogram via a Hann-windowed STFT.
//! Every feature extractor consumes the [`Spectrogram`] produced here.

pub mod stft;
pub mod window;

pub use stft::{compute_spectrogram, compute_spectrogram_with_sizes};

/// Magnitude spectrogram (n_frames × n_bins), phase discarded
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrogram {
    /// One magnitude spectrum per analysis frame, `frame_size / 2 + 1` bins each
    pub frames: Vec<Vec<f32>>,

    /// Sample rate of the source audio in Hz
    pub sample_rate: u32,

    /// STFT frame size in samples
    pub frame_size: usize,

    /// STFT hop size in samples
    pub hop_size: usize,
}

impl Spectrogram {
    /// Number of analysis frames
    pub fn n_frames(&self) -> usize {
        self.frames.len()
    }

    /// Number of frequency bins per frame
    pub fn n_bins(&self) -> usize {
        self.frame_size / 2 + 1
    }

    /// Center frequency of `bin` in Hz
    pub fn bin_frequency(&self, bin: usize) -> f32 {
        bin as f32 * self.sample_rate as f32 / self.frame_size as f32
    }

    /// Frames per second
    pub fn frame_rate(&self) -> f32 {
        self.sample_rate as f32 / self.hop_size as f32
    }
}

/// Number of frames the STFT produces for `n_samples` input samples
///
/// Inputs shorter than one frame are zero-padded to a single frame.
pub fn frame_count(n_samples: usize, frame_size: usize, hop_size: usize) -> usize {
    if n_samples < frame_size {
        1
    } else {
        (n_samples - frame_size) / hop_size + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_count() {
        assert_eq!(frame_count(2048, 2048, 512), 1);
        assert_eq!(frame_count(2560, 2048, 512), 2);
        assert_eq!(frame_count(3071, 2048, 512), 2);
        assert_eq!(frame_count(100, 2048, 512), 1);
        assert_eq!(frame_count(441_000, 2048, 512), 858);
    }

    #[test]
    fn test_bin_frequency() {
        let spec = Spectrogram {
            frames: vec![],
            sample_rate: 44100,
            frame_size: 2048,
            hop_size: 512,
        };
        assert_eq!(spec.n_bins(), 1025);
        assert!((spec.bin_frequency(1024) - 22050.0).abs() < 1e-3);
        assert!((spec.frame_rate() - 86.132_81).abs() < 1e-3);
    }
}
