//! Fixed-duration chunking of a fingerprint for partial matching

use super::record::{AudioFingerprint, FingerprintChunk};
use crate::config::{ChunkAlignment, FingerprintConfig};
use crate::hashing::hash_peaks;

/// Guards against `ceil` rounding an exact multiple up by float noise
const CHUNK_COUNT_EPSILON: f32 = 1e-6;

/// Split a fingerprint into default-length (5 s) chunks
///
/// Every frame lands in exactly one chunk, in order. Chunk tempo and key are
/// copied from the parent; each chunk hash covers only its own peak slice.
pub fn generate_fingerprint_chunks(fingerprint: &AudioFingerprint) -> Vec<FingerprintChunk> {
    generate_fingerprint_chunks_with_config(fingerprint, &FingerprintConfig::default())
}

/// Split a fingerprint into chunks of `config.chunk_duration_secs`
///
/// Boundaries follow `config.chunk_alignment`. Time-exact boundaries use the
/// hop recorded on the fingerprint, not `config.hop_size`. A non-positive
/// chunk duration yields a single chunk covering the whole fingerprint.
pub fn generate_fingerprint_chunks_with_config(
    fingerprint: &AudioFingerprint,
    config: &FingerprintConfig,
) -> Vec<FingerprintChunk> {
    let n_frames = fingerprint.n_frames();
    let chunk_secs = config.chunk_duration_secs;
    let n_chunks = chunk_count(fingerprint.duration, chunk_secs);

    let boundaries = match config.chunk_alignment {
        ChunkAlignment::Proportional => proportional_boundaries(n_frames, n_chunks),
        ChunkAlignment::TimeExact => {
            let frame_rate = fingerprint.sample_rate as f32 / fingerprint.hop_size.max(1) as f32;
            time_exact_boundaries(n_frames, n_chunks, chunk_secs, frame_rate)
        }
    };

    log::debug!(
        "Chunking {:.2}s fingerprint ({} frames) into {} chunks ({:?})",
        fingerprint.duration,
        n_frames,
        n_chunks,
        config.chunk_alignment
    );

    boundaries
        .into_iter()
        .enumerate()
        .map(|(i, (start, end))| {
            let frequency_peaks = fingerprint.frequency_peaks[start..end].to_vec();
            let remaining = fingerprint.duration - i as f32 * chunk_secs;
            let chunk_duration = if chunk_secs > 0.0 {
                chunk_secs.min(remaining).max(0.0)
            } else {
                fingerprint.duration
            };

            FingerprintChunk {
                chunk_index: i,
                chunk_duration,
                start_frame: start,
                spectrogram_hash: hash_peaks(&frequency_peaks, config.hash_decimals),
                frequency_peaks,
                chroma_features: slice_clamped(&fingerprint.chroma_features, start, end),
                mfcc_data: slice_clamped(&fingerprint.mfcc_data, start, end),
                tempo_signature: fingerprint.tempo_signature,
                key_signature: fingerprint.key_signature,
            }
        })
        .collect()
}

/// `max(1, ceil(duration / chunk))`
fn chunk_count(duration: f32, chunk_secs: f32) -> usize {
    if !(chunk_secs > 0.0) || !(duration > 0.0) {
        return 1;
    }
    ((duration / chunk_secs) - CHUNK_COUNT_EPSILON).ceil().max(1.0) as usize
}

fn proportional_boundaries(n_frames: usize, n_chunks: usize) -> Vec<(usize, usize)> {
    let per_chunk = n_frames.div_ceil(n_chunks).max(1);
    (0..n_chunks)
        .map(|i| {
            let start = (i * per_chunk).min(n_frames);
            let end = if i + 1 == n_chunks {
                n_frames
            } else {
                ((i + 1) * per_chunk).min(n_frames)
            };
            (start, end)
        })
        .collect()
}

fn time_exact_boundaries(
    n_frames: usize,
    n_chunks: usize,
    chunk_secs: f32,
    frame_rate: f32,
) -> Vec<(usize, usize)> {
    let start_of = |i: usize| -> usize {
        let frame = (i as f64 * chunk_secs as f64 * frame_rate as f64).round();
        (frame.max(0.0) as usize).min(n_frames)
    };

    (0..n_chunks)
        .map(|i| {
            let end = if i + 1 == n_chunks { n_frames } else { start_of(i + 1) };
            (start_of(i), end)
        })
        .collect()
}

/// Slice `[start, end)` of a per-frame array, clamped to its actual length
fn slice_clamped<T: Clone>(values: &[T], start: usize, end: usize) -> Vec<T> {
    let end = end.min(values.len());
    let start = start.min(end);
    values[start..end].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::{FrequencyPeak, Key};

    fn synthetic_fingerprint(n_frames: usize, duration: f32) -> AudioFingerprint {
        let frequency_peaks: Vec<FrequencyPeak> = (0..n_frames)
            .map(|i| FrequencyPeak::dominant(i, Some(10 + i % 7)))
            .collect();
        AudioFingerprint {
            spectrogram_hash: hash_peaks(&frequency_peaks, 4),
            frequency_peaks,
            chroma_features: vec![[0.0; 12]; n_frames],
            mfcc_data: vec![vec![0.0; 13]; n_frames],
            tempo_signature: Some(120.0),
            key_signature: Some(Key::Major(0)),
            duration,
            sample_rate: 44100,
            hop_size: 512,
        }
    }

    #[test]
    fn test_chunk_count() {
        assert_eq!(chunk_count(12.0, 5.0), 3);
        assert_eq!(chunk_count(10.0, 5.0), 2);
        assert_eq!(chunk_count(3.0, 5.0), 1);
        assert_eq!(chunk_count(0.0, 5.0), 1);
    }

    #[test]
    fn test_proportional_chunks_cover_every_frame() {
        let fp = synthetic_fingerprint(1030, 12.0);
        let chunks = generate_fingerprint_chunks(&fp);

        assert_eq!(chunks.len(), 3);
        let total: usize = chunks.iter().map(|c| c.frequency_peaks.len()).sum();
        assert_eq!(total, 1030);
        assert_eq!(chunks[0].frequency_peaks.len(), 344);
        assert_eq!(chunks[2].frequency_peaks.len(), 1030 - 2 * 344);

        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.chunk_index, i);
            assert_eq!(chunk.frequency_peaks[0].frame, chunk.start_frame);
            assert_eq!(chunk.chroma_features.len(), chunk.frequency_peaks.len());
            assert_eq!(chunk.mfcc_data.len(), chunk.frequency_peaks.len());
            assert_eq!(chunk.tempo_signature, Some(120.0));
            assert_eq!(chunk.key_signature, Some(Key::Major(0)));
        }
    }

    #[test]
    fn test_chunk_durations() {
        let fp = synthetic_fingerprint(1030, 12.0);
        let chunks = generate_fingerprint_chunks(&fp);
        assert!((chunks[0].chunk_duration - 5.0).abs() < 1e-6);
        assert!((chunks[1].chunk_duration - 5.0).abs() < 1e-6);
        assert!((chunks[2].chunk_duration - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_chunk_hash_covers_own_slice() {
        let fp = synthetic_fingerprint(1030, 12.0);
        let chunks = generate_fingerprint_chunks(&fp);
        for chunk in &chunks {
            assert_eq!(chunk.spectrogram_hash, hash_peaks(&chunk.frequency_peaks, 4));
            assert_ne!(chunk.spectrogram_hash, fp.spectrogram_hash);
        }
    }

    #[test]
    fn test_short_fingerprint_single_chunk() {
        let fp = synthetic_fingerprint(10, 0.2);
        let chunks = generate_fingerprint_chunks(&fp);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].frequency_peaks.len(), 10);
        assert_eq!(chunks[0].spectrogram_hash, fp.spectrogram_hash);
        assert!((chunks[0].chunk_duration - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_time_exact_boundaries() {
        let fp = synthetic_fingerprint(1030, 12.0);
        let config = FingerprintConfig {
            chunk_alignment: ChunkAlignment::TimeExact,
            ..FingerprintConfig::default()
        };
        let chunks = generate_fingerprint_chunks_with_config(&fp, &config);

        // 44100 / 512 frames per second
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].start_frame, 0);
        assert_eq!(chunks[1].start_frame, 431);
        assert_eq!(chunks[2].start_frame, 861);
        let total: usize = chunks.iter().map(|c| c.frequency_peaks.len()).sum();
        assert_eq!(total, 1030);
    }

    #[test]
    fn test_time_exact_uses_recorded_hop() {
        // Hop 1024 at 44.1 kHz: 43.07 frames per second
        let mut fp = synthetic_fingerprint(515, 12.0);
        fp.hop_size = 1024;
        let config = FingerprintConfig {
            chunk_alignment: ChunkAlignment::TimeExact,
            ..FingerprintConfig::default()
        };
        assert_eq!(config.hop_size, 512);

        let starts: Vec<usize> = generate_fingerprint_chunks_with_config(&fp, &config)
            .iter()
            .map(|c| c.start_frame)
            .collect();
        assert_eq!(starts, vec![0, 215, 431], "Boundaries should follow the fingerprint's hop");
    }

    #[test]
    fn test_mismatched_feature_lengths_are_clamped() {
        let mut fp = synthetic_fingerprint(100, 12.0);
        fp.mfcc_data.truncate(50);
        let chunks = generate_fingerprint_chunks(&fp);
        let mfcc_total: usize = chunks.iter().map(|c| c.mfcc_data.len()).sum();
        assert_eq!(mfcc_total, 50);
    }
}
