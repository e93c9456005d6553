//! Example: Fingerprint synthetic tones and compare them
//!
//! Run with `RUST_LOG=debug` to see the pipeline stages.

use stratum_fingerprint::{
    compare_fingerprint_chunks, compare_fingerprints, generate_fingerprint,
    generate_fingerprint_chunks,
};

const SAMPLE_RATE: u32 = 44100;

fn tone(freq: f64, seconds: f64) -> Vec<f32> {
    let n = (seconds * SAMPLE_RATE as f64) as usize;
    (0..n)
        .map(|i| (0.5 * (2.0 * std::f64::consts::PI * freq * i as f64 / SAMPLE_RATE as f64).sin()) as f32)
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let original = tone(440.0, 12.0);
    let excerpt = original[SAMPLE_RATE as usize..].to_vec();
    let other = tone(587.33, 12.0);

    let fp_original = generate_fingerprint(&original, SAMPLE_RATE)?;
    let fp_excerpt = generate_fingerprint(&excerpt, SAMPLE_RATE)?;
    let fp_other = generate_fingerprint(&other, SAMPLE_RATE)?;

    println!("Fingerprint:");
    println!("  Hash: {}", fp_original.spectrogram_hash);
    println!("  Frames: {}", fp_original.n_frames());
    println!("  Duration: {:.2}s", fp_original.duration);
    println!(
        "  Key: {}",
        fp_original.key_signature.map(|k| k.name()).unwrap_or_else(|| "none".to_string())
    );
    println!("  Tempo: {:?}", fp_original.tempo_signature);

    let same = compare_fingerprints(&fp_original, &fp_excerpt);
    let different = compare_fingerprints(&fp_original, &fp_other);
    println!("Original vs excerpt: {}", serde_json::to_string_pretty(&same)?);
    println!("Original vs other:   {}", serde_json::to_string_pretty(&different)?);

    let chunks = compare_fingerprint_chunks(
        &generate_fingerprint_chunks(&fp_original),
        &generate_fingerprint_chunks(&fp_excerpt),
    );
    println!(
        "Chunks: {}/{} matched (similarity {:.2})",
        chunks.matched_chunks, chunks.total_chunks, chunks.similarity
    );

    Ok(())
}
