//! Krumhansl-Schmuckler key templates
//!
//! Tonal profiles for 24 keys (12 major + 12 minor), built at compile time
//! by rotating the C major and C minor Krumhansl-Kessler key profiles.
//!
//! # Reference
//!
//! Krumhansl, C. L. (1990). *Cognitive Foundations of Musical Pitch*.
//! Oxford University Press.

/// C major key profile (C, C#, ..., B)
pub const MAJOR_PROFILE: [f32; 12] = [
    6.35, 2.23, 3.48, 2.33, 4.38, 4.09, 2.52, 5.19, 2.39, 3.66, 2.29, 2.88,
];

/// C minor key profile (C, C#, ..., B)
pub const MINOR_PROFILE: [f32; 12] = [
    6.33, 2.68, 3.52, 5.38, 2.60, 3.53, 2.54, 4.75, 3.98, 2.69, 3.34, 3.17,
];

/// Key templates for all 24 keys
#[derive(Debug, Clone)]
pub struct KeyTemplates {
    /// Major key templates (12 keys: C, C#, D, ..., B)
    pub major: [[f32; 12]; 12],

    /// Minor key templates (12 keys: C, C#, D, ..., B)
    pub minor: [[f32; 12]; 12],
}

/// All 24 templates, shared read-only
pub const KEY_TEMPLATES: KeyTemplates = KeyTemplates {
    major: rotations(MAJOR_PROFILE),
    minor: rotations(MINOR_PROFILE),
};

impl KeyTemplates {
    /// Template for the major key with tonic `key_idx` (0 = C)
    pub fn get_major_template(&self, key_idx: u32) -> &[f32; 12] {
        &self.major[key_idx as usize % 12]
    }

    /// Template for the minor key with tonic `key_idx` (0 = C)
    pub fn get_minor_template(&self, key_idx: u32) -> &[f32; 12] {
        &self.minor[key_idx as usize % 12]
    }
}

impl Default for KeyTemplates {
    fn default() -> Self {
        KEY_TEMPLATES
    }
}

/// `out[t][(i + t) % 12] = profile[i]` for every tonic `t`
const fn rotations(profile: [f32; 12]) -> [[f32; 12]; 12] {
    let mut out = [[0.0f32; 12]; 12];
    let mut tonic = 0;
    while tonic < 12 {
        let mut i = 0;
        while i < 12 {
            out[tonic][(i + tonic) % 12] = profile[i];
            i += 1;
        }
        tonic += 1;
    }
    out
}
