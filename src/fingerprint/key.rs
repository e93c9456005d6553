//! Tonal key labels

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FingerprintError;

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Musical key, stored and serialized as its label (e.g. `"A minor"`)
///
/// The tonic is taken modulo 12 everywhere: `Key::Major(21)` and
/// `Key::Major(9)` share a label and compare equal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Key {
    /// Major key (0 = C, 1 = C#, ..., 11 = B)
    Major(u32),
    /// Minor key (0 = C, 1 = C#, ..., 11 = B)
    Minor(u32),
}

impl Key {
    /// Major key on `tonic`, reduced to a pitch class
    pub fn major(tonic: u32) -> Self {
        Key::Major(tonic % 12)
    }

    /// Minor key on `tonic`, reduced to a pitch class
    pub fn minor(tonic: u32) -> Self {
        Key::Minor(tonic % 12)
    }

    /// Pitch class of the tonic (0 = C)
    pub fn tonic(&self) -> u32 {
        match self {
            Key::Major(i) | Key::Minor(i) => *i % 12,
        }
    }

    /// Whether this is a major key
    pub fn is_major(&self) -> bool {
        matches!(self, Key::Major(_))
    }

    /// Note name of the tonic (e.g. "F#")
    pub fn tonic_name(&self) -> &'static str {
        NOTE_NAMES[self.tonic() as usize]
    }

    /// Get the key label (e.g. "C major", "A minor", "F# minor")
    ///
    /// # Example
    ///
    /// ```
    /// use stratum_fingerprint::Key;
    ///
    /// assert_eq!(Key::Major(0).name(), "C major");
    /// assert_eq!(Key::Minor(9).name(), "A minor");
    /// assert_eq!(Key::Major(6).name(), "F# major");
    /// ```
    pub fn name(&self) -> String {
        match self {
            Key::Major(_) => format!("{} major", self.tonic_name()),
            Key::Minor(_) => format!("{} minor", self.tonic_name()),
        }
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.is_major() == other.is_major() && self.tonic() == other.tonic()
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.is_major().hash(state);
        self.tonic().hash(state);
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Key {
    type Err = FingerprintError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let invalid = || FingerprintError::SerializationError(format!("Invalid key label: {:?}", label));

        let (note, mode) = label.trim().split_once(' ').ok_or_else(invalid)?;
        let tonic = NOTE_NAMES
            .iter()
            .position(|&n| n == note)
            .ok_or_else(invalid)? as u32;

        match mode.trim() {
            "major" => Ok(Key::major(tonic)),
            "minor" => Ok(Key::minor(tonic)),
            _ => Err(invalid()),
        }
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.name()
    }
}

impl TryFrom<String> for Key {
    type Error = FingerprintError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        label.parse()
    }
}
