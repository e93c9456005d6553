//! Error types for the fingerprinting engine

use std::fmt;

/// Errors that can occur while generating or (de)serializing fingerprints
#[derive(Debug, Clone, PartialEq)]
pub enum FingerprintError {
    /// Invalid input parameters (empty buffer, zero sample rate, bad configuration)
    InvalidInput(String),

    /// Malformed decoded audio (non-finite sample values)
    DecodeError(String),

    /// Record could not be encoded to or decoded from its storage form
    SerializationError(String),
}

impl fmt::Display for FingerprintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FingerprintError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            FingerprintError::DecodeError(msg) => write!(f, "Decode error: {}", msg),
            FingerprintError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for FingerprintError {}

impl From<serde_json::Error> for FingerprintError {
    fn from(err: serde_json::Error) -> Self {
        FingerprintError::SerializationError(err.to_string())
    }
}
