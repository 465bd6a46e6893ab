//! # Hwid Errors
//!
//! Fingerprint derivation itself is infallible by design (probe failures
//! degrade instead of erroring), so the only error here is the parse
//! failure for externally supplied fingerprint strings.

/// Returned when a string does not have the fingerprint shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid hardware fingerprint {value:?}: expected 16 uppercase hex characters")]
pub struct InvalidFingerprint {
    /// The rejected input, trimmed.
    pub value: String,
}
