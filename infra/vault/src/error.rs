//! # Vault Errors
//!
//! This module defines the [`VaultError`] enum used throughout the vault
//! crate for reporting cryptographic and configuration failures.

use std::borrow::Cow;

/// A specialized error enum for vault-related failures.
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    /// Failure during the encryption process.
    #[error("encryption error: {message}")]
    Encryption { message: Cow<'static, str> },

    /// Failure during the decryption process.
    ///
    /// This usually indicates an incorrect key, a mismatched cryptographic
    /// context (AAD), or tampered data. The message is deliberately uniform
    /// so callers cannot distinguish which decryption step failed.
    #[error("decryption error: {message}")]
    Decryption { message: Cow<'static, str> },

    /// Failure when the vault or builder is incorrectly configured.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: Cow<'static, str> },

    /// Failure when the provided blob is malformed or too short.
    #[error("invalid blob: {message}")]
    InvalidBlob { message: Cow<'static, str> },
}
