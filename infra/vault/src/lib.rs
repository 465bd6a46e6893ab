//! A thread-safe authenticated encryption core for license sealing.
//!
//! This crate provides the symmetric AEAD primitive behind armored license
//! codes: a key derived once from an embedded secret, random-nonce
//! encryption, and a compact versioned blob format.
//!
//! ## Blob Format & Versioning
//!
//! Sealed blobs are a binary value with an explicit header:
//!
//! ```text
//! [V(1)][NONCE(12)][CIPHERTEXT(N)][TAG(16)]
//! ```
//!
//! The version byte enables forward-compatible upgrades without breaking
//! codes issued by earlier releases.
//!
//! ## Nonce Policy
//!
//! Every seal operation uses a **random 96-bit nonce**. This is a standard
//! approach for `AES-GCM` and `ChaCha20Poly1305`, but it is probabilistic;
//! the license issuance volume per key is far below any collision concern.
//!
//! ## Key Derivation
//!
//! Keys come from HKDF-SHA256 over a caller-supplied secret and salt. The
//! derivation is deterministic, so issuer and consumer processes built from
//! the same secret interoperate without any key exchange.

mod builder;
mod engine;
mod error;
mod types;

pub use builder::VaultBuilder;
pub use engine::Vault;
pub use error::VaultError;

pub mod prelude {
    pub use crate::engine::Vault;
    pub use crate::error::VaultError;
    pub use crate::types::{Aes, ChaCha};
}

pub mod algorithms {
    pub use crate::types::{Aes, ChaCha, VaultCipher};
}
