use aead::{AeadInOut, KeyInit};
use aes_gcm::Aes256Gcm;
use chacha20poly1305::ChaCha20Poly1305;

// --- Aliases ---

pub type Aes = Aes256Gcm;
pub type ChaCha = ChaCha20Poly1305;

pub trait VaultCipher: AeadInOut + KeyInit + 'static {}
impl<T: AeadInOut + KeyInit + 'static> VaultCipher for T {}

// --- Blob format constants ---

/// Blob header version for sealed blobs.
pub(crate) const BLOB_VERSION_V1: u8 = 1;

/// Header layout: `[version: u8]`
pub(crate) const HEADER_LEN: usize = 1;

/// AEAD nonce length (96-bit).
pub(crate) const NONCE_LEN: usize = 12;

/// AEAD tag length (128-bit).
pub(crate) const TAG_LEN: usize = 16;
