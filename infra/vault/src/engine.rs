use aead::Nonce;
use aead::inout::InOutBuf;
use getrandom::fill;
use std::sync::Arc;

use crate::builder::VaultBuilder;
use crate::error::VaultError;
use crate::types::{Aes, BLOB_VERSION_V1, HEADER_LEN, NONCE_LEN, TAG_LEN, VaultCipher};

/// Inner vault state holding the initialized cipher.
#[allow(unreachable_pub)]
#[derive(Debug)]
pub struct VaultInner<C = Aes>
where
    C: VaultCipher,
{
    pub cipher: C,
}

/// A thread-safe container for authenticated symmetric encryption.
///
/// `Vault` is the sealing primitive behind license codes. It wraps an inner
/// state in an [`Arc`], making it cheaply clonable; the key derived at
/// construction is immutable for the process lifetime.
///
/// ### Generic Parameters
/// * `C`: The cipher implementation. Defaults to [`Aes`] (AES-256-GCM) for
///   hardware acceleration support.
///
/// ### Example
/// ```rust
/// use seatlock_vault::prelude::*;
///
/// # fn main() -> Result<(), VaultError> {
/// let vault = Vault::<Aes>::builder().derived_keys("secret", "salt")?.build()?;
///
/// let sealed = vault.seal_bytes(b"payload", b"ctx")?;
/// let restored = vault.unseal_bytes(&sealed, b"ctx")?;
/// assert_eq!(restored.as_slice(), b"payload");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Vault<C = Aes>
where
    C: VaultCipher,
{
    pub(crate) inner: Arc<VaultInner<C>>,
}

impl<C: VaultCipher> Clone for Vault<C> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<C> Vault<C>
where
    C: VaultCipher,
{
    /// Returns a new [`VaultBuilder`] to configure the vault.
    #[must_use]
    pub fn builder() -> VaultBuilder<C> {
        VaultBuilder::<C>::new()
    }

    /// Generates a unique random nonce.
    #[inline]
    fn next_nonce() -> Nonce<C> {
        let mut nonce = Nonce::<C>::default();
        fill(&mut nonce).expect("System RNG unavailable for nonce generation");
        nonce
    }

    /// Encrypts raw bytes into a versioned sealed blob.
    ///
    /// The blob layout is `[VERSION(1)][NONCE(12)][CIPHERTEXT(N)][TAG(16)]`;
    /// `aad` binds the blob to a caller-chosen context and must be presented
    /// unchanged when unsealing.
    ///
    /// # Errors
    /// * [`VaultError::Encryption`] if the AEAD encryption fails.
    pub fn seal_bytes(
        &self,
        data: impl AsRef<[u8]>,
        aad: &[u8],
    ) -> Result<Vec<u8>, VaultError> {
        let data = data.as_ref();
        let nonce = Self::next_nonce();

        let mut buf = Vec::with_capacity(HEADER_LEN + NONCE_LEN + data.len() + TAG_LEN);
        buf.push(BLOB_VERSION_V1);
        buf.extend_from_slice(&nonce);
        buf.extend_from_slice(data);

        let (_hdr, rest) = buf.split_at_mut(HEADER_LEN);
        let (_nonce_part, data_part) = rest.split_at_mut(nonce.len());
        let in_out = InOutBuf::from(data_part);

        let tag = self
            .inner
            .cipher
            .encrypt_inout_detached(&nonce, aad, in_out)
            .map_err(|_| VaultError::Encryption { message: "AEAD encryption failed".into() })?;

        buf.extend_from_slice(tag.as_slice());
        Ok(buf)
    }

    /// Decrypts a sealed blob back into plaintext.
    ///
    /// # Errors
    /// * [`VaultError::InvalidBlob`] if the blob is malformed, too short,
    ///   or carries an unsupported version.
    /// * [`VaultError::Decryption`] if the AAD, key, or data is invalid.
    pub fn unseal_bytes(
        &self,
        blob: impl AsRef<[u8]>,
        aad: &[u8],
    ) -> Result<Vec<u8>, VaultError> {
        let blob = blob.as_ref();

        if blob.len() < (HEADER_LEN + NONCE_LEN + TAG_LEN) {
            return Err(VaultError::InvalidBlob {
                message: format!(
                    "Blob too short ({} bytes). Expected at least {} bytes",
                    blob.len(),
                    HEADER_LEN + NONCE_LEN + TAG_LEN
                )
                .into(),
            });
        }

        let version = blob[0];
        if version != BLOB_VERSION_V1 {
            return Err(VaultError::InvalidBlob {
                message: format!("Unsupported blob version {version}").into(),
            });
        }

        let rest = &blob[HEADER_LEN..];
        let (nonce_slice, rest) = rest.split_at(NONCE_LEN);
        let (ciphertext, tag_slice) = rest.split_at(rest.len() - TAG_LEN);

        let nonce = nonce_slice
            .try_into()
            .map_err(|_| VaultError::Decryption { message: "Invalid nonce length".into() })?;

        let tag = tag_slice
            .try_into()
            .map_err(|_| VaultError::Decryption { message: "Invalid tag length".into() })?;

        let mut buf = ciphertext.to_vec();
        let in_out = InOutBuf::from(&mut buf[..]);

        self.inner
            .cipher
            .decrypt_inout_detached(&nonce, aad, in_out, &tag)
            .map_err(|_| VaultError::Decryption {
                message: "AEAD authentication failed".into(),
            })?;

        Ok(buf)
    }
}
