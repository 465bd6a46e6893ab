use crate::engine::{Vault, VaultInner};
use crate::error::VaultError;
use crate::types::{Aes, VaultCipher};
use aead::Key;
use hkdf::Hkdf;
use private::Sealed;
use sha2::Sha256;
use std::marker::PhantomData;
use std::sync::Arc;
use zeroize::{Zeroize, ZeroizeOnDrop};

#[derive(Debug, Default, ZeroizeOnDrop)]
pub struct NoKeys;
#[derive(Debug, Zeroize, ZeroizeOnDrop)]
pub struct WithKeys {
    seal: [u8; 32],
}

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoKeys {}
impl Sealed for WithKeys {}

/// A builder for secure initialization of the [`Vault`].
///
/// Implements `ZeroizeOnDrop` to ensure that raw key material is cleared from
/// memory as soon as the builder is no longer needed.
#[allow(private_bounds)]
#[derive(Debug, Zeroize, ZeroizeOnDrop)]
pub struct VaultBuilder<C: VaultCipher = Aes, K: Sealed + ZeroizeOnDrop = NoKeys> {
    #[zeroize(skip)]
    _cipher: PhantomData<C>,
    keys: K,
}

impl<C: VaultCipher> Default for VaultBuilder<C> {
    fn default() -> Self {
        Self { _cipher: PhantomData, keys: NoKeys }
    }
}

impl<C: VaultCipher> VaultBuilder<C> {
    /// Creates a new empty builder.
    #[must_use = "Builder must be configured with `derived_keys` before use"]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives the sealing key using HKDF-SHA256.
    ///
    /// # Arguments
    /// * `ikm`: Input Keying Material (the embedded product secret).
    /// * `salt`: Uniquifies keys across different deployments of the scheme.
    ///
    /// The derivation is deterministic: the same `(ikm, salt)` pair always
    /// yields the same key, so codes sealed by one process unseal in any
    /// other process of the same build.
    ///
    /// # Errors
    /// Returns [`VaultError::Encryption`] if key expansion fails.
    pub fn derived_keys(
        self,
        ikm: impl AsRef<[u8]>,
        salt: impl AsRef<[u8]>,
    ) -> Result<VaultBuilder<C, WithKeys>, VaultError> {
        let (_, hk) = Hkdf::<Sha256>::extract(Some(salt.as_ref()), ikm.as_ref());
        let mut seal = [0u8; 32];

        hk.expand(b"v1:license", &mut seal).map_err(|_| VaultError::Encryption {
            message: "HKDF expansion failed for sealing key".into(),
        })?;

        Ok(VaultBuilder { _cipher: PhantomData, keys: WithKeys { seal } })
    }
}

impl<C: VaultCipher> VaultBuilder<C, WithKeys> {
    /// Finalizes vault construction and `zeroes` the builder.
    ///
    /// # Errors
    /// Returns [`VaultError::InvalidConfiguration`] if the derived key
    /// cannot initialize the cipher.
    pub fn build(mut self) -> Result<Vault<C>, VaultError> {
        let vault = VaultInner { cipher: Self::init_cipher(&self.keys.seal)? };

        self.zeroize();

        Ok(Vault { inner: Arc::new(vault) })
    }

    fn init_cipher(key: &[u8; 32]) -> Result<C, VaultError> {
        let key = Key::<C>::try_from(&key[..]).map_err(|_| VaultError::InvalidConfiguration {
            message: format!("Invalid key length {}, must be 32 bytes", key.len()).into(),
        })?;
        Ok(C::new(&key))
    }
}
