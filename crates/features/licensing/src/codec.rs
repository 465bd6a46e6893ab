//! # License Codec
//!
//! Reversible, authenticated encode/decode between a [`LicensePayload`] and
//! the armored code text a person can read over the phone.
//!
//! ## Pipeline
//!
//! ```text
//! encode: payload --postcard--> bytes --vault seal--> blob --base64--> text --group 5--> code
//! decode: the same steps reversed, with separators and whitespace stripped first
//! ```
//!
//! ## Threat model
//!
//! The sealing key is derived from a secret embedded in the distributed
//! binary. A motivated reverse engineer can extract it; the scheme is a
//! casual-copy deterrent, not tamper-proof DRM. What the AEAD construction
//! does guarantee is that any transcription error or deliberate mutation of
//! a code is detected rather than silently accepted.

use std::fmt;

use base64::{Engine as _, engine::general_purpose};
use seatlock_vault::prelude::*;

use crate::error::LicenseError;
use crate::LicensePayload;

/// Product secret baked into every build.
///
/// This value must remain stable across releases, otherwise all previously
/// issued codes become undecodable. Do not treat it as confidential against
/// a reverse engineer; see the crate-level threat model notes.
const EMBEDDED_SECRET: &[u8] = b"sl-2f8c01d7e4b9a6538e0d41c29b7f6a15";

/// Salt for the HKDF key derivation, uniquifying this deployment of the scheme.
const KEY_SALT: &[u8] = b"seatlock.codec";

/// AAD context binding sealed blobs to the license domain.
const SEAL_CONTEXT: &[u8] = b"seatlock.license.v1";

/// Armored group width.
const ARMOR_GROUP_LEN: usize = 5;

/// Separator between armored groups.
const ARMOR_SEP: char = '-';

/// An armored license code: sealed payload bytes as base64 text in
/// 5-character groups joined by `-`.
///
/// Codes are produced exclusively by [`LicenseCodec::encode`]; free-form
/// strings enter the system through [`LicenseCodec::decode`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseCode(String);

impl LicenseCode {
    pub(crate) fn new(code: String) -> Self {
        Self(code)
    }

    /// Returns the armored code text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LicenseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LicenseCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Stateless authenticated codec between payloads and armored codes.
///
/// The sealing key is derived once at construction and held for the process
/// lifetime; clones share the underlying cipher.
#[derive(Clone)]
pub struct LicenseCodec {
    vault: Vault<Aes>,
}

impl fmt::Debug for LicenseCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LicenseCodec").finish_non_exhaustive()
    }
}

impl LicenseCodec {
    /// Creates a codec keyed by the embedded product secret.
    ///
    /// # Errors
    /// Returns [`LicenseError::Internal`] if key derivation fails, which
    /// indicates a broken build rather than a runtime condition.
    pub fn new() -> Result<Self, LicenseError> {
        Self::with_secret(EMBEDDED_SECRET, KEY_SALT)
    }

    /// Creates a codec keyed by an explicit secret.
    ///
    /// Intended for tests that need a codec guaranteed not to interoperate
    /// with the product key.
    ///
    /// # Errors
    /// Returns [`LicenseError::Internal`] if key derivation fails.
    pub fn with_secret(ikm: &[u8], salt: &[u8]) -> Result<Self, LicenseError> {
        let vault = Vault::<Aes>::builder()
            .derived_keys(ikm, salt)
            .and_then(|builder| builder.build())
            .map_err(|e| LicenseError::Internal {
                message: format!("codec key derivation failed: {e}").into(),
            })?;
        Ok(Self { vault })
    }

    /// Seals a payload into an armored license code.
    ///
    /// # Errors
    /// Returns [`LicenseError::Internal`] if serialization or sealing fails.
    pub fn encode(&self, payload: &LicensePayload) -> Result<LicenseCode, LicenseError> {
        let bytes = postcard::to_stdvec(payload).map_err(|_| LicenseError::Internal {
            message: "payload serialization failed".into(),
        })?;

        let blob = self.vault.seal_bytes(&bytes, SEAL_CONTEXT).map_err(|_| {
            LicenseError::Internal { message: "payload sealing failed".into() }
        })?;

        let compact = general_purpose::STANDARD_NO_PAD.encode(blob);
        Ok(LicenseCode::new(armor(&compact)))
    }

    /// Opens an armored code back into its payload.
    ///
    /// Group separators, whitespace, and stray base64 padding are stripped
    /// before decoding, so codes survive line wrapping and manual
    /// transcription of the separators. The base64 alphabet itself is
    /// case-sensitive.
    ///
    /// # Errors
    /// Returns [`LicenseError::MalformedCode`] for every failure mode,
    /// deliberately indistinguishable; see [`LicenseError::MalformedCode`].
    pub fn decode(&self, code: &str) -> Result<LicensePayload, LicenseError> {
        let compact = dearmor(code);

        let blob = general_purpose::STANDARD_NO_PAD
            .decode(compact)
            .map_err(|_| LicenseError::MalformedCode)?;

        let bytes =
            self.vault.unseal_bytes(&blob, SEAL_CONTEXT).map_err(|_| LicenseError::MalformedCode)?;

        postcard::from_bytes(&bytes).map_err(|_| LicenseError::MalformedCode)
    }
}

/// Re-chunks compact base64 text into 5-character groups joined by `-`.
fn armor(compact: &str) -> String {
    let mut out = String::with_capacity(compact.len() + compact.len() / ARMOR_GROUP_LEN);
    for (i, c) in compact.chars().enumerate() {
        if i > 0 && i % ARMOR_GROUP_LEN == 0 {
            out.push(ARMOR_SEP);
        }
        out.push(c);
    }
    out
}

/// Strips group separators, whitespace, and base64 padding from input text.
fn dearmor(code: &str) -> String {
    code.chars().filter(|c| *c != ARMOR_SEP && *c != '=' && !c.is_whitespace()).collect()
}
