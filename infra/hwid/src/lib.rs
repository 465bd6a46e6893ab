//! # Hardware Identity
//!
//! Derives a stable, machine-bound fingerprint used to lock a license to one
//! physical computer.
//!
//! ## Derivation
//!
//! The fingerprint combines several OS-exposed signals (host name, OS
//! family, OS release, CPU architecture) with one platform-specific stable
//! identifier supplied by a [`PlatformProbe`]. The signals are joined with a
//! delimiter, hashed with SHA-256, and the digest is truncated to 16 hex
//! characters, uppercased:
//!
//! ```text
//! UPPER(HEX(SHA256(host|os|release|arch|machine-uuid))[..16])
//! ```
//!
//! The result is deterministic across repeated calls on the same machine.
//! It is an identifier, not a secret, and it is not guaranteed unique:
//! 64 bits of digest are collision-tolerant by design.
//!
//! ## Degradation
//!
//! Fingerprinting never fails closed. When the platform probe cannot produce
//! an identifier the derivation falls back to hashing the host name alone:
//! a weaker binding, but one that keeps validation reachable. The fallback
//! is logged at warn level.

mod error;
mod probe;

pub use crate::error::InvalidFingerprint;
pub use crate::probe::PlatformProbe;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

/// Fingerprint length in hex characters.
const FINGERPRINT_LEN: usize = 16;

/// Delimiter between signals in the pre-hash string.
///
/// Chosen to avoid collisions with host names and UUID encodings.
const SIGNAL_SEP: char = '|';

/// A 16-character uppercase hex machine fingerprint.
///
/// Opaque and collision-tolerant; compared by exact string equality during
/// validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HardwareFingerprint(String);

impl HardwareFingerprint {
    /// Returns the fingerprint as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HardwareFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HardwareFingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for HardwareFingerprint {
    type Err = InvalidFingerprint;

    /// Parses an externally supplied fingerprint string.
    ///
    /// Input is trimmed and uppercased before validation, so hand-transcribed
    /// lowercase fingerprints are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_ascii_uppercase();
        if value.len() == FINGERPRINT_LEN && value.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(Self(value))
        } else {
            Err(InvalidFingerprint { value })
        }
    }
}

/// Fingerprint provider bound to one [`PlatformProbe`].
///
/// Construct once at process startup and share; the probe selection is the
/// only state, and derivation itself is a pure function of the machine.
#[derive(Debug, Clone, Copy)]
pub struct HardwareIdentity {
    probe: PlatformProbe,
}

impl Default for HardwareIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl HardwareIdentity {
    /// Creates an identity provider with the probe for the running OS.
    #[must_use]
    pub fn new() -> Self {
        Self { probe: PlatformProbe::detect() }
    }

    /// Creates an identity provider with an explicit probe.
    ///
    /// Intended for tests and for forcing the degraded host-name-only mode.
    #[must_use]
    pub const fn with_probe(probe: PlatformProbe) -> Self {
        Self { probe }
    }

    /// Returns the probe backing this identity provider.
    #[must_use]
    pub const fn probe(&self) -> PlatformProbe {
        self.probe
    }

    /// Derives the machine fingerprint.
    ///
    /// Deterministic across repeated calls on the same machine. When the
    /// platform probe yields no identifier, degrades to hashing the host
    /// name alone rather than failing.
    #[must_use]
    pub fn fingerprint(&self) -> HardwareFingerprint {
        let host = host_name();

        match self.probe.machine_uuid() {
            Some(uuid) => {
                let release = self.probe.os_release().unwrap_or_default();
                debug!(os = std::env::consts::OS, "deriving full hardware fingerprint");
                HardwareFingerprint(digest_signals(&[
                    &host,
                    std::env::consts::OS,
                    &release,
                    std::env::consts::ARCH,
                    &uuid,
                ]))
            },
            None => {
                warn!("platform probe unavailable, fingerprint degrades to host name only");
                HardwareFingerprint(digest_signals(&[&host]))
            },
        }
    }
}

/// Joins signals, hashes, truncates, uppercases.
fn digest_signals(signals: &[&str]) -> String {
    let mut joined = String::new();
    for (i, signal) in signals.iter().enumerate() {
        if i > 0 {
            joined.push(SIGNAL_SEP);
        }
        joined.push_str(signal);
    }

    let digest = Sha256::digest(joined.as_bytes());
    hex::encode(&digest[..FINGERPRINT_LEN / 2]).to_ascii_uppercase()
}

/// Current host name, empty string when unavailable.
fn host_name() -> String {
    hostname::get().map(|h| h.to_string_lossy().into_owned()).unwrap_or_default()
}
