//! # Licensing System
//!
//! This crate provides a unified system for offline license generation and
//! validation. Entitlements are sealed with authenticated symmetric
//! encryption and armored into short, human-transcribable codes, so
//! activation never needs a network round-trip.
//!
//! ## Architecture
//!
//! The system is divided into three primary parts:
//!
//! 1.  **Codec ([`LicenseCodec`]):** Reversible, authenticated mapping
//!     between a structured payload and the armored code text.
//! 2.  **Validation ([`validator`]):** Lightweight logic included in
//!     production binaries to check that a code is authentic, bound to this
//!     machine, and not expired.
//! 3.  **Generation ([`generator`]):** Issuer-side logic that builds and
//!     seals new codes. Gated behind the `issuance` feature so production
//!     consumer builds carry no generation path.
//!
//! ## Code format
//!
//! A payload is serialized to its canonical byte form, sealed by the vault
//! (AES-256-GCM under a key derived once from the embedded product secret),
//! base64-armored without padding, and re-chunked into 5-character groups
//! joined by `-`:
//!
//! ```text
//! K7PXQ-M2AAD-9FQ0R-...
//! ```
//!
//! The code is fully self-contained: validation needs no external lookup.

pub mod codec;
mod error;
#[cfg(feature = "issuance")]
pub mod generator;
pub mod validator;

pub use crate::codec::{LicenseCode, LicenseCodec};
pub use crate::error::LicenseError;

use chrono::NaiveDate;
use seatlock_hwid::HardwareFingerprint;
use serde::{Deserialize, Serialize};

/// Version string stamped into every payload issued by this build.
pub const LICENSE_VERSION: &str = "1";

/// The semantic content of a license.
///
/// This structure defines who the entitlement belongs to, which machine it
/// is bound to, and for how long it is valid. It is the plaintext that the
/// codec seals into a [`LicenseCode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LicensePayload {
    /// The name of the licensed entity/customer.
    pub company: String,
    /// Fingerprint of the one machine this license is valid on.
    pub hardware_id: HardwareFingerprint,
    /// Calendar date the license was issued.
    pub issued_on: NaiveDate,
    /// Last calendar date the license is valid (inclusive).
    pub expires_on: NaiveDate,
    /// License format version, see [`LICENSE_VERSION`].
    pub version: String,
}
