//! # License Validation Module
//!
//! Checks that a license code is authentic, bound to this machine, and not
//! expired. This logic is lightweight and included in all production builds.
//!
//! ## Rejection ladder
//!
//! Each step is a hard rejection independent of the others, so the caller
//! always learns the precise first reason:
//! 1. **Decode**: any codec failure is [`LicenseError::MalformedCode`].
//! 2. **Machine binding**: fingerprint inequality is
//!    [`LicenseError::HardwareMismatch`], regardless of expiry.
//! 3. **Expiry**: a license is valid through the entirety of its expiry
//!    date; only the first local calendar day strictly after `expires_on`
//!    yields [`LicenseError::Expired`].

use chrono::{Local, NaiveDate};
use seatlock_hwid::{HardwareFingerprint, HardwareIdentity};
use tracing::debug;

use crate::codec::LicenseCodec;
use crate::error::LicenseError;
use crate::LicensePayload;

/// A successfully validated license.
#[derive(Debug, Clone)]
pub struct ValidatedLicense {
    /// The decoded payload.
    pub payload: LicensePayload,
    /// Whole days until expiry, counted from the validation date.
    /// Zero on the expiry date itself.
    pub days_remaining: i64,
}

/// Consumer-side validator bound to one machine fingerprint.
///
/// The fingerprint is derived once at construction; validation re-reads
/// nothing from the environment afterwards.
#[derive(Debug, Clone)]
pub struct LicenseValidator {
    codec: LicenseCodec,
    fingerprint: HardwareFingerprint,
}

impl LicenseValidator {
    /// Creates a validator for an explicit codec and fingerprint.
    #[must_use]
    pub const fn new(codec: LicenseCodec, fingerprint: HardwareFingerprint) -> Self {
        Self { codec, fingerprint }
    }

    /// Creates a validator keyed by the embedded product secret and bound to
    /// the fingerprint of the machine the process runs on.
    ///
    /// # Errors
    /// Returns [`LicenseError::Internal`] if codec key derivation fails.
    pub fn for_this_machine() -> Result<Self, LicenseError> {
        Ok(Self::new(LicenseCodec::new()?, HardwareIdentity::new().fingerprint()))
    }

    /// The fingerprint this validator accepts.
    #[must_use]
    pub const fn fingerprint(&self) -> &HardwareFingerprint {
        &self.fingerprint
    }

    /// Validates a code against the current local date.
    ///
    /// # Errors
    /// See [`LicenseValidator::validate_on`].
    pub fn validate(&self, code: &str) -> Result<ValidatedLicense, LicenseError> {
        self.validate_on(Local::now().date_naive(), code)
    }

    /// Validates a code against an explicit date.
    ///
    /// # Errors
    /// * [`LicenseError::MalformedCode`] if the code cannot be decoded.
    /// * [`LicenseError::HardwareMismatch`] if the embedded fingerprint is
    ///   not this validator's, checked before expiry.
    /// * [`LicenseError::Expired`] if `today` is past the expiry date.
    pub fn validate_on(
        &self,
        today: NaiveDate,
        code: &str,
    ) -> Result<ValidatedLicense, LicenseError> {
        // 1. Decode
        let payload = self.codec.decode(code).inspect_err(|_| {
            debug!("license code rejected: malformed");
        })?;

        // 2. Machine binding outranks expiry
        if payload.hardware_id != self.fingerprint {
            debug!("license code rejected: bound to another machine");
            return Err(LicenseError::HardwareMismatch);
        }

        // 3. Valid through the entirety of the expiry date
        if today > payload.expires_on {
            debug!(expired_on = %payload.expires_on, "license code rejected: expired");
            return Err(LicenseError::Expired { expired_on: payload.expires_on });
        }

        let days_remaining = (payload.expires_on - today).num_days();
        Ok(ValidatedLicense { payload, days_remaining })
    }
}
