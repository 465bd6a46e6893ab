//! # License Generation Module
//!
//! Issuer-side routines that build and seal new license codes. Strictly
//! gated behind the `issuance` feature so the generation path is not
//! included in consumer production builds.
//!
//! Generation is a pure function of its inputs and the issue date: no side
//! effects beyond the returned code.

use chrono::{Days, Local, NaiveDate};
use seatlock_hwid::HardwareFingerprint;

use crate::codec::{LicenseCode, LicenseCodec};
use crate::error::LicenseError;
use crate::{LICENSE_VERSION, LicensePayload};

/// Issuer-side factory for sealed license codes.
#[derive(Debug, Clone)]
pub struct LicenseGenerator {
    codec: LicenseCodec,
}

impl LicenseGenerator {
    /// Creates a generator over an explicit codec.
    #[must_use]
    pub const fn new(codec: LicenseCodec) -> Self {
        Self { codec }
    }

    /// Creates a generator keyed by the embedded product secret.
    ///
    /// # Errors
    /// Returns [`LicenseError::Internal`] if codec key derivation fails.
    pub fn with_product_key() -> Result<Self, LicenseError> {
        Ok(Self::new(LicenseCodec::new()?))
    }

    /// Generates a code issued today on the local calendar.
    ///
    /// # Errors
    /// See [`LicenseGenerator::generate_on`].
    pub fn generate(
        &self,
        company: &str,
        duration_days: i64,
        hardware_id: &HardwareFingerprint,
    ) -> Result<LicenseCode, LicenseError> {
        self.generate_on(Local::now().date_naive(), company, duration_days, hardware_id)
    }

    /// Generates a code issued on an explicit date.
    ///
    /// The license is valid from `issued_on` through
    /// `issued_on + duration_days` inclusive.
    ///
    /// # Errors
    /// * [`LicenseError::InvalidInput`] if `company` is blank or
    ///   `duration_days` is not positive. Checked before any encoding work;
    ///   no code is produced.
    /// * [`LicenseError::Internal`] if sealing fails.
    pub fn generate_on(
        &self,
        issued_on: NaiveDate,
        company: &str,
        duration_days: i64,
        hardware_id: &HardwareFingerprint,
    ) -> Result<LicenseCode, LicenseError> {
        let company = company.trim();
        if company.is_empty() {
            return Err(LicenseError::InvalidInput {
                message: "company name must not be empty".into(),
            });
        }
        if duration_days <= 0 {
            return Err(LicenseError::InvalidInput {
                message: "duration must be a positive number of days".into(),
            });
        }

        let expires_on =
            issued_on.checked_add_days(Days::new(duration_days.unsigned_abs())).ok_or(
                LicenseError::InvalidInput { message: "duration overflows the calendar".into() },
            )?;

        let payload = LicensePayload {
            company: company.to_owned(),
            hardware_id: hardware_id.clone(),
            issued_on,
            expires_on,
            version: LICENSE_VERSION.to_owned(),
        };

        self.codec.encode(&payload)
    }
}
