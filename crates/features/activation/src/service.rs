//! # License Service
//!
//! The facade composing validation and storage into the four boundary
//! operations the surrounding application calls: `hardware_id`,
//! `activate`, `is_licensed` / `license_info`, and `deactivate`.
//!
//! ## State machine
//!
//! Two states, `Unlicensed` and `Licensed`. A successful [`activate`]
//! transitions to `Licensed`; an explicit [`deactivate`] transitions back.
//! Expiry or a hardware change flips the *answer* of every status query
//! without touching the record file: validity is re-derived from the stored
//! record, the current fingerprint, and the current date on every call,
//! never cached and never trusted blindly.
//!
//! Storage failures degrade toward the safe side: an unreadable record
//! answers "not licensed", a failed save answers "activation failed".
//!
//! [`activate`]: LicenseService::activate
//! [`deactivate`]: LicenseService::deactivate

use chrono::{Local, NaiveDate, NaiveDateTime};
use seatlock_hwid::HardwareFingerprint;
use seatlock_licensing::validator::LicenseValidator;
use seatlock_licensing::LicenseError;
use std::fmt;
use tracing::{info, warn};

use crate::config::LicenseConfig;
use crate::store::{ActivationRecord, ActivationStore};

/// Fixed rejection messages, keyed by rejection reason.
const MSG_MALFORMED: &str = "The license code is not valid. Check the code and try again.";
const MSG_WRONG_MACHINE: &str = "This license was issued for a different machine.";
const MSG_EXPIRED: &str = "This license has expired.";
const MSG_STORAGE: &str = "Activation failed: the license could not be saved.";

/// Current standing of the stored activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseStatus {
    /// The stored license is valid on this machine today.
    Active,
    /// The stored license no longer passes validation.
    Expired,
}

impl fmt::Display for LicenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Expired => write!(f, "expired"),
        }
    }
}

/// Snapshot of the stored activation for the status panel.
#[derive(Debug, Clone)]
pub struct LicenseInfo {
    /// Licensed company name.
    pub company: String,
    /// Fingerprint the license is bound to.
    pub hardware_id: HardwareFingerprint,
    /// Issue date of the license.
    pub issued_on: NaiveDate,
    /// Last valid calendar date of the license.
    pub expires_on: NaiveDate,
    /// When this machine accepted the license.
    pub activated_at: NaiveDateTime,
    /// Whole days until expiry, clamped at zero.
    pub days_remaining: i64,
    /// Whether the activation still holds right now.
    pub status: LicenseStatus,
}

/// Result of an activation attempt, shaped for interactive callers.
#[derive(Debug, Clone)]
pub struct ActivationOutcome {
    /// Whether the code was accepted and persisted.
    pub accepted: bool,
    /// User-facing explanation of the outcome.
    pub message: String,
}

impl ActivationOutcome {
    fn accepted(message: String) -> Self {
        Self { accepted: true, message }
    }

    fn rejected(message: impl Into<String>) -> Self {
        Self { accepted: false, message: message.into() }
    }
}

/// The engine's facade, constructed once at process startup.
///
/// Holds the machine fingerprint and the derived sealing key for the process
/// lifetime; every query re-derives validity from disk and the environment.
#[derive(Debug, Clone)]
pub struct LicenseService {
    validator: LicenseValidator,
    store: ActivationStore,
}

impl LicenseService {
    /// Creates the service for this machine from configuration.
    ///
    /// # Errors
    /// Returns [`LicenseError::Internal`] if codec key derivation fails.
    pub fn new(config: &LicenseConfig) -> Result<Self, LicenseError> {
        Ok(Self::with_parts(
            LicenseValidator::for_this_machine()?,
            ActivationStore::new(&config.store_path),
        ))
    }

    /// Creates the service from explicit parts.
    ///
    /// This is the seam for tests: any fingerprint, codec, and store path.
    #[must_use]
    pub const fn with_parts(validator: LicenseValidator, store: ActivationStore) -> Self {
        Self { validator, store }
    }

    /// The fingerprint of this machine, shown to the user so they can
    /// request a license for it.
    #[must_use]
    pub const fn hardware_id(&self) -> &HardwareFingerprint {
        self.validator.fingerprint()
    }

    /// Whether a valid activation exists right now.
    ///
    /// Checked at application startup. Absent or unreadable records answer
    /// `false`; a stored record is re-checked against the current machine
    /// and date on every call.
    #[must_use]
    pub fn is_licensed(&self) -> bool {
        self.load_degraded()
            .map(|record| self.evaluate(&record, Local::now().date_naive()).status)
            == Some(LicenseStatus::Active)
    }

    /// Snapshot of the stored activation, `None` when nothing is stored
    /// or the record is unreadable.
    #[must_use]
    pub fn license_info(&self) -> Option<LicenseInfo> {
        self.load_degraded().map(|record| self.evaluate(&record, Local::now().date_naive()))
    }

    /// Validates a code and, on success, persists the activation record.
    ///
    /// On rejection there is no side effect and the message comes from a
    /// fixed per-reason set; on success the message carries the company and
    /// expiry date.
    #[must_use]
    pub fn activate(&self, code: &str) -> ActivationOutcome {
        let validated = match self.validator.validate(code) {
            Ok(validated) => validated,
            Err(LicenseError::HardwareMismatch) => {
                return ActivationOutcome::rejected(MSG_WRONG_MACHINE);
            },
            Err(LicenseError::Expired { .. }) => {
                return ActivationOutcome::rejected(MSG_EXPIRED);
            },
            Err(_) => return ActivationOutcome::rejected(MSG_MALFORMED),
        };

        let record = ActivationRecord {
            license: validated.payload,
            activated_at: Local::now().naive_local(),
        };

        match self.store.save(&record) {
            Ok(()) => {
                info!(
                    company = %record.license.company,
                    expires_on = %record.license.expires_on,
                    "license activated"
                );
                ActivationOutcome::accepted(format!(
                    "License activated for {} through {}.",
                    record.license.company, record.license.expires_on
                ))
            },
            Err(error) => {
                warn!(%error, "activation could not be persisted");
                ActivationOutcome::rejected(MSG_STORAGE)
            },
        }
    }

    /// Removes the stored activation. Returns `false` when nothing was
    /// stored or the record could not be removed.
    #[must_use]
    pub fn deactivate(&self) -> bool {
        match self.store.delete() {
            Ok(existed) => {
                if existed {
                    info!("license deactivated");
                }
                existed
            },
            Err(error) => {
                warn!(%error, "deactivation failed");
                false
            },
        }
    }

    /// Loads the record, degrading storage failures to "nothing stored".
    fn load_degraded(&self) -> Option<ActivationRecord> {
        match self.store.load() {
            Ok(record) => record,
            Err(error) => {
                warn!(%error, "activation record unreadable, treating as unlicensed");
                None
            },
        }
    }

    /// Re-derives the standing of a stored record for `today`.
    ///
    /// Active requires the fingerprint to match this machine, the date to
    /// fall inside `[issued_on, expires_on]`, and the clock not to sit
    /// before the recorded activation (rollback tripwire).
    fn evaluate(&self, record: &ActivationRecord, today: NaiveDate) -> LicenseInfo {
        let license = &record.license;

        let hardware_matches = license.hardware_id == *self.validator.fingerprint();
        let clock_plausible = today >= license.issued_on && today >= record.activated_at.date();
        let within_validity = today <= license.expires_on;

        let status = if hardware_matches && clock_plausible && within_validity {
            LicenseStatus::Active
        } else {
            LicenseStatus::Expired
        };

        LicenseInfo {
            company: license.company.clone(),
            hardware_id: license.hardware_id.clone(),
            issued_on: license.issued_on,
            expires_on: license.expires_on,
            activated_at: record.activated_at,
            days_remaining: (license.expires_on - today).num_days().max(0),
            status,
        }
    }
}
