//! # Activation Store
//!
//! Persists the single local activation record: the accepted license payload
//! plus the activation timestamp, written as UTF-8 TOML at one well-known
//! path.
//!
//! The record is the sole durable state of the engine. Saving overwrites
//! unconditionally (last write wins, no history), and there is no locking or
//! multi-writer protection: the deployment assumption is a single desktop
//! user, documented here rather than enforced.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use seatlock_hwid::HardwareFingerprint;
use seatlock_licensing::LicensePayload;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ActivationError;

/// The durable proof that a license was accepted on this machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationRecord {
    /// The accepted license payload.
    pub license: LicensePayload,
    /// Local timestamp of the successful activation.
    pub activated_at: NaiveDateTime,
}

/// On-disk shape of the activation record.
///
/// Kept flat so the file reads as a plain list of named fields.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecordFile {
    company: String,
    hardware_id: HardwareFingerprint,
    issued_on: NaiveDate,
    expires_on: NaiveDate,
    #[serde(with = "datetime_format")]
    activated_at: NaiveDateTime,
    version: String,
}

impl From<&ActivationRecord> for RecordFile {
    fn from(record: &ActivationRecord) -> Self {
        Self {
            company: record.license.company.clone(),
            hardware_id: record.license.hardware_id.clone(),
            issued_on: record.license.issued_on,
            expires_on: record.license.expires_on,
            activated_at: record.activated_at,
            version: record.license.version.clone(),
        }
    }
}

impl From<RecordFile> for ActivationRecord {
    fn from(file: RecordFile) -> Self {
        Self {
            license: LicensePayload {
                company: file.company,
                hardware_id: file.hardware_id,
                issued_on: file.issued_on,
                expires_on: file.expires_on,
                version: file.version,
            },
            activated_at: file.activated_at,
        }
    }
}

/// File-backed store for the activation record.
#[derive(Debug, Clone)]
pub struct ActivationStore {
    path: PathBuf,
}

impl ActivationStore {
    /// Creates a store over the given record path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the record path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the record, creating parent directories as needed and
    /// unconditionally overwriting any prior record.
    ///
    /// # Errors
    /// * [`ActivationError::Record`] if the record cannot be serialized.
    /// * [`ActivationError::Storage`] on any filesystem failure.
    pub fn save(&self, record: &ActivationRecord) -> Result<(), ActivationError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| ActivationError::Storage {
                    source,
                    path: parent.to_path_buf(),
                })?;
            }
        }

        let text = toml::to_string(&RecordFile::from(record))
            .map_err(|e| ActivationError::Record { message: e.to_string() })?;

        fs::write(&self.path, text)
            .map_err(|source| ActivationError::Storage { source, path: self.path.clone() })?;

        debug!(path = %self.path.display(), "activation record written");
        Ok(())
    }

    /// Reads the record, `Ok(None)` when none exists.
    ///
    /// # Errors
    /// * [`ActivationError::Storage`] if the file exists but cannot be read.
    /// * [`ActivationError::Record`] if the file content does not parse.
    pub fn load(&self) -> Result<Option<ActivationRecord>, ActivationError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ActivationError::Storage { source, path: self.path.clone() });
            },
        };

        let file: RecordFile =
            toml::from_str(&raw).map_err(|e| ActivationError::Record { message: e.to_string() })?;

        Ok(Some(file.into()))
    }

    /// Removes the record. Returns `Ok(false)` if nothing existed.
    ///
    /// # Errors
    /// * [`ActivationError::Storage`] on any filesystem failure other than
    ///   the record being absent.
    pub fn delete(&self) -> Result<bool, ActivationError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "activation record removed");
                Ok(true)
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(ActivationError::Storage { source, path: self.path.clone() }),
        }
    }
}

/// Helper module pinning the `activated_at` text format to
/// `YYYY-MM-DD HH:MM:SS`.
mod datetime_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub(super) fn serialize<S: Serializer>(v: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        String::serialize(&v.format(FORMAT).to_string(), s)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
