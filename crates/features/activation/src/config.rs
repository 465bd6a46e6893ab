//! # Configuration
//!
//! Layered configuration for the activation engine: an optional settings
//! file overlaid with `SEATLOCK__`-prefixed environment variables (nested
//! keys separated by double underscores).

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::info;

use crate::error::ActivationError;

/// Default well-known record path, relative to the working directory.
const DEFAULT_STORE_PATH: &str = "config/license.dat";

/// Settings for the license engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LicenseConfig {
    /// Where the activation record lives.
    pub store_path: PathBuf,
}

impl Default for LicenseConfig {
    fn default() -> Self {
        Self { store_path: PathBuf::from(DEFAULT_STORE_PATH) }
    }
}

impl LicenseConfig {
    /// Loads configuration from an optional file plus environment overrides.
    ///
    /// Without an explicit path a `seatlock` settings file in the working
    /// directory is used when present; defaults apply otherwise. Values are
    /// then overlaid from environment variables such as
    /// `SEATLOCK__STORE_PATH`.
    ///
    /// # Errors
    /// Returns [`ActivationError::Config`] if a file is malformed or the
    /// merged settings do not deserialize.
    pub fn load(path: Option<impl AsRef<Path>>) -> Result<Self, ActivationError> {
        let builder = match path {
            Some(path) => {
                info!("Loading config from {}", path.as_ref().display());
                Config::builder().add_source(File::from(path.as_ref()).required(true))
            },
            None => Config::builder().add_source(File::with_name("seatlock").required(false)),
        };

        let config = builder
            .add_source(
                Environment::with_prefix("SEATLOCK")
                    .separator("__")
                    .convert_case(config::Case::Snake),
            )
            .build()?
            .try_deserialize::<Self>()?;

        Ok(config)
    }
}
