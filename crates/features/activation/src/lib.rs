//! # Activation Feature
//!
//! Durable activation state and the license service facade.
//!
//! This crate owns the lifecycle of the single local activation record and
//! composes the licensing engine into the four operations the surrounding
//! application calls:
//!
//! * [`LicenseService::hardware_id`]: shown to the user so they can request
//!   a license for this machine.
//! * [`LicenseService::activate`]: driven by the activation form.
//! * [`LicenseService::is_licensed`]: the gate checked at startup.
//! * [`LicenseService::license_info`]: the status panel snapshot.
//!
//! Everything is synchronous; the only I/O is the activation record file
//! and the one-time hardware probe at service construction.

pub mod config;
mod error;
mod service;
mod store;

pub use crate::config::LicenseConfig;
pub use crate::error::ActivationError;
pub use crate::service::{ActivationOutcome, LicenseInfo, LicenseService, LicenseStatus};
pub use crate::store::{ActivationRecord, ActivationStore};
