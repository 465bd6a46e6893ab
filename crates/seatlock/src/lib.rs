//! Facade crate for Seatlock features and shared modules.
//! Re-exports the activation engine surface and aggregates the feature
//! registry. Keep this crate thin: it should compose other crates, not
//! implement business logic.
//!
//! ## Usage
//! - Add `seatlock` (with the `issuance` feature for issuer-side tooling).
//! - Construct one [`LicenseService`] at process startup and pass it to the
//!   activation form, the startup gate, and the status panel.
//!
//! The four boundary operations the surrounding application calls:
//! [`LicenseService::hardware_id`], [`LicenseService::activate`],
//! [`LicenseService::is_licensed`], and [`LicenseService::license_info`].

pub use seatlock_activation as activation;
pub use seatlock_hwid as hwid;
pub use seatlock_licensing as licensing;

pub use seatlock_activation::{
    ActivationOutcome, LicenseConfig, LicenseInfo, LicenseService, LicenseStatus,
};
pub use seatlock_hwid::{HardwareFingerprint, HardwareIdentity};

/// Feature registry for runtime introspection.
pub mod features {
    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        "activation",
        "licensing",
        #[cfg(feature = "issuance")]
        "issuance",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}
