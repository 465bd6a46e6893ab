use std::borrow::Cow;

use chrono::NaiveDate;

/// Error types specific to the licensing feature.
#[derive(Debug, thiserror::Error)]
pub enum LicenseError {
    /// The code could not be decoded.
    ///
    /// Every decode failure mode (bad armoring, corrupted base64, wrong key,
    /// tampered ciphertext, unparseable payload) collapses into this one
    /// variant so an attacker probing codes gets no signal about which step
    /// rejected the input.
    #[error("License code is malformed or corrupted")]
    MalformedCode,

    /// The code is authentic but bound to a different machine.
    #[error("License is bound to a different machine")]
    HardwareMismatch,

    /// The code is authentic and bound to this machine, but past its expiry date.
    #[error("License expired on {expired_on}")]
    Expired { expired_on: NaiveDate },

    /// Issuer-side input rejected before any encoding work.
    #[error("Invalid license request: {message}")]
    InvalidInput { message: Cow<'static, str> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal licensing error: {message}")]
    Internal { message: Cow<'static, str> },
}
