use std::io;
use std::path::PathBuf;

/// Error types specific to the activation feature.
#[derive(Debug, thiserror::Error)]
pub enum ActivationError {
    /// The activation record file could not be read, written, or removed.
    #[error("Activation storage error at {path}: {source}")]
    Storage { source: io::Error, path: PathBuf },

    /// The activation record file exists but does not parse.
    #[error("Activation record is invalid: {message}")]
    Record { message: String },

    /// The layered configuration could not be loaded.
    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: config::ConfigError,
    },
}
