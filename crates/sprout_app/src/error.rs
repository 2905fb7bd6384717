//! Error types for sprout_app

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the application shell
#[derive(Error, Debug)]
pub enum SproutError {
    /// `sprout.toml` is not valid
    #[error("invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration could not be written back out as TOML
    #[error("failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// A configuration value is out of range
    #[error("invalid configuration value for {key}: {reason}")]
    ConfigValue { key: &'static str, reason: String },

    /// Reading a file failed
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for sprout_app operations
pub type Result<T> = std::result::Result<T, SproutError>;
