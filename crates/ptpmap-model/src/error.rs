//! Error types for the model crate.

use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ModelError {
    /// I/O error reading a configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse or schema error.
    #[error("YAML config error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
