//! Error types for the KML crate.

use thiserror::Error;

/// Errors that can occur while writing the overlay document.
#[derive(Debug, Error)]
pub enum KmlError {
    /// I/O error writing the output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
