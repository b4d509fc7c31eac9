//! Error types for the loader crate.

use thiserror::Error;

/// Fatal errors while reading the source extract.
///
/// Row-level problems (malformed fields, out-of-scope rows) are not errors;
/// they are counted in [`crate::LoadStats`] and skipped.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// I/O error opening or reading the input file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error (not attributable to a single recoverable row).
    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),
}
