//! # ptpmap-model
//!
//! Shared data model and configuration types for the ptpmap pipeline.
//!
//! This crate defines:
//! - [`StationRecord`] - One row of the spectrum-licensing extract, restricted
//!   to the fields the link matcher consumes
//! - [`LoaderConfig`] / [`MatchConfig`] - Filtering and disambiguation policy
//! - [`StyleTable`] - Ordered licensee-name -> line-style classification
//! - [`PtpMapConfig`] - The combined YAML configuration surface
//!
//! All policy that was hard-coded in earlier tooling (service codes, the
//! point-to-multipoint licensee allow-list, the style table) lives here as
//! configuration data so the same pipeline can be reused across datasets.

mod config;
mod error;
mod record;
mod style;

pub use config::{LoaderConfig, MatchConfig, PtpMapConfig};
pub use error::ModelError;
pub use record::{Direction, StationRecord};
pub use style::{StyleRule, StyleTable};

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
