//! # ptpmap-kml
//!
//! KML overlay writer for reconstructed microwave links.
//!
//! Produces one `<LineString>` placemark per `(tx, rx)` endpoint pair of
//! every resolved link, with shared `<Style>` elements selected through the
//! licensee style table. Ambiguous and unresolved links produce no geometry;
//! they were already routed to diagnostics by the matcher.
//!
//! The writer targets any [`std::io::Write`], so tests render into a byte
//! buffer and the CLI renders straight into a buffered file.

mod error;
mod render;
mod writer;

pub use error::KmlError;
pub use render::write_document;
pub use writer::{Coord, KmlWriter};

/// Result type for KML operations.
pub type Result<T> = std::result::Result<T, KmlError>;
