//! # ptpmap-link
//!
//! Link reconstruction: pairing each TX station record with its RX
//! counterpart(s) under the same license authorization.
//!
//! Naive pairing by authorization number alone collides on
//! point-to-multipoint grants and on frequency-plan irregularities in the
//! source data, so the matcher disambiguates by frequency and coordinates
//! and classifies every outcome explicitly:
//!
//! - **Resolved** - exactly one RX endpoint found (directly by frequency, or
//!   by the single-candidate fallback when the recorded frequencies differ)
//! - **Resolved-Multipoint** - several RX endpoints, accepted because the
//!   grant is point-to-multipoint and the licensee is on the configured
//!   allow-list
//! - **Ambiguous** - several candidates with no policy to pick one; never
//!   resolved arbitrarily, since an arbitrary pick would silently draw a
//!   geographically wrong link
//! - **Unresolved** - no RX candidate under the authorization
//!
//! [`match_links`] is a pure function of its input sequences and the match
//! configuration; diagnostics flow through an injected [`DiagnosticSink`]
//! and one TX record's failure never stops the batch.

mod diag;
mod matcher;

pub use diag::{Diagnostic, DiagnosticSink, TracingSink, VecSink};
pub use matcher::{match_links, Link, LinkOutcome};
