//! Diagnostic records emitted while matching.
//!
//! The matcher performs no I/O itself; every data-quality anomaly is handed
//! to an injected sink. Sinks decide whether entries go to a log file, the
//! tracing subscriber, or a test collection vector.

use ptpmap_model::StationRecord;
use std::fmt;

/// A data-quality anomaly observed for one TX record.
///
/// All variants are non-fatal: the matcher keeps processing the remaining
/// TX records after emitting one.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A single RX candidate shared the authorization but recorded a
    /// different frequency; the link was resolved through it anyway.
    FrequencyMismatch {
        /// Authorization number of the grant.
        authorization_number: String,
        /// TX center frequency in MHz.
        tx_frequency_mhz: f64,
        /// RX center frequency in MHz.
        rx_frequency_mhz: f64,
        /// Source record id of the TX row.
        record_id: String,
    },
    /// Multiple RX candidates and no policy to pick one.
    AmbiguousCandidates {
        /// Authorization number of the grant.
        authorization_number: String,
        /// TX center frequency in MHz.
        tx_frequency_mhz: f64,
        /// Licensee operating the TX station.
        licensee_name: String,
        /// Source record id of the TX row.
        record_id: String,
        /// How many candidates were in contention.
        candidate_count: usize,
    },
    /// No RX record shares the authorization.
    NoRxCandidate {
        /// Authorization number of the grant.
        authorization_number: String,
        /// TX center frequency in MHz.
        tx_frequency_mhz: f64,
        /// Licensee operating the TX station.
        licensee_name: String,
        /// Source record id of the TX row.
        record_id: String,
    },
}

impl Diagnostic {
    pub(crate) fn frequency_mismatch(tx: &StationRecord, rx: &StationRecord) -> Self {
        Diagnostic::FrequencyMismatch {
            authorization_number: tx.authorization_number.clone(),
            tx_frequency_mhz: tx.frequency_mhz,
            rx_frequency_mhz: rx.frequency_mhz,
            record_id: tx.record_id.clone(),
        }
    }

    pub(crate) fn ambiguous(tx: &StationRecord, candidate_count: usize) -> Self {
        Diagnostic::AmbiguousCandidates {
            authorization_number: tx.authorization_number.clone(),
            tx_frequency_mhz: tx.frequency_mhz,
            licensee_name: tx.licensee_name.clone(),
            record_id: tx.record_id.clone(),
            candidate_count,
        }
    }

    pub(crate) fn no_rx_candidate(tx: &StationRecord) -> Self {
        Diagnostic::NoRxCandidate {
            authorization_number: tx.authorization_number.clone(),
            tx_frequency_mhz: tx.frequency_mhz,
            licensee_name: tx.licensee_name.clone(),
            record_id: tx.record_id.clone(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::FrequencyMismatch {
                authorization_number,
                tx_frequency_mhz,
                rx_frequency_mhz,
                record_id,
            } => write!(
                f,
                "frequency mismatch: authorization {} TX {} MHz / RX {} MHz (record {})",
                authorization_number, tx_frequency_mhz, rx_frequency_mhz, record_id
            ),
            Diagnostic::AmbiguousCandidates {
                authorization_number,
                tx_frequency_mhz,
                licensee_name,
                record_id,
                candidate_count,
            } => write!(
                f,
                "{} RX candidates for authorization {} TX {} MHz, licensee {} (record {})",
                candidate_count, authorization_number, tx_frequency_mhz, licensee_name, record_id
            ),
            Diagnostic::NoRxCandidate {
                authorization_number,
                tx_frequency_mhz,
                licensee_name,
                record_id,
            } => write!(
                f,
                "no RX candidate for authorization {} TX {} MHz, licensee {} (record {})",
                authorization_number, tx_frequency_mhz, licensee_name, record_id
            ),
        }
    }
}

/// Destination for matcher diagnostics.
pub trait DiagnosticSink {
    /// Record one diagnostic.
    fn emit(&mut self, diagnostic: Diagnostic);
}

/// Sink that collects diagnostics into a vector. Useful in tests and for
/// post-run inspection.
#[derive(Debug, Default)]
pub struct VecSink {
    /// Collected diagnostics, in emission order.
    pub diagnostics: Vec<Diagnostic>,
}

impl VecSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        VecSink::default()
    }
}

impl DiagnosticSink for VecSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

/// Sink that forwards diagnostics to the `tracing` subscriber.
///
/// Frequency mismatches are informational (the link still resolved);
/// ambiguous and unresolved cases are warnings.
#[derive(Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::FrequencyMismatch { .. } => tracing::info!("{}", diagnostic),
            _ => tracing::warn!("{}", diagnostic),
        }
    }
}
