//! The link matching and disambiguation algorithm.

use crate::diag::{Diagnostic, DiagnosticSink};
use ptpmap_model::{MatchConfig, StationRecord};
use std::fmt;

/// Classification of a matching outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkOutcome {
    /// Exactly one RX endpoint was found.
    Resolved,
    /// Multiple RX endpoints accepted under the multipoint allow-list.
    ResolvedMultipoint,
    /// Multiple candidates with no policy to pick one; not rendered.
    Ambiguous,
    /// No RX record shares the authorization; not rendered.
    Unresolved,
}

impl fmt::Display for LinkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkOutcome::Resolved => write!(f, "resolved"),
            LinkOutcome::ResolvedMultipoint => write!(f, "resolved-multipoint"),
            LinkOutcome::Ambiguous => write!(f, "ambiguous"),
            LinkOutcome::Unresolved => write!(f, "unresolved"),
        }
    }
}

/// One reconstructed link: a TX record together with the RX record(s) that
/// form its far end(s).
///
/// Links hold read-only views into the loaded record sets and are never
/// updated after construction. For [`LinkOutcome::Ambiguous`] the candidate
/// RX rows are retained for inspection even though the link is not
/// renderable.
#[derive(Debug, Clone)]
pub struct Link<'a> {
    /// The transmitting station.
    pub tx: &'a StationRecord,
    /// Receiving endpoint(s), in RX input order.
    pub rx: Vec<&'a StationRecord>,
    /// How the match was classified.
    pub outcome: LinkOutcome,
    /// True when the link resolved through the single-candidate fallback
    /// despite a TX/RX frequency mismatch in the source data.
    pub frequency_fallback: bool,
}

impl<'a> Link<'a> {
    fn new(
        tx: &'a StationRecord,
        rx: Vec<&'a StationRecord>,
        outcome: LinkOutcome,
        frequency_fallback: bool,
    ) -> Self {
        Link {
            tx,
            rx,
            outcome,
            frequency_fallback,
        }
    }

    /// Whether this link should produce geometry in the output overlay.
    pub fn is_renderable(&self) -> bool {
        matches!(
            self.outcome,
            LinkOutcome::Resolved | LinkOutcome::ResolvedMultipoint
        )
    }

    /// The `(tx, rx)` endpoint pairs to draw, one per segment.
    ///
    /// Empty for ambiguous and unresolved links.
    pub fn segments(&self) -> impl Iterator<Item = (&'a StationRecord, &'a StationRecord)> + '_ {
        let renderable = self.is_renderable();
        self.rx
            .iter()
            .filter(move |_| renderable)
            .map(move |rx| (self.tx, *rx))
    }
}

/// Reconstruct links by pairing each TX record with its RX counterpart(s).
///
/// Produces exactly one [`Link`] per TX record, preserving TX input order.
/// Pure function of its inputs and the configuration: no I/O, no hidden
/// state, and no TX record's failure to resolve stops the batch.
/// Diagnostics for mismatched, ambiguous, and unresolved cases are emitted
/// through `sink`.
pub fn match_links<'a>(
    tx_records: &'a [StationRecord],
    rx_records: &'a [StationRecord],
    config: &MatchConfig,
    sink: &mut dyn DiagnosticSink,
) -> Vec<Link<'a>> {
    tx_records
        .iter()
        .map(|tx| match_one(tx, rx_records, config, sink))
        .collect()
}

/// Match a single TX record against the RX set.
fn match_one<'a>(
    tx: &'a StationRecord,
    rx_records: &'a [StationRecord],
    config: &MatchConfig,
    sink: &mut dyn DiagnosticSink,
) -> Link<'a> {
    // Candidate set: same authorization, excluding rows at exactly the TX
    // coordinates (a station cannot be its own receive endpoint).
    let candidates: Vec<&StationRecord> = rx_records
        .iter()
        .filter(|rx| rx.authorization_number == tx.authorization_number)
        .filter(|rx| !rx.collocated_with(tx))
        .collect();

    if candidates.is_empty() {
        sink.emit(Diagnostic::no_rx_candidate(tx));
        return Link::new(tx, Vec::new(), LinkOutcome::Unresolved, false);
    }

    let frequency_matches: Vec<&StationRecord> = candidates
        .iter()
        .copied()
        .filter(|rx| rx.frequency_mhz == tx.frequency_mhz)
        .collect();

    match frequency_matches.len() {
        // The unambiguous point-to-point case.
        1 => Link::new(tx, frequency_matches, LinkOutcome::Resolved, false),

        0 => {
            if candidates.len() == 1 {
                // The authorization has precisely one RX row, so trust the
                // authorization grouping over frequency equality. The source
                // data occasionally records slightly different TX/RX
                // frequencies for the same link.
                sink.emit(Diagnostic::frequency_mismatch(tx, candidates[0]));
                Link::new(tx, candidates, LinkOutcome::Resolved, true)
            } else {
                sink.emit(Diagnostic::ambiguous(tx, candidates.len()));
                Link::new(tx, candidates, LinkOutcome::Ambiguous, false)
            }
        }

        count => {
            if config.allows_multipoint(tx.subservice, &tx.licensee_name) {
                Link::new(tx, frequency_matches, LinkOutcome::ResolvedMultipoint, false)
            } else {
                sink.emit(Diagnostic::ambiguous(tx, count));
                Link::new(tx, frequency_matches, LinkOutcome::Ambiguous, false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::VecSink;

    fn record(
        auth: &str,
        direction: ptpmap_model::Direction,
        freq: f64,
        lat: f64,
        lon: f64,
    ) -> StationRecord {
        StationRecord {
            record_id: "0".to_string(),
            authorization_number: auth.to_string(),
            direction,
            frequency_mhz: freq,
            occupied_bandwidth_khz: 1250.0,
            licensee_name: "Test Licensee".to_string(),
            inservice_date: None,
            analog_capacity: None,
            digital_capacity: None,
            latitude: lat,
            longitude: lon,
            height_agl_m: 30.0,
            service: 2,
            subservice: 200,
        }
    }

    fn tx(auth: &str, freq: f64, lat: f64, lon: f64) -> StationRecord {
        record(auth, ptpmap_model::Direction::Tx, freq, lat, lon)
    }

    fn rx(auth: &str, freq: f64, lat: f64, lon: f64) -> StationRecord {
        record(auth, ptpmap_model::Direction::Rx, freq, lat, lon)
    }

    fn run<'a>(
        tx_records: &'a [StationRecord],
        rx_records: &'a [StationRecord],
    ) -> (Vec<Link<'a>>, VecSink) {
        let mut sink = VecSink::new();
        let links = match_links(
            tx_records,
            rx_records,
            &MatchConfig::default(),
            &mut sink,
        );
        (links, sink)
    }

    #[test]
    fn test_single_pair_resolves() {
        let tx_records = vec![tx("A1", 1000.0, 45.0, -75.0)];
        let rx_records = vec![rx("A1", 1000.0, 45.1, -75.1)];
        let (links, sink) = run(&tx_records, &rx_records);

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].outcome, LinkOutcome::Resolved);
        assert!(!links[0].frequency_fallback);
        assert_eq!(links[0].rx.len(), 1);
        assert!(sink.diagnostics.is_empty());

        // Segment endpoints as they will render: (lon, lat) -> (lon, lat)
        let (seg_tx, seg_rx) = links[0].segments().next().unwrap();
        assert_eq!((seg_tx.longitude, seg_tx.latitude), (-75.0, 45.0));
        assert_eq!((seg_rx.longitude, seg_rx.latitude), (-75.1, 45.1));
    }

    #[test]
    fn test_one_link_per_tx_in_input_order() {
        let tx_records = vec![
            tx("A1", 1000.0, 45.0, -75.0),
            tx("A2", 2000.0, 46.0, -76.0),
            tx("A3", 3000.0, 47.0, -77.0),
        ];
        let rx_records = vec![
            rx("A3", 3000.0, 47.1, -77.1),
            rx("A1", 1000.0, 45.1, -75.1),
        ];
        let (links, _) = run(&tx_records, &rx_records);

        assert_eq!(links.len(), 3);
        assert_eq!(links[0].tx.authorization_number, "A1");
        assert_eq!(links[1].tx.authorization_number, "A2");
        assert_eq!(links[2].tx.authorization_number, "A3");
        assert_eq!(links[0].outcome, LinkOutcome::Resolved);
        assert_eq!(links[1].outcome, LinkOutcome::Unresolved);
        assert_eq!(links[2].outcome, LinkOutcome::Resolved);
    }

    #[test]
    fn test_no_candidate_is_unresolved() {
        let tx_records = vec![tx("A2", 2000.0, 45.0, -75.0)];
        let rx_records = vec![rx("A9", 2000.0, 45.1, -75.1)];
        let (links, sink) = run(&tx_records, &rx_records);

        assert_eq!(links[0].outcome, LinkOutcome::Unresolved);
        assert!(links[0].rx.is_empty());
        assert_eq!(links[0].segments().count(), 0);
        assert_eq!(sink.diagnostics.len(), 1);
        assert!(matches!(
            sink.diagnostics[0],
            Diagnostic::NoRxCandidate { .. }
        ));
    }

    #[test]
    fn test_single_candidate_frequency_mismatch_falls_back() {
        let tx_records = vec![tx("A1", 1000.0, 45.0, -75.0)];
        let rx_records = vec![rx("A1", 1001.5, 45.1, -75.1)];
        let (links, sink) = run(&tx_records, &rx_records);

        assert_eq!(links[0].outcome, LinkOutcome::Resolved);
        assert!(links[0].frequency_fallback);
        assert_eq!(links[0].rx.len(), 1);
        assert_eq!(
            sink.diagnostics,
            vec![Diagnostic::FrequencyMismatch {
                authorization_number: "A1".to_string(),
                tx_frequency_mhz: 1000.0,
                rx_frequency_mhz: 1001.5,
                record_id: "0".to_string(),
            }]
        );
    }

    #[test]
    fn test_multiple_candidates_none_on_frequency_is_ambiguous() {
        let tx_records = vec![tx("A1", 1000.0, 45.0, -75.0)];
        let rx_records = vec![
            rx("A1", 1001.0, 45.1, -75.1),
            rx("A1", 1002.0, 45.2, -75.2),
        ];
        let (links, sink) = run(&tx_records, &rx_records);

        assert_eq!(links[0].outcome, LinkOutcome::Ambiguous);
        assert_eq!(links[0].segments().count(), 0);
        assert!(matches!(
            sink.diagnostics[0],
            Diagnostic::AmbiguousCandidates {
                candidate_count: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_multipoint_off_allow_list_is_ambiguous() {
        // P2MP subservice but a licensee not on the allow-list
        let mut t = tx("A3", 3000.0, 45.0, -75.0);
        t.subservice = 201;
        let rx_records = vec![
            rx("A3", 3000.0, 45.1, -75.1),
            rx("A3", 3000.0, 45.2, -75.2),
            rx("A3", 3000.0, 45.3, -75.3),
        ];
        let tx_records = vec![t];
        let (links, sink) = run(&tx_records, &rx_records);

        assert_eq!(links[0].outcome, LinkOutcome::Ambiguous);
        assert_eq!(sink.diagnostics.len(), 1);
    }

    #[test]
    fn test_multipoint_wrong_subservice_is_ambiguous() {
        // Allow-listed licensee but a point-to-point subservice
        let mut t = tx("A3", 3000.0, 45.0, -75.0);
        t.licensee_name = "Bell Canada".to_string();
        let rx_records = vec![
            rx("A3", 3000.0, 45.1, -75.1),
            rx("A3", 3000.0, 45.2, -75.2),
        ];
        let tx_records = vec![t];
        let (links, _) = run(&tx_records, &rx_records);

        assert_eq!(links[0].outcome, LinkOutcome::Ambiguous);
    }

    #[test]
    fn test_multipoint_allow_list_resolves_all_endpoints() {
        let mut t = tx("A3", 3000.0, 45.0, -75.0);
        t.subservice = 201;
        t.licensee_name = "Bell Canada".to_string();
        let rx_records = vec![
            rx("A3", 3000.0, 45.1, -75.1),
            rx("A3", 3000.0, 45.2, -75.2),
            rx("A3", 3000.0, 45.3, -75.3),
        ];
        let tx_records = vec![t];
        let (links, sink) = run(&tx_records, &rx_records);

        assert_eq!(links[0].outcome, LinkOutcome::ResolvedMultipoint);
        assert_eq!(links[0].rx.len(), 3);
        assert_eq!(links[0].segments().count(), 3);
        assert!(sink.diagnostics.is_empty());
        // RX input order preserved
        assert_eq!(links[0].rx[0].latitude, 45.1);
        assert_eq!(links[0].rx[2].latitude, 45.3);
    }

    #[test]
    fn test_collocated_rx_is_never_selected() {
        // The collocated RX matches on authorization and frequency but sits
        // at exactly the TX coordinates; only the distant RX qualifies.
        let tx_records = vec![tx("A1", 1000.0, 45.0, -75.0)];
        let rx_records = vec![
            rx("A1", 1000.0, 45.0, -75.0),
            rx("A1", 1000.0, 45.5, -75.5),
        ];
        let (links, _) = run(&tx_records, &rx_records);

        assert_eq!(links[0].outcome, LinkOutcome::Resolved);
        assert_eq!(links[0].rx.len(), 1);
        assert_eq!(links[0].rx[0].latitude, 45.5);
    }

    #[test]
    fn test_only_collocated_candidates_is_unresolved() {
        let tx_records = vec![tx("A1", 1000.0, 45.0, -75.0)];
        let rx_records = vec![rx("A1", 1000.0, 45.0, -75.0)];
        let (links, sink) = run(&tx_records, &rx_records);

        assert_eq!(links[0].outcome, LinkOutcome::Unresolved);
        assert_eq!(sink.diagnostics.len(), 1);
    }

    #[test]
    fn test_failures_do_not_stop_the_batch() {
        let tx_records = vec![
            tx("A1", 1000.0, 45.0, -75.0), // unresolved
            tx("A2", 2000.0, 46.0, -76.0), // resolved
        ];
        let rx_records = vec![rx("A2", 2000.0, 46.1, -76.1)];
        let (links, _) = run(&tx_records, &rx_records);

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].outcome, LinkOutcome::Unresolved);
        assert_eq!(links[1].outcome, LinkOutcome::Resolved);
    }

    #[test]
    fn test_matching_is_idempotent() {
        let tx_records = vec![
            tx("A1", 1000.0, 45.0, -75.0),
            tx("A2", 2000.0, 46.0, -76.0),
        ];
        let rx_records = vec![
            rx("A1", 1000.0, 45.1, -75.1),
            rx("A2", 2001.0, 46.1, -76.1),
        ];
        let (first, _) = run(&tx_records, &rx_records);
        let (second, _) = run(&tx_records, &rx_records);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.outcome, b.outcome);
            assert_eq!(a.frequency_fallback, b.frequency_fallback);
            assert_eq!(a.tx, b.tx);
            assert_eq!(a.rx, b.rx);
        }
    }
}
