//! Station record types shared across the pipeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction flag of a station record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Transmitting station.
    Tx,
    /// Receiving station.
    Rx,
}

impl Direction {
    /// Parse the TXRX column value from the source extract.
    ///
    /// Returns `None` for anything other than `TX` or `RX` (case-insensitive,
    /// surrounding whitespace ignored).
    pub fn parse(s: &str) -> Option<Direction> {
        match s.trim() {
            s if s.eq_ignore_ascii_case("TX") => Some(Direction::Tx),
            s if s.eq_ignore_ascii_case("RX") => Some(Direction::Rx),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Tx => write!(f, "TX"),
            Direction::Rx => write!(f, "RX"),
        }
    }
}

/// One row of the licensing extract, restricted to the fields the link
/// matcher and renderer consume.
///
/// Authorization numbers are not unique: every station belonging to one
/// license grant shares the same number, and point-to-multipoint grants
/// cover several RX stations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    /// Frequency record identifier from the source database (carried for
    /// diagnostics only).
    pub record_id: String,
    /// License authorization number grouping the stations of one grant.
    pub authorization_number: String,
    /// Whether this row describes a transmitter or a receiver.
    pub direction: Direction,
    /// Center frequency in MHz.
    pub frequency_mhz: f64,
    /// Occupied bandwidth in kHz (strictly positive after loading).
    pub occupied_bandwidth_khz: f64,
    /// Name of the licensee operating the station.
    pub licensee_name: String,
    /// In-service date, when the extract carries a parseable one.
    pub inservice_date: Option<NaiveDate>,
    /// Analog capacity in calls, when present.
    pub analog_capacity: Option<f64>,
    /// Digital capacity in Mbps, when present.
    pub digital_capacity: Option<f64>,
    /// Station latitude in decimal degrees.
    pub latitude: f64,
    /// Station longitude in decimal degrees.
    pub longitude: f64,
    /// Antenna height above ground level in meters.
    pub height_agl_m: f64,
    /// Regulatory service code.
    pub service: u32,
    /// Regulatory subservice code (201 designates point-to-multipoint).
    pub subservice: u32,
}

impl StationRecord {
    /// Occupied bandwidth converted to MHz for display.
    pub fn bandwidth_mhz(&self) -> f64 {
        self.occupied_bandwidth_khz / 1000.0
    }

    /// True when `other` sits at exactly the same coordinates.
    ///
    /// Identical-coordinate rows indicate collocated but unrelated equipment,
    /// not a link partner, so the matcher excludes them from candidacy.
    pub fn collocated_with(&self, other: &StationRecord) -> bool {
        self.latitude == other.latitude && self.longitude == other.longitude
    }
}
