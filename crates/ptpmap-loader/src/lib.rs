//! # ptpmap-loader
//!
//! Record loader for the TAFL spectrum-licensing extract.
//!
//! The extract is a headerless delimited file with 61 positionally-defined
//! columns, one row per transmitter or receiver station. The loader:
//! - retains only the column subset the matcher and renderer consume
//! - keeps rows matching the configured service/subservice codes
//! - drops zero-bandwidth rows (these are relay points, not link endpoints)
//! - splits the survivors into TX and RX record sets
//! - recovers at row granularity from malformed rows (missing fields,
//!   non-numeric coordinates), which are counted and logged but never abort
//!   the batch
//!
//! Rows are read as raw bytes and text fields decoded lossily, so extracts
//! in legacy encodings (Latin-1 licensee names are common in the wild) load
//! instead of failing UTF-8 validation. Source row order is preserved
//! within each set.

mod columns;
mod error;

pub use error::LoaderError;

use ptpmap_model::{Direction, LoaderConfig, StationRecord};
use chrono::NaiveDate;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;

/// Counters describing one load pass, for the run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Total rows read from the source.
    pub total_rows: usize,
    /// Rows skipped because a required field was missing or unparseable.
    pub malformed_rows: usize,
    /// Rows dropped for zero occupied bandwidth.
    pub zero_bandwidth_rows: usize,
    /// Rows outside the configured service/subservice codes.
    pub filtered_rows: usize,
    /// TX rows retained.
    pub tx_rows: usize,
    /// RX rows retained.
    pub rx_rows: usize,
}

/// The loader's output: pre-filtered TX and RX record sets.
#[derive(Debug, Clone, Default)]
pub struct LoadedRecords {
    /// Transmitter records, in source row order.
    pub tx: Vec<StationRecord>,
    /// Receiver records, in source row order.
    pub rx: Vec<StationRecord>,
    /// Load counters.
    pub stats: LoadStats,
}

/// Load station records from any reader producing the extract format.
pub fn load_records<R: Read>(reader: R, config: &LoaderConfig) -> Result<LoadedRecords> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut loaded = LoadedRecords::default();

    for row in csv_reader.byte_records() {
        let row = row?;
        loaded.stats.total_rows += 1;

        let record = match parse_row(&row) {
            Some(record) => record,
            None => {
                loaded.stats.malformed_rows += 1;
                warn!(
                    row = loaded.stats.total_rows,
                    "skipping malformed row (missing or unparseable required field)"
                );
                continue;
            }
        };

        // Zero-bandwidth rows appear to be relay points, not link endpoints.
        if record.occupied_bandwidth_khz <= 0.0 {
            loaded.stats.zero_bandwidth_rows += 1;
            continue;
        }

        if !config.retains(record.service, record.subservice) {
            loaded.stats.filtered_rows += 1;
            continue;
        }

        match record.direction {
            Direction::Tx => loaded.tx.push(record),
            Direction::Rx => loaded.rx.push(record),
        }
    }

    loaded.stats.tx_rows = loaded.tx.len();
    loaded.stats.rx_rows = loaded.rx.len();

    info!(
        total = loaded.stats.total_rows,
        malformed = loaded.stats.malformed_rows,
        zero_bandwidth = loaded.stats.zero_bandwidth_rows,
        tx = loaded.stats.tx_rows,
        rx = loaded.stats.rx_rows,
        "loaded station records"
    );

    Ok(loaded)
}

/// Load station records from a file on disk.
pub fn load_file<P: AsRef<Path>>(path: P, config: &LoaderConfig) -> Result<LoadedRecords> {
    let file = std::fs::File::open(path)?;
    load_records(std::io::BufReader::new(file), config)
}

/// Parse one source row into a station record.
///
/// Returns `None` when a required field is missing or unparseable; optional
/// fields (capacities, in-service date) degrade to `None` instead. Field
/// bytes are decoded lossily so a legacy-encoded licensee name never costs
/// the row.
fn parse_row(row: &csv::ByteRecord) -> Option<StationRecord> {
    if row.len() < columns::COLUMN_COUNT {
        return None;
    }
    let field = |idx: usize| -> Option<String> {
        row.get(idx)
            .map(|bytes| String::from_utf8_lossy(bytes).trim().to_string())
    };

    let direction = Direction::parse(&field(columns::TXRX)?)?;
    let frequency_mhz: f64 = field(columns::FREQUENCY)?.parse().ok()?;
    let occupied_bandwidth_khz: f64 = field(columns::OCCUPIED_BANDWIDTH_KHZ)?.parse().ok()?;
    let latitude: f64 = field(columns::LATITUDE)?.parse().ok()?;
    let longitude: f64 = field(columns::LONGITUDE)?.parse().ok()?;
    let height_agl_m: f64 = field(columns::HEIGHT_AGL)?.parse().ok()?;
    let service: u32 = field(columns::SERVICE)?.parse().ok()?;
    let subservice: u32 = field(columns::SUBSERVICE)?.parse().ok()?;
    let authorization_number = field(columns::AUTHORIZATION_NUMBER)?;
    if authorization_number.is_empty() {
        return None;
    }

    let parse_optional = |idx: usize| -> Option<f64> {
        field(idx).and_then(|s| s.parse().ok())
    };

    Some(StationRecord {
        record_id: field(columns::RECORD_ID).unwrap_or_default(),
        authorization_number,
        direction,
        frequency_mhz,
        occupied_bandwidth_khz,
        licensee_name: field(columns::LICENSEE_NAME).unwrap_or_default(),
        inservice_date: field(columns::INSERVICE_DATE)
            .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
        analog_capacity: parse_optional(columns::ANALOG_CAPACITY),
        digital_capacity: parse_optional(columns::DIGITAL_CAPACITY),
        latitude,
        longitude,
        height_agl_m,
        service,
        subservice,
    })
}
