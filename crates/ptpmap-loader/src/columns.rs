//! Column positions in the headerless TAFL extract.
//!
//! The extract carries 61 positionally-defined columns; only the subset the
//! matcher and renderer consume is named here. Positions follow the
//! published field order of the extract.

/// Total column count of a well-formed row.
pub const COLUMN_COUNT: usize = 61;

/// TXRX direction flag.
pub const TXRX: usize = 0;
/// Center frequency in MHz.
pub const FREQUENCY: usize = 1;
/// FrequencyRecordIdentifier, the source database row id.
pub const RECORD_ID: usize = 2;
/// Occupied bandwidth in kHz.
pub const OCCUPIED_BANDWIDTH_KHZ: usize = 10;
/// Analog capacity in calls.
pub const ANALOG_CAPACITY: usize = 17;
/// Digital capacity in Mbps.
pub const DIGITAL_CAPACITY: usize = 18;
/// Antenna height above ground level in meters.
pub const HEIGHT_AGL: usize = 28;
/// Latitude in decimal degrees.
pub const LATITUDE: usize = 40;
/// Longitude in decimal degrees.
pub const LONGITUDE: usize = 41;
/// License authorization number.
pub const AUTHORIZATION_NUMBER: usize = 47;
/// Regulatory service code.
pub const SERVICE: usize = 48;
/// Regulatory subservice code.
pub const SUBSERVICE: usize = 49;
/// In-service date.
pub const INSERVICE_DATE: usize = 52;
/// Licensee name.
pub const LICENSEE_NAME: usize = 54;
