//! Explicit schema declaration for the observation store.
//!
//! The store's tables are declared here rather than reflected from the
//! database at startup. Only the columns below are read; any extra columns
//! in the physical tables (row ids, coordinates, elevation) are ignored.
//!
//! ```text
//! measurement(station TEXT, date TEXT, prcp REAL NULL, tobs REAL NULL)
//! station(station TEXT, name TEXT)
//! ```

use climate_types::{Measurement, Station, StationId};

/// Name of the measurement table.
pub const MEASUREMENT_TABLE: &str = "measurement";

/// Name of the station table.
pub const STATION_TABLE: &str = "station";

/// DDL matching the declared schema.
///
/// The API never creates tables in a deployed store. This is the shape a
/// store must provide, and what tests and fixtures use to build one.
pub const SCHEMA_DDL: &str = r"
CREATE TABLE IF NOT EXISTS measurement (
    id INTEGER PRIMARY KEY,
    station TEXT NOT NULL,
    date TEXT NOT NULL,
    prcp REAL,
    tobs REAL
);
CREATE TABLE IF NOT EXISTS station (
    id INTEGER PRIMARY KEY,
    station TEXT NOT NULL,
    name TEXT NOT NULL
);
";

/// Select list for measurement rows, in [`MeasurementRow`] field order.
pub(crate) const MEASUREMENT_COLUMNS: &str = "station, date, prcp, tobs";

/// Select list for station rows, in [`StationRow`] field order.
pub(crate) const STATION_COLUMNS: &str = "station, name";

/// A row from the `measurement` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MeasurementRow {
    /// Station code.
    pub station: String,
    /// Observation date as stored.
    pub date: String,
    /// Precipitation, if recorded.
    pub prcp: Option<f64>,
    /// Temperature observation, if recorded.
    pub tobs: Option<f64>,
}

impl From<MeasurementRow> for Measurement {
    fn from(row: MeasurementRow) -> Self {
        Self {
            station: StationId(row.station),
            date: row.date,
            prcp: row.prcp,
            tobs: row.tobs,
        }
    }
}

/// A row from the `station` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StationRow {
    /// Station code.
    pub station: String,
    /// Station name.
    pub name: String,
}

impl From<StationRow> for Station {
    fn from(row: StationRow) -> Self {
        Self {
            station: StationId(row.station),
            name: row.name,
        }
    }
}
