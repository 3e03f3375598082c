//! Core entity structs for the climate dataset.
//!
//! [`Measurement`] and [`Station`] mirror the two tables of the observation
//! store. [`TemperatureSummary`] is derived on demand and never persisted.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::StationId;

// ---------------------------------------------------------------------------
// Measurement
// ---------------------------------------------------------------------------

/// A single dated climate reading at a station.
///
/// `date` is kept in its canonical `YYYY-MM-DD` text form. Range filters
/// compare it lexically, which is chronological for that format. Dates
/// are not unique per station and may have gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Measurement {
    /// Station that produced the reading.
    pub station: StationId,
    /// Observation date, `YYYY-MM-DD`.
    pub date: String,
    /// Precipitation, if recorded.
    pub prcp: Option<f64>,
    /// Temperature observation, if recorded.
    pub tobs: Option<f64>,
}

impl Measurement {
    /// Whether this reading falls within the closed interval `[start, end]`.
    pub fn is_between(&self, start: &str, end: &str) -> bool {
        self.date.as_str() >= start && self.date.as_str() <= end
    }

    /// Whether this reading is dated on or after `start`.
    pub fn is_since(&self, start: &str) -> bool {
        self.date.as_str() >= start
    }
}

// ---------------------------------------------------------------------------
// Station
// ---------------------------------------------------------------------------

/// A physical observation site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Station {
    /// Unique station code.
    pub station: StationId,
    /// Human-readable station name.
    pub name: String,
}

// ---------------------------------------------------------------------------
// TemperatureSummary
// ---------------------------------------------------------------------------

/// Minimum, average, and maximum temperature over an aggregation range.
///
/// All three fields are `None` when no observation fell inside the range.
/// That is a "no data" answer, not a failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TemperatureSummary {
    /// Lowest observed temperature.
    pub min: Option<f64>,
    /// Arithmetic mean of observed temperatures.
    pub avg: Option<f64>,
    /// Highest observed temperature.
    pub max: Option<f64>,
}

impl TemperatureSummary {
    /// A summary with no data.
    pub const fn empty() -> Self {
        Self {
            min: None,
            avg: None,
            max: None,
        }
    }

    /// Whether the summary carries no data.
    pub const fn is_empty(&self) -> bool {
        self.min.is_none() && self.avg.is_none() && self.max.is_none()
    }
}
