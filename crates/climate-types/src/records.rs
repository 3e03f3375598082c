//! JSON record shapes returned by the API.
//!
//! Field names are part of the public contract (`Date`, `Precipitation`,
//! `Station`, ...), so every struct renames its fields explicitly and
//! serializes them in declaration order.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::entities::{Measurement, Station, TemperatureSummary};
use crate::ids::StationId;

/// One `{Date, Precipitation}` entry of the precipitation listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PrecipitationRecord {
    /// Observation date.
    #[serde(rename = "Date")]
    pub date: String,
    /// Precipitation, `null` when not recorded.
    #[serde(rename = "Precipitation")]
    pub precipitation: Option<f64>,
}

impl From<Measurement> for PrecipitationRecord {
    fn from(m: Measurement) -> Self {
        Self {
            date: m.date,
            precipitation: m.prcp,
        }
    }
}

/// One `{Station, Name}` entry of the station listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StationRecord {
    /// Station code.
    #[serde(rename = "Station")]
    pub station: StationId,
    /// Station name.
    #[serde(rename = "Name")]
    pub name: String,
}

impl From<Station> for StationRecord {
    fn from(s: Station) -> Self {
        Self {
            station: s.station,
            name: s.name,
        }
    }
}

/// One `{Date, tobs}` entry of the recent temperature listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TobsRecord {
    /// Observation date.
    #[serde(rename = "Date")]
    pub date: String,
    /// Temperature observation, `null` when not recorded.
    pub tobs: Option<f64>,
}

impl From<Measurement> for TobsRecord {
    fn from(m: Measurement) -> Self {
        Self {
            date: m.date,
            tobs: m.tobs,
        }
    }
}

/// Statistic label attached to a temperature value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Observation {
    /// Minimum temperature.
    #[serde(rename = "TMIN")]
    Min,
    /// Average temperature.
    #[serde(rename = "TAVG")]
    Avg,
    /// Maximum temperature.
    #[serde(rename = "TMAX")]
    Max,
}

/// One entry of a temperature summary document.
///
/// A document is always the date range first, then `TMIN`, `TAVG` and
/// `TMAX` in that order. See [`SummaryRecord::document`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "bindings/")]
pub enum SummaryRecord {
    /// The bounds the summary was computed over.
    Range {
        /// Lower bound, taken verbatim from the request.
        start_date: String,
        /// Upper bound; `null` only when the store holds no measurements.
        end_date: Option<String>,
    },
    /// A single statistic.
    Temperature {
        /// Which statistic this is.
        #[serde(rename = "Observation")]
        observation: Observation,
        /// The value, `null` for an empty range.
        #[serde(rename = "Temperature")]
        temperature: Option<f64>,
    },
}

impl SummaryRecord {
    /// Shape a summary into its four-record document.
    pub fn document(
        start_date: &str,
        end_date: Option<&str>,
        summary: &TemperatureSummary,
    ) -> Vec<Self> {
        vec![
            Self::Range {
                start_date: start_date.to_owned(),
                end_date: end_date.map(str::to_owned),
            },
            Self::Temperature {
                observation: Observation::Min,
                temperature: summary.min,
            },
            Self::Temperature {
                observation: Observation::Avg,
                temperature: summary.avg,
            },
            Self::Temperature {
                observation: Observation::Max,
                temperature: summary.max,
            },
        ]
    }
}
