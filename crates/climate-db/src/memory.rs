//! In-memory observation store.
//!
//! Holds fixed vectors of measurements and stations and answers the same
//! queries as the `SQLite` store with the same semantics: insertion order
//! is store order, and date filters compare text lexically.

use chrono::NaiveDate;
use climate_types::{Measurement, Station};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A read-only observation store backed by plain vectors.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    measurements: Vec<Measurement>,
    stations: Vec<Station>,
}

impl MemoryStore {
    /// Create a store over the given rows.
    pub const fn new(measurements: Vec<Measurement>, stations: Vec<Station>) -> Self {
        Self {
            measurements,
            stations,
        }
    }

    /// Every measurement, in insertion order.
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Every station, in insertion order.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Measurements dated within `[start, end]`.
    pub fn measurements_between(&self, start: &str, end: &str) -> Vec<Measurement> {
        self.measurements
            .iter()
            .filter(|m| m.is_between(start, end))
            .cloned()
            .collect()
    }

    /// Measurements dated on or after `start`.
    pub fn measurements_since(&self, start: &str) -> Vec<Measurement> {
        self.measurements
            .iter()
            .filter(|m| m.is_since(start))
            .cloned()
            .collect()
    }

    /// The latest measurement date in `YYYY-MM-DD` form, `None` when no
    /// row holds a date.
    ///
    /// Matches `MAX(strftime('%Y-%m-%d', date))`: a time suffix is
    /// dropped and rows whose date does not parse are skipped.
    pub fn max_date(&self) -> Option<String> {
        self.measurements
            .iter()
            .filter_map(|m| canonical_date(&m.date))
            .max()
    }
}

/// The `YYYY-MM-DD` day of a stored date, or `None` if it is not a date.
fn canonical_date(date: &str) -> Option<String> {
    let day = date.get(..10)?;
    let rest = date.get(10..)?;
    if !(rest.is_empty() || rest.starts_with(' ') || rest.starts_with('T')) {
        return None;
    }
    NaiveDate::parse_from_str(day, DATE_FORMAT)
        .ok()
        .map(|d| d.format(DATE_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use climate_types::StationId;

    use super::*;

    fn reading(date: &str, tobs: f64) -> Measurement {
        Measurement {
            station: StationId::from("USC00519397"),
            date: date.to_owned(),
            prcp: Some(0.0),
            tobs: Some(tobs),
        }
    }

    fn store() -> MemoryStore {
        MemoryStore::new(
            vec![
                reading("2017-01-03", 70.0),
                reading("2017-01-01", 60.0),
                reading("2017-02-01", 75.0),
            ],
            Vec::new(),
        )
    }

    #[test]
    fn between_keeps_insertion_order() {
        let rows = store().measurements_between("2017-01-01", "2017-01-31");
        let dates: Vec<&str> = rows.iter().map(|m| m.date.as_str()).collect();
        assert_eq!(dates, vec!["2017-01-03", "2017-01-01"]);
    }

    #[test]
    fn since_is_inclusive() {
        assert_eq!(store().measurements_since("2017-02-01").len(), 1);
    }

    #[test]
    fn max_date_skips_non_dates_and_drops_time() {
        let store = MemoryStore::new(
            vec![
                reading("2017-02-01", 60.0),
                reading("unknown", 61.0),
                reading("2017-02-02 06:00:00", 62.0),
                reading("2017-13-40", 63.0),
            ],
            Vec::new(),
        );
        assert_eq!(store.max_date().as_deref(), Some("2017-02-02"));
    }

    #[test]
    fn max_date_of_undated_rows_is_none() {
        let store = MemoryStore::new(vec![reading("n/a", 60.0)], Vec::new());
        assert_eq!(store.max_date(), None);
    }

    #[test]
    fn max_date_of_empty_store_is_none() {
        assert_eq!(MemoryStore::default().max_date(), None);
        assert_eq!(store().max_date().as_deref(), Some("2017-02-01"));
    }
}
