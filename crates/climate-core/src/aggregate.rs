//! Temperature aggregation over a date range.
//!
//! [`summarize`] selects every measurement dated within a closed interval
//! and reduces its temperature observations to minimum, mean, and maximum.
//! Nothing is cached; each call re-reads the store.

use climate_db::{DbError, StoreSession};
use climate_types::TemperatureSummary;

/// Reduce temperature observations to a [`TemperatureSummary`].
///
/// Absent (`None`) and `NaN` observations are skipped. If nothing is left,
/// every field of the summary is `None`.
pub fn reduce<I>(observations: I) -> TemperatureSummary
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut bounds: Option<(f64, f64)> = None;
    let mut sum = 0.0_f64;
    let mut count = 0.0_f64;

    for t in observations.into_iter().flatten().filter(|t| !t.is_nan()) {
        bounds = Some(bounds.map_or((t, t), |(lo, hi)| (lo.min(t), hi.max(t))));
        sum += t;
        count += 1.0;
    }

    let Some((min, max)) = bounds else {
        return TemperatureSummary::empty();
    };

    // Rounding in the sum can push the mean a hair outside [min, max].
    let avg = (sum / count).clamp(min, max);

    TemperatureSummary {
        min: Some(min),
        avg: Some(avg),
        max: Some(max),
    }
}

/// Summarize temperatures for measurements dated within `[start, end]`.
///
/// Bounds are compared as text and are not validated: `start > end` or a
/// malformed date yields an empty summary, not an error.
///
/// # Errors
///
/// Propagates any [`DbError`] from the store query.
pub async fn summarize(
    session: &mut StoreSession<'_>,
    start: &str,
    end: &str,
) -> Result<TemperatureSummary, DbError> {
    let rows = session.measurements_between(start, end).await?;
    let summary = reduce(rows.iter().map(|m| m.tobs));

    tracing::debug!(
        start,
        end,
        rows = rows.len(),
        empty = summary.is_empty(),
        "Summarized temperatures"
    );

    Ok(summary)
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::unwrap_used)]
mod tests {
    use climate_db::{MemoryStore, ObservationStore};
    use climate_types::{Measurement, StationId};

    use super::*;

    fn reading(date: &str, tobs: Option<f64>) -> Measurement {
        Measurement {
            station: StationId::from("USC00519397"),
            date: date.to_owned(),
            prcp: None,
            tobs,
        }
    }

    fn store() -> ObservationStore {
        ObservationStore::from(MemoryStore::new(
            vec![
                reading("2017-01-01", Some(60.0)),
                reading("2017-01-02", None),
                reading("2017-01-03", Some(70.0)),
                reading("2017-02-10", Some(55.0)),
            ],
            Vec::new(),
        ))
    }

    #[test]
    fn reduce_min_avg_max() {
        let summary = reduce([Some(60.0), Some(70.0), Some(65.0)]);
        assert_eq!(summary.min, Some(60.0));
        assert_eq!(summary.avg, Some(65.0));
        assert_eq!(summary.max, Some(70.0));
    }

    #[test]
    fn reduce_skips_missing_observations() {
        let summary = reduce([None, Some(62.0), None]);
        assert_eq!(summary.min, Some(62.0));
        assert_eq!(summary.avg, Some(62.0));
        assert_eq!(summary.max, Some(62.0));
    }

    #[test]
    fn reduce_of_nothing_is_empty() {
        assert!(reduce(std::iter::empty::<Option<f64>>()).is_empty());
        assert!(reduce([None, None]).is_empty());
        assert!(reduce([Some(f64::NAN)]).is_empty());
    }

    #[test]
    fn reduce_keeps_mean_within_bounds() {
        let summary = reduce([Some(0.1), Some(0.1), Some(0.1)]);
        let (min, avg, max) = (
            summary.min.unwrap(),
            summary.avg.unwrap(),
            summary.max.unwrap(),
        );
        assert!(min <= avg && avg <= max);
    }

    #[tokio::test]
    async fn summarize_inclusive_range() {
        let store = store();
        let mut session = store.session().await.unwrap();

        let summary = summarize(&mut session, "2017-01-01", "2017-01-03")
            .await
            .unwrap();
        assert_eq!(summary.min, Some(60.0));
        assert_eq!(summary.avg, Some(65.0));
        assert_eq!(summary.max, Some(70.0));
    }

    #[tokio::test]
    async fn summarize_single_day() {
        let store = store();
        let mut session = store.session().await.unwrap();

        let summary = summarize(&mut session, "2017-02-10", "2017-02-10")
            .await
            .unwrap();
        assert_eq!(summary.avg, Some(55.0));
    }

    #[tokio::test]
    async fn summarize_inverted_range_is_empty() {
        let store = store();
        let mut session = store.session().await.unwrap();

        let summary = summarize(&mut session, "2017-01-03", "2017-01-01")
            .await
            .unwrap();
        assert!(summary.is_empty());
    }

    #[tokio::test]
    async fn summarize_outside_data_is_empty() {
        let store = store();
        let mut session = store.session().await.unwrap();

        let summary = summarize(&mut session, "2099-01-01", "2099-12-31")
            .await
            .unwrap();
        assert!(summary.is_empty());
    }
}
