//! REST API endpoint handlers.
//!
//! Each data handler opens one [`StoreSession`](climate_db::StoreSession)
//! for the request, runs its queries, and shapes the rows into an ordered
//! JSON array. The session is released when the handler returns, whether
//! it succeeds or fails.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Route listing |
//! | `GET` | `/api/v1.0/precipitation` | Every measurement's date and precipitation |
//! | `GET` | `/api/v1.0/stations` | Every station |
//! | `GET` | `/api/v1.0/tobs` | Temperatures in the recent window |
//! | `GET` | `/api/v1.0/{start}` | Temperature summary from `start` to the latest date |
//! | `GET` | `/api/v1.0/{start}/{end}` | Temperature summary over `[start, end]` |

use std::sync::Arc;

use axum::extract::State;
use axum::http::Uri;
use axum::response::Html;
use axum::Json;
use climate_core::summarize;
use climate_types::{
    PrecipitationRecord, StationRecord, SummaryRecord, TemperatureSummary, TobsRecord,
};

use crate::error::ApiError;
use crate::extract::{DateRange, StartDate};
use crate::routes;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET / -- route listing
// ---------------------------------------------------------------------------

/// List the available data routes.
pub async fn index() -> Html<String> {
    Html(routes::listing())
}

// ---------------------------------------------------------------------------
// GET /api/v1.0/precipitation
// ---------------------------------------------------------------------------

/// Return every measurement as `{Date, Precipitation}` in store order.
///
/// Missing precipitation is returned as `null`; nothing is filtered.
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PrecipitationRecord>>, ApiError> {
    let mut session = state.store.session().await?;
    let rows = session.all_measurements().await?;

    Ok(Json(rows.into_iter().map(PrecipitationRecord::from).collect()))
}

// ---------------------------------------------------------------------------
// GET /api/v1.0/stations
// ---------------------------------------------------------------------------

/// Return every station as `{Station, Name}` in store order.
pub async fn stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StationRecord>>, ApiError> {
    let mut session = state.store.session().await?;
    let rows = session.all_stations().await?;

    Ok(Json(rows.into_iter().map(StationRecord::from).collect()))
}

// ---------------------------------------------------------------------------
// GET /api/v1.0/tobs
// ---------------------------------------------------------------------------

/// Return `{Date, tobs}` for every measurement inside the recent window.
///
/// The window's lower bound is inclusive.
pub async fn tobs(State(state): State<Arc<AppState>>) -> Result<Json<Vec<TobsRecord>>, ApiError> {
    let mut session = state.store.session().await?;
    let start = state.window.resolve_start(&mut session).await?;
    let rows = session.measurements_since(&start).await?;

    tracing::debug!(start = %start, count = rows.len(), "Serving recent temperatures");
    Ok(Json(rows.into_iter().map(TobsRecord::from).collect()))
}

// ---------------------------------------------------------------------------
// GET /api/v1.0/{start}
// ---------------------------------------------------------------------------

/// Summarize temperatures from `start` through the latest date in the store.
///
/// `start` is used verbatim after percent-decoding. A date past the data,
/// or one that is not a date at all, produces `null` temperatures with
/// status `200`.
pub async fn summary_from(
    State(state): State<Arc<AppState>>,
    StartDate(start): StartDate,
) -> Result<Json<Vec<SummaryRecord>>, ApiError> {
    let mut session = state.store.session().await?;
    let end = session.max_date().await?;

    let summary = match end.as_deref() {
        Some(end) => summarize(&mut session, &start, end).await?,
        None => TemperatureSummary::empty(),
    };

    Ok(Json(SummaryRecord::document(&start, end.as_deref(), &summary)))
}

// ---------------------------------------------------------------------------
// GET /api/v1.0/{start}/{end}
// ---------------------------------------------------------------------------

/// Summarize temperatures over `[start, end]`.
///
/// Both bounds are used verbatim; `start > end` yields `null` temperatures.
pub async fn summary_range(
    State(state): State<Arc<AppState>>,
    DateRange(start, end): DateRange,
) -> Result<Json<Vec<SummaryRecord>>, ApiError> {
    let mut session = state.store.session().await?;
    let summary = summarize(&mut session, &start, &end).await?;

    Ok(Json(SummaryRecord::document(&start, Some(&end), &summary)))
}

// ---------------------------------------------------------------------------
// Fallback
// ---------------------------------------------------------------------------

/// Answer unknown paths with a JSON `404`.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_owned())
}
