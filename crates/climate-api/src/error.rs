//! Error types for the HTTP API.
//!
//! [`ApiError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.
//!
//! An empty date range and a malformed date are not errors; those routes
//! answer `200` with `null` temperatures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use climate_db::DbError;

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The observation store could not answer the query.
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] DbError),

    /// No route matches the request path.
    #[error("not found: {0}")]
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::StoreUnavailable(e) => {
                tracing::error!(error = %e, "Request failed on store query");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
