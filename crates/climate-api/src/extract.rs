//! Date path extractors for the summary routes.
//!
//! Axum's `Path` rejects a segment that percent-decodes to invalid UTF-8
//! with a plain-text `400`. Dates are never validated here, so these
//! extractors decode lossily instead: undecodable bytes become
//! `U+FFFD`, the text matches no rows, and the route answers `null`
//! temperatures like any other malformed date.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use percent_encoding::percent_decode_str;

use crate::error::ApiError;

/// Prefix shared by every summary route.
const API_PREFIX: &str = "/api/v1.0/";

/// The `{start}` segment of `/api/v1.0/{start}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartDate(pub String);

/// The `{start}` and `{end}` segments of `/api/v1.0/{start}/{end}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange(pub String, pub String);

/// Split the path after [`API_PREFIX`] into lossily decoded segments.
fn date_segments(parts: &Parts) -> Result<Vec<String>, ApiError> {
    let path = parts.uri.path();
    let rest = path
        .strip_prefix(API_PREFIX)
        .ok_or_else(|| ApiError::NotFound(path.to_owned()))?;

    Ok(rest
        .split('/')
        .map(|segment| percent_decode_str(segment).decode_utf8_lossy().into_owned())
        .collect())
}

impl<S: Send + Sync> FromRequestParts<S> for StartDate {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match <[String; 1]>::try_from(date_segments(parts)?) {
            Ok([start]) => Ok(Self(start)),
            Err(_) => Err(ApiError::NotFound(parts.uri.path().to_owned())),
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for DateRange {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match <[String; 2]>::try_from(date_segments(parts)?) {
            Ok([start, end]) => Ok(Self(start, end)),
            Err(_) => Err(ApiError::NotFound(parts.uri.path().to_owned())),
        }
    }
}
