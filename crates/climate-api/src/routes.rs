//! The explicit route table.
//!
//! Every endpoint the API serves is listed in [`ROUTES`]. The router is
//! built by walking this table and the index page is rendered from it, so
//! the route set can be inspected and tested without starting a server.

use std::fmt::Write as _;
use std::sync::Arc;

use axum::routing::{get, MethodRouter};

use crate::handlers;
use crate::state::AppState;

/// What a route does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Human-readable route listing.
    Index,
    /// Every measurement as `{Date, Precipitation}`.
    Precipitation,
    /// Every station as `{Station, Name}`.
    Stations,
    /// Recent measurements as `{Date, tobs}`.
    Tobs,
    /// Temperature summary from a start date to the latest date.
    SummaryFrom,
    /// Temperature summary over an explicit date range.
    SummaryRange,
}

impl Endpoint {
    /// The Axum handler serving this endpoint.
    pub fn method_router(self) -> MethodRouter<Arc<AppState>> {
        match self {
            Self::Index => get(handlers::index),
            Self::Precipitation => get(handlers::precipitation),
            Self::Stations => get(handlers::stations),
            Self::Tobs => get(handlers::tobs),
            Self::SummaryFrom => get(handlers::summary_from),
            Self::SummaryRange => get(handlers::summary_range),
        }
    }
}

/// One row of the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// HTTP method.
    pub method: &'static str,
    /// Axum path pattern.
    pub path: &'static str,
    /// Label shown on the index page.
    pub label: &'static str,
    /// Handler selector.
    pub endpoint: Endpoint,
}

/// Every route the API serves.
pub const ROUTES: [Route; 6] = [
    Route {
        method: "GET",
        path: "/",
        label: "Available Routes",
        endpoint: Endpoint::Index,
    },
    Route {
        method: "GET",
        path: "/api/v1.0/precipitation",
        label: "Precipitation",
        endpoint: Endpoint::Precipitation,
    },
    Route {
        method: "GET",
        path: "/api/v1.0/stations",
        label: "Stations",
        endpoint: Endpoint::Stations,
    },
    Route {
        method: "GET",
        path: "/api/v1.0/tobs",
        label: "TOBS",
        endpoint: Endpoint::Tobs,
    },
    Route {
        method: "GET",
        path: "/api/v1.0/{start}",
        label: "Start Date Only",
        endpoint: Endpoint::SummaryFrom,
    },
    Route {
        method: "GET",
        path: "/api/v1.0/{start}/{end}",
        label: "Start and End Date",
        endpoint: Endpoint::SummaryRange,
    },
];

/// Routes that serve data, in listing order.
pub fn data_routes() -> impl Iterator<Item = &'static Route> {
    ROUTES.iter().filter(|r| r.endpoint != Endpoint::Index)
}

/// Render the index page body.
///
/// ```text
/// Available Routes: <br/>(1)Precipitation ---> /api/v1.0/precipitation<br/>...
/// ```
pub fn listing() -> String {
    let mut out = String::from("Available Routes: <br/>");
    for (n, route) in (1..).zip(data_routes()) {
        let _ = write!(out, "({n}){} ---> {}<br/>", route.label, route.path);
    }
    out
}
