//! Axum router construction for the API.
//!
//! Walks the [`ROUTES`](crate::routes::ROUTES) table into a single
//! [`Router`] with CORS and request tracing middleware.

use std::sync::Arc;

use axum::Router;
use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::routes::ROUTES;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// Static segments (`precipitation`, `stations`, `tobs`) take priority
/// over the `{start}` parameter, so `/api/v1.0/tobs` never reaches the
/// summary handler. Unknown paths get a JSON `404`.
///
/// CORS allows any origin for read-only `GET` access.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    ROUTES
        .iter()
        .fold(Router::new(), |router, route| {
            router.route(route.path, route.endpoint.method_router())
        })
        .fallback(handlers::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
