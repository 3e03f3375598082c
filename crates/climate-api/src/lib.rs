//! HTTP API for the Climate dataset.
//!
//! This crate provides an Axum HTTP server that exposes read-only JSON
//! views of the observation store:
//!
//! - **Raw listings** of precipitation, stations, and recent temperatures
//! - **Temperature summaries** (min/avg/max) from a start date, or over an
//!   explicit date range
//! - **Route listing** (`GET /`) rendered from the route table
//!
//! # Architecture
//!
//! ```text
//! HTTP request --> Router (ROUTES) --> handler --> StoreSession
//!                                          |            |
//!                                          +-- summarize (date routes)
//!                                          v
//!                                     JSON array
//! ```
//!
//! Handlers share an immutable [`AppState`]; every request opens its own
//! store session, so requests never coordinate with each other.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use routes::{Endpoint, Route, ROUTES};
pub use server::{start_server, start_server_with_shutdown, ServerConfig, ServerError};
pub use state::AppState;
