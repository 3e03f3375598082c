//! Shared type definitions for the Climate API.
//!
//! This crate is the single source of truth for the entities read from the
//! observation store and the JSON records the API returns. Record types
//! flow downstream to `TypeScript` via `ts-rs` for dashboard clients.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe station identifier
//! - [`entities`] -- `Measurement`, `Station`, and the derived `TemperatureSummary`
//! - [`records`] -- Response records with their exact JSON field names

pub mod entities;
pub mod ids;
pub mod records;

// Re-export all public types at crate root for convenience.
pub use entities::{Measurement, Station, TemperatureSummary};
pub use ids::StationId;
pub use records::{Observation, PrecipitationRecord, StationRecord, SummaryRecord, TobsRecord};
