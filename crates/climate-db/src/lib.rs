//! Observation store for the Climate API.
//!
//! The store holds two tables, `measurement` and `station`, and is only
//! ever read. This crate declares their schema explicitly, reads them from
//! `SQLite` (or from memory for tests and fixtures), and hands each
//! request a scoped [`StoreSession`].
//!
//! ```text
//! startup:  SqliteConfig --> SqliteStore --> ObservationStore (shared)
//! request:  ObservationStore::session() --> StoreSession --> queries --> drop
//! ```
//!
//! # Modules
//!
//! - [`schema`] -- Declared tables, columns, and row structs
//! - [`sqlite`] -- `SQLite` connection pool and configuration
//! - [`measurement_store`] -- Queries over `measurement`
//! - [`station_store`] -- Queries over `station`
//! - [`memory`] -- In-memory store with identical semantics
//! - [`store`] -- Backend dispatch and per-request sessions
//! - [`error`] -- Shared error types

pub mod error;
pub mod measurement_store;
pub mod memory;
pub mod schema;
pub mod sqlite;
pub mod station_store;
pub mod store;

// Re-export primary types for convenience.
pub use error::DbError;
pub use measurement_store::MeasurementStore;
pub use memory::MemoryStore;
pub use schema::{MeasurementRow, SCHEMA_DDL, StationRow};
pub use sqlite::{SqliteConfig, SqliteStore};
pub use station_store::StationStore;
pub use store::{ObservationStore, StoreSession};
