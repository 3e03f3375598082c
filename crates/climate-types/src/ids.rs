//! Type-safe identifier wrappers.
//!
//! Stations are keyed by the observing network's own code (for example
//! `USC00519397`), not by a generated id. Wrapping the code keeps it from
//! being mixed up with names or date strings at compile time.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Unique code identifying a weather station.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StationId(pub String);

impl StationId {
    /// Create a station identifier from its network code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Borrow the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the inner code.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl core::fmt::Display for StationId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for StationId {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl From<&str> for StationId {
    fn from(code: &str) -> Self {
        Self(code.to_owned())
    }
}

impl From<StationId> for String {
    fn from(id: StationId) -> Self {
        id.0
    }
}
