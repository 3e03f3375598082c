//! The recent-observation window behind `/api/v1.0/tobs`.
//!
//! The window covers the `days` days before an anchor date, lower bound
//! inclusive. By default the anchor is the fixed last date of the shipped
//! dataset (2017-08-23), not "today", so the route's output depends only on
//! the data. Setting `anchor_from_store` moves the anchor to the store's
//! latest measurement date instead.

use chrono::{Days, NaiveDate};
use climate_db::{DbError, StoreSession};

use crate::config::RecentConfig;

/// Canonical date format shared with the store.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A fixed-length window ending at an anchor date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecentWindow {
    anchor: NaiveDate,
    days: u32,
    anchor_from_store: bool,
}

impl RecentWindow {
    /// Create a window of `days` days ending at a fixed `anchor`.
    pub const fn new(anchor: NaiveDate, days: u32) -> Self {
        Self {
            anchor,
            days,
            anchor_from_store: false,
        }
    }

    /// Anchor on the store's latest measurement date when one exists.
    #[must_use]
    pub const fn with_anchor_from_store(mut self, enabled: bool) -> Self {
        self.anchor_from_store = enabled;
        self
    }

    /// The configured fixed anchor.
    pub const fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    /// Lower bound for a window ending at `anchor`, as `YYYY-MM-DD`.
    pub fn start_from(&self, anchor: NaiveDate) -> String {
        anchor
            .checked_sub_days(Days::new(u64::from(self.days)))
            .unwrap_or(NaiveDate::MIN)
            .format(DATE_FORMAT)
            .to_string()
    }

    /// Lower bound for the fixed anchor, as `YYYY-MM-DD`.
    pub fn start(&self) -> String {
        self.start_from(self.anchor)
    }

    /// Lower bound for this request.
    ///
    /// With `anchor_from_store` set, asks the store for its latest date and
    /// falls back to the fixed anchor if the store is empty or the date
    /// does not parse.
    ///
    /// # Errors
    ///
    /// Propagates any [`DbError`] from the store query.
    pub async fn resolve_start(&self, session: &mut StoreSession<'_>) -> Result<String, DbError> {
        if !self.anchor_from_store {
            return Ok(self.start());
        }

        let latest = session
            .max_date()
            .await?
            .and_then(|d| NaiveDate::parse_from_str(&d, DATE_FORMAT).ok());

        match latest {
            Some(anchor) => Ok(self.start_from(anchor)),
            None => {
                tracing::warn!(
                    fallback = %self.anchor,
                    "No usable latest date in store, using fixed anchor"
                );
                Ok(self.start())
            }
        }
    }
}

impl Default for RecentWindow {
    fn default() -> Self {
        Self::from(&RecentConfig::default())
    }
}

impl From<&RecentConfig> for RecentWindow {
    fn from(config: &RecentConfig) -> Self {
        Self::new(config.anchor_date, config.window_days)
            .with_anchor_from_store(config.anchor_from_store)
    }
}
