//! Shared application state for the API server.
//!
//! [`AppState`] is built once at startup, wrapped in [`Arc`](std::sync::Arc),
//! and injected into every handler via Axum's `State` extractor. It holds
//! no mutable data: each request opens its own store session.

use climate_core::RecentWindow;
use climate_db::ObservationStore;

/// Shared state for the Axum application.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The observation store all handlers read from.
    pub store: ObservationStore,
    /// Window used by the recent temperature route.
    pub window: RecentWindow,
}

impl AppState {
    /// Create application state with the default recent window.
    pub fn new(store: ObservationStore) -> Self {
        Self {
            store,
            window: RecentWindow::default(),
        }
    }

    /// Replace the recent window.
    #[must_use]
    pub const fn with_window(mut self, window: RecentWindow) -> Self {
        self.window = window;
        self
    }
}
