//! Query logic and configuration for the Climate API.
//!
//! This crate holds the decision logic that sits between the HTTP routes
//! and the observation store:
//!
//! - [`aggregate`] -- [`summarize`] a date range to min/avg/max temperature
//! - [`window`] -- the [`RecentWindow`] used for recent observations
//! - [`config`] -- [`ClimateConfig`] loaded from `climate-config.yaml`
//!
//! [`summarize`]: aggregate::summarize
//! [`RecentWindow`]: window::RecentWindow
//! [`ClimateConfig`]: config::ClimateConfig

pub mod aggregate;
pub mod config;
pub mod window;

pub use aggregate::{reduce, summarize};
pub use config::{ClimateConfig, ConfigError};
pub use window::RecentWindow;
