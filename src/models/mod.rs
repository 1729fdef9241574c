//! Data models for skycast
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates and metadata
//! - Weather: Forecast samples and current conditions
//! - Forecast: Daily summaries and the hourly strip

pub mod forecast;
pub mod location;
pub mod weather;

pub use forecast::{DailySummary, DailyTemperature, ForecastView};
pub use location::Location;
pub use weather::{CurrentConditions, RawSample};
