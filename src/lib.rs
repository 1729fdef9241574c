//! `skycast` - weather dashboard core
//!
//! This library turns OpenWeatherMap current-weather and forecast payloads
//! into a display-ready dashboard: condition categories and their themes,
//! daily summaries aggregated from 3-hour samples, and a short hourly strip.

pub mod aggregator;
pub mod condition;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod formatters;
pub mod logging;
pub mod models;
pub mod openweather;
pub mod theme;

// Re-export core types for public API
pub use aggregator::{DayBoundary, DayBoundarySetting, ForecastAggregator};
pub use condition::{WeatherCondition, is_daytime};
pub use config::SkycastConfig;
pub use dashboard::{Dashboard, RenderOptions};
pub use error::SkycastError;
pub use models::{CurrentConditions, DailySummary, ForecastView, Location, RawSample};
pub use theme::{BackgroundTheme, ThemeFamily};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, SkycastError>;
