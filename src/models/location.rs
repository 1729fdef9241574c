//! Location model for geographic coordinates and metadata

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

/// A place the dashboard shows weather for
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Location name (city, region, etc.)
    pub name: String,
    /// Country code (ISO 3166-1 alpha-2)
    pub country: Option<String>,
    /// Shift from UTC in seconds, as reported by the forecast provider
    #[serde(default)]
    pub utc_offset_seconds: Option<i32>,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, name: String) -> Self {
        Self {
            latitude,
            longitude,
            name,
            country: None,
            utc_offset_seconds: None,
        }
    }

    /// Create location with country
    #[must_use]
    pub fn with_country(latitude: f64, longitude: f64, name: String, country: String) -> Self {
        Self {
            country: Some(country),
            ..Self::new(latitude, longitude, name)
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// Name with country suffix when known, e.g. `Berlin, DE`
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.country {
            Some(country) if !country.is_empty() => format!("{}, {country}", self.name),
            _ => self.name.clone(),
        }
    }

    /// Provider-reported UTC offset, if present and in range
    #[must_use]
    pub fn utc_offset(&self) -> Option<FixedOffset> {
        self.utc_offset_seconds.and_then(FixedOffset::east_opt)
    }
}
