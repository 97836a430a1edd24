use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Normalized current conditions for one city.
///
/// Temperatures are in degrees Celsius and wind speed in metres per second,
/// since lookups always request metric units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub country: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u32,
    pub description: String,
    pub wind_speed: f64,
}

/// Why a lookup produced no report.
///
/// The display text of each variant is what the model gets to see.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WeatherLookupError {
    #[error("City '{0}' not found. Please check the spelling.")]
    CityNotFound(String),

    #[error("HTTP error occurred: {0}")]
    Http(String),

    #[error("Error fetching weather data: {0}")]
    Fetch(String),
}

pub type WeatherResult = std::result::Result<WeatherReport, WeatherLookupError>;

/// Abstract interface for weather providers
#[async_trait]
pub trait WeatherGateway: Send + Sync {
    /// Fetch current conditions for `city`.
    ///
    /// Every failure is returned as a [`WeatherLookupError`]; implementations
    /// must not panic.
    async fn current_conditions(&self, city: &str) -> WeatherResult;
}
