//! Error types and result aliases for weather-chat.
//!
//! [`WeatherChatError`] covers everything that can go wrong while talking to the
//! completion endpoint or while wiring the application together. Weather lookups
//! have their own error type ([`crate::weather::WeatherLookupError`]) because
//! those failures are reported back to the model as text rather than propagated.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherChatError {
    #[error("LLM gateway error: {0}")]
    GatewayError(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, WeatherChatError>;
