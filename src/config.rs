//! Process configuration loaded from the environment.
//!
//! Both credentials are required up front so a missing key stops the program at
//! startup instead of surfacing later as a failed request.

use crate::error::{Result, WeatherChatError};
use crate::llm::gateways::OpenAIConfig;
use crate::weather::OpenWeatherMapConfig;

pub const GROQ_API_KEY_VAR: &str = "GROQ_API_KEY";
pub const OPENWEATHER_API_KEY_VAR: &str = "OPENWEATHER_API_KEY";
pub const GROQ_API_ENDPOINT_VAR: &str = "GROQ_API_ENDPOINT";
pub const OPENWEATHER_API_ENDPOINT_VAR: &str = "OPENWEATHER_API_ENDPOINT";
pub const MODEL_VAR: &str = "WEATHER_CHAT_MODEL";

pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub completion_api_key: String,
    pub completion_base_url: String,
    pub weather_api_key: String,
    pub weather_base_url: String,
    pub model: String,
}

impl AppConfig {
    /// Load configuration from process environment variables.
    ///
    /// Call `dotenv::dotenv()` beforehand to pick up a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let completion_api_key = non_empty(GROQ_API_KEY_VAR);
        let weather_api_key = non_empty(OPENWEATHER_API_KEY_VAR);

        let (completion_api_key, weather_api_key) = match (completion_api_key, weather_api_key) {
            (Some(c), Some(w)) => (c, w),
            (c, w) => {
                let mut missing = Vec::new();
                if c.is_none() {
                    missing.push(GROQ_API_KEY_VAR);
                }
                if w.is_none() {
                    missing.push(OPENWEATHER_API_KEY_VAR);
                }
                return Err(WeatherChatError::ConfigError(format!(
                    "API keys not found: {}. Set them in your environment or in a `.env` file \
                     (e.g. `{}=...` and `{}=...`).",
                    missing.join(", "),
                    GROQ_API_KEY_VAR,
                    OPENWEATHER_API_KEY_VAR
                )));
            }
        };

        Ok(Self {
            completion_api_key,
            completion_base_url: non_empty(GROQ_API_ENDPOINT_VAR)
                .unwrap_or_else(|| DEFAULT_GROQ_BASE_URL.to_string()),
            weather_api_key,
            weather_base_url: non_empty(OPENWEATHER_API_ENDPOINT_VAR)
                .unwrap_or_else(|| DEFAULT_OPENWEATHER_BASE_URL.to_string()),
            model: non_empty(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }

    /// Settings for the chat completion gateway.
    pub fn openai_config(&self) -> OpenAIConfig {
        OpenAIConfig {
            api_key: self.completion_api_key.clone(),
            base_url: self.completion_base_url.clone(),
            timeout: None,
        }
    }

    /// Settings for the weather provider.
    pub fn weather_config(&self) -> OpenWeatherMapConfig {
        OpenWeatherMapConfig {
            api_key: self.weather_api_key.clone(),
            base_url: self.weather_base_url.clone(),
            timeout: None,
        }
    }
}
