//! OpenWeatherMap current-conditions client.

use crate::weather::gateway::{WeatherGateway, WeatherLookupError, WeatherReport, WeatherResult};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Configuration for connecting to the OpenWeatherMap API.
#[derive(Debug, Clone)]
pub struct OpenWeatherMapConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Option<std::time::Duration>,
}

// --- Response shape (only the fields we consume) ---

#[derive(Deserialize, Debug)]
struct CurrentWeatherResponse {
    name: String,
    sys: SysSection,
    main: MainSection,
    weather: Vec<ConditionSection>,
    wind: WindSection,
}

#[derive(Deserialize, Debug)]
struct SysSection {
    country: String,
}

#[derive(Deserialize, Debug)]
struct MainSection {
    temp: f64,
    feels_like: f64,
    humidity: u32,
}

#[derive(Deserialize, Debug)]
struct ConditionSection {
    description: String,
}

#[derive(Deserialize, Debug)]
struct WindSection {
    speed: f64,
}

impl TryFrom<CurrentWeatherResponse> for WeatherReport {
    type Error = WeatherLookupError;

    fn try_from(response: CurrentWeatherResponse) -> Result<Self, Self::Error> {
        let description = response
            .weather
            .into_iter()
            .next()
            .map(|c| c.description)
            .ok_or_else(|| WeatherLookupError::Fetch("response has no weather conditions".to_string()))?;

        Ok(WeatherReport {
            city: response.name,
            country: response.sys.country,
            temperature: response.main.temp,
            feels_like: response.main.feels_like,
            humidity: response.main.humidity,
            description,
            wind_speed: response.wind.speed,
        })
    }
}

/// Gateway for the OpenWeatherMap `weather` endpoint.
pub struct OpenWeatherMapGateway {
    client: Client,
    config: OpenWeatherMapConfig,
}

impl OpenWeatherMapGateway {
    /// Create a new gateway with custom configuration.
    pub fn with_config(config: OpenWeatherMapConfig) -> Self {
        let mut client_builder = Client::builder();

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder.build().unwrap_or_else(|e| {
            warn!(error = %e, "Falling back to default HTTP client");
            Client::new()
        });

        Self { client, config }
    }

    /// Create gateway with custom API key and base URL.
    pub fn with_api_key_and_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self::with_config(OpenWeatherMapConfig {
            api_key: api_key.into(),
            base_url: base_url.into(),
            timeout: None,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/weather", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl WeatherGateway for OpenWeatherMapGateway {
    async fn current_conditions(&self, city: &str) -> WeatherResult {
        info!(city = city, "Fetching current weather");

        let response = self
            .client
            .get(self.endpoint())
            .query(&[("q", city), ("appid", self.config.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(fetch_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(city = city, "Weather provider does not know this city");
            return Err(WeatherLookupError::CityNotFound(city.to_string()));
        }
        if !status.is_success() {
            warn!(city = city, status = %status, "Weather provider returned an error");
            return Err(WeatherLookupError::Http(status.to_string()));
        }

        let body = response.text().await.map_err(fetch_error)?;
        let parsed: CurrentWeatherResponse =
            serde_json::from_str(&body).map_err(|e| WeatherLookupError::Fetch(e.to_string()))?;

        WeatherReport::try_from(parsed)
    }
}

/// The request URL carries the API key, so it is stripped before the error
/// text can reach the conversation.
fn fetch_error(e: reqwest::Error) -> WeatherLookupError {
    WeatherLookupError::Fetch(e.without_url().to_string())
}
