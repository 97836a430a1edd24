use crate::error::{Result, WeatherChatError};
use crate::llm::tools::{FunctionDescriptor, LlmTool, ToolDescriptor};
use crate::weather::{WeatherGateway, WeatherReport, WeatherResult};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

pub const GET_WEATHER_TOOL_NAME: &str = "get_weather";

/// Tool that looks up current weather conditions for a city
///
/// The lookup result is rendered as a short multi-line summary; lookup failures
/// are rendered as their message so the model can relay them to the user.
///
/// # Examples
///
/// ```ignore
/// use weather_chat::llm::tools::GetWeatherTool;
/// use weather_chat::weather::OpenWeatherMapGateway;
/// use weather_chat::AppConfig;
/// use std::sync::Arc;
///
/// let config = AppConfig::from_env()?;
/// let gateway = OpenWeatherMapGateway::with_config(config.weather_config());
/// let tool = GetWeatherTool::new(Arc::new(gateway));
/// let mut args = HashMap::new();
/// args.insert("city".to_string(), serde_json::json!("Tokyo"));
///
/// let summary = tool.run(&args).await?;
/// ```
#[derive(Clone)]
pub struct GetWeatherTool {
    gateway: Arc<dyn WeatherGateway>,
}

impl GetWeatherTool {
    pub fn new(gateway: Arc<dyn WeatherGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl LlmTool for GetWeatherTool {
    async fn run(&self, args: &HashMap<String, Value>) -> Result<String> {
        let city = args.get("city").and_then(|v| v.as_str()).ok_or_else(|| {
            WeatherChatError::InvalidArgument("city parameter is required".to_string())
        })?;

        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherChatError::InvalidArgument(
                "city parameter cannot be empty".to_string(),
            ));
        }

        info!(city = city, "Looking up weather");
        Ok(render_weather_result(&self.gateway.current_conditions(city).await))
    }

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            r#type: "function".to_string(),
            function: FunctionDescriptor {
                name: GET_WEATHER_TOOL_NAME.to_string(),
                description: "Get current weather information for a specified city".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "city": {
                            "type": "string",
                            "description": "The city name (e.g., 'London', 'New York', 'Tokyo')"
                        }
                    },
                    "required": ["city"]
                }),
            },
        }
    }
}

/// Render a lookup outcome as the text returned to the model.
pub fn render_weather_result(result: &WeatherResult) -> String {
    match result {
        Ok(report) => render_weather_report(report),
        Err(e) => e.to_string(),
    }
}

pub fn render_weather_report(report: &WeatherReport) -> String {
    format!(
        "Weather in {}, {}:\n\
         - Temperature: {}°C (feels like {}°C)\n\
         - Conditions: {}\n\
         - Humidity: {}%\n\
         - Wind Speed: {} m/s",
        report.city,
        report.country,
        format_reading(report.temperature),
        format_reading(report.feels_like),
        capitalize(&report.description),
        report.humidity,
        format_reading(report.wind_speed)
    )
}

/// Format a reading the way it appears in the provider's JSON, so a whole
/// value keeps its fractional digit (`15.0`, not `15`).
fn format_reading(value: f64) -> String {
    serde_json::Number::from_f64(value)
        .map(|n| n.to_string())
        .unwrap_or_else(|| value.to_string())
}

/// Upper-case the first character and lower-case the rest.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::WeatherLookupError;
    use std::sync::Mutex;

    struct MockWeather {
        result: WeatherResult,
        queried: Mutex<Vec<String>>,
    }

    impl MockWeather {
        fn new(result: WeatherResult) -> Arc<Self> {
            Arc::new(Self {
                result,
                queried: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl WeatherGateway for MockWeather {
        async fn current_conditions(&self, city: &str) -> WeatherResult {
            self.queried.lock().unwrap().push(city.to_string());
            self.result.clone()
        }
    }

    fn london() -> WeatherReport {
        WeatherReport {
            city: "London".to_string(),
            country: "GB".to_string(),
            temperature: 15.2,
            feels_like: 14.8,
            humidity: 70,
            description: "light rain".to_string(),
            wind_speed: 4.1,
        }
    }

    fn city_args(city: &str) -> HashMap<String, Value> {
        let mut args = HashMap::new();
        args.insert("city".to_string(), json!(city));
        args
    }

    #[test]
    fn test_descriptor() {
        let tool = GetWeatherTool::new(MockWeather::new(Ok(london())));
        let descriptor = tool.descriptor();

        assert_eq!(descriptor.r#type, "function");
        assert_eq!(descriptor.function.name, "get_weather");

        let params = descriptor.function.parameters;
        assert_eq!(params["type"], "object");
        assert_eq!(params["properties"]["city"]["type"], "string");
        assert_eq!(params["required"][0], "city");
    }

    #[test]
    fn test_render_report() {
        let text = render_weather_report(&london());

        assert_eq!(
            text,
            "Weather in London, GB:\n\
             - Temperature: 15.2°C (feels like 14.8°C)\n\
             - Conditions: Light rain\n\
             - Humidity: 70%\n\
             - Wind Speed: 4.1 m/s"
        );
    }

    #[test]
    fn test_render_whole_number_readings_keep_decimal() {
        let report = WeatherReport {
            temperature: 15.0,
            feels_like: -3.0,
            wind_speed: 0.0,
            ..london()
        };

        let text = render_weather_report(&report);

        assert!(text.contains("- Temperature: 15.0°C (feels like -3.0°C)"));
        assert!(text.contains("- Wind Speed: 0.0 m/s"));
    }

    #[test]
    fn test_format_reading() {
        assert_eq!(format_reading(15.2), "15.2");
        assert_eq!(format_reading(14.0), "14.0");
        assert_eq!(format_reading(-0.5), "-0.5");
    }

    #[test]
    fn test_render_failure_is_verbatim() {
        let result: WeatherResult = Err(WeatherLookupError::CityNotFound("Zzqqxx".to_string()));
        assert_eq!(
            render_weather_result(&result),
            "City 'Zzqqxx' not found. Please check the spelling."
        );
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("light rain"), "Light rain");
        assert_eq!(capitalize("OVERCAST CLOUDS"), "Overcast clouds");
        assert_eq!(capitalize("é"), "É");
        assert_eq!(capitalize(""), "");
    }

    #[tokio::test]
    async fn test_run_queries_gateway() {
        let gateway = MockWeather::new(Ok(london()));
        let tool = GetWeatherTool::new(gateway.clone());

        let text = tool.run(&city_args("London")).await.unwrap();

        assert!(text.starts_with("Weather in London, GB:"));
        assert_eq!(*gateway.queried.lock().unwrap(), vec!["London".to_string()]);
    }

    #[tokio::test]
    async fn test_run_missing_city() {
        let gateway = MockWeather::new(Ok(london()));
        let tool = GetWeatherTool::new(gateway.clone());

        let err = tool.run(&HashMap::new()).await.unwrap_err();

        assert!(matches!(err, WeatherChatError::InvalidArgument(_)));
        assert!(err.to_string().contains("city parameter is required"));
        assert!(gateway.queried.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run_empty_city() {
        let tool = GetWeatherTool::new(MockWeather::new(Ok(london())));

        let err = tool.run(&city_args("  ")).await.unwrap_err();

        assert!(err.to_string().contains("city parameter cannot be empty"));
    }

    #[tokio::test]
    async fn test_run_non_string_city() {
        let tool = GetWeatherTool::new(MockWeather::new(Ok(london())));
        let mut args = HashMap::new();
        args.insert("city".to_string(), json!(42));

        let err = tool.run(&args).await.unwrap_err();

        assert!(matches!(err, WeatherChatError::InvalidArgument(_)));
    }
}
