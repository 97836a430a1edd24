//! Routes model-requested tool calls to registered tools.

use crate::error::{Result, WeatherChatError};
use crate::llm::models::LlmToolCall;
use crate::llm::tools::weather_tool::GetWeatherTool;
use crate::llm::tools::{LlmTool, ToolDescriptor};
use crate::weather::WeatherGateway;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Returned to the model when it asks for a tool that is not registered.
pub const UNKNOWN_TOOL: &str = "Unknown tool";

/// Registry of tools keyed by the name the model uses to call them.
///
/// Dispatching never fails: every outcome, including unknown tools and bad
/// arguments, becomes the text of the tool-result message.
#[derive(Default)]
pub struct ToolDispatcher {
    tools: Vec<Box<dyn LlmTool>>,
}

impl ToolDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard registry: `get_weather` backed by `gateway`.
    pub fn with_weather(gateway: Arc<dyn WeatherGateway>) -> Self {
        Self {
            tools: vec![Box::new(GetWeatherTool::new(gateway))],
        }
    }

    /// Register a tool. Names must be unique.
    pub fn register(&mut self, tool: Box<dyn LlmTool>) -> Result<()> {
        let name = tool.name();
        if self.has_tool(&name) {
            return Err(WeatherChatError::ConfigError(format!(
                "tool '{}' is already registered",
                name
            )));
        }
        self.tools.push(tool);
        Ok(())
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.iter().any(|t| t.matches(name))
    }

    /// Descriptors of every registered tool, for declaring them to the LLM.
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools.iter().map(|t| t.descriptor()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Execute one tool call and return the text for its tool-result message.
    pub async fn dispatch(&self, tool_call: &LlmToolCall) -> String {
        let Some(tool) = self.tools.iter().find(|t| t.matches(&tool_call.name)) else {
            warn!("Tool not found: {}", tool_call.name);
            return UNKNOWN_TOOL.to_string();
        };

        let args = match parse_arguments(&tool_call.arguments) {
            Ok(args) => args,
            Err(detail) => return invalid_arguments(&tool_call.name, &detail),
        };

        info!("Executing tool: {}", tool_call.name);
        match tool.run(&args).await {
            Ok(output) => output,
            Err(WeatherChatError::InvalidArgument(detail)) => {
                invalid_arguments(&tool_call.name, &detail)
            }
            Err(e) => {
                warn!("Tool execution failed: {}", e);
                format!("Tool '{}' failed: {}", tool_call.name, e)
            }
        }
    }
}

fn invalid_arguments(name: &str, detail: &str) -> String {
    warn!(tool = name, detail = detail, "Rejected tool arguments");
    format!("Invalid arguments for tool '{}': {}", name, detail)
}

/// Parse a serialized argument payload into a JSON object.
///
/// Providers send `""` for calls without arguments, which is read as `{}`.
fn parse_arguments(raw: &str) -> std::result::Result<HashMap<String, Value>, String> {
    if raw.trim().is_empty() {
        return Ok(HashMap::new());
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map.into_iter().collect()),
        Ok(other) => Err(format!("expected a JSON object, got {}", other)),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::{WeatherLookupError, WeatherReport, WeatherResult};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockWeather {
        calls: Mutex<Vec<String>>,
    }

    impl MockWeather {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl WeatherGateway for MockWeather {
        async fn current_conditions(&self, city: &str) -> WeatherResult {
            self.calls.lock().unwrap().push(city.to_string());
            if city == "Zzqqxx" {
                return Err(WeatherLookupError::CityNotFound(city.to_string()));
            }
            Ok(WeatherReport {
                city: city.to_string(),
                country: "GB".to_string(),
                temperature: 15.2,
                feels_like: 14.8,
                humidity: 70,
                description: "light rain".to_string(),
                wind_speed: 4.1,
            })
        }
    }

    fn call(name: &str, arguments: &str) -> LlmToolCall {
        LlmToolCall {
            id: "call_1".to_string(),
            name: name.to_string(),
            arguments: arguments.to_string(),
        }
    }

    #[test]
    fn test_with_weather_registers_one_tool() {
        let dispatcher = ToolDispatcher::with_weather(MockWeather::new());

        assert_eq!(dispatcher.len(), 1);
        assert!(dispatcher.has_tool("get_weather"));
        assert_eq!(dispatcher.descriptors()[0].function.name, "get_weather");
    }

    #[test]
    fn test_register_rejects_duplicate_names() {
        let gateway = MockWeather::new();
        let mut dispatcher = ToolDispatcher::new();
        assert!(dispatcher.is_empty());

        dispatcher.register(Box::new(GetWeatherTool::new(gateway.clone()))).unwrap();
        let err = dispatcher.register(Box::new(GetWeatherTool::new(gateway))).unwrap_err();

        assert!(matches!(err, WeatherChatError::ConfigError(_)));
        assert!(err.to_string().contains("get_weather"));
        assert_eq!(dispatcher.len(), 1);
    }

    #[tokio::test]
    async fn test_dispatch_weather_success() {
        let gateway = MockWeather::new();
        let dispatcher = ToolDispatcher::with_weather(gateway.clone());

        let text = dispatcher.dispatch(&call("get_weather", r#"{"city":"London"}"#)).await;

        assert!(text.starts_with("Weather in London, GB:"));
        assert!(text.contains("- Conditions: Light rain"));
        assert_eq!(*gateway.calls.lock().unwrap(), vec!["London".to_string()]);
    }

    #[tokio::test]
    async fn test_dispatch_weather_not_found() {
        let dispatcher = ToolDispatcher::with_weather(MockWeather::new());

        let text = dispatcher.dispatch(&call("get_weather", r#"{"city":"Zzqqxx"}"#)).await;

        assert_eq!(text, "City 'Zzqqxx' not found. Please check the spelling.");
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool() {
        let gateway = MockWeather::new();
        let dispatcher = ToolDispatcher::with_weather(gateway.clone());

        let text = dispatcher.dispatch(&call("get_stock_price", r#"{"ticker":"X"}"#)).await;

        assert_eq!(text, "Unknown tool");
        assert!(gateway.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_malformed_json() {
        let gateway = MockWeather::new();
        let dispatcher = ToolDispatcher::with_weather(gateway.clone());

        let text = dispatcher.dispatch(&call("get_weather", "{city: London")).await;

        assert!(text.starts_with("Invalid arguments for tool 'get_weather':"));
        assert!(gateway.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_non_object_arguments() {
        let dispatcher = ToolDispatcher::with_weather(MockWeather::new());

        let text = dispatcher.dispatch(&call("get_weather", r#"["London"]"#)).await;

        assert!(text.contains("expected a JSON object"));
    }

    struct BrokenTool;

    #[async_trait]
    impl LlmTool for BrokenTool {
        async fn run(&self, _args: &HashMap<String, Value>) -> Result<String> {
            Err(WeatherChatError::ApiError("backend offline".to_string()))
        }

        fn descriptor(&self) -> ToolDescriptor {
            ToolDescriptor {
                r#type: "function".to_string(),
                function: crate::llm::tools::FunctionDescriptor {
                    name: "broken".to_string(),
                    description: "Always fails".to_string(),
                    parameters: serde_json::json!({"type": "object", "properties": {}}),
                },
            }
        }
    }

    #[tokio::test]
    async fn test_dispatch_tool_failure_becomes_text() {
        let mut dispatcher = ToolDispatcher::new();
        dispatcher.register(Box::new(BrokenTool)).unwrap();

        let text = dispatcher.dispatch(&call("broken", "{}")).await;

        assert_eq!(text, "Tool 'broken' failed: API error: backend offline");
    }

    #[tokio::test]
    async fn test_dispatch_missing_city() {
        let dispatcher = ToolDispatcher::with_weather(MockWeather::new());

        let text = dispatcher.dispatch(&call("get_weather", "")).await;

        assert_eq!(
            text,
            "Invalid arguments for tool 'get_weather': city parameter is required"
        );
    }
}
