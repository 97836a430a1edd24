//! OpenAI-compatible gateway for chat completions.
//!
//! Works with any endpoint that speaks the OpenAI `chat/completions` protocol.
//! `AppConfig::openai_config` points it at Groq unless overridden.

use crate::error::{Result, WeatherChatError};
use crate::llm::gateway::{CompletionConfig, LlmGateway};
use crate::llm::gateways::openai_messages_adapter::{adapt_messages_to_openai, convert_tool_calls};
use crate::llm::models::{LlmGatewayResponse, LlmMessage};
use crate::llm::tools::ToolDescriptor;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Configuration for connecting to an OpenAI-compatible API.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Option<std::time::Duration>,
}

/// Gateway for OpenAI-compatible LLM services.
pub struct OpenAIGateway {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIGateway {
    /// Create a new gateway with custom configuration.
    pub fn with_config(config: OpenAIConfig) -> Self {
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
        Self::with_config(OpenAIConfig {
            api_key: api_key.into(),
            base_url: base_url.into(),
            timeout: None,
        })
    }

    /// Build the JSON body of a chat completion request.
    fn build_request_body(
        &self,
        model: &str,
        messages: &[LlmMessage],
        tools: Option<&[ToolDescriptor]>,
        config: &CompletionConfig,
    ) -> Result<Value> {
        let openai_messages = adapt_messages_to_openai(messages);

        let mut body = serde_json::json!({
            "model": model,
            "messages": openai_messages,
            "max_tokens": config.max_tokens,
            "temperature": config.temperature,
        });

        if let Some(tools) = tools.filter(|t| !t.is_empty()) {
            body["tools"] = serde_json::to_value(tools)?;
            body["tool_choice"] = serde_json::json!("auto");
        }

        Ok(body)
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl LlmGateway for OpenAIGateway {
    async fn complete(
        &self,
        model: &str,
        messages: &[LlmMessage],
        tools: Option<&[ToolDescriptor]>,
        config: &CompletionConfig,
    ) -> Result<LlmGatewayResponse> {
        info!("Delegating to OpenAI-compatible endpoint for completion");
        debug!(
            "Model: {}, Message count: {}, Tools: {}",
            model,
            messages.len(),
            tools.map_or(0, |t| t.len())
        );

        let body = self.build_request_body(model, messages, tools, config)?;

        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(WeatherChatError::GatewayError(format!(
                "OpenAI API error: {} - {}",
                status, error_text
            )));
        }

        let response_body: Value = response.json().await?;

        let message = &response_body["choices"][0]["message"];
        if message.is_null() {
            return Err(WeatherChatError::ApiError("response contained no choices".to_string()));
        }

        let content = message["content"].as_str().map(String::from);

        let tool_calls = if let Some(calls) = message["tool_calls"].as_array() {
            convert_tool_calls(calls)
        } else {
            vec![]
        };

        Ok(LlmGatewayResponse {
            content,
            tool_calls,
        })
    }
}
