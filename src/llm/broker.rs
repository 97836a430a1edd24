use crate::error::Result;
use crate::llm::gateway::{CompletionConfig, LlmGateway};
use crate::llm::history::ConversationHistory;
use crate::llm::models::LlmMessage;
use crate::llm::tools::ToolDispatcher;
use std::sync::Arc;
use tracing::{debug, info};

/// Drives one completion round trip, including at most one round of tool calls.
pub struct LlmBroker {
    model: String,
    gateway: Arc<dyn LlmGateway>,
    dispatcher: ToolDispatcher,
}

impl LlmBroker {
    /// Create a new LLM broker
    pub fn new(
        model: impl Into<String>,
        gateway: Arc<dyn LlmGateway>,
        dispatcher: ToolDispatcher,
    ) -> Self {
        Self {
            model: model.into(),
            gateway,
            dispatcher,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate the assistant's answer to the conversation in `history`.
    ///
    /// The first request declares the registered tools. If the model asks for
    /// any of them, the request message and one result per call are appended to
    /// `history`, and a second request without tool declarations produces the
    /// answer. The answer itself is not appended.
    pub async fn generate(
        &self,
        system_prompt: &str,
        history: &mut ConversationHistory,
        config: &CompletionConfig,
    ) -> Result<String> {
        let tools = self.dispatcher.descriptors();
        let tools = (!tools.is_empty()).then_some(tools.as_slice());

        let messages = history.with_system_prompt(system_prompt);
        let response = self.gateway.complete(&self.model, &messages, tools, config).await?;

        if !response.has_tool_calls() {
            debug!("No tool calls requested");
            return Ok(response.content.unwrap_or_default());
        }

        info!("Tool calls requested: {}", response.tool_calls.len());

        history.push(LlmMessage::assistant_with_tool_calls(
            response.content.unwrap_or_default(),
            response.tool_calls.clone(),
        ));

        for tool_call in &response.tool_calls {
            let output = self.dispatcher.dispatch(tool_call).await;
            history.push(LlmMessage::tool_result(&tool_call.id, output));
        }

        let messages = history.with_system_prompt(system_prompt);
        let final_response = self.gateway.complete(&self.model, &messages, None, config).await?;

        Ok(final_response.content.unwrap_or_default())
    }
}
