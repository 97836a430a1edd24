//! Adapter for converting LLM messages to and from the OpenAI wire format.

use crate::llm::models::{LlmMessage, LlmToolCall, MessageRole};
use serde_json::Value;
use tracing::warn;

/// Adapt LLM messages to OpenAI format.
pub fn adapt_messages_to_openai(messages: &[LlmMessage]) -> Vec<Value> {
    let mut result = Vec::with_capacity(messages.len());

    for msg in messages {
        let openai_msg = match msg.role {
            MessageRole::System => {
                serde_json::json!({
                    "role": "system",
                    "content": msg.content.as_deref().unwrap_or("")
                })
            }
            MessageRole::User => {
                serde_json::json!({
                    "role": "user",
                    "content": msg.content.as_deref().unwrap_or("")
                })
            }
            MessageRole::Assistant => {
                let mut assistant_msg = serde_json::json!({
                    "role": "assistant"
                });

                if let Some(ref content) = msg.content {
                    assistant_msg["content"] = serde_json::json!(content);
                }

                if let Some(ref tool_calls) = msg.tool_calls {
                    let formatted_calls: Vec<Value> = tool_calls
                        .iter()
                        .map(|tc| {
                            serde_json::json!({
                                "id": tc.id,
                                "type": "function",
                                "function": {
                                    "name": tc.name,
                                    "arguments": tc.arguments
                                }
                            })
                        })
                        .collect();
                    assistant_msg["tool_calls"] = serde_json::json!(formatted_calls);
                }

                assistant_msg
            }
            MessageRole::Tool => {
                let tool_call_id = msg.tool_call_id.as_deref().unwrap_or_else(|| {
                    warn!("Tool result message without a tool_call_id");
                    ""
                });

                serde_json::json!({
                    "role": "tool",
                    "content": msg.content.as_deref().unwrap_or(""),
                    "tool_call_id": tool_call_id
                })
            }
        };

        result.push(openai_msg);
    }

    result
}

/// Convert tool calls from OpenAI format to internal format.
///
/// Entries without a function name are dropped. A call without an id gets a
/// generated one so its result can still be correlated.
pub fn convert_tool_calls(tool_calls: &[Value]) -> Vec<LlmToolCall> {
    tool_calls
        .iter()
        .filter_map(|tc| {
            let Some(name) = tc["function"]["name"].as_str() else {
                warn!("Dropping tool call without a function name");
                return None;
            };
            let id = tc["id"]
                .as_str()
                .filter(|id| !id.is_empty())
                .map(String::from)
                .unwrap_or_else(|| format!("call_{}", uuid::Uuid::new_v4().simple()));

            // Some providers send arguments as an object instead of a string
            let arguments = match &tc["function"]["arguments"] {
                Value::String(s) => s.clone(),
                Value::Null => "{}".to_string(),
                other => other.to_string(),
            };

            Some(LlmToolCall {
                id,
                name: name.to_string(),
                arguments,
            })
        })
        .collect()
}
