use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

/// Descriptor for tool function parameters
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToolDescriptor {
    pub r#type: String,
    pub function: FunctionDescriptor,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FunctionDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Trait for LLM tools
#[async_trait]
pub trait LlmTool: Send + Sync {
    /// Execute the tool with parsed arguments and return the text the model will read.
    ///
    /// Arguments that do not match the declared schema are reported as
    /// [`crate::error::WeatherChatError::InvalidArgument`].
    async fn run(&self, args: &HashMap<String, Value>) -> Result<String>;

    /// Get tool descriptor for LLM
    fn descriptor(&self) -> ToolDescriptor;

    /// Name the LLM uses to call this tool
    fn name(&self) -> String {
        self.descriptor().function.name
    }

    /// Check if this tool matches the given name
    fn matches(&self, name: &str) -> bool {
        self.descriptor().function.name == name
    }
}
