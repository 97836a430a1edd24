pub mod broker;
pub mod chat_session;
pub mod gateway;
pub mod gateways;
pub mod history;
pub mod models;
pub mod tools;

pub use broker::LlmBroker;
pub use chat_session::{ChatSession, ChatSessionBuilder, DEFAULT_SYSTEM_PROMPT};
pub use gateway::{CompletionConfig, LlmGateway};
pub use history::ConversationHistory;
pub use models::{LlmGatewayResponse, LlmMessage, LlmToolCall, MessageRole};
pub use tools::{FunctionDescriptor, LlmTool, ToolDescriptor, ToolDispatcher};
