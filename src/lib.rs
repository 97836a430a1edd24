pub mod config;
pub mod error;
pub mod llm;
pub mod weather;

pub use config::AppConfig;
pub use error::{Result, WeatherChatError};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::config::AppConfig;
    pub use crate::error::{Result, WeatherChatError};
    pub use crate::llm::gateways::OpenAIGateway;
    pub use crate::llm::tools::{GetWeatherTool, LlmTool, ToolDispatcher};
    pub use crate::llm::{
        ChatSession, CompletionConfig, ConversationHistory, LlmBroker, LlmGateway, LlmMessage,
        MessageRole,
    };
    pub use crate::weather::{OpenWeatherMapGateway, WeatherGateway, WeatherReport};
}
