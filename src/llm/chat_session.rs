//! Chat session management.
//!
//! A [`ChatSession`] is one user's conversation: the history, the system prompt
//! sent in front of it, and the broker that talks to the model. Completion
//! failures never escape a turn; they become the assistant's reply.

use crate::llm::broker::LlmBroker;
use crate::llm::gateway::CompletionConfig;
use crate::llm::history::ConversationHistory;
use crate::llm::models::LlmMessage;
use tracing::{info, warn};

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant with access to weather information.
You can look up current weather conditions for any city in the world.

When users ask about weather, you should use the get_weather tool to fetch real-time data.
Always be friendly, concise, and accurate in your responses.

If a user asks about weather without specifying a city, politely ask them which city they'd like to know about.";

/// A chat session that owns the conversation history.
///
/// # Examples
///
/// ```ignore
/// use weather_chat::llm::{ChatSession, LlmBroker, ToolDispatcher};
/// use weather_chat::llm::gateways::OpenAIGateway;
/// use weather_chat::weather::OpenWeatherMapGateway;
/// use weather_chat::AppConfig;
/// use std::sync::Arc;
///
/// let config = AppConfig::from_env()?;
/// let weather = OpenWeatherMapGateway::with_config(config.weather_config());
/// let dispatcher = ToolDispatcher::with_weather(Arc::new(weather));
/// let gateway = Arc::new(OpenAIGateway::with_config(config.openai_config()));
/// let broker = LlmBroker::new(config.model.clone(), gateway, dispatcher);
/// let mut session = ChatSession::new(broker);
///
/// let answer = session.submit_turn("What's the weather in Tokyo?").await;
/// ```
pub struct ChatSession {
    broker: LlmBroker,
    history: ConversationHistory,
    system_prompt: String,
    config: CompletionConfig,
}

impl ChatSession {
    /// Create a new chat session with default settings.
    pub fn new(broker: LlmBroker) -> Self {
        Self::builder(broker).build()
    }

    /// Create a chat session builder for custom configuration.
    pub fn builder(broker: LlmBroker) -> ChatSessionBuilder {
        ChatSessionBuilder::new(broker)
    }

    /// Run one conversational turn and return the assistant's answer.
    ///
    /// The user message and the answer are appended to the history, along with
    /// any tool request and tool results in between. If the completion endpoint
    /// fails, the error text is recorded and returned as the answer instead, and
    /// the session stays usable.
    pub async fn submit_turn(&mut self, user_text: &str) -> String {
        self.history.push(LlmMessage::user(user_text));

        let answer = match self
            .broker
            .generate(&self.system_prompt, &mut self.history, &self.config)
            .await
        {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "Completion failed");
                format!("Error communicating with the chat completion API: {}", e)
            }
        };

        self.history.push(LlmMessage::assistant(&answer));
        answer
    }

    /// Discard every message and start over.
    pub fn clear_history(&mut self) {
        info!("Clearing {} message(s) from history", self.history.len());
        self.history.clear();
    }

    /// Get the current conversation history
    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn messages(&self) -> &[LlmMessage] {
        self.history.messages()
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }
}

/// Builder for constructing a `ChatSession` with custom configuration.
pub struct ChatSessionBuilder {
    broker: LlmBroker,
    history: ConversationHistory,
    system_prompt: String,
    config: CompletionConfig,
}

impl ChatSessionBuilder {
    fn new(broker: LlmBroker) -> Self {
        Self {
            broker,
            history: ConversationHistory::new(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            config: CompletionConfig::default(),
        }
    }

    /// Set the system prompt (default: [`DEFAULT_SYSTEM_PROMPT`])
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Start from an existing history instead of an empty one
    pub fn history(mut self, history: ConversationHistory) -> Self {
        self.history = history;
        self
    }

    /// Set the temperature for generation (default: 0.7)
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = temperature;
        self
    }

    /// Set the maximum output tokens per completion (default: 1024)
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.config.max_tokens = max_tokens;
        self
    }

    /// Build the chat session
    pub fn build(self) -> ChatSession {
        ChatSession {
            broker: self.broker,
            history: self.history,
            system_prompt: self.system_prompt,
            config: self.config,
        }
    }
}
