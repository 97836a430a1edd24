//! Interactive weather chat in the terminal.
//!
//! Reads `GROQ_API_KEY` and `OPENWEATHER_API_KEY` from the environment or a
//! `.env` file. Set `RUST_LOG=info` to see gateway and tool activity on stderr.

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use weather_chat::llm::gateways::OpenAIGateway;
use weather_chat::llm::{ChatSession, LlmBroker, ToolDispatcher};
use weather_chat::weather::OpenWeatherMapGateway;
use weather_chat::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let weather = Arc::new(OpenWeatherMapGateway::with_config(config.weather_config()));
    let dispatcher = ToolDispatcher::with_weather(weather);
    let gateway = Arc::new(OpenAIGateway::with_config(config.openai_config()));
    let broker = LlmBroker::new(config.model.clone(), gateway, dispatcher);
    let mut session = ChatSession::new(broker);

    println!("Weather Chat ({})", config.model);
    println!("==============================");
    println!("Ask me about the weather anywhere! Try:");
    println!("  - What's the weather like in Tokyo?");
    println!("  - Is it raining in London?");
    println!("  - Compare the temperature in Paris and New York");
    println!("\nCommands: /clear to start over, /quit or /exit to leave.\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("You: ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!("\nGoodbye!");
            break;
        };
        let line = line?;
        let query = line.trim();

        match query {
            "" => continue,
            "/quit" | "/exit" => {
                println!("Goodbye!");
                break;
            }
            "/clear" => {
                session.clear_history();
                println!("Chat history cleared.\n");
                continue;
            }
            _ => {}
        }

        let answer = session.submit_turn(query).await;
        println!("Assistant: {}\n", answer);
    }

    Ok(())
}
