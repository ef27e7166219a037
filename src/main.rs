use std::io::{BufRead, Write};
use std::sync::Arc;

use taskpilot::assistant::{Assistant, AssistantError};
use taskpilot::backend::HttpBackend;
use taskpilot::classifier::KeywordClassifier;
use taskpilot::config::BotConfig;
use taskpilot::engine::PolicyEngine;
use taskpilot::templates::TemplateStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = BotConfig::from_env();
    tracing::info!(backend_url = %config.backend_url, "taskpilot starting");

    let backend = Arc::new(HttpBackend::new(config.backend_url));
    let templates = TemplateStore::builtin()?;
    let engine = PolicyEngine::new(templates, backend.clone());
    let assistant = Assistant::new(Arc::new(KeywordClassifier::new()), backend, engine);

    // Token from the environment; without one the engine degrades to the
    // no-context path.
    let token = std::env::var("CHATBOT_TOKEN").ok();

    println!("Let's chat! (type 'quit' to exit)");
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    loop {
        print!("You: ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let message = line.trim();
        if message == "quit" {
            break;
        }

        match assistant.handle(message, token.as_deref()).await {
            Ok(reply) => println!("{}", reply.answer),
            Err(AssistantError::EmptyMessage) => continue,
        }
    }

    Ok(())
}
