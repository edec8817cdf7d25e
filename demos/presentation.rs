use std::env;

use slidegen::deck::deck_decoder;
use slidegen::logging::{LogLevel, init_logging};
use slidegen::{OpenAIClient, OpenAIModel};

/// Generates a schema-validated presentation deck for a topic and prints it
/// as JSON. Pass the topic as the first argument.

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LogLevel::Info);

    let topic = env::args().nth(1).unwrap_or_else(|| "Dota 2".to_string());

    let client = OpenAIClient::from_env()?
        .model(OpenAIModel::Gpt4)
        .temperature(0.0) // deterministic-leaning output keeps the repair pass effective
        .max_concurrency(5)
        .max_retries(0)
        .build();

    let decoder = deck_decoder(client);
    let deck = decoder.generate(&topic).await?;

    for presentation in &deck {
        println!(
            "Generated \"{}\" with {} slides",
            presentation.title,
            presentation.slides.len()
        );
    }
    println!("{}", serde_json::to_string_pretty(&deck)?);

    Ok(())
}
