/// slidegen: schema-validated slide-deck generation from LLMs
///
/// # Overview
///
/// slidegen prompts a hosted text-generation model to produce a structured
/// slide-deck presentation on a caller-supplied topic, validates the model's
/// JSON output against a declared schema, and gives the pipeline exactly one
/// bounded opportunity to self-correct a schema violation before failing.
///
/// Key pieces:
/// - A runtime [`Schema`] value that is rendered into natural-language prompt
///   instructions and also drives validation of the raw completion
/// - [`SchemaValidatedGenerator`] for prompt construction and validation
/// - [`RepairingDecoder`] for the bounded self-repair pass (at most two model
///   calls per invocation)
/// - An [`OpenAIClient`] transport implementing [`TextCompletionService`]
///
/// # Quick Start
///
/// ```no_run
/// use slidegen::{OpenAIClient, deck::deck_decoder};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Create a client
///     let client = OpenAIClient::from_env()?
///         .temperature(0.0)
///         .build();
///
///     // Generate a validated presentation deck
///     let decoder = deck_decoder(client);
///     let deck = decoder.generate("Dota 2").await?;
///
///     println!("{}", serde_json::to_string_pretty(&deck)?);
///     Ok(())
/// }
/// ```
mod backend;
mod error;
pub mod deck;
pub mod generator;
pub mod model;
pub mod schema;
#[cfg(feature = "logging")]
pub mod logging;

// Re-exports for convenience
pub use error::{ApiErrorKind, Result, SlidegenError};
pub use generator::{
    DecodeState, GenerationRequest, RepairingDecoder, SchemaValidatedGenerator, SchemaViolations,
    ValidationOutcome,
};
pub use model::Structured;
pub use schema::{Schema, SchemaBuilder, format_instructions};

pub use deck::{Presentation, Slide};

#[cfg(feature = "openai")]
pub use backend::{OpenAIClient, OpenAIModel};

pub use backend::TextCompletionService;
