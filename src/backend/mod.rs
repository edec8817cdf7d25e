pub mod client;
#[cfg(feature = "openai")]
pub mod openai;

pub use client::TextCompletionService;
#[cfg(feature = "openai")]
pub use openai::{Model as OpenAIModel, OpenAIClient};
