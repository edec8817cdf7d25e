use async_trait::async_trait;

use crate::error::Result;

/// A hosted text-generation endpoint: a fully-rendered prompt string in, a
/// single raw text completion out.
///
/// This is the seam between the schema-validated core and the outside world.
/// Implementations own every transport concern: authentication, timeouts,
/// concurrency limits, and any transport-level retry budget. The core never
/// retries a transport failure; it sees either a completion string or a typed
/// error with an [`ApiErrorKind`](crate::ApiErrorKind).
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// use slidegen::{OpenAIClient, TextCompletionService};
///
/// let client = OpenAIClient::from_env()?.temperature(0.0).build();
/// let text = client.complete("Name three crustaceans.").await?;
/// println!("{}", text);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait TextCompletionService {
    /// Produce a single raw completion for the prompt.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
