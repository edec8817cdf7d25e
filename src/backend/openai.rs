use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, trace, warn};

use crate::backend::TextCompletionService;
use crate::error::{ApiErrorKind, Result, SlidegenError};

const OPENAI_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Delay between transport-level retry attempts.
const RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// OpenAI models available for completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Model {
    Gpt35Turbo,
    Gpt4,
    Gpt4Turbo,
    Gpt4O,
}

impl Model {
    pub fn as_str(&self) -> &'static str {
        match self {
            Model::Gpt35Turbo => "gpt-3.5-turbo",
            Model::Gpt4 => "gpt-4",
            Model::Gpt4Turbo => "gpt-4-turbo-preview",
            Model::Gpt4O => "gpt-4o",
        }
    }
}

/// Configuration for the OpenAI client
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub model: Model,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub timeout: Option<Duration>,
    /// Cap on parallel in-flight requests through this client.
    pub max_concurrency: usize,
    /// Transport-level retry budget for rate limits, outages, and timeouts.
    /// Independent of the schema-repair pass in the core.
    pub max_retries: usize,
}

/// OpenAI client implementing [`TextCompletionService`] against the
/// chat-completions endpoint.
#[derive(Debug)]
pub struct OpenAIClient {
    config: OpenAIConfig,
    client: reqwest::Client,
    limiter: Arc<Semaphore>,
}

// OpenAI API request and response structures
#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct ResponseMessage {
    role: String,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct ChatCompletionChoice {
    message: ResponseMessage,
    finish_reason: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

/// Map an HTTP status to the transport error kind surfaced to callers.
fn status_to_kind(status: StatusCode) -> ApiErrorKind {
    match status {
        StatusCode::TOO_MANY_REQUESTS => ApiErrorKind::RateLimited,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiErrorKind::Unauthorized,
        StatusCode::REQUEST_TIMEOUT => ApiErrorKind::Timeout,
        s if s.is_server_error() => ApiErrorKind::ServiceUnavailable,
        _ => ApiErrorKind::Unknown,
    }
}

impl OpenAIClient {
    /// Create a new OpenAI client with default configuration.
    ///
    /// Defaults: gpt-4, temperature 0.0, max_concurrency 5, no transport
    /// retries, no timeout.
    #[instrument(name = "openai_client_new", skip(api_key), fields(model = ?Model::Gpt4))]
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(SlidegenError::api_error(
                ApiErrorKind::Unauthorized,
                "OpenAI API key is empty",
            ));
        }
        info!("Creating new OpenAI client");
        trace!("API key length: {}", api_key.len());

        let config = OpenAIConfig {
            api_key,
            model: Model::Gpt4,
            temperature: 0.0,
            max_tokens: None,
            timeout: None, // Default: no timeout (uses reqwest's default)
            max_concurrency: 5,
            max_retries: 0,
        };

        debug!("OpenAI client created with default configuration");
        let limiter = Arc::new(Semaphore::new(config.max_concurrency));
        Ok(Self {
            config,
            client: reqwest::Client::new(),
            limiter,
        })
    }

    /// Create a new OpenAI client by reading the API key from the
    /// `OPENAI_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if `OPENAI_API_KEY` is not set.
    #[instrument(name = "openai_client_from_env", fields(model = ?Model::Gpt4))]
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            SlidegenError::api_error(ApiErrorKind::Unauthorized, "OPENAI_API_KEY is not set")
        })?;
        Self::new(api_key)
    }

    /// Set the model to use
    #[instrument(skip(self))]
    pub fn model(mut self, model: Model) -> Self {
        debug!(previous_model = ?self.config.model, new_model = ?model, "Setting OpenAI model");
        self.config.model = model;
        self
    }

    /// Set the temperature (0.0 to 1.0, lower = more deterministic)
    #[instrument(skip(self))]
    pub fn temperature(mut self, temp: f32) -> Self {
        debug!(
            previous_temp = self.config.temperature,
            new_temp = temp,
            "Setting temperature"
        );
        self.config.temperature = temp;
        self
    }

    /// Set the maximum tokens to generate
    #[instrument(skip(self))]
    pub fn max_tokens(mut self, max: u32) -> Self {
        debug!(previous_max = ?self.config.max_tokens, new_max = max, "Setting max_tokens");
        self.config.max_tokens = Some(max.max(1));
        self
    }

    /// Set the timeout for HTTP requests. Applies to each request made by
    /// the client; the timeout is installed when `build()` runs.
    #[instrument(skip(self))]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        debug!(
            previous_timeout = ?self.config.timeout,
            new_timeout = ?timeout,
            "Setting timeout"
        );
        self.config.timeout = Some(timeout);
        self
    }

    /// Cap the number of parallel in-flight requests through this client.
    #[instrument(skip(self))]
    pub fn max_concurrency(mut self, max: usize) -> Self {
        debug!(
            previous_max = self.config.max_concurrency,
            new_max = max,
            "Setting max_concurrency"
        );
        self.config.max_concurrency = max.max(1);
        self.limiter = Arc::new(Semaphore::new(self.config.max_concurrency));
        self
    }

    /// Set the transport-level retry budget for rate limits, outages, and
    /// timeouts (0 = single attempt). Validation failures are never retried
    /// here; that is the repair pass's job.
    #[instrument(skip(self))]
    pub fn max_retries(mut self, max_retries: usize) -> Self {
        debug!(
            previous_max_retries = self.config.max_retries,
            new_max_retries = max_retries,
            "Setting max_retries"
        );
        self.config.max_retries = max_retries;
        self
    }

    /// Build the client (chainable after configuration)
    #[instrument(skip(self))]
    pub fn build(mut self) -> Self {
        info!(
            model = ?self.config.model,
            temperature = self.config.temperature,
            max_tokens = ?self.config.max_tokens,
            timeout = ?self.config.timeout,
            max_concurrency = self.config.max_concurrency,
            max_retries = self.config.max_retries,
            "OpenAI client configuration complete"
        );

        // Configure reqwest client with timeout if specified
        let mut client_builder = reqwest::Client::builder();
        if let Some(timeout) = self.config.timeout {
            client_builder = client_builder.timeout(timeout);
        }
        self.client = client_builder.build().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to build reqwest client with timeout, using default");
            reqwest::Client::new()
        });

        self
    }

    /// The active configuration.
    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    /// Single request to the chat-completions endpoint, no retries.
    async fn request_completion(&self, prompt: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.config.model.as_str().to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        debug!("Sending request to OpenAI API");
        let response = self
            .client
            .post(OPENAI_COMPLETIONS_URL)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "HTTP request to OpenAI failed");
                if e.is_timeout() {
                    SlidegenError::api_error(ApiErrorKind::Timeout, e.to_string())
                } else {
                    SlidegenError::HttpError(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            error!(
                status = %status,
                error = %error_text,
                "OpenAI API returned error response"
            );
            return Err(SlidegenError::api_error(
                status_to_kind(status),
                format!("OpenAI API error: {}", error_text),
            ));
        }

        debug!("Successfully received response from OpenAI");
        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!(error = %e, "Failed to parse JSON response from OpenAI");
            SlidegenError::HttpError(e)
        })?;

        if completion.choices.is_empty() {
            error!("OpenAI returned empty choices array");
            return Err(SlidegenError::api_error(
                ApiErrorKind::Unknown,
                "No completion choices returned",
            ));
        }

        let choice = &completion.choices[0];
        trace!(finish_reason = %choice.finish_reason, "Completion finish reason");

        match &choice.message.content {
            Some(content) => {
                debug!(
                    content_len = content.len(),
                    "Successfully extracted content from response"
                );
                Ok(content.clone())
            }
            None => {
                error!("No content in OpenAI response");
                Err(SlidegenError::api_error(
                    ApiErrorKind::Unknown,
                    "No content in response",
                ))
            }
        }
    }
}

#[async_trait]
impl TextCompletionService for OpenAIClient {
    #[instrument(
        name = "openai_complete",
        skip(self, prompt),
        fields(
            model = %self.config.model.as_str(),
            prompt_len = prompt.len()
        )
    )]
    async fn complete(&self, prompt: &str) -> Result<String> {
        let _permit = self.limiter.acquire().await.map_err(|_| {
            SlidegenError::api_error(ApiErrorKind::Unknown, "concurrency limiter closed")
        })?;

        let max_attempts = self.config.max_retries + 1;
        for attempt in 0..max_attempts {
            match self.request_completion(prompt).await {
                Ok(text) => return Ok(text),
                Err(err) if err.is_retryable_transport() && attempt + 1 < max_attempts => {
                    warn!(
                        attempt = attempt + 1,
                        total_attempts = max_attempts,
                        error = %err,
                        "Retryable transport error, backing off"
                    );
                    sleep(RETRY_BACKOFF).await;
                }
                Err(err) => return Err(err),
            }
        }

        // The loop always returns on its last iteration
        unreachable!()
    }
}
