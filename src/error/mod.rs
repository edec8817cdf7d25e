use thiserror::Error;

use crate::generator::SchemaViolations;

/// Categories of transport failure reported by a [`TextCompletionService`]
/// implementation.
///
/// [`TextCompletionService`]: crate::TextCompletionService
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The provider rejected the request due to rate limiting (HTTP 429).
    RateLimited,
    /// The API key was missing, invalid, or lacked permission (HTTP 401/403).
    Unauthorized,
    /// The request timed out, either client-side or at the provider (HTTP 408).
    Timeout,
    /// The provider was unavailable or failed internally (HTTP 5xx).
    ServiceUnavailable,
    /// Any other transport-level failure.
    Unknown,
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ApiErrorKind::RateLimited => "rate limited",
            ApiErrorKind::Unauthorized => "unauthorized",
            ApiErrorKind::Timeout => "timeout",
            ApiErrorKind::ServiceUnavailable => "service unavailable",
            ApiErrorKind::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// Error types for the slidegen library.
///
/// Each variant represents a different failure category so a caller can tell
/// apart a prompt-design fault, a transport fault, and a model that would not
/// follow the schema even after the repair pass.
///
/// # Examples
///
/// ```
/// use slidegen::{SlidegenError, Result};
///
/// fn check_topic(topic: &str) -> Result<()> {
///     if topic.trim().is_empty() {
///         return Err(SlidegenError::PromptError("topic is empty".into()));
///     }
///     Ok(())
/// }
///
/// match check_topic("") {
///     Err(SlidegenError::PromptError(msg)) => println!("bad prompt: {}", msg),
///     other => println!("unexpected: {:?}", other),
/// }
/// ```
#[derive(Error, Debug)]
pub enum SlidegenError {
    /// The prompt could not be constructed (empty topic, bad template).
    /// Detected before any network call and never retried.
    #[error("Prompt error: {0}")]
    PromptError(String),

    /// Error returned by the completion provider, with a typed kind.
    #[error("API error ({kind}): {message}")]
    ApiError { kind: ApiErrorKind, message: String },

    /// A completion failed schema or business-rule validation.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error related to schema construction or processing.
    #[error("Schema error: {0}")]
    SchemaError(String),

    /// Both the original completion and the repair completion failed
    /// validation. Carries both raw texts and violation lists for debugging.
    #[error(
        "Generation failed after repair attempt: first attempt: {first}; repair attempt: {repair}"
    )]
    RepairFailed {
        first: SchemaViolations,
        repair: SchemaViolations,
    },

    /// HTTP client error (from reqwest)
    #[cfg(feature = "openai")]
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error (from serde_json)
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl SlidegenError {
    /// Shorthand for an [`ApiError`](SlidegenError::ApiError) with the given kind.
    pub fn api_error(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        SlidegenError::ApiError {
            kind,
            message: message.into(),
        }
    }

    /// Whether a transport retry could plausibly help.
    ///
    /// Only rate limits, provider outages, and timeouts qualify; everything
    /// else fails the same way on a second attempt.
    pub fn is_retryable_transport(&self) -> bool {
        matches!(
            self,
            SlidegenError::ApiError {
                kind: ApiErrorKind::RateLimited
                    | ApiErrorKind::ServiceUnavailable
                    | ApiErrorKind::Timeout,
                ..
            }
        )
    }
}

// Manual implementation of PartialEq for SlidegenError
// Note: HttpError and JsonError variants are considered unequal
// because reqwest::Error and serde_json::Error don't implement PartialEq
impl PartialEq for SlidegenError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::PromptError(a), Self::PromptError(b)) => a == b,
            (
                Self::ApiError {
                    kind: ka,
                    message: ma,
                },
                Self::ApiError {
                    kind: kb,
                    message: mb,
                },
            ) => ka == kb && ma == mb,
            (Self::ValidationError(a), Self::ValidationError(b)) => a == b,
            (Self::SchemaError(a), Self::SchemaError(b)) => a == b,
            (
                Self::RepairFailed {
                    first: fa,
                    repair: ra,
                },
                Self::RepairFailed {
                    first: fb,
                    repair: rb,
                },
            ) => fa == fb && ra == rb,
            _ => false,
        }
    }
}

/// A specialized Result type for slidegen operations.
///
/// Used throughout the library to return either a success value of type T or
/// a [`SlidegenError`].
pub type Result<T> = std::result::Result<T, SlidegenError>;
