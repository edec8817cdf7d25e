use tracing::{debug, info, instrument, warn};

use crate::backend::TextCompletionService;
use crate::error::{Result, SlidegenError};
use crate::model::Structured;

use super::{SchemaValidatedGenerator, ValidationOutcome};

/// States of a single decoding invocation.
///
/// `Pending → Validated` on a first-pass success; otherwise
/// `Pending → RepairAttempted → Repaired | Failed`. Exactly one repair
/// attempt is permitted, bounding every invocation to at most two
/// completion-service calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeState {
    /// Awaiting validation of the first completion.
    Pending,
    /// First completion validated; terminal success.
    Validated,
    /// First completion failed validation; repair request issued.
    RepairAttempted,
    /// Repair completion validated; terminal success.
    Repaired,
    /// Repair completion also failed validation; terminal failure.
    Failed,
}

/// Wraps a [`SchemaValidatedGenerator`] and gives the pipeline exactly one
/// bounded opportunity to self-correct a schema violation.
///
/// On first-pass validation failure the decoder re-prompts the model with the
/// schema instructions, the invalid output, and the violation list, then
/// validates the corrected completion. Transport errors are never retried
/// here and surface immediately; a transport retry budget, if any, belongs to
/// the [`TextCompletionService`] implementation.
pub struct RepairingDecoder<T: Structured, C: TextCompletionService> {
    generator: SchemaValidatedGenerator<T>,
    client: C,
}

impl<T: Structured, C: TextCompletionService> RepairingDecoder<T, C> {
    pub fn new(generator: SchemaValidatedGenerator<T>, client: C) -> Self {
        Self { generator, client }
    }

    /// The wrapped generator.
    pub fn generator(&self) -> &SchemaValidatedGenerator<T> {
        &self.generator
    }

    /// Generate a decoded value for the topic: prompt construction, first
    /// completion, validation, optional single repair, final validation.
    ///
    /// Errors:
    /// - [`SlidegenError::PromptError`] for an empty topic, before any
    ///   service call;
    /// - [`SlidegenError::ApiError`] (and friends) from the service,
    ///   propagated verbatim from either call;
    /// - [`SlidegenError::RepairFailed`] when both completions fail
    ///   validation, carrying both raw texts and violation lists.
    #[instrument(name = "repairing_decode", skip(self), fields(topic_len = topic.len()))]
    pub async fn generate(&self, topic: &str) -> Result<T> {
        let request = self.generator.build_prompt(topic)?;

        let mut state = DecodeState::Pending;
        debug!(state = ?state, "Dispatching first completion");
        let raw = self.client.complete(&request.rendered_prompt).await?;

        let first_failure = match self.generator.validate(&raw) {
            ValidationOutcome::Valid(decoded) => {
                state = DecodeState::Validated;
                info!(state = ?state, "Completion validated on first pass");
                return Ok(decoded);
            }
            ValidationOutcome::Invalid(failure) => failure,
        };

        state = DecodeState::RepairAttempted;
        warn!(
            state = ?state,
            violations = first_failure.violations.len(),
            "First completion failed validation, issuing repair request"
        );

        let repair_prompt = self.generator.build_repair_prompt(&first_failure);
        let corrected = self.client.complete(&repair_prompt).await?;

        match self.generator.validate(&corrected) {
            ValidationOutcome::Valid(decoded) => {
                state = DecodeState::Repaired;
                info!(state = ?state, "Repair completion validated");
                Ok(decoded)
            }
            ValidationOutcome::Invalid(repair_failure) => {
                state = DecodeState::Failed;
                warn!(
                    state = ?state,
                    violations = repair_failure.violations.len(),
                    "Repair completion also failed validation"
                );
                Err(SlidegenError::RepairFailed {
                    first: first_failure,
                    repair: repair_failure,
                })
            }
        }
    }
}
