//! Schema-validated generation: rendering schema-aware prompts and checking
//! raw completions against the declared schema.

mod repair;
pub use repair::{DecodeState, RepairingDecoder};

use std::fmt;
use std::marker::PhantomData;

use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{Result, SlidegenError};
use crate::model::Structured;
use crate::schema::{Schema, format_instructions};

/// A fully-rendered generation request. Built once per invocation and
/// immutable afterwards.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// The caller-supplied topic.
    pub topic: String,
    /// The schema instructions embedded in the prompt.
    pub schema_instructions: String,
    /// The final prompt text sent to the completion service.
    pub rendered_prompt: String,
}

/// The offending raw text of a failed validation together with the
/// human-readable list of schema violations.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaViolations {
    /// The completion text that failed validation.
    pub raw: String,
    /// One entry per violation, each naming the JSON path and the problem.
    pub violations: Vec<String>,
}

impl fmt::Display for SchemaViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} violation(s) [{}] in output: {}",
            self.violations.len(),
            self.violations.join("; "),
            self.raw
        )
    }
}

/// Result of validating a raw completion: either the decoded value or the
/// violations that prevented decoding. Never panics on model output.
#[derive(Debug)]
pub enum ValidationOutcome<T> {
    Valid(T),
    Invalid(SchemaViolations),
}

/// Owns the target schema and a fixed instruction template; renders
/// schema-aware prompts and validates raw completions against the schema.
///
/// The template is fixed at construction time. Validation runs in stages:
/// strip markdown fences, parse as JSON, walk the value against the schema,
/// deserialize into `T`, then apply `T`'s business rules. Each stage reports
/// failures as [`ValidationOutcome::Invalid`] with named violations.
pub struct SchemaValidatedGenerator<T: Structured> {
    template: String,
    schema: Schema,
    instructions: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Structured> SchemaValidatedGenerator<T> {
    /// Create a generator for `T` with the given instruction template.
    pub fn new(template: impl Into<String>) -> Self {
        let schema = T::schema();
        let instructions = format_instructions(&schema);
        Self {
            template: template.into(),
            schema,
            instructions,
            _marker: PhantomData,
        }
    }

    /// The schema completions must conform to.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The rendered schema instructions. Deterministic for a given schema.
    pub fn format_instructions(&self) -> &str {
        &self.instructions
    }

    /// Render the final prompt for a topic.
    ///
    /// Fails with [`SlidegenError::PromptError`] when the topic is empty or
    /// whitespace-only, before any network activity.
    pub fn build_prompt(&self, topic: &str) -> Result<GenerationRequest> {
        if topic.trim().is_empty() {
            return Err(SlidegenError::PromptError(
                "topic must be a non-empty string".to_string(),
            ));
        }

        let rendered_prompt = format!(
            "{}\n\n{}\n\nTopic: {}",
            self.template, self.instructions, topic
        );
        trace!(
            topic,
            prompt_len = rendered_prompt.len(),
            "Rendered generation prompt"
        );

        Ok(GenerationRequest {
            topic: topic.to_string(),
            schema_instructions: self.instructions.clone(),
            rendered_prompt,
        })
    }

    /// Render the repair prompt for a failed validation: the schema
    /// instructions, the invalid completion, and the specific violations,
    /// asking for a corrected response.
    pub fn build_repair_prompt(&self, failure: &SchemaViolations) -> String {
        let mut errors = String::new();
        for violation in &failure.violations {
            errors.push_str("- ");
            errors.push_str(violation);
            errors.push('\n');
        }

        format!(
            "{}\n\nCompletion:\n{}\n\nAbove, the Completion did not satisfy the constraints \
given in the instructions.\nErrors:\n{}\nPlease respond again with a corrected JSON value \
that satisfies every constraint in the instructions. Output only the JSON value.",
            self.instructions, failure.raw, errors
        )
    }

    /// Validate a raw completion against the schema and decode it into `T`.
    pub fn validate(&self, raw: &str) -> ValidationOutcome<T> {
        let stripped = extract_json_from_markdown(raw);

        let value: Value = match serde_json::from_str(&stripped) {
            Ok(value) => value,
            Err(e) => {
                debug!(error = %e, "Completion is not parseable as JSON");
                return ValidationOutcome::Invalid(SchemaViolations {
                    raw: raw.to_string(),
                    violations: vec![format!("$: response is not parseable as JSON: {}", e)],
                });
            }
        };

        let mut violations = Vec::new();
        check_value(self.schema.to_json(), &value, "$", &mut violations);
        if !violations.is_empty() {
            debug!(
                count = violations.len(),
                "Completion violates schema constraints"
            );
            return ValidationOutcome::Invalid(SchemaViolations {
                raw: raw.to_string(),
                violations,
            });
        }

        let decoded: T = match serde_json::from_value(value) {
            Ok(decoded) => decoded,
            Err(e) => {
                debug!(error = %e, "Schema-conforming completion failed to deserialize");
                return ValidationOutcome::Invalid(SchemaViolations {
                    raw: raw.to_string(),
                    violations: vec![format!("$: response does not decode: {}", e)],
                });
            }
        };

        if let Err(e) = decoded.validate() {
            debug!(error = %e, "Decoded value failed business-rule validation");
            let message = match e {
                SlidegenError::ValidationError(msg) => msg,
                other => other.to_string(),
            };
            return ValidationOutcome::Invalid(SchemaViolations {
                raw: raw.to_string(),
                violations: vec![message],
            });
        }

        ValidationOutcome::Valid(decoded)
    }
}

/// Extract JSON from markdown code blocks if present, otherwise return the
/// content as-is. LLM providers routinely wrap JSON responses in
/// ```json ... ``` fences.
fn extract_json_from_markdown(content: &str) -> String {
    let trimmed = content.trim();

    if trimmed.starts_with("```") {
        if let Some(start_idx) = trimmed.find('\n') {
            let after_start = &trimmed[start_idx + 1..];
            if let Some(end_idx) = after_start.rfind("```") {
                return after_start[..end_idx].trim().to_string();
            }
        }
    }

    trimmed.to_string()
}

/// Walk a parsed value against a schema, collecting violations with their
/// JSON paths. Checks types, required fields, array element shapes, and the
/// minItems/minimum constraints this crate's schemas use.
fn check_value(schema: &Value, value: &Value, path: &str, violations: &mut Vec<String>) {
    let Some(expected) = schema["type"].as_str() else {
        return;
    };

    match expected {
        "object" => {
            let Some(object) = value.as_object() else {
                violations.push(format!(
                    "{}: expected object, got {}",
                    path,
                    json_type_name(value)
                ));
                return;
            };

            if let Some(required) = schema["required"].as_array() {
                for field in required.iter().filter_map(Value::as_str) {
                    if !object.contains_key(field) {
                        violations.push(format!(
                            "{}: missing required field \"{}\"",
                            path, field
                        ));
                    }
                }
            }

            if let Some(properties) = schema["properties"].as_object() {
                for (name, property_schema) in properties {
                    if let Some(field_value) = object.get(name) {
                        check_value(
                            property_schema,
                            field_value,
                            &format!("{}.{}", path, name),
                            violations,
                        );
                    }
                }
            }
        }
        "array" => {
            let Some(items) = value.as_array() else {
                violations.push(format!(
                    "{}: expected array, got {}",
                    path,
                    json_type_name(value)
                ));
                return;
            };

            if let Some(min) = schema["minItems"].as_u64()
                && (items.len() as u64) < min
            {
                violations.push(format!(
                    "{}: expected at least {} item(s), got {}",
                    path,
                    min,
                    items.len()
                ));
            }

            let item_schema = &schema["items"];
            if !item_schema.is_null() {
                for (index, item) in items.iter().enumerate() {
                    check_value(item_schema, item, &format!("{}[{}]", path, index), violations);
                }
            }
        }
        "string" => {
            if !value.is_string() {
                violations.push(format!(
                    "{}: expected string, got {}",
                    path,
                    json_type_name(value)
                ));
            }
        }
        "integer" => {
            if !value.is_i64() && !value.is_u64() {
                violations.push(format!(
                    "{}: expected integer, got {}",
                    path,
                    json_type_name(value)
                ));
            } else if let Some(min) = schema["minimum"].as_i64()
                && let Some(v) = value.as_i64()
                && v < min
            {
                violations.push(format!("{}: expected at least {}, got {}", path, min, v));
            }
        }
        "number" => {
            if !value.is_number() {
                violations.push(format!(
                    "{}: expected number, got {}",
                    path,
                    json_type_name(value)
                ));
            }
        }
        "boolean" => {
            if !value.is_boolean() {
                violations.push(format!(
                    "{}: expected boolean, got {}",
                    path,
                    json_type_name(value)
                ));
            }
        }
        _ => {}
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
