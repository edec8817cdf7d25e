mod builder;
mod instructions;
pub use builder::SchemaBuilder;
pub use instructions::format_instructions;

use serde_json::Value;

/// Schema is a representation of a JSON Schema that describes the structure
/// an LLM should return.
///
/// The schema is a runtime value: it is rendered into natural-language
/// formatting instructions for the prompt, and the same value drives
/// structural validation of the completion.
#[derive(Debug, Clone)]
pub struct Schema {
    pub schema: Value,
}

impl Schema {
    pub fn new(schema: Value) -> Self {
        Self { schema }
    }

    pub fn to_json(&self) -> &Value {
        &self.schema
    }

    pub fn to_string(&self) -> String {
        self.schema.to_string()
    }

    /// Create a schema builder for an object type
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::object()
    }
}
