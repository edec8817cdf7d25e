use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::schema::Schema;

/// The `Structured` trait combines schema description, serialization, and
/// validation for types decoded from LLM completions.
///
/// `schema()` returns the runtime schema value that is both rendered into
/// prompt instructions and used to validate raw completions. Implementations
/// build it by hand with [`SchemaBuilder`](crate::SchemaBuilder).
///
/// # Validation
///
/// The `validate` method is called automatically after a completion has been
/// parsed and structurally checked, allowing domain-specific rules beyond
/// what type checking provides. The default implementation does nothing.
///
/// ```
/// use slidegen::{Structured, Schema, SchemaBuilder, SlidegenError};
/// use serde::{Serialize, Deserialize};
/// use serde_json::json;
///
/// #[derive(Serialize, Deserialize, Debug)]
/// struct Chapter {
///     heading: String,
///     page: u32,
/// }
///
/// impl Structured for Chapter {
///     fn schema() -> Schema {
///         SchemaBuilder::object()
///             .property("heading", json!({ "type": "string" }), true)
///             .property("page", json!({ "type": "integer", "minimum": 1 }), true)
///             .build()
///     }
///
///     fn validate(&self) -> slidegen::Result<()> {
///         if self.heading.trim().is_empty() {
///             return Err(SlidegenError::ValidationError(
///                 "chapter heading cannot be empty".to_string(),
///             ));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Structured: DeserializeOwned + Serialize {
    /// The schema a completion must conform to in order to decode into Self.
    fn schema() -> Schema;

    /// Optional name for the schema
    fn schema_name() -> Option<String> {
        None
    }

    /// Optional validation logic beyond type checking
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}
