//! Domain entities for generated slide decks.
//!
//! A deck is an ordered sequence of [`Presentation`]s, each holding an ordered
//! sequence of [`Slide`]s. Wire field names are camelCase; the schema returned
//! by [`Structured::schema`] is the same value that gets rendered into the
//! prompt instructions.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::backend::TextCompletionService;
use crate::error::{Result, SlidegenError};
use crate::generator::{RepairingDecoder, SchemaValidatedGenerator};
use crate::model::Structured;
use crate::schema::{Schema, SchemaBuilder};

/// Fixed instruction template for presentation generation.
///
/// The slide count and the closing Conclusion slide are best-effort
/// instructions: the schema does not enforce them (see DESIGN.md).
pub const DECK_PROMPT_TEMPLATE: &str = "You are an expert-level presentation writer with expertise in various subject matters.\n\
Create the best possible presentation about the requested topic.\n\
You are an expert on the topic.\n\
Create exactly 30 slides.\n\
3 sentences of content per slide.\n\
The last slide is the Conclusion.";

/// A single slide in a presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// The title of the slide
    pub slide_title: String,
    /// The content of the slide
    pub content: String,
    /// The slide number, starting at 1
    pub slide_number: u32,
}

/// A generated presentation: a title and an ordered list of slides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Presentation {
    /// The title of the presentation
    pub title: String,
    /// The slides of the presentation, in display order
    pub slides: Vec<Slide>,
}

impl Structured for Slide {
    fn schema() -> Schema {
        SchemaBuilder::object()
            .title("Slide")
            .description("A single slide in the presentation")
            .property(
                "slideTitle",
                json!({
                    "type": "string",
                    "description": "The title of the slide"
                }),
                true,
            )
            .property(
                "content",
                json!({
                    "type": "string",
                    "description": "The content of the slide"
                }),
                true,
            )
            .property(
                "slideNumber",
                json!({
                    "type": "integer",
                    "description": "The slide number",
                    "minimum": 1
                }),
                true,
            )
            .build()
    }

    fn schema_name() -> Option<String> {
        Some("Slide".to_string())
    }

    fn validate(&self) -> Result<()> {
        if self.slide_number == 0 {
            return Err(SlidegenError::ValidationError(format!(
                "slideNumber must be a positive integer, got {}",
                self.slide_number
            )));
        }
        Ok(())
    }
}

impl Structured for Presentation {
    fn schema() -> Schema {
        SchemaBuilder::object()
            .title("Presentation")
            .description("A slide-deck presentation")
            .property(
                "title",
                json!({
                    "type": "string",
                    "description": "The title of the presentation"
                }),
                true,
            )
            .property(
                "slides",
                SchemaBuilder::array(Slide::schema().schema)
                    .description(
                        "An array of Slides, each representing a slide in the presentation",
                    )
                    .min_items(1)
                    .build()
                    .schema,
                true,
            )
            .build()
    }

    fn schema_name() -> Option<String> {
        Some("Presentation".to_string())
    }

    fn validate(&self) -> Result<()> {
        if self.slides.is_empty() {
            return Err(SlidegenError::ValidationError(format!(
                "presentation \"{}\" must contain at least one slide",
                self.title
            )));
        }
        for slide in &self.slides {
            slide.validate()?;
        }
        Ok(())
    }
}

/// The full output shape: an ordered sequence of presentations.
impl Structured for Vec<Presentation> {
    fn schema() -> Schema {
        SchemaBuilder::array(Presentation::schema().schema)
            .description("An array of presentations")
            .build()
    }

    fn schema_name() -> Option<String> {
        Some("PresentationDeck".to_string())
    }

    fn validate(&self) -> Result<()> {
        for presentation in self {
            presentation.validate()?;
        }
        Ok(())
    }
}

/// Build a [`SchemaValidatedGenerator`] wired with the fixed presentation
/// template and deck schema.
pub fn deck_generator() -> SchemaValidatedGenerator<Vec<Presentation>> {
    SchemaValidatedGenerator::new(DECK_PROMPT_TEMPLATE)
}

/// Build a [`RepairingDecoder`] producing presentation decks through the
/// given completion service.
///
/// ```no_run
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// use slidegen::{OpenAIClient, deck::deck_decoder};
///
/// let client = OpenAIClient::from_env()?.build();
/// let decoder = deck_decoder(client);
/// let deck = decoder.generate("Dota 2").await?;
/// println!("{}", serde_json::to_string_pretty(&deck)?);
/// # Ok(())
/// # }
/// ```
pub fn deck_decoder<C: TextCompletionService>(client: C) -> RepairingDecoder<Vec<Presentation>, C> {
    RepairingDecoder::new(deck_generator(), client)
}
