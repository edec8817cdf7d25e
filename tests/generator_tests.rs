mod common;

use slidegen::deck::{DECK_PROMPT_TEMPLATE, Presentation, deck_generator};
use slidegen::{SlidegenError, ValidationOutcome};

use common::deck_json;

fn expect_invalid(raw: &str) -> slidegen::SchemaViolations {
    match deck_generator().validate(raw) {
        ValidationOutcome::Invalid(failure) => failure,
        ValidationOutcome::Valid(deck) => panic!("expected invalid outcome, decoded {:?}", deck),
    }
}

#[test]
fn test_build_prompt_contains_template_instructions_and_topic() {
    let generator = deck_generator();
    let request = generator.build_prompt("Dota 2").unwrap();

    assert_eq!(request.topic, "Dota 2");
    assert!(request.rendered_prompt.contains(DECK_PROMPT_TEMPLATE));
    assert!(request.rendered_prompt.contains(&request.schema_instructions));
    assert!(request.rendered_prompt.contains("Dota 2"));
    // Template precedes instructions, topic comes last
    let template_pos = request.rendered_prompt.find("expert-level").unwrap();
    let topic_pos = request.rendered_prompt.rfind("Dota 2").unwrap();
    assert!(template_pos < topic_pos);
}

#[test]
fn test_build_prompt_rejects_empty_topic() {
    let generator = deck_generator();
    for topic in ["", "   ", "\n\t"] {
        match generator.build_prompt(topic) {
            Err(SlidegenError::PromptError(msg)) => {
                assert!(msg.contains("non-empty"), "unexpected message: {}", msg)
            }
            other => panic!("expected PromptError for {:?}, got {:?}", topic, other.err()),
        }
    }
}

#[test]
fn test_validate_accepts_well_formed_deck_and_round_trips() {
    let raw = deck_json("Dota 2", 3);
    let generator = deck_generator();

    let deck = match generator.validate(&raw) {
        ValidationOutcome::Valid(deck) => deck,
        ValidationOutcome::Invalid(failure) => panic!("expected valid outcome: {}", failure),
    };

    assert_eq!(deck.len(), 1);
    assert_eq!(deck[0].title, "Dota 2");
    assert_eq!(deck[0].slides.len(), 3);
    assert_eq!(deck[0].slides[2].slide_title, "Conclusion");
    assert_eq!(deck[0].slides[2].slide_number, 3);

    // Structural round-trip: decode then re-encode preserves every field
    let reencoded = serde_json::to_value(&deck).unwrap();
    let original: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(reencoded, original);
}

#[test]
fn test_validate_accepts_markdown_fenced_json() {
    let raw = format!("```json\n{}\n```", deck_json("Rust", 2));
    match deck_generator().validate(&raw) {
        ValidationOutcome::Valid(deck) => assert_eq!(deck[0].title, "Rust"),
        ValidationOutcome::Invalid(failure) => panic!("expected valid outcome: {}", failure),
    }
}

#[test]
fn test_validate_rejects_non_json_text() {
    let failure = expect_invalid("not json");
    assert_eq!(failure.raw, "not json");
    assert_eq!(failure.violations.len(), 1);
    assert!(failure.violations[0].contains("not parseable as JSON"));
}

#[test]
fn test_validate_rejects_empty_string() {
    let failure = expect_invalid("");
    assert!(failure.violations[0].contains("not parseable as JSON"));
}

#[test]
fn test_validate_rejects_truncated_json() {
    let failure = expect_invalid("[{\"title\": \"Dota 2\", \"slides\": [");
    assert!(failure.violations[0].contains("not parseable as JSON"));
}

#[test]
fn test_validate_rejects_wrong_outer_shape() {
    // A single object where an array of presentations is expected
    let failure = expect_invalid("{\"title\": \"Dota 2\", \"slides\": []}");
    assert!(failure.violations.iter().any(|v| v.contains("expected array")));
}

#[test]
fn test_validate_rejects_slides_as_strings() {
    let failure =
        expect_invalid("[{\"title\": \"Dota 2\", \"slides\": [\"intro\", \"history\"]}]");
    assert!(
        failure
            .violations
            .iter()
            .any(|v| v.contains("$[0].slides[0]") && v.contains("expected object")),
        "violations: {:?}",
        failure.violations
    );
}

#[test]
fn test_validate_names_missing_field_and_index() {
    let raw = r#"[{"title": "Dota 2", "slides": [
        {"slideTitle": "Intro", "content": "Hello.", "slideNumber": 1},
        {"slideTitle": "History", "slideNumber": 2}
    ]}]"#;
    let failure = expect_invalid(raw);
    assert!(
        failure
            .violations
            .iter()
            .any(|v| v.contains("$[0].slides[1]") && v.contains("\"content\"")),
        "violations: {:?}",
        failure.violations
    );
}

#[test]
fn test_validate_names_wrong_type() {
    let raw = r#"[{"title": "Dota 2", "slides": [
        {"slideTitle": "Intro", "content": "Hello.", "slideNumber": "one"}
    ]}]"#;
    let failure = expect_invalid(raw);
    assert!(
        failure
            .violations
            .iter()
            .any(|v| v.contains("slideNumber") && v.contains("expected integer")),
        "violations: {:?}",
        failure.violations
    );
}

#[test]
fn test_validate_rejects_empty_slide_list() {
    let failure = expect_invalid("[{\"title\": \"Dota 2\", \"slides\": []}]");
    assert!(
        failure
            .violations
            .iter()
            .any(|v| v.contains("at least 1 item")),
        "violations: {:?}",
        failure.violations
    );
}

#[test]
fn test_validate_rejects_zero_slide_number() {
    let raw = r#"[{"title": "Dota 2", "slides": [
        {"slideTitle": "Intro", "content": "Hello.", "slideNumber": 0}
    ]}]"#;
    let failure = expect_invalid(raw);
    assert!(
        failure
            .violations
            .iter()
            .any(|v| v.contains("slideNumber") && v.contains("at least 1")),
        "violations: {:?}",
        failure.violations
    );
}

#[test]
fn test_repair_prompt_carries_failure_context() {
    let generator = deck_generator();
    let failure = expect_invalid("not json");

    let repair_prompt = generator.build_repair_prompt(&failure);
    assert!(repair_prompt.contains(generator.format_instructions()));
    assert!(repair_prompt.contains("not json"));
    assert!(repair_prompt.contains(&failure.violations[0]));
    assert!(repair_prompt.contains("did not satisfy"));
}

#[test]
fn test_format_instructions_describe_deck_fields() {
    let generator = deck_generator();
    let instructions = generator.format_instructions();
    for field in ["title", "slides", "slideTitle", "content", "slideNumber"] {
        assert!(
            instructions.contains(field),
            "missing {} in instructions",
            field
        );
    }
}

#[test]
fn test_multiple_presentations_decode_in_order() {
    let raw = format!(
        "[{},{}]",
        deck_json("First", 1).trim_start_matches('[').trim_end_matches(']'),
        deck_json("Second", 1).trim_start_matches('[').trim_end_matches(']'),
    );
    let deck: Vec<Presentation> = match deck_generator().validate(&raw) {
        ValidationOutcome::Valid(deck) => deck,
        ValidationOutcome::Invalid(failure) => panic!("expected valid outcome: {}", failure),
    };
    assert_eq!(deck.len(), 2);
    assert_eq!(deck[0].title, "First");
    assert_eq!(deck[1].title, "Second");
}
