use serde_json::json;
use slidegen::{ApiErrorKind, Result, SchemaViolations, SlidegenError};

#[test]
fn test_prompt_error_display() {
    let err = SlidegenError::PromptError("topic must be a non-empty string".to_string());
    assert_eq!(
        format!("{}", err),
        "Prompt error: topic must be a non-empty string"
    );
}

#[test]
fn test_api_error_display_includes_kind() {
    let err = SlidegenError::api_error(ApiErrorKind::RateLimited, "slow down");
    assert_eq!(format!("{}", err), "API error (rate limited): slow down");

    let err = SlidegenError::api_error(ApiErrorKind::ServiceUnavailable, "502");
    assert_eq!(format!("{}", err), "API error (service unavailable): 502");
}

#[test]
fn test_validation_error_display() {
    let err = SlidegenError::ValidationError("Invalid data".to_string());
    assert_eq!(format!("{}", err), "Validation error: Invalid data");
}

#[test]
fn test_schema_error_display() {
    let err = SlidegenError::SchemaError("Invalid schema".to_string());
    assert_eq!(format!("{}", err), "Schema error: Invalid schema");
}

#[test]
fn test_repair_failed_references_both_attempts() {
    let err = SlidegenError::RepairFailed {
        first: SchemaViolations {
            raw: "first raw".to_string(),
            violations: vec!["$: expected array, got string".to_string()],
        },
        repair: SchemaViolations {
            raw: "second raw".to_string(),
            violations: vec!["$[0]: missing required field \"title\"".to_string()],
        },
    };

    let message = format!("{}", err);
    assert!(message.contains("first raw"));
    assert!(message.contains("second raw"));
    assert!(message.contains("expected array"));
    assert!(message.contains("missing required field"));
}

#[test]
fn test_from_json_error() {
    let json_err = serde_json::from_value::<String>(json!(42)).unwrap_err();
    let err: SlidegenError = json_err.into();
    assert!(matches!(err, SlidegenError::JsonError(_)));
}

#[test]
fn test_retryable_transport_kinds() {
    for kind in [
        ApiErrorKind::RateLimited,
        ApiErrorKind::ServiceUnavailable,
        ApiErrorKind::Timeout,
    ] {
        assert!(SlidegenError::api_error(kind, "x").is_retryable_transport());
    }
    for kind in [ApiErrorKind::Unauthorized, ApiErrorKind::Unknown] {
        assert!(!SlidegenError::api_error(kind, "x").is_retryable_transport());
    }
    assert!(!SlidegenError::PromptError("x".to_string()).is_retryable_transport());
    assert!(!SlidegenError::ValidationError("x".to_string()).is_retryable_transport());
}

#[test]
fn test_error_equality() {
    assert_eq!(
        SlidegenError::api_error(ApiErrorKind::Unauthorized, "bad key"),
        SlidegenError::api_error(ApiErrorKind::Unauthorized, "bad key")
    );
    assert_ne!(
        SlidegenError::api_error(ApiErrorKind::Unauthorized, "bad key"),
        SlidegenError::api_error(ApiErrorKind::Unknown, "bad key")
    );
    assert_ne!(
        SlidegenError::PromptError("a".to_string()),
        SlidegenError::ValidationError("a".to_string())
    );
}

#[test]
fn test_result_type() {
    let ok_result: Result<i32> = Ok(42);
    assert_eq!(ok_result, Ok(42));

    let err_result: Result<i32> =
        Err(SlidegenError::ValidationError("test error".to_string()));
    assert!(err_result.is_err());
}
