//! Construction, redaction, and wire format of [`Error`].

use super::*;
use rstest::rstest;
use serde_json::json;

const UPSTREAM_TRACE: &str = "4d2b1f0e-8c3a-4e7b-9f61-0a5c2d7e9b13";

#[rstest]
#[case(
    Error::invalid_request("category must be one of book, album, movie"),
    ErrorCode::InvalidRequest
)]
#[case(Error::unauthorized("login required"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("not yours"), ErrorCode::Forbidden)]
#[case(Error::not_found("work not found"), ErrorCode::NotFound)]
#[case(Error::conflict("username ada is already taken"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("store unreachable"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("corrupt vote row"), ErrorCode::InternalError)]
fn constructors_carry_their_code(#[case] error: Error, #[case] code: ErrorCode) {
    assert_eq!(error.code(), code);
    assert!(!error.message().trim().is_empty());
}

#[rstest]
#[case(ErrorCode::NotFound, "not found")]
#[case(ErrorCode::Unauthorized, "authentication required")]
#[case(ErrorCode::ServiceUnavailable, "service unavailable")]
fn blank_message_is_replaced_rather_than_panicking(
    #[case] code: ErrorCode,
    #[case] expected: &str,
) {
    assert_eq!(Error::new(code, "\t ").message(), expected);
}

#[rstest]
fn strict_constructors_reject_blank_input() {
    assert!(matches!(
        Error::try_new(ErrorCode::Conflict, ""),
        Err(ErrorValidationError::EmptyMessage)
    ));
    assert!(matches!(
        Error::not_found("gone").try_with_trace_id("  "),
        Err(ErrorValidationError::EmptyTraceId)
    ));
}

#[tokio::test]
async fn trace_id_is_captured_only_inside_a_request_scope() {
    assert_eq!(Error::not_found("work not found").trace_id(), None);

    let trace_id: TraceId = UPSTREAM_TRACE.parse().expect("valid UUID");
    let scoped = TraceId::scope(trace_id, async { Error::not_found("work not found") }).await;
    assert_eq!(scoped.trace_id(), Some(UPSTREAM_TRACE));
}

#[rstest]
fn internal_errors_are_redacted_for_clients() {
    let error = Error::internal("diesel: relation \"votes\" does not exist")
        .try_with_trace_id(UPSTREAM_TRACE)
        .expect("trace id")
        .with_details(json!({"sql": "SELECT 1"}));

    let shown = error.redacted();

    assert_eq!(shown.message(), "Internal server error");
    assert_eq!(shown.details(), None);
    assert_eq!(shown.trace_id(), Some(UPSTREAM_TRACE));
}

#[rstest]
fn validation_errors_keep_their_violations() {
    let error = Error::invalid_request("work is invalid").with_details(json!({
        "violations": [{"field": "title", "code": "blank_title"}]
    }));
    assert_eq!(error.redacted(), error);
}

#[rstest]
fn wire_format_is_camel_case_without_empty_fields() {
    let value = serde_json::to_value(Error::conflict("username ada is already taken"))
        .expect("serialise");
    assert_eq!(
        value,
        json!({"code": "conflict", "message": "username ada is already taken"})
    );

    let parsed: Result<Error, _> =
        serde_json::from_value(json!({"code": "not_found", "message": " ", "traceId": "x"}));
    assert!(parsed.is_err());
}
