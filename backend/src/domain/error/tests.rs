//! Tests for domain error construction and serialisation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn base_error() -> Error {
    Error::invalid_request("bad")
}

#[rstest]
#[case::invalid_request(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case::not_found(Error::not_found("missing"), ErrorCode::NotFound)]
#[case::enrichment(Error::enrichment_failed("age lookup failed"), ErrorCode::EnrichmentFailed)]
#[case::internal(Error::internal("boom"), ErrorCode::InternalError)]
fn convenience_constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn new_substitutes_blank_messages() {
    let error = Error::new(ErrorCode::NotFound, "");
    assert_eq!(error.message(), "not found");
}

#[rstest]
fn with_trace_id_ignores_blank_values(base_error: Error) {
    let error = base_error.with_trace_id("abc").with_trace_id(" ");
    assert_eq!(error.trace_id(), Some("abc"));
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::internal("boom") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn serialises_code_under_error_key() {
    let error = Error::not_found("missing").with_details(json!({"id": 7}));
    let value = serde_json::to_value(&error).expect("error serialises");

    assert_eq!(
        value,
        json!({"error": "not_found", "message": "missing", "details": {"id": 7}})
    );
}

#[rstest]
fn serialisation_omits_trace_id_and_empty_details(expected_trace_id: String) {
    let error = Error::invalid_request("bad").with_trace_id(expected_trace_id);
    let value = serde_json::to_value(&error).expect("error serialises");

    assert_eq!(value, json!({"error": "invalid_request", "message": "bad"}));
}

#[rstest]
#[tokio::test]
async fn deserialisation_does_not_capture_ambient_trace(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let payload = json!({"error": "enrichment_failed", "message": "lookup failed"});

    let error = TraceId::scope(trace_id, async move {
        serde_json::from_value::<Error>(payload).expect("payload deserialises")
    })
    .await;

    assert_eq!(error.code(), ErrorCode::EnrichmentFailed);
    assert!(error.trace_id().is_none());
}

#[rstest]
fn deserialisation_rejects_blank_messages() {
    let payload = json!({"error": "not_found", "message": " "});
    assert!(serde_json::from_value::<Error>(payload).is_err());
}
