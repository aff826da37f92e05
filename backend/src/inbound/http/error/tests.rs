//! Tests for HTTP error mapping.

use super::*;
use crate::domain::{Error, PostingId};
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::{fixture, rstest};
use serde::Deserialize;
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn internal_error_case(expected_trace_id: String) -> Error {
    Error::internal("boom")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"secret": "x"}))
}

#[fixture]
fn invalid_request_case(expected_trace_id: String) -> Error {
    Error::invalid_request("bad")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"field": "skip"}))
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(
    Error::reference_not_found("Posting with ID 3 not found"),
    StatusCode::INTERNAL_SERVER_ERROR
)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn assert_error_response(
    error: Error,
    expected_status: StatusCode,
    expected_trace_id: Option<&str>,
) -> Error {
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), expected_status);

    let header = response.headers().get(TRACE_ID_HEADER);
    match expected_trace_id {
        Some(expected) => {
            let trace_id = header
                .expect("trace-id header is set by error_response")
                .to_str()
                .expect("trace-id not valid UTF-8");
            assert_eq!(trace_id, expected);
        }
        None => assert!(header.is_none(), "trace-id header should not be present"),
    }

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");

    serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds")
}

#[rstest]
#[actix_web::test]
async fn error_responses_include_trace_id_and_payloads(
    #[from(internal_error_case)] internal_error: Error,
    #[from(invalid_request_case)] invalid_request: Error,
    expected_trace_id: String,
) {
    let redacted = assert_error_response(
        internal_error,
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(expected_trace_id.as_str()),
    )
    .await;
    assert_eq!(redacted.code(), ErrorCode::InternalError);
    assert_eq!(redacted.message(), "Internal server error");
    assert!(redacted.details().is_none());

    let payload = assert_error_response(
        invalid_request,
        StatusCode::BAD_REQUEST,
        Some(expected_trace_id.as_str()),
    )
    .await;
    assert_eq!(payload.code(), ErrorCode::InvalidRequest);
    assert_eq!(payload.message(), "bad");
    assert_eq!(payload.details(), Some(&json!({"field": "skip"})));
}

#[rstest]
#[actix_web::test]
async fn missing_reference_keeps_its_message() {
    let error = crate::domain::map_row_store_error(
        crate::domain::ports::RowStoreError::missing_posting(PostingId::new(42)),
    );

    let payload = assert_error_response(error, StatusCode::INTERNAL_SERVER_ERROR, None).await;
    assert_eq!(payload.code(), ErrorCode::ReferenceNotFound);
    assert_eq!(payload.message(), "Posting with ID 42 not found");
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let error = Error::invalid_request("bad").with_details(json!({"field": "limit"}));

    let payload = assert_error_response(error, StatusCode::BAD_REQUEST, None).await;
    assert_eq!(payload.code(), ErrorCode::InvalidRequest);
    assert_eq!(payload.trace_id(), None);
}

#[rstest]
fn from_actix_error_is_redacted_internal_error() {
    let actix_err = actix_web::error::ErrorBadRequest("boom");
    let err: Error = actix_err.into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.details(), None);
}

#[derive(Debug, Deserialize)]
struct Window {
    #[expect(dead_code, reason = "only deserialisation is exercised")]
    skip: u32,
}

#[rstest]
#[actix_web::test]
async fn malformed_query_string_uses_error_envelope() {
    let app = actix_test::init_service(
        App::new().app_data(query_config()).route(
            "/",
            web::get().to(|_: web::Query<Window>| async { HttpResponse::Ok().finish() }),
        ),
    )
    .await;

    let req = actix_test::TestRequest::get().uri("/?skip=minus-one").to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Error = actix_test::read_body_json(res).await;
    assert_eq!(body.code(), ErrorCode::InvalidRequest);
    assert!(body.details().is_some());
}

#[rstest]
#[actix_web::test]
async fn malformed_json_body_uses_error_envelope() {
    let app = actix_test::init_service(
        App::new().app_data(json_config()).route(
            "/",
            web::post().to(|_: web::Json<serde_json::Value>| async { HttpResponse::Ok().finish() }),
        ),
    )
    .await;

    let req = actix_test::TestRequest::post()
        .uri("/")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Error = actix_test::read_body_json(res).await;
    assert_eq!(body.code(), ErrorCode::InvalidRequest);
}
