use axum::Router;
use axum::body::Body;
use axum::http::{HeaderValue, StatusCode};
use axum::routing::get;
use tower::ServiceExt;

use super::*;
use crate::state::test_helpers::{ann, failing_app_state, test_app_state};

fn headers_with(value: HeaderValue) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, value);
    headers
}

// =============================================================================
// bearer_credential
// =============================================================================

#[test]
fn bearer_credential_extracts_token() {
    let headers = headers_with(HeaderValue::from_static("Bearer valid-token"));
    assert_eq!(bearer_credential(&headers).unwrap(), "valid-token");
}

#[test]
fn bearer_credential_missing_header_is_unauthorized() {
    let err = bearer_credential(&HeaderMap::new()).unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
}

#[test]
fn bearer_credential_wrong_scheme_is_unauthorized() {
    let headers = headers_with(HeaderValue::from_static("Basic dXNlcjpwYXNz"));
    assert!(matches!(bearer_credential(&headers), Err(ApiError::Unauthorized)));
}

#[test]
fn bearer_credential_blank_token_is_unauthorized() {
    let headers = headers_with(HeaderValue::from_static("Bearer "));
    assert!(matches!(bearer_credential(&headers), Err(ApiError::Unauthorized)));
}

#[test]
fn bearer_credential_non_ascii_header_is_unauthorized() {
    let headers = headers_with(HeaderValue::from_bytes(b"Bearer \x80\x81").unwrap());
    assert!(matches!(bearer_credential(&headers), Err(ApiError::Unauthorized)));
}

// =============================================================================
// require_identity + CurrentIdentity
// =============================================================================

async fn whoami(CurrentIdentity(identity): CurrentIdentity) -> String {
    identity.email
}

fn guarded(state: AppState) -> Router {
    Router::new()
        .route("/whoami", get(whoami))
        .route_layer(axum::middleware::from_fn_with_state(state.clone(), require_identity))
        .with_state(state)
}

async fn call(router: Router, authorization: Option<&str>) -> (StatusCode, String) {
    let mut builder = axum::http::Request::builder().uri("/whoami");
    if let Some(value) = authorization {
        builder = builder.header(AUTHORIZATION, value);
    }
    let response = router.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn guard_attaches_identity_for_valid_token() {
    let (status, body) = call(guarded(test_app_state()), Some("Bearer valid-token")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, ann().email);
}

#[tokio::test]
async fn guard_rejects_missing_credential() {
    let (status, body) = call(guarded(test_app_state()), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"unauthorized"}"#);
}

#[tokio::test]
async fn guard_rejects_expired_credential() {
    let (status, body) = call(guarded(test_app_state()), Some("Bearer expired-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(!body.contains("ann@x.com"));
}

#[tokio::test]
async fn guard_rejects_unknown_credential() {
    let (status, _) = call(guarded(test_app_state()), Some("Bearer forged-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn guard_surfaces_resolver_failure_as_internal_error() {
    let (status, body) = call(guarded(failing_app_state()), Some("Bearer valid-token")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, r#"{"error":"internal"}"#);
}
