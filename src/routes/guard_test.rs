use axum::Router;
use axum::body::Body;
use axum::http::header::{COOKIE, LOCATION};
use axum::http::{HeaderMap, HeaderValue, Request, StatusCode};
use axum::routing::get;
use tower::ServiceExt;

use super::*;
use crate::services::auth::LoginOutcome;
use crate::state::test_helpers::{self, seed_account};

// =============================================================================
// cookies
// =============================================================================

#[test]
fn session_token_reads_cookie() {
    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, HeaderValue::from_static("session_token=abc123; other=x"));
    assert_eq!(session_token(&CookieJar::from_headers(&headers)).as_deref(), Some("abc123"));
}

#[test]
fn session_token_ignores_empty_or_missing() {
    assert!(session_token(&CookieJar::new()).is_none());

    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, HeaderValue::from_static("session_token="));
    assert!(session_token(&CookieJar::from_headers(&headers)).is_none());
}

#[test]
fn session_cookie_attributes() {
    let cookie = session_cookie("tok".into(), time::Duration::hours(2), true);
    assert_eq!(cookie.name(), SESSION_COOKIE);
    assert_eq!(cookie.value(), "tok");
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.secure(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    assert_eq!(cookie.max_age(), Some(time::Duration::hours(2)));
}

#[test]
fn cleared_session_cookie_expires_immediately() {
    let cookie = cleared_session_cookie(false);
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
}

// =============================================================================
// extractors
// =============================================================================

async fn whoami(identity: Identity) -> String {
    identity.0.map(|u| u.username).unwrap_or_default()
}

async fn members_only(Authenticated(user): Authenticated) -> String {
    user.username
}

async fn guests_only(_guest: Guest) -> &'static str {
    "welcome"
}

fn probe_app(state: AppState) -> Router {
    Router::new()
        .route("/whoami", get(whoami))
        .route("/members", get(members_only))
        .route("/guests", get(guests_only))
        .with_state(state)
}

async fn logged_in_state() -> (AppState, String) {
    let (state, store) = test_helpers::test_app_state();
    seed_account(store.as_ref(), "a@b.com", "alice", "abc123").await;
    let LoginOutcome::Success { token, .. } =
        auth::login(store.as_ref(), state.session_ttl, "a@b.com", "abc123").await.unwrap()
    else {
        panic!("expected login success");
    };
    (state, token)
}

fn get_with_cookie(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(COOKIE, format!("{SESSION_COOKIE}={token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn identity_resolves_session_cookie() {
    let (state, token) = logged_in_state().await;
    let response = probe_app(state).oneshot(get_with_cookie("/whoami", Some(&token))).await.unwrap();
    assert_eq!(body_string(response).await, "alice");
}

#[tokio::test]
async fn identity_with_unknown_token_is_anonymous() {
    let (state, _store) = test_helpers::test_app_state();
    let response = probe_app(state).oneshot(get_with_cookie("/whoami", Some("bogus"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "");
}

#[tokio::test]
async fn identity_store_failure_is_500() {
    let state = test_helpers::failing_app_state();
    let response = probe_app(state).oneshot(get_with_cookie("/whoami", Some("tok"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn identity_without_cookie_skips_store() {
    let state = test_helpers::failing_app_state();
    let response = probe_app(state).oneshot(get_with_cookie("/whoami", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn authenticated_passes_with_session() {
    let (state, token) = logged_in_state().await;
    let response = probe_app(state).oneshot(get_with_cookie("/members", Some(&token))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "alice");
}

#[tokio::test]
async fn authenticated_redirects_anonymous_home() {
    let (state, _store) = test_helpers::test_app_state();
    let response = probe_app(state).oneshot(get_with_cookie("/members", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(LOCATION).unwrap(), "/");
}

#[tokio::test]
async fn guest_passes_without_session() {
    let (state, _store) = test_helpers::test_app_state();
    let response = probe_app(state).oneshot(get_with_cookie("/guests", None)).await.unwrap();
    assert_eq!(body_string(response).await, "welcome");
}

#[tokio::test]
async fn guest_redirects_logged_in_home() {
    let (state, token) = logged_in_state().await;
    let response = probe_app(state).oneshot(get_with_cookie("/guests", Some(&token))).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(LOCATION).unwrap(), "/");
}
