use axum::http::header::{LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};

use super::*;

fn jar_with_flash(flash: &Flash) -> CookieJar {
    let mut headers = HeaderMap::new();
    let cookie = format!("{FLASH_COOKIE}={}", flash.encode());
    headers.insert(axum::http::header::COOKIE, HeaderValue::from_str(&cookie).unwrap());
    CookieJar::from_headers(&headers)
}

#[test]
fn encode_decode_preserves_message() {
    let flash = Flash::error("Email is already in use.");
    assert_eq!(Flash::decode(&flash.encode()), Some(flash));
}

#[test]
fn encoded_value_is_cookie_safe() {
    let encoded = Flash::success("you may now login; \"quoted\" , ok").encode();
    assert!(encoded.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn decode_rejects_garbage() {
    assert_eq!(Flash::decode("zz"), None);
    assert_eq!(Flash::decode(&hex::encode(b"not json")), None);
    assert_eq!(Flash::decode(""), None);
}

#[test]
fn flash_kind_serializes_lowercase() {
    let json = serde_json::to_value(Flash::success("ok")).unwrap();
    assert_eq!(json["kind"], "success");
    assert_eq!(FlashKind::Error.as_str(), "error");
}

#[test]
fn take_returns_flash_and_expires_cookie() {
    let flash = Flash::success("Successfully Logged Out");
    let (jar, taken) = take(jar_with_flash(&flash), false);

    assert_eq!(taken, Some(flash));
    let cookie = jar.get(FLASH_COOKIE).unwrap();
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age(), Some(Duration::ZERO));
}

#[test]
fn take_without_cookie_is_none() {
    let (jar, taken) = take(CookieJar::new(), false);
    assert!(taken.is_none());
    assert!(jar.get(FLASH_COOKIE).is_none());
}

#[test]
fn take_expires_tampered_cookie() {
    let mut headers = HeaderMap::new();
    headers.insert(axum::http::header::COOKIE, HeaderValue::from_static("flash=nothex"));
    let (jar, taken) = take(CookieJar::from_headers(&headers), false);

    assert!(taken.is_none());
    assert_eq!(jar.get(FLASH_COOKIE).unwrap().max_age(), Some(Duration::ZERO));
}

#[test]
fn redirect_sets_cookie_and_location() {
    let response = redirect(CookieJar::new(), &Flash::error("Invalid access"), "/", true);

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(LOCATION).unwrap(), "/");

    let set_cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(set_cookie.starts_with("flash="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Secure"));

    let value = set_cookie.trim_start_matches("flash=").split(';').next().unwrap();
    assert_eq!(Flash::decode(value), Some(Flash::error("Invalid access")));
}
