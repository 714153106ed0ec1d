//! One-shot flash messages carried across a redirect in a cookie.
//!
//! The cookie value is hex-encoded JSON so message text never needs cookie
//! escaping. Reading a flash with [`take`] also expires the cookie, so each
//! message renders exactly once.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: FlashKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: FlashKind::Error, message: message.into() }
    }

    #[must_use]
    pub fn encode(&self) -> String {
        // Serializing a two-field struct of plain strings cannot fail.
        hex::encode(serde_json::to_vec(self).unwrap_or_default())
    }

    /// Decode a cookie value. Tampered or stale values decode to `None`.
    #[must_use]
    pub fn decode(value: &str) -> Option<Self> {
        let bytes = hex::decode(value).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

fn cookie(value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((FLASH_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Queue a flash for the next rendered page.
#[must_use]
pub fn set(jar: CookieJar, flash: &Flash, secure: bool) -> CookieJar {
    jar.add(cookie(flash.encode(), secure))
}

/// Pop the pending flash, if any, returning the jar with the cookie expired.
#[must_use]
pub fn take(jar: CookieJar, secure: bool) -> (CookieJar, Option<Flash>) {
    let Some(value) = jar.get(FLASH_COOKIE).map(|c| c.value().to_owned()) else {
        return (jar, None);
    };

    let mut expired = cookie(String::new(), secure);
    expired.set_max_age(Duration::ZERO);
    (jar.add(expired), Flash::decode(&value))
}

/// Terminal response: set `flash` and send the browser to `to` (303).
#[must_use]
pub fn redirect(jar: CookieJar, flash: &Flash, to: &str, secure: bool) -> Response {
    (set(jar, flash, secure), Redirect::to(to)).into_response()
}

#[cfg(test)]
#[path = "flash_test.rs"]
mod tests;
