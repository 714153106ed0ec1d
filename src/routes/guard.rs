//! Request identity and route guards.
//!
//! ARCHITECTURE
//! ============
//! [`Identity`] resolves the session cookie to the logged-in user once per
//! request and caches the result in the request extensions. The two guard
//! extractors build on it:
//! - [`Authenticated`]: passes with the user, otherwise flashes
//!   "Invalid access" and redirects home.
//! - [`Guest`]: passes when nobody is logged in, otherwise flashes
//!   "Already logged in" and redirects home.
//!
//! A guard either yields its value or rejects with a terminal redirect.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::error::AppError;
use crate::flash::{self, Flash};
use crate::services::account::SessionUser;
use crate::services::auth;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "session_token";
pub const INVALID_ACCESS: &str = "Invalid access";
pub const ALREADY_LOGGED_IN: &str = "Already logged in";

// =============================================================================
// SESSION COOKIE
// =============================================================================

/// Raw session token from the request cookies, if present and non-empty.
#[must_use]
pub fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|c| c.value().to_owned())
        .filter(|t| !t.is_empty())
}

#[must_use]
pub fn session_cookie(token: String, ttl: time::Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(ttl)
        .build()
}

#[must_use]
pub fn cleared_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::ZERO)
        .build()
}

// =============================================================================
// EXTRACTORS
// =============================================================================

/// The logged-in user for this request, or `None`.
#[derive(Debug, Clone, Default)]
pub struct Identity(pub Option<SessionUser>);

impl Identity {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

impl<S> FromRequestParts<S> for Identity
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(identity) = parts.extensions.get::<Identity>() {
            return Ok(identity.clone());
        }

        let jar = CookieJar::from_headers(&parts.headers);
        let user = match session_token(&jar) {
            Some(token) => {
                let app_state = AppState::from_ref(state);
                auth::current_user(app_state.store.as_ref(), &token).await?
            }
            None => None,
        };

        let identity = Self(user);
        parts.extensions.insert(identity.clone());
        Ok(identity)
    }
}

/// Guard: the request must carry a live session.
pub struct Authenticated(pub SessionUser);

impl<S> FromRequestParts<S> for Authenticated
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let identity = Identity::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        match identity.0 {
            Some(user) => Ok(Self(user)),
            None => {
                let secure = AppState::from_ref(state).cookie_secure;
                Err(flash::redirect(CookieJar::new(), &Flash::error(INVALID_ACCESS), "/", secure))
            }
        }
    }
}

/// Guard: the request must NOT carry a live session.
pub struct Guest;

impl<S> FromRequestParts<S> for Guest
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let identity = Identity::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        if identity.is_authenticated() {
            let secure = AppState::from_ref(state).cookie_secure;
            return Err(flash::redirect(CookieJar::new(), &Flash::error(ALREADY_LOGGED_IN), "/", secure));
        }
        Ok(Self)
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
