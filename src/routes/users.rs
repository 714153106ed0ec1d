//! Account routes under `/users`: register, login, dashboard, logout.

use axum::Router;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::guard::{self, Authenticated, Guest};
use crate::error::AppError;
use crate::flash::{self, Flash};
use crate::services::auth::{self, LoginOutcome};
use crate::services::registration::{self, RegisterError, RegisterForm};
use crate::state::AppState;
use crate::views;

pub const REGISTER_PATH: &str = "/users/register";
pub const LOGIN_PATH: &str = "/users/login";
pub const DASHBOARD_PATH: &str = "/users/dashboard";

pub const INVALID_DATA: &str = "Data is not valid, Please try again";
pub const EMAIL_IN_USE: &str = "Email is already in use.";
pub const REGISTERED: &str = "you may now login";
pub const LOGGED_OUT: &str = "Successfully Logged Out";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", get(register_form).post(register))
        .route("/login", get(login_form).post(login))
        .route("/dashboard", get(dashboard))
        .route("/logout", get(logout))
}

/// Login form body. `username` is accepted as an alias for `email`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    #[serde(alias = "username")]
    pub email: String,
    pub password: String,
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /users/register`: registration form, guests only.
pub async fn register_form(_guest: Guest, State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let (jar, pending) = flash::take(jar, state.cookie_secure);
    (jar, views::register_form(pending.as_ref()))
}

/// `POST /users/register`: create an account, then send the user to login.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    form: Result<Form<RegisterForm>, FormRejection>,
) -> Result<Response, AppError> {
    let secure = state.cookie_secure;
    let Ok(Form(form)) = form else {
        tracing::info!("registration rejected: unparseable form");
        return Ok(flash::redirect(jar, &Flash::error(INVALID_DATA), REGISTER_PATH, secure));
    };

    match registration::register(state.store.as_ref(), state.bcrypt_cost, form).await {
        Ok(_) => Ok(flash::redirect(jar, &Flash::success(REGISTERED), LOGIN_PATH, secure)),
        Err(RegisterError::Invalid(reason)) => {
            tracing::info!(%reason, "registration rejected");
            Ok(flash::redirect(jar, &Flash::error(INVALID_DATA), REGISTER_PATH, secure))
        }
        Err(RegisterError::EmailInUse) => {
            tracing::info!("registration rejected: email in use");
            Ok(flash::redirect(jar, &Flash::error(EMAIL_IN_USE), REGISTER_PATH, secure))
        }
        Err(RegisterError::Password(e)) => Err(e.into()),
        Err(RegisterError::Store(e)) => Err(e.into()),
    }
}

/// `GET /users/login`: login form, guests only.
pub async fn login_form(_guest: Guest, State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let (jar, pending) = flash::take(jar, state.cookie_secure);
    (jar, views::login_form(pending.as_ref()))
}

/// `POST /users/login`: delegate to the credential strategy. A session the
/// request already carried is ended once the new one is open.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Response, AppError> {
    let secure = state.cookie_secure;
    let form = form.map(|Form(f)| f).unwrap_or_default();

    match auth::login(state.store.as_ref(), state.session_ttl, &form.email, &form.password).await? {
        LoginOutcome::Success { user, token } => {
            if let Some(previous) = guard::session_token(&jar) {
                auth::logout(state.store.as_ref(), &previous).await?;
            }
            tracing::info!(account_id = %user.id, "login succeeded");
            let jar = jar.add(guard::session_cookie(token, state.session_ttl, secure));
            Ok((jar, Redirect::to(DASHBOARD_PATH)).into_response())
        }
        LoginOutcome::Failure(message) => Ok(flash::redirect(jar, &Flash::error(message), LOGIN_PATH, secure)),
    }
}

/// `GET /users/dashboard`: logged-in users only.
pub async fn dashboard(
    Authenticated(user): Authenticated,
    State(state): State<AppState>,
    jar: CookieJar,
) -> impl IntoResponse {
    let (jar, pending) = flash::take(jar, state.cookie_secure);
    (jar, views::dashboard(pending.as_ref(), &user.username))
}

/// `GET /users/logout`: end the session (if any) and go home. Unguarded.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Result<Response, AppError> {
    let secure = state.cookie_secure;
    if let Some(token) = guard::session_token(&jar) {
        auth::logout(state.store.as_ref(), &token).await?;
    }

    let jar = jar.add(guard::cleared_session_cookie(secure));
    Ok(flash::redirect(jar, &Flash::success(LOGGED_OUT), "/", secure))
}

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;
