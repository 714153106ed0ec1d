//! Generic handler for unexpected failures.
//!
//! User-facing problems (bad input, duplicate email, wrong password) never
//! reach this type; they are flashed and redirected by the routes. Anything
//! that lands here is logged and answered with a bare 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::services::auth::AuthError;
use crate::services::password::PasswordError;
use crate::services::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("store failure: {0}")]
    Store(#[from] StoreError),
    #[error("password hashing failure: {0}")]
    Password(#[from] PasswordError),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Store(e) => Self::Store(e),
            AuthError::Password(e) => Self::Password(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong. Please try again later.").into_response()
    }
}
