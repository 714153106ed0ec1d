//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the account routes under `/users` next to the home page and the
//! health check, with request tracing on every route.

pub mod guard;
pub mod users;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum_extra::extract::cookie::CookieJar;
use tower_http::trace::TraceLayer;

use crate::flash;
use crate::state::AppState;
use crate::views;
use guard::Identity;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/healthz", get(healthz))
        .nest("/users", users::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `GET /`: landing page; shows whatever flash the last redirect left.
async fn home(identity: Identity, State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let (jar, pending) = flash::take(jar, state.cookie_secure);
    (jar, views::home(pending.as_ref(), identity.0.as_ref()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
