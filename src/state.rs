//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the account store behind a trait object plus the handful of auth
//! settings the routes need per request.

use std::sync::Arc;

use crate::config::Config;
use crate::services::store::AccountStore;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; the store is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AccountStore>,
    pub bcrypt_cost: u32,
    pub session_ttl: time::Duration,
    /// Sets the `Secure` attribute on every cookie the gateway issues.
    pub cookie_secure: bool,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn AccountStore>, config: &Config) -> Self {
        Self {
            store,
            bcrypt_cost: config.bcrypt_cost,
            session_ttl: config.session_ttl(),
            cookie_secure: config.cookie_secure,
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
