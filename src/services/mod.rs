//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own validation, credential checks and persistence so
//! route handlers can stay focused on redirects, cookies and rendering.

pub mod account;
pub mod auth;
pub mod memory_store;
pub mod password;
pub mod pg_store;
pub mod registration;
pub mod session;
pub mod store;
