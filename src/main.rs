mod config;
mod db;
mod error;
mod flash;
mod routes;
mod services;
mod state;
mod views;

use std::sync::Arc;

use services::memory_store::MemoryAccountStore;
use services::pg_store::PgAccountStore;
use services::store::AccountStore;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::Config::from_env().expect("invalid configuration");

    // Postgres when configured; otherwise accounts live only as long as the process.
    let store: Arc<dyn AccountStore> = match &config.database_url {
        Some(url) => {
            let pool = db::init_pool(url, config.db_max_connections)
                .await
                .expect("database init failed");
            tracing::info!(max_connections = config.db_max_connections, "account store: postgres");
            Arc::new(PgAccountStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory account store");
            Arc::new(MemoryAccountStore::new())
        }
    };

    let state = state::AppState::new(store, &config);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "account gateway listening");
    axum::serve(listener, app).await.expect("server failed");
}
