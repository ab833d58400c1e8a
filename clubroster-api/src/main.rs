//! # Clubroster API Server
//!
//! HTTP/JSON CRUD service over users and clubs, backed by MongoDB. Users
//! optionally belong to a club; the club keeps the mirror reference in its
//! member list, and the handlers maintain both sides.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p clubroster-api
//! ```

use clubroster_api::{
    app::{build_router, AppState},
    config::Config,
};
use clubroster_shared::db::store::Store;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clubroster_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Clubroster API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let store = Store::connect(config.store_config()).await?;

    let state = AppState::new(store.clone(), config.clone());
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("Server listening on http://{}", config.bind_address());

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received, exiting...");
        })
        .await?;

    store.close().await;

    Ok(())
}
