/// Application state and router builder
///
/// This module defines the shared application state and provides a function
/// to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use clubroster_api::{app::AppState, config::Config};
/// use clubroster_shared::db::store::Store;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let store = Store::connect(config.store_config()).await?;
/// let state = AppState::new(store, config);
/// let app = clubroster_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```
use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use clubroster_shared::db::store::Store;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// The store handle and `Arc<Config>` are both cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Document store handle
    pub store: Store,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(store: Store, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// The route table is carried over verbatim from the service this replaces:
/// ```text
/// /
/// ├── GET    /health            # Health check
/// ├── GET    /                  # List user views
/// ├── GET    /get/:id           # Get one user view
/// ├── POST   /createuser        # Create user (optional club id)
/// ├── PUT    /updateuser/:id    # Update user (optional club name)
/// ├── DELETE /deleteuser/:id    # Delete user
/// ├── GET    /clubs             # List clubs
/// ├── GET    /clubs/:id/users   # List a club's members
/// ├── POST   /createclub        # Create club
/// └── PUT    /updateclub/:id    # Update club scalars
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        // Production mode: configure allowed origins
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE])
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/", get(routes::users::list_users))
        .route("/get/:id", get(routes::users::get_user))
        .route("/createuser", post(routes::users::create_user))
        .route("/updateuser/:id", put(routes::users::update_user))
        .route("/deleteuser/:id", delete(routes::users::delete_user))
        .route("/clubs", get(routes::clubs::list_clubs))
        .route("/clubs/:id/users", get(routes::clubs::list_club_members))
        .route("/createclub", post(routes::clubs::create_club))
        .route("/updateclub/:id", put(routes::clubs::update_club))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
