/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test store setup against an isolated, per-context database
/// - Router construction with real application state
/// - Request helpers driving the router through `tower::Service`
///
/// Tests that cannot reach a MongoDB deployment skip themselves; see
/// [`TestContext::try_new`].
use axum::body::Body;
use axum::http::{Request, StatusCode};
use clubroster_api::app::{build_router, AppState};
use clubroster_api::config::{ApiConfig, Config, StoreSettings};
use clubroster_shared::db::store::{Store, StoreConfig};
use mongodb::bson::oid::ObjectId;
use tower::Service as _;

/// Test context containing the store and the router under test
pub struct TestContext {
    pub store: Store,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a test context against a fresh, uniquely named database
    ///
    /// Returns None when MONGODB_URI is not set so the suite stays green on
    /// machines without a store.
    pub async fn try_new() -> Option<Self> {
        let Ok(uri) = std::env::var("MONGODB_URI") else {
            eprintln!("MONGODB_URI not set, skipping");
            return None;
        };

        let database = format!("clubroster_api_test_{}", ObjectId::new().to_hex());

        let store = Store::connect(StoreConfig {
            uri: uri.clone(),
            database: database.clone(),
            ..Default::default()
        })
        .await
        .expect("Failed to connect to test store");

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            store: StoreSettings { uri, database },
        };

        let state = AppState::new(store.clone(), config);
        let app = build_router(state);

        Some(TestContext { store, app })
    }

    /// Drops the per-context database and closes the store
    pub async fn cleanup(self) {
        self.store
            .database()
            .drop()
            .await
            .expect("Failed to drop test database");
        self.store.close().await;
    }

    /// Sends a request with no body and returns (status, parsed body)
    pub async fn request(&mut self, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        self.send(request).await
    }

    /// Sends a request with a JSON body and returns (status, parsed body)
    pub async fn request_json(
        &mut self,
        method: &str,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.send(request).await
    }

    async fn send(&mut self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.app.call(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };

        (status, body)
    }
}

/// Creates a club through the API, returning its parsed record
pub async fn create_club(ctx: &mut TestContext, name: &str) -> serde_json::Value {
    let (status, body) = ctx
        .request_json(
            "POST",
            "/createclub",
            serde_json::json!({
                "clubName": name,
                "description": format!("{} description", name),
                "numberOfMembers": 0,
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK, "create club failed: {}", body);
    body
}

/// Creates a user through the API, returning its parsed record
pub async fn create_user(
    ctx: &mut TestContext,
    name: &str,
    club_id: Option<&str>,
) -> serde_json::Value {
    let mut payload = serde_json::json!({
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "age": 30,
        "position": "midfield",
    });
    if let Some(club_id) = club_id {
        payload["club"] = serde_json::Value::String(club_id.to_string());
    }

    let (status, body) = ctx.request_json("POST", "/createuser", payload).await;

    assert_eq!(status, StatusCode::OK, "create user failed: {}", body);
    body
}

/// Fetches a club record by id via GET /clubs
pub async fn find_club(ctx: &mut TestContext, club_id: &str) -> serde_json::Value {
    let (status, body) = ctx.request("GET", "/clubs").await;
    assert_eq!(status, StatusCode::OK);

    body.as_array()
        .unwrap()
        .iter()
        .find(|club| club["id"] == club_id)
        .cloned()
        .unwrap_or(serde_json::Value::Null)
}
