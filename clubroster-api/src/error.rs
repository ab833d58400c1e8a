/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, ApiError>` which automatically converts
/// to the appropriate HTTP status code.
///
/// The source system mixed two conventions (structured 500 bodies and raw
/// error objects echoed with 200); here everything is folded into one
/// taxonomy: NotFound → 404, StoreFailure → 500, both with an
/// `{error, message}` body.
///
/// # Example
///
/// ```
/// use clubroster_api::error::{ApiError, ApiResult};
/// use axum::Json;
///
/// async fn handler() -> ApiResult<Json<serde_json::Value>> {
///     Err(ApiError::NotFound("no user with that id".to_string()))
/// }
/// ```
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// A referenced user or club does not exist (404)
    NotFound(String),

    /// The document store failed or rejected the operation (500)
    ///
    /// Malformed path ids land here too: there is no input-validation
    /// layer, so an unparseable id surfaces as a store-level failure.
    StoreFailure(String),
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code ("not_found", "store_failure")
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::StoreFailure(msg) => write!(f, "Store failure: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::StoreFailure(msg) => {
                // Log store failures but don't expose internals to clients
                tracing::error!("Store failure: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "store_failure",
                    "A store failure occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Convert store errors to API errors
impl From<clubroster_shared::db::store::StoreError> for ApiError {
    fn from(err: clubroster_shared::db::store::StoreError) -> Self {
        ApiError::StoreFailure(format!("Store error: {}", err))
    }
}

/// Convert ObjectId parse errors to API errors
///
/// Path ids are handed to the store layer unvalidated; a malformed id is a
/// store-level failure, not a 400.
impl From<mongodb::bson::oid::Error> for ApiError {
    fn from(err: mongodb::bson::oid::Error) -> Self {
        ApiError::StoreFailure(format!("Invalid object id: {}", err))
    }
}
