/// Store layer for clubroster
///
/// This module provides the MongoDB store handle used by all document
/// operations.
///
/// # Modules
///
/// - `store`: Store handle with connect/close lifecycle and health checks
/// - Models are in the `models` module at crate root level
///
/// # Example
///
/// ```no_run
/// use clubroster_shared::db::store::{Store, StoreConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = StoreConfig {
///         uri: std::env::var("MONGODB_URI")?,
///         ..Default::default()
///     };
///
///     let store = Store::connect(config).await?;
///     store.close().await;
///     Ok(())
/// }
/// ```
pub mod store;
