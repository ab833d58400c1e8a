/// MongoDB store handle
///
/// This module provides the store handle used by every document operation.
/// The handle owns the driver `Client`, is constructed once at startup from
/// a [`StoreConfig`], and is closed explicitly at shutdown. It replaces any
/// implicit module-level connection state: handlers receive a clone of the
/// handle and never touch a global.
///
/// # Example
///
/// ```no_run
/// use clubroster_shared::db::store::{Store, StoreConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = StoreConfig {
///         uri: "mongodb://127.0.0.1:27017".to_string(),
///         database: "clubroster".to_string(),
///         ..Default::default()
///     };
///
///     let store = Store::connect(config).await?;
///
///     // Use the store
///     store.health_check().await?;
///
///     store.close().await;
///     Ok(())
/// }
/// ```
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use std::time::Duration;
use tracing::{debug, info};

use crate::models::{club::Club, user::User};

/// Errors produced by the store layer
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The driver failed: connectivity, timeouts, malformed writes
    #[error("store driver error: {0}")]
    Driver(#[from] mongodb::error::Error),

    /// The deployment answered the health-check ping with something other
    /// than ok
    #[error("ping returned unexpected value: {0}")]
    UnexpectedPing(f64),
}

/// Configuration for the MongoDB store handle
///
/// Timeouts are specified in seconds for ease of configuration from
/// environment variables.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// MongoDB connection URI (e.g., "mongodb://127.0.0.1:27017")
    pub uri: String,

    /// Name of the database holding the `users` and `clubs` collections
    pub database: String,

    /// Application name reported to the server, visible in server logs
    pub app_name: Option<String>,

    /// How long server selection may take before a connection attempt fails
    /// (seconds)
    ///
    /// Default: 30 seconds. The driver's default is also the timeout applied
    /// to each operation when the server goes away mid-run.
    pub server_selection_timeout_seconds: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://127.0.0.1:27017".to_string(),
            database: "clubroster".to_string(),
            app_name: Some("clubroster".to_string()),
            server_selection_timeout_seconds: 30,
        }
    }
}

/// Handle to the document store
///
/// Cheap to clone: the underlying driver client is reference-counted and
/// multiplexes all requests over its own connection pool.
#[derive(Clone)]
pub struct Store {
    client: Client,
    db: Database,
}

impl Store {
    /// Connects to MongoDB and verifies the deployment is reachable
    ///
    /// This function:
    /// 1. Parses the connection URI and applies the configured timeouts
    /// 2. Builds the client (no I/O yet; the driver connects lazily)
    /// 3. Performs a `ping` health check to verify connectivity
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The connection URI is invalid
    /// - The deployment is unreachable within the server selection timeout
    /// - The health check fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// use clubroster_shared::db::store::{Store, StoreConfig, StoreError};
    ///
    /// # async fn example() -> Result<(), StoreError> {
    /// let config = StoreConfig {
    ///     uri: std::env::var("MONGODB_URI").unwrap(),
    ///     ..Default::default()
    /// };
    ///
    /// let store = Store::connect(config).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(config: StoreConfig) -> Result<Self, StoreError> {
        info!(
            database = %config.database,
            server_selection_timeout_seconds = config.server_selection_timeout_seconds,
            "Connecting to document store"
        );

        let mut options = ClientOptions::parse(&config.uri).await?;
        options.app_name = config.app_name.clone();
        options.server_selection_timeout = Some(Duration::from_secs(
            config.server_selection_timeout_seconds,
        ));

        let client = Client::with_options(options)?;
        let db = client.database(&config.database);

        let store = Self { client, db };
        store.health_check().await?;

        info!("Document store connection established");
        Ok(store)
    }

    /// The `users` collection
    pub fn users(&self) -> Collection<User> {
        self.db.collection::<User>("users")
    }

    /// The `clubs` collection
    pub fn clubs(&self) -> Collection<Club> {
        self.db.collection::<Club>("clubs")
    }

    /// The underlying database handle
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Performs a health check against the store
    ///
    /// Sends a `ping` command to verify the deployment is reachable and
    /// responding.
    ///
    /// # Errors
    ///
    /// Returns an error if the ping command fails or returns an unexpected
    /// value
    pub async fn health_check(&self) -> Result<(), StoreError> {
        debug!("Performing store health check");

        let response = self.db.run_command(doc! { "ping": 1 }).await?;
        let ok = response
            .get_f64("ok")
            .or_else(|_| response.get_i32("ok").map(f64::from))
            .unwrap_or(0.0);

        if ok == 1.0 {
            debug!("Store health check passed");
            Ok(())
        } else {
            Err(StoreError::UnexpectedPing(ok))
        }
    }

    /// Gracefully shuts down the store handle
    ///
    /// This should be called during application shutdown so in-flight
    /// operations complete and the driver's connections are released.
    pub async fn close(self) {
        info!("Closing document store connection");
        self.client.shutdown().await;
        info!("Document store connection closed");
    }
}
