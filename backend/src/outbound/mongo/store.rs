//! Shared document-store handle.
//!
//! Wraps the MongoDB client (which pools connections internally) and hands
//! out one untyped collection per repository. Construction validates the URI
//! but does not wait for a server; readiness is probed separately with
//! [`DocumentStore::ping`].

use std::time::Duration;

use mongodb::bson::{Document, doc};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use tracing::{info, warn};

/// Errors raised while building or probing the store handle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The connection string or client options were rejected.
    #[error("failed to configure document store client: {message}")]
    Configure { message: String },

    /// The server could not be reached.
    #[error("document store unreachable: {message}")]
    Unreachable { message: String },
}

impl StoreError {
    pub fn configure(message: impl Into<String>) -> Self {
        Self::Configure {
            message: message.into(),
        }
    }

    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable {
            message: message.into(),
        }
    }
}

/// Connection settings for the document store.
///
/// # Example
///
/// ```ignore
/// let config = StoreConfig::new("mongodb://localhost:27017", "food_donation")
///     .with_server_selection_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    uri: String,
    database: String,
    server_selection_timeout: Duration,
}

impl StoreConfig {
    /// Create a configuration for `database` at `uri`.
    ///
    /// Defaults `server_selection_timeout` to 10 seconds so a missing server
    /// fails requests quickly instead of hanging for the driver default.
    pub fn new(uri: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
            server_selection_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_server_selection_timeout(mut self, timeout: Duration) -> Self {
        self.server_selection_timeout = timeout;
        self
    }

    /// Name of the database holding every collection.
    pub fn database(&self) -> &str {
        &self.database
    }
}

/// Handle to the application database.
#[derive(Clone)]
pub struct DocumentStore {
    database: Database,
}

impl DocumentStore {
    /// Build a client for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Configure`] when the URI cannot be parsed or the
    /// client cannot be constructed.
    pub async fn connect(config: StoreConfig) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|err| StoreError::configure(err.to_string()))?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_owned());
        options.server_selection_timeout = Some(config.server_selection_timeout);

        let client =
            Client::with_options(options).map_err(|err| StoreError::configure(err.to_string()))?;
        info!(database = %config.database, "document store client configured");
        Ok(Self {
            database: client.database(&config.database),
        })
    }

    /// Untyped handle to the named collection.
    pub fn collection(&self, name: &str) -> Collection<Document> {
        self.database.collection::<Document>(name)
    }

    /// Round-trip a `ping` command to check the server is reachable.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(|err| StoreError::unreachable(err.to_string()))
    }

    /// Create the unique email index on `users`.
    ///
    /// Failure is logged and tolerated: existing data may already hold
    /// duplicates, and registration still checks for an existing email first.
    pub async fn ensure_indexes(&self) {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        if let Err(err) = self.collection(super::USERS).create_index(index).await {
            warn!(error = %err, "could not create unique email index on users");
        }
    }
}
