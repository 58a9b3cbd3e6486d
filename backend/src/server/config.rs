//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use feedforward::outbound::mongo::DocumentStore;
use feedforward::outbound::security::JwtTokenIssuer;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) cors_origins: Vec<String>,
    pub(crate) tokens: JwtTokenIssuer,
    pub(crate) store: Option<DocumentStore>,
}

impl ServerConfig {
    /// Construct a server configuration backed by in-memory storage.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, cors_origins: Vec<String>, tokens: JwtTokenIssuer) -> Self {
        Self {
            bind_addr,
            cors_origins,
            tokens,
            store: None,
        }
    }

    /// Attach a document store for the persistence adapters.
    ///
    /// When provided, the server uses MongoDB-backed repositories instead of
    /// the in-memory ones.
    #[must_use]
    pub fn with_store(mut self, store: DocumentStore) -> Self {
        self.store = Some(store);
        self
    }
}
