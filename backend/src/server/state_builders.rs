//! Builds the HTTP state from whichever repositories are configured.

use std::sync::Arc;

use actix_web::web;

use feedforward::domain::CategoryCatalogue;
use feedforward::inbound::http::state::{Adapters, HttpState};
use feedforward::outbound::memory::{
    InMemoryEntryRepository, InMemoryPostRepository, InMemorySupplyRepository,
    InMemoryUserRepository,
};
use feedforward::outbound::mongo::{
    DocumentStore, MongoEntryRepository, MongoPostRepository, MongoSupplyRepository,
    MongoUserRepository,
};
use feedforward::outbound::security::{Argon2PasswordHasher, JwtTokenIssuer};

/// Wire domain services over MongoDB when a store is configured, otherwise
/// over fresh in-memory repositories.
pub(crate) fn build_http_state(
    store: Option<&DocumentStore>,
    hasher: Argon2PasswordHasher,
    tokens: JwtTokenIssuer,
    catalogue: Arc<CategoryCatalogue>,
) -> web::Data<HttpState> {
    let hasher = Arc::new(hasher);
    let tokens = Arc::new(tokens);
    let state = match store {
        Some(store) => HttpState::from_adapters(
            Adapters {
                users: Arc::new(MongoUserRepository::new(store)),
                supplies: Arc::new(MongoSupplyRepository::new(store)),
                posts: Arc::new(MongoPostRepository::new(store)),
                entries: Arc::new(MongoEntryRepository::new(store)),
                hasher,
                tokens,
            },
            catalogue,
        ),
        None => HttpState::from_adapters(
            Adapters {
                users: Arc::new(InMemoryUserRepository::new()),
                supplies: Arc::new(InMemorySupplyRepository::new()),
                posts: Arc::new(InMemoryPostRepository::new()),
                entries: Arc::new(InMemoryEntryRepository::new()),
                hasher,
                tokens,
            },
            catalogue,
        ),
    };
    web::Data::new(state)
}
