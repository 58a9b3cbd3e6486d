//! In-memory wiring shared by the integration tests in `tests/`.
//!
//! Only compiled with the `test-support` feature. The backend is assembled
//! from the same services as production, over in-memory repositories, a
//! cheap Argon2 work factor and a fixed signing secret.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use crate::domain::ports::TokenIssuer;
use crate::domain::{AccessToken, CategoryCatalogue, Email, TokenTtl};
use crate::inbound::http::state::{Adapters, HttpState};
use crate::outbound::categories::parse_categories;
use crate::outbound::memory::{
    InMemoryEntryRepository, InMemoryPostRepository, InMemorySupplyRepository,
    InMemoryUserRepository,
};
use crate::outbound::security::{Argon2PasswordHasher, JwtTokenIssuer};

/// Signing secret used by [`InMemoryBackend`].
pub const TEST_SECRET: &str = "feedforward-test-secret";

/// Handles to the repositories behind an in-memory [`HttpState`].
///
/// Tests keep these to inspect what the handlers stored.
pub struct InMemoryBackend {
    pub users: Arc<InMemoryUserRepository>,
    pub supplies: Arc<InMemorySupplyRepository>,
    pub posts: Arc<InMemoryPostRepository>,
    pub entries: Arc<InMemoryEntryRepository>,
    pub tokens: Arc<JwtTokenIssuer>,
    catalogue: Arc<CategoryCatalogue>,
}

impl InMemoryBackend {
    /// Empty stores with the given category names.
    ///
    /// # Panics
    ///
    /// Panics when the fixed hasher or token issuer cannot be built.
    pub fn with_categories(categories: &[&str]) -> Self {
        let definitions = categories
            .iter()
            .map(|name| serde_json::json!({ "category": name }))
            .collect::<Vec<_>>();
        let bytes = serde_json::to_vec(&definitions).expect("category fixture serialises");
        let catalogue = parse_categories(&bytes).expect("category fixture parses");
        let tokens = JwtTokenIssuer::new(TEST_SECRET, TokenTtl::DEFAULT, Arc::new(DefaultClock))
            .expect("token issuer");
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            supplies: Arc::new(InMemorySupplyRepository::new()),
            posts: Arc::new(InMemoryPostRepository::new()),
            entries: Arc::new(InMemoryEntryRepository::new()),
            tokens: Arc::new(tokens),
            catalogue: Arc::new(catalogue),
        }
    }

    /// Handler state wired over these repositories.
    ///
    /// # Panics
    ///
    /// Panics when the low-cost hasher parameters are rejected.
    pub fn http_state(&self) -> web::Data<HttpState> {
        let hasher = Argon2PasswordHasher::with_cost(8, 1, 1).expect("test hasher");
        web::Data::new(HttpState::from_adapters(
            Adapters {
                users: Arc::clone(&self.users),
                supplies: Arc::clone(&self.supplies),
                posts: Arc::clone(&self.posts),
                entries: Arc::clone(&self.entries),
                hasher: Arc::new(hasher),
                tokens: Arc::clone(&self.tokens),
            },
            Arc::clone(&self.catalogue),
        ))
    }

    /// Sign a token for `email` without registering it.
    ///
    /// # Panics
    ///
    /// Panics when `email` is not a valid address.
    pub fn token_for(&self, email: &str) -> AccessToken {
        let email = Email::new(email).expect("valid email");
        self.tokens.issue(&email).expect("token issues")
    }
}
