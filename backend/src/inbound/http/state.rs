//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountCommand, CommunityCommand, EntryLog, EntryRepository, FeedQuery, PasswordHasher,
    PostRepository, ProfileQuery, SupplyCommand, SupplyQuery, SupplyRepository, TokenIssuer,
    UserRepository,
};
use crate::domain::{AccountService, CategoryCatalogue, EntryService, FeedService, SupplyService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountCommand>,
    pub profiles: Arc<dyn ProfileQuery>,
    pub supply_commands: Arc<dyn SupplyCommand>,
    pub supplies: Arc<dyn SupplyQuery>,
    pub feed: Arc<dyn FeedQuery>,
    pub community: Arc<dyn CommunityCommand>,
    pub entries: Arc<dyn EntryLog>,
    /// Verifies bearer tokens for [`super::auth::AuthenticatedDonor`].
    pub tokens: Arc<dyn TokenIssuer>,
}

/// Driven adapters the domain services are built from.
pub struct Adapters<U, S, P, E, H, T> {
    pub users: Arc<U>,
    pub supplies: Arc<S>,
    pub posts: Arc<P>,
    pub entries: Arc<E>,
    pub hasher: Arc<H>,
    pub tokens: Arc<T>,
}

impl HttpState {
    /// Wire the domain services over `adapters`.
    ///
    /// The same repository handles are shared between services, so the
    /// feed's profile join sees the users the account service registers.
    pub fn from_adapters<U, S, P, E, H, T>(
        adapters: Adapters<U, S, P, E, H, T>,
        catalogue: Arc<CategoryCatalogue>,
    ) -> Self
    where
        U: UserRepository + 'static,
        S: SupplyRepository + 'static,
        P: PostRepository + 'static,
        E: EntryRepository + 'static,
        H: PasswordHasher + 'static,
        T: TokenIssuer + 'static,
    {
        let Adapters {
            users,
            supplies,
            posts,
            entries,
            hasher,
            tokens,
        } = adapters;
        let accounts = Arc::new(AccountService::new(
            Arc::clone(&users),
            hasher,
            Arc::clone(&tokens),
        ));
        let supply_service = Arc::new(SupplyService::new(Arc::clone(&supplies), catalogue));
        let feed = Arc::new(FeedService::new(supplies, posts, users));
        Self {
            accounts: accounts.clone(),
            profiles: accounts,
            supply_commands: supply_service.clone(),
            supplies: supply_service,
            feed: feed.clone(),
            community: feed,
            entries: Arc::new(EntryService::new(entries)),
            tokens,
        }
    }
}
