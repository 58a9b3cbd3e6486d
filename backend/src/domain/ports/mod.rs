//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, hasher, token issuer) are implemented by
//! outbound adapters. Driving ports (commands and queries) are implemented by
//! domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod community_command;
mod entry_log;
mod entry_repository;
mod feed_query;
mod password_hasher;
mod post_repository;
mod profile_query;
mod supply_command;
mod supply_query;
mod supply_repository;
mod token_issuer;
mod user_repository;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::AccountCommand;
#[cfg(test)]
pub use community_command::MockCommunityCommand;
pub use community_command::CommunityCommand;
#[cfg(test)]
pub use entry_log::MockEntryLog;
pub use entry_log::EntryLog;
#[cfg(test)]
pub use entry_repository::MockEntryRepository;
pub use entry_repository::{EntryRepository, EntryRepositoryError};
#[cfg(test)]
pub use feed_query::MockFeedQuery;
pub use feed_query::FeedQuery;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::{PostRepository, PostRepositoryError};
#[cfg(test)]
pub use profile_query::MockProfileQuery;
pub use profile_query::ProfileQuery;
#[cfg(test)]
pub use supply_command::MockSupplyCommand;
pub use supply_command::SupplyCommand;
#[cfg(test)]
pub use supply_query::MockSupplyQuery;
pub use supply_query::SupplyQuery;
#[cfg(test)]
pub use supply_repository::MockSupplyRepository;
pub use supply_repository::{SupplyRepository, SupplyRepositoryError};
#[cfg(test)]
pub use token_issuer::MockTokenIssuer;
pub use token_issuer::{TokenError, TokenIssuer};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
