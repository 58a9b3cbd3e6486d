//! MongoDB persistence adapters.
//!
//! Repositories are thin translators between BSON documents and domain
//! records. They hold untyped `Collection<Document>` handles from a shared
//! [`DocumentStore`] and map driver failures to the port error enums.
//!
//! # Example
//!
//! ```ignore
//! use feedforward::outbound::mongo::{DocumentStore, MongoSupplyRepository, StoreConfig};
//!
//! let store = DocumentStore::connect(StoreConfig::new(uri, "food_donation")).await?;
//! let supplies = MongoSupplyRepository::new(&store);
//! ```

mod codec;
mod entries;
mod error_mapping;
mod posts;
mod store;
mod supplies;
mod users;

pub use entries::MongoEntryRepository;
pub use posts::MongoPostRepository;
pub use store::{DocumentStore, StoreConfig, StoreError};
pub use supplies::MongoSupplyRepository;
pub use users::MongoUserRepository;

/// Database used when none is configured.
pub const DEFAULT_DATABASE: &str = "food_donation";

pub(crate) const USERS: &str = "users";
pub(crate) const SUPPLY: &str = "supply";
pub(crate) const POSTS: &str = "posts";
