//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **mongo**: MongoDB-backed repositories for users, donations, posts and
//!   free-form entries
//! - **memory**: in-process repositories for development and tests
//! - **security**: Argon2id password hashing and HS256 bearer tokens
//! - **categories**: start-up loader for the static category list
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod categories;
pub mod memory;
pub mod mongo;
pub mod security;
