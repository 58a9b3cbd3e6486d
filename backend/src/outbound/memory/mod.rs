//! In-memory repositories.
//!
//! Used when no document store URI is configured (local development) and by
//! the integration tests. Each repository guards a vector with a mutex that is
//! held only for the synchronous copy in or out, never across an await.

mod entries;
mod posts;
mod supplies;
mod users;

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::RecordId;

pub use entries::InMemoryEntryRepository;
pub use posts::InMemoryPostRepository;
pub use supplies::InMemorySupplyRepository;
pub use users::InMemoryUserRepository;

pub(crate) const POISONED: &str = "in-memory store lock poisoned";

/// Hands out increasing 24-hex-digit record ids.
#[derive(Debug, Default)]
pub(crate) struct IdSequence {
    next: AtomicU64,
}

impl IdSequence {
    pub(crate) fn next_id(&self) -> RecordId {
        RecordId::from_counter(self.next.fetch_add(1, Ordering::Relaxed) + 1)
    }
}
