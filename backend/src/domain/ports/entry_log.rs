//! Driving port for volunteer sign-ups and testimonials.

use async_trait::async_trait;

use crate::domain::{Entry, EntryKind, Error, Fields};

/// Domain use-case port for append-only free-form collections.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntryLog: Send + Sync {
    /// Append an entry of `kind`.
    async fn append(&self, kind: EntryKind, fields: Fields) -> Result<Entry, Error>;

    /// Every entry of `kind` in insertion order.
    async fn list(&self, kind: EntryKind) -> Result<Vec<Entry>, Error>;
}
