//! Port for append-only free-form collections (volunteers, testimonials).

use async_trait::async_trait;

use crate::domain::{Entry, EntryKind, Fields};

use super::define_port_error;

define_port_error! {
    /// Errors raised by entry repository adapters.
    pub enum EntryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "entry repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "entry repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Append `fields` to the collection selected by `kind`.
    async fn append(&self, kind: EntryKind, fields: Fields) -> Result<Entry, EntryRepositoryError>;

    /// Every entry of `kind` in insertion order.
    async fn list(&self, kind: EntryKind) -> Result<Vec<Entry>, EntryRepositoryError>;
}
