//! Volunteer sign-up and testimonial service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{EntryLog, EntryRepository, EntryRepositoryError};
use crate::domain::{Entry, EntryKind, Error, Fields};

fn map_entry_error(error: EntryRepositoryError) -> Error {
    match error {
        EntryRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("entry repository unavailable: {message}"))
        }
        EntryRepositoryError::Query { message } => {
            Error::internal(format!("entry repository error: {message}"))
        }
    }
}

/// Append-only log over the volunteer and testimonial collections.
#[derive(Clone)]
pub struct EntryService<E> {
    entries: Arc<E>,
}

impl<E> EntryService<E> {
    pub fn new(entries: Arc<E>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl<E: EntryRepository> EntryLog for EntryService<E> {
    async fn append(&self, kind: EntryKind, fields: Fields) -> Result<Entry, Error> {
        if fields.is_empty() {
            return Err(Error::invalid_request("entry must contain at least one field"));
        }
        self.entries
            .append(kind, fields)
            .await
            .map_err(map_entry_error)
    }

    async fn list(&self, kind: EntryKind) -> Result<Vec<Entry>, Error> {
        self.entries.list(kind).await.map_err(map_entry_error)
    }
}
