use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{EntryRepository, EntryRepositoryError};
use crate::domain::{Entry, EntryKind, Fields, ID_FIELD};

use super::{IdSequence, POISONED};

/// Volunteer and testimonial collections held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryEntryRepository {
    entries: Mutex<HashMap<EntryKind, Vec<Entry>>>,
    ids: IdSequence,
}

impl InMemoryEntryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntryRepository for InMemoryEntryRepository {
    async fn append(
        &self,
        kind: EntryKind,
        mut fields: Fields,
    ) -> Result<Entry, EntryRepositoryError> {
        fields.remove(ID_FIELD);
        let entry = Entry {
            id: self.ids.next_id(),
            fields,
        };
        self.entries
            .lock()
            .map_err(|_| EntryRepositoryError::query(POISONED))?
            .entry(kind)
            .or_default()
            .push(entry.clone());
        Ok(entry)
    }

    async fn list(&self, kind: EntryKind) -> Result<Vec<Entry>, EntryRepositoryError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| EntryRepositoryError::query(POISONED))?;
        Ok(entries.get(&kind).cloned().unwrap_or_default())
    }
}
