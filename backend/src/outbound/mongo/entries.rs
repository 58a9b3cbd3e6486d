//! Document-store `EntryRepository` over the `volunteer` and `review`
//! collections.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{Document, doc};

use crate::domain::ports::{EntryRepository, EntryRepositoryError};
use crate::domain::{Entry, EntryKind, Fields, ID_FIELD};

use super::DocumentStore;
use super::codec::{decode_each, encode, new_record_id};
use super::error_mapping::map_mongo_error;

fn map_error(kind: EntryKind, err: mongodb::error::Error) -> EntryRepositoryError {
    map_mongo_error(
        kind.collection(),
        err,
        EntryRepositoryError::query,
        EntryRepositoryError::connection,
    )
}

/// MongoDB-backed free-form entry log.
#[derive(Clone)]
pub struct MongoEntryRepository {
    store: DocumentStore,
}

impl MongoEntryRepository {
    pub fn new(store: &DocumentStore) -> Self {
        Self {
            store: store.clone(),
        }
    }
}

#[async_trait]
impl EntryRepository for MongoEntryRepository {
    async fn append(
        &self,
        kind: EntryKind,
        mut fields: Fields,
    ) -> Result<Entry, EntryRepositoryError> {
        // A submitted `_id` would collide with the generated one.
        fields.remove(ID_FIELD);
        let entry = Entry {
            id: new_record_id().map_err(EntryRepositoryError::query)?,
            fields,
        };
        let document = encode(&entry).map_err(EntryRepositoryError::query)?;
        self.store
            .collection(kind.collection())
            .insert_one(document)
            .await
            .map_err(|err| map_error(kind, err))?;
        Ok(entry)
    }

    async fn list(&self, kind: EntryKind) -> Result<Vec<Entry>, EntryRepositoryError> {
        let documents: Vec<Document> = self
            .store
            .collection(kind.collection())
            .find(doc! {})
            .await
            .map_err(|err| map_error(kind, err))?
            .try_collect()
            .await
            .map_err(|err| map_error(kind, err))?;
        Ok(decode_each(kind.collection(), documents))
    }
}
