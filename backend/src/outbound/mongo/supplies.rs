//! Document-store `SupplyRepository` over the `supply` collection.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::{self, Document, doc};

use crate::domain::ports::{SupplyRepository, SupplyRepositoryError};
use crate::domain::{NewSupply, RecordId, SupplyDetails, SupplyRecord, UpdateOutcome};

use super::codec::{decode, decode_each, encode, new_record_id, object_id};
use super::error_mapping::map_mongo_error;
use super::{DocumentStore, SUPPLY};

fn map_error(err: mongodb::error::Error) -> SupplyRepositoryError {
    map_mongo_error(
        SUPPLY,
        err,
        SupplyRepositoryError::query,
        SupplyRepositoryError::connection,
    )
}

fn id_filter(id: &RecordId) -> Result<Document, SupplyRepositoryError> {
    let id = object_id(id).map_err(SupplyRepositoryError::query)?;
    Ok(doc! { "_id": id })
}

/// MongoDB-backed donation store.
#[derive(Clone)]
pub struct MongoSupplyRepository {
    supplies: Collection<Document>,
}

impl MongoSupplyRepository {
    pub fn new(store: &DocumentStore) -> Self {
        Self {
            supplies: store.collection(SUPPLY),
        }
    }
}

#[async_trait]
impl SupplyRepository for MongoSupplyRepository {
    async fn insert(&self, supply: NewSupply) -> Result<SupplyRecord, SupplyRepositoryError> {
        let record = supply.into_record(new_record_id().map_err(SupplyRepositoryError::query)?);
        let document = encode(&record).map_err(SupplyRepositoryError::query)?;
        self.supplies
            .insert_one(document)
            .await
            .map_err(map_error)?;
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<SupplyRecord>, SupplyRepositoryError> {
        let documents: Vec<Document> = self
            .supplies
            .find(doc! {})
            .await
            .map_err(map_error)?
            .try_collect()
            .await
            .map_err(map_error)?;
        Ok(decode_each(SUPPLY, documents))
    }

    async fn find_by_id(
        &self,
        id: &RecordId,
    ) -> Result<Option<SupplyRecord>, SupplyRepositoryError> {
        self.supplies
            .find_one(id_filter(id)?)
            .await
            .map_err(map_error)?
            .map(|document| decode(document).map_err(SupplyRepositoryError::query))
            .transpose()
    }

    async fn replace_details(
        &self,
        id: &RecordId,
        details: &SupplyDetails,
    ) -> Result<UpdateOutcome, SupplyRepositoryError> {
        let quantity = bson::to_bson(&details.quantity())
            .map_err(|err| SupplyRepositoryError::query(format!("encode quantity: {err}")))?;
        let update = doc! {
            "$set": {
                "title": details.title(),
                "category": details.category(),
                "description": details.description(),
                "quantity": quantity,
            }
        };
        let result = self
            .supplies
            .update_one(id_filter(id)?, update)
            .await
            .map_err(map_error)?;
        Ok(UpdateOutcome::from_counts(
            result.matched_count,
            result.modified_count,
        ))
    }

    async fn delete(&self, id: &RecordId) -> Result<u64, SupplyRepositoryError> {
        let result = self
            .supplies
            .delete_one(id_filter(id)?)
            .await
            .map_err(map_error)?;
        Ok(result.deleted_count)
    }
}
