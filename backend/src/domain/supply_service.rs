//! Donation domain service.
//!
//! Implements the supply command and query driving ports. Owner checks run
//! before any mutation reaches the store.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{SupplyCommand, SupplyQuery, SupplyRepository, SupplyRepositoryError};
use crate::domain::{
    CategoryCatalogue, CategoryCount, Email, Error, NewSupply, RecordId, SupplyDetails,
    SupplyRecord, UpdateOutcome,
};

pub(crate) fn map_supply_error(error: SupplyRepositoryError) -> Error {
    match error {
        SupplyRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("supply repository unavailable: {message}"))
        }
        SupplyRepositoryError::Query { message } => {
            Error::internal(format!("supply repository error: {message}"))
        }
    }
}

fn donation_not_found(id: &RecordId) -> Error {
    Error::not_found(format!("donation {id} not found"))
}

/// Donation CRUD and category statistics.
#[derive(Clone)]
pub struct SupplyService<S> {
    supplies: Arc<S>,
    catalogue: Arc<CategoryCatalogue>,
}

impl<S> SupplyService<S> {
    pub fn new(supplies: Arc<S>, catalogue: Arc<CategoryCatalogue>) -> Self {
        Self {
            supplies,
            catalogue,
        }
    }
}

impl<S: SupplyRepository> SupplyService<S> {
    async fn owned_record(&self, actor: &Email, id: &RecordId) -> Result<SupplyRecord, Error> {
        let record = self
            .supplies
            .find_by_id(id)
            .await
            .map_err(map_supply_error)?
            .ok_or_else(|| donation_not_found(id))?;
        if !record.is_owned_by(actor) {
            return Err(Error::forbidden("only the donor who created a donation may change it"));
        }
        Ok(record)
    }
}

#[async_trait]
impl<S: SupplyRepository> SupplyCommand for SupplyService<S> {
    async fn create(&self, supply: NewSupply) -> Result<SupplyRecord, Error> {
        let record = self
            .supplies
            .insert(supply)
            .await
            .map_err(map_supply_error)?;
        info!(id = %record.id, category = %record.category, "donation created");
        Ok(record)
    }

    async fn update(
        &self,
        actor: &Email,
        id: &RecordId,
        details: SupplyDetails,
    ) -> Result<UpdateOutcome, Error> {
        self.owned_record(actor, id).await?;
        match self
            .supplies
            .replace_details(id, &details)
            .await
            .map_err(map_supply_error)?
        {
            UpdateOutcome::NotFound => Err(donation_not_found(id)),
            outcome => Ok(outcome),
        }
    }

    async fn delete(&self, actor: &Email, id: &RecordId) -> Result<(), Error> {
        self.owned_record(actor, id).await?;
        let deleted = self.supplies.delete(id).await.map_err(map_supply_error)?;
        if deleted == 0 {
            return Err(donation_not_found(id));
        }
        info!(%id, "donation deleted");
        Ok(())
    }
}

#[async_trait]
impl<S: SupplyRepository> SupplyQuery for SupplyService<S> {
    async fn list_all(&self) -> Result<Vec<SupplyRecord>, Error> {
        self.supplies.list().await.map_err(map_supply_error)
    }

    async fn find(&self, id: &RecordId) -> Result<SupplyRecord, Error> {
        self.supplies
            .find_by_id(id)
            .await
            .map_err(map_supply_error)?
            .ok_or_else(|| donation_not_found(id))
    }

    async fn category_counts(&self) -> Result<Vec<CategoryCount>, Error> {
        let records = self.supplies.list().await.map_err(map_supply_error)?;
        Ok(self.catalogue.count(&records))
    }
}

#[cfg(test)]
#[path = "supply_service_tests.rs"]
mod tests;
