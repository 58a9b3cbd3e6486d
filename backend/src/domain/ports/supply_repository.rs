//! Port for donation record persistence.

use async_trait::async_trait;

use crate::domain::{NewSupply, RecordId, SupplyDetails, SupplyRecord, UpdateOutcome};

use super::define_port_error;

define_port_error! {
    /// Errors raised by supply repository adapters.
    pub enum SupplyRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "supply repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "supply repository query failed: {message}",
    }
}

/// Port for the `supply` collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SupplyRepository: Send + Sync {
    /// Store a new donation and return it with its assigned id.
    async fn insert(&self, supply: NewSupply) -> Result<SupplyRecord, SupplyRepositoryError>;

    /// Every donation in store natural (insertion) order.
    async fn list(&self) -> Result<Vec<SupplyRecord>, SupplyRepositoryError>;

    /// Find a donation by id.
    async fn find_by_id(&self, id: &RecordId)
    -> Result<Option<SupplyRecord>, SupplyRepositoryError>;

    /// Replace `{title, category, description, quantity}` of a donation.
    async fn replace_details(
        &self,
        id: &RecordId,
        details: &SupplyDetails,
    ) -> Result<UpdateOutcome, SupplyRepositoryError>;

    /// Delete a donation, returning the number of removed records.
    async fn delete(&self, id: &RecordId) -> Result<u64, SupplyRepositoryError>;
}
