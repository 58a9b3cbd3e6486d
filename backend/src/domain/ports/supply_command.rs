//! Driving port for donation writes.
//!
//! Ownership is enforced here rather than in handlers: only the donor who
//! created a record may replace or delete it.

use async_trait::async_trait;

use crate::domain::{Email, Error, NewSupply, RecordId, SupplyDetails, SupplyRecord, UpdateOutcome};

/// Domain use-case port for creating and mutating donations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SupplyCommand: Send + Sync {
    /// Store a donation owned by `supply.owner()`.
    async fn create(&self, supply: NewSupply) -> Result<SupplyRecord, Error>;

    /// Replace the details of a donation owned by `actor`.
    ///
    /// Returns [`UpdateOutcome::Modified`] or [`UpdateOutcome::Unchanged`];
    /// a missing record is a not-found error.
    async fn update(
        &self,
        actor: &Email,
        id: &RecordId,
        details: SupplyDetails,
    ) -> Result<UpdateOutcome, Error>;

    /// Delete a donation owned by `actor`; a missing record is a not-found
    /// error.
    async fn delete(&self, actor: &Email, id: &RecordId) -> Result<(), Error>;
}
