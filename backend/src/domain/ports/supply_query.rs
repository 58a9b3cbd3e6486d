//! Driving port for donation reads and category statistics.

use async_trait::async_trait;

use crate::domain::{CategoryCount, Error, RecordId, SupplyRecord};

/// Domain use-case port for reading donations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SupplyQuery: Send + Sync {
    /// Every donation in store order.
    async fn list_all(&self) -> Result<Vec<SupplyRecord>, Error>;

    /// A single donation, or a not-found error.
    async fn find(&self, id: &RecordId) -> Result<SupplyRecord, Error>;

    /// Donation counts for each catalogue category, in catalogue order.
    async fn category_counts(&self) -> Result<Vec<CategoryCount>, Error>;
}
