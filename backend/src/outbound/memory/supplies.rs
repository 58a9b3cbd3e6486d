use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{SupplyRepository, SupplyRepositoryError};
use crate::domain::{NewSupply, RecordId, SupplyDetails, SupplyRecord, UpdateOutcome};

use super::{IdSequence, POISONED};

/// `supply` collection held in process memory.
#[derive(Debug, Default)]
pub struct InMemorySupplyRepository {
    records: Mutex<Vec<SupplyRecord>>,
    ids: IdSequence,
}

impl InMemorySupplyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> SupplyRepositoryError {
    SupplyRepositoryError::query(POISONED)
}

#[async_trait]
impl SupplyRepository for InMemorySupplyRepository {
    async fn insert(&self, supply: NewSupply) -> Result<SupplyRecord, SupplyRepositoryError> {
        let record = supply.into_record(self.ids.next_id());
        self.records.lock().map_err(poisoned)?.push(record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<SupplyRecord>, SupplyRepositoryError> {
        Ok(self.records.lock().map_err(poisoned)?.clone())
    }

    async fn find_by_id(
        &self,
        id: &RecordId,
    ) -> Result<Option<SupplyRecord>, SupplyRepositoryError> {
        let records = self.records.lock().map_err(poisoned)?;
        Ok(records.iter().find(|record| &record.id == id).cloned())
    }

    async fn replace_details(
        &self,
        id: &RecordId,
        details: &SupplyDetails,
    ) -> Result<UpdateOutcome, SupplyRepositoryError> {
        let mut records = self.records.lock().map_err(poisoned)?;
        let Some(record) = records.iter_mut().find(|record| &record.id == id) else {
            return Ok(UpdateOutcome::NotFound);
        };
        if record.matches(details) {
            return Ok(UpdateOutcome::Unchanged);
        }
        record.apply(details);
        Ok(UpdateOutcome::Modified)
    }

    async fn delete(&self, id: &RecordId) -> Result<u64, SupplyRepositoryError> {
        let mut records = self.records.lock().map_err(poisoned)?;
        let before = records.len();
        records.retain(|record| &record.id != id);
        Ok((before - records.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Email, Quantity};
    use rstest::{fixture, rstest};

    #[fixture]
    fn details() -> SupplyDetails {
        SupplyDetails::try_new("Rice", "Grains", "", Quantity::from(2.0)).expect("details")
    }

    async fn seeded(details: &SupplyDetails) -> (InMemorySupplyRepository, RecordId) {
        let repo = InMemorySupplyRepository::new();
        let owner = Email::new("ada@example.org").expect("email");
        let record = repo
            .insert(NewSupply::new(owner, details.clone()))
            .await
            .expect("insert");
        (repo, record.id)
    }

    #[rstest]
    #[tokio::test]
    async fn replace_reports_unchanged_then_modified(details: SupplyDetails) {
        let (repo, id) = seeded(&details).await;

        let unchanged = repo.replace_details(&id, &details).await.expect("update");
        let changed =
            SupplyDetails::try_new("Rice", "Grains", "", Quantity::from(4.0)).expect("details");
        let modified = repo.replace_details(&id, &changed).await.expect("update");

        assert_eq!(unchanged, UpdateOutcome::Unchanged);
        assert_eq!(modified, UpdateOutcome::Modified);
        let stored = repo.find_by_id(&id).await.expect("find").expect("present");
        assert_eq!(stored.quantity, Quantity::from(4.0));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_counts_removed_records(details: SupplyDetails) {
        let (repo, id) = seeded(&details).await;

        assert_eq!(repo.delete(&id).await.expect("delete"), 1);
        assert_eq!(repo.delete(&id).await.expect("delete"), 0);
        assert!(repo.list().await.expect("list").is_empty());
    }
}
