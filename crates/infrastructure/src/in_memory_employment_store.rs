use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use alumnet_application::{
    EmploymentRecordFilter, EmploymentRecordOrdering, EmploymentRecordPatch,
    EmploymentRecordStore, ResultWindow,
};
use alumnet_core::{AppError, AppResult};
use alumnet_domain::{EmploymentRecord, EmploymentRecordId};

/// In-memory employment record store.
///
/// Each conditional write runs under a single write lock, so match and mutate
/// are atomic with respect to every other store call.
#[derive(Debug, Default)]
pub struct InMemoryEmploymentRecordStore {
    records: RwLock<HashMap<EmploymentRecordId, EmploymentRecord>>,
}

impl InMemoryEmploymentRecordStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmploymentRecordStore for InMemoryEmploymentRecordStore {
    async fn find_many(
        &self,
        filter: &EmploymentRecordFilter,
        ordering: EmploymentRecordOrdering,
        window: ResultWindow,
    ) -> AppResult<Vec<EmploymentRecord>> {
        let records = self.records.read().await;
        let mut matches: Vec<&EmploymentRecord> = records
            .values()
            .filter(|record| filter.matches(record))
            .collect();
        matches.sort_by(|left, right| ordering.compare(left, right));

        let offset = usize::try_from(window.offset).unwrap_or(usize::MAX);
        let limit = window.limit.map_or(usize::MAX, |limit| {
            usize::try_from(limit).unwrap_or(usize::MAX)
        });

        Ok(matches
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &EmploymentRecordFilter) -> AppResult<u64> {
        let records = self.records.read().await;
        let count = records
            .values()
            .filter(|record| filter.matches(record))
            .count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    async fn find_one(
        &self,
        filter: &EmploymentRecordFilter,
    ) -> AppResult<Option<EmploymentRecord>> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|record| filter.matches(record))
            .cloned())
    }

    async fn insert(&self, record: EmploymentRecord) -> AppResult<()> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.id()) {
            return Err(AppError::Conflict(format!(
                "employment record '{}' already exists",
                record.id()
            )));
        }

        records.insert(record.id(), record);
        Ok(())
    }

    async fn update_one(
        &self,
        filter: &EmploymentRecordFilter,
        patch: EmploymentRecordPatch,
    ) -> AppResult<u64> {
        let mut records = self.records.write().await;
        let Some(record) = records.values_mut().find(|record| filter.matches(record)) else {
            return Ok(0);
        };

        // Apply to a copy so a rejected transition leaves the stored record untouched.
        let mut patched = record.clone();
        if patch.apply(&mut patched).is_err() {
            return Ok(0);
        }
        *record = patched;
        Ok(1)
    }

    async fn delete_one(&self, filter: &EmploymentRecordFilter) -> AppResult<u64> {
        let mut records = self.records.write().await;
        let Some(record_id) = records
            .values()
            .find(|record| filter.matches(record))
            .map(EmploymentRecord::id)
        else {
            return Ok(0);
        };

        Ok(u64::from(records.remove(&record_id).is_some()))
    }
}

#[cfg(test)]
mod tests;
