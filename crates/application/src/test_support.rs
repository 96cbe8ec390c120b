use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use alumnet_core::{AppError, AppResult, Principal, Role};
use alumnet_domain::{
    AccountId, AlumniDetails, AlumniId, AlumniProfile, EmploymentRecord, LifecycleFilter,
    LifecycleState,
};

use crate::{
    AlumniInput, AlumniRepository, EmploymentInput, EmploymentRecordFilter,
    EmploymentRecordOrdering, EmploymentRecordPatch, EmploymentRecordStore, ResultWindow,
};

#[derive(Default)]
pub(crate) struct FakeEmploymentStore {
    pub(crate) records: Mutex<Vec<EmploymentRecord>>,
}

#[async_trait]
impl EmploymentRecordStore for FakeEmploymentStore {
    async fn find_many(
        &self,
        filter: &EmploymentRecordFilter,
        ordering: EmploymentRecordOrdering,
        window: ResultWindow,
    ) -> AppResult<Vec<EmploymentRecord>> {
        let mut matches: Vec<EmploymentRecord> = self
            .records
            .lock()
            .await
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect();
        matches.sort_by(|left, right| ordering.compare(left, right));

        let offset = usize::try_from(window.offset).unwrap_or(usize::MAX);
        let limit = window
            .limit
            .map_or(usize::MAX, |limit| usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(matches.into_iter().skip(offset).take(limit).collect())
    }

    async fn count(&self, filter: &EmploymentRecordFilter) -> AppResult<u64> {
        let count = self
            .records
            .lock()
            .await
            .iter()
            .filter(|record| filter.matches(record))
            .count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    async fn find_one(
        &self,
        filter: &EmploymentRecordFilter,
    ) -> AppResult<Option<EmploymentRecord>> {
        Ok(self
            .records
            .lock()
            .await
            .iter()
            .find(|record| filter.matches(record))
            .cloned())
    }

    async fn insert(&self, record: EmploymentRecord) -> AppResult<()> {
        self.records.lock().await.push(record);
        Ok(())
    }

    async fn update_one(
        &self,
        filter: &EmploymentRecordFilter,
        patch: EmploymentRecordPatch,
    ) -> AppResult<u64> {
        let mut records = self.records.lock().await;
        let Some(record) = records.iter_mut().find(|record| filter.matches(record)) else {
            return Ok(0);
        };
        Ok(u64::from(patch.apply(record).is_ok()))
    }

    async fn delete_one(&self, filter: &EmploymentRecordFilter) -> AppResult<u64> {
        let mut records = self.records.lock().await;
        let Some(position) = records.iter().position(|record| filter.matches(record)) else {
            return Ok(0);
        };
        records.remove(position);
        Ok(1)
    }
}

/// Store whose every call fails, standing in for an unreachable database.
pub(crate) struct UnavailableEmploymentStore;

#[async_trait]
impl EmploymentRecordStore for UnavailableEmploymentStore {
    async fn find_many(
        &self,
        _filter: &EmploymentRecordFilter,
        _ordering: EmploymentRecordOrdering,
        _window: ResultWindow,
    ) -> AppResult<Vec<EmploymentRecord>> {
        Err(unavailable())
    }

    async fn count(&self, _filter: &EmploymentRecordFilter) -> AppResult<u64> {
        Err(unavailable())
    }

    async fn find_one(
        &self,
        _filter: &EmploymentRecordFilter,
    ) -> AppResult<Option<EmploymentRecord>> {
        Err(unavailable())
    }

    async fn insert(&self, _record: EmploymentRecord) -> AppResult<()> {
        Err(unavailable())
    }

    async fn update_one(
        &self,
        _filter: &EmploymentRecordFilter,
        _patch: EmploymentRecordPatch,
    ) -> AppResult<u64> {
        Err(unavailable())
    }

    async fn delete_one(&self, _filter: &EmploymentRecordFilter) -> AppResult<u64> {
        Err(unavailable())
    }
}

fn unavailable() -> AppError {
    AppError::Internal("employment store timed out".to_owned())
}

#[derive(Default)]
pub(crate) struct FakeAlumniRepository {
    pub(crate) profiles: Mutex<Vec<AlumniProfile>>,
}

impl FakeAlumniRepository {
    async fn mutate(
        &self,
        id: AlumniId,
        required: LifecycleState,
        change: impl FnOnce(&mut AlumniProfile) -> AppResult<()>,
    ) -> AppResult<u64> {
        let mut profiles = self.profiles.lock().await;
        let Some(profile) = profiles
            .iter_mut()
            .find(|profile| profile.id() == id && profile.state() == required)
        else {
            return Ok(0);
        };
        Ok(u64::from(change(profile).is_ok()))
    }
}

#[async_trait]
impl AlumniRepository for FakeAlumniRepository {
    async fn create(&self, profile: AlumniProfile) -> AppResult<()> {
        let mut profiles = self.profiles.lock().await;
        let student_number = profile.details().student_number().as_str();
        if profiles
            .iter()
            .any(|existing| existing.details().student_number().as_str() == student_number)
        {
            return Err(AppError::Conflict(format!(
                "student number '{student_number}' already exists"
            )));
        }
        profiles.push(profile);
        Ok(())
    }

    async fn find(
        &self,
        id: AlumniId,
        lifecycle: LifecycleFilter,
    ) -> AppResult<Option<AlumniProfile>> {
        Ok(self
            .profiles
            .lock()
            .await
            .iter()
            .find(|profile| profile.id() == id && lifecycle.admits(profile.state()))
            .cloned())
    }

    async fn list(&self, lifecycle: LifecycleFilter) -> AppResult<Vec<AlumniProfile>> {
        Ok(self
            .profiles
            .lock()
            .await
            .iter()
            .filter(|profile| lifecycle.admits(profile.state()))
            .cloned()
            .collect())
    }

    async fn update_live(
        &self,
        id: AlumniId,
        details: AlumniDetails,
        at: DateTime<Utc>,
    ) -> AppResult<u64> {
        self.mutate(id, LifecycleState::Live, |profile| {
            profile.replace_details(details, at)
        })
        .await
    }

    async fn soft_delete(&self, id: AlumniId, at: DateTime<Utc>) -> AppResult<u64> {
        self.mutate(id, LifecycleState::Live, |profile| profile.trash(at))
            .await
    }

    async fn restore(&self, id: AlumniId, at: DateTime<Utc>) -> AppResult<u64> {
        self.mutate(id, LifecycleState::Trashed, |profile| profile.restore(at))
            .await
    }

    async fn hard_delete(&self, id: AlumniId) -> AppResult<u64> {
        let mut profiles = self.profiles.lock().await;
        let before = profiles.len();
        profiles.retain(|profile| {
            !(profile.id() == id && profile.state() == LifecycleState::Trashed)
        });
        Ok(u64::try_from(before - profiles.len()).unwrap_or(0))
    }

    async fn list_owned_alumni_ids(&self, account_id: AccountId) -> AppResult<Vec<AlumniId>> {
        Ok(self
            .profiles
            .lock()
            .await
            .iter()
            .filter(|profile| profile.account_id() == account_id)
            .map(AlumniProfile::id)
            .collect())
    }
}

pub(crate) fn admin() -> Principal {
    Principal::new(AccountId::new().to_string(), Role::Admin)
}

pub(crate) fn user(account_id: AccountId) -> Principal {
    Principal::new(account_id.to_string(), Role::User)
}

pub(crate) fn alumni_input(student_number: &str, name: &str) -> AlumniInput {
    AlumniInput {
        student_number: student_number.to_owned(),
        name: name.to_owned(),
        major: "Informatics".to_owned(),
        entry_year: 2016,
        graduation_year: 2020,
        email: format!("{student_number}@alumni.example"),
        phone: None,
        address: None,
    }
}

/// Inserts a live profile for `account_id` and returns its id.
pub(crate) async fn seed_profile(
    repository: &Arc<FakeAlumniRepository>,
    account_id: AccountId,
    name: &str,
) -> AlumniId {
    let details = alumni_input(&AlumniId::new().to_string(), name)
        .into_details()
        .unwrap_or_else(|_| unreachable!());
    let profile = AlumniProfile::create(AlumniId::new(), account_id, details, Utc::now());
    let id = profile.id();
    repository.profiles.lock().await.push(profile);
    id
}

pub(crate) fn employment_input(company: &str, start_date: &str, status: &str) -> EmploymentInput {
    EmploymentInput {
        company: company.to_owned(),
        position: "Software Engineer".to_owned(),
        industry: "Technology".to_owned(),
        location: "Yogyakarta".to_owned(),
        salary_range: Some("10-15 juta".to_owned()),
        start_date: start_date.to_owned(),
        end_date: None,
        status: status.to_owned(),
        description: None,
    }
}
