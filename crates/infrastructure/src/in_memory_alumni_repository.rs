use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use alumnet_application::AlumniRepository;
use alumnet_core::{AppError, AppResult};
use alumnet_domain::{
    AccountId, AlumniDetails, AlumniId, AlumniProfile, LifecycleFilter, LifecycleState,
};

/// In-memory alumni profile repository.
#[derive(Debug, Default)]
pub struct InMemoryAlumniRepository {
    profiles: RwLock<HashMap<AlumniId, AlumniProfile>>,
}

impl InMemoryAlumniRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn transition(
        &self,
        id: AlumniId,
        required: LifecycleState,
        change: impl FnOnce(&mut AlumniProfile) -> AppResult<()>,
    ) -> AppResult<u64> {
        let mut profiles = self.profiles.write().await;
        let Some(profile) = profiles
            .get_mut(&id)
            .filter(|profile| profile.state() == required)
        else {
            return Ok(0);
        };

        let mut changed = profile.clone();
        if change(&mut changed).is_err() {
            return Ok(0);
        }
        *profile = changed;
        Ok(1)
    }
}

fn ensure_unique_student_number(
    profiles: &HashMap<AlumniId, AlumniProfile>,
    id: AlumniId,
    details: &AlumniDetails,
) -> AppResult<()> {
    let student_number = details.student_number().as_str();
    let taken = profiles.values().any(|existing| {
        existing.id() != id && existing.details().student_number().as_str() == student_number
    });

    if taken {
        return Err(AppError::Conflict(format!(
            "student number '{student_number}' is already registered"
        )));
    }

    Ok(())
}

#[async_trait]
impl AlumniRepository for InMemoryAlumniRepository {
    async fn create(&self, profile: AlumniProfile) -> AppResult<()> {
        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(&profile.id()) {
            return Err(AppError::Conflict(format!(
                "alumni profile '{}' already exists",
                profile.id()
            )));
        }
        ensure_unique_student_number(&profiles, profile.id(), profile.details())?;

        profiles.insert(profile.id(), profile);
        Ok(())
    }

    async fn find(
        &self,
        id: AlumniId,
        lifecycle: LifecycleFilter,
    ) -> AppResult<Option<AlumniProfile>> {
        let profiles = self.profiles.read().await;
        Ok(profiles
            .get(&id)
            .filter(|profile| lifecycle.admits(profile.state()))
            .cloned())
    }

    async fn list(&self, lifecycle: LifecycleFilter) -> AppResult<Vec<AlumniProfile>> {
        let profiles = self.profiles.read().await;
        let mut listed: Vec<AlumniProfile> = profiles
            .values()
            .filter(|profile| lifecycle.admits(profile.state()))
            .cloned()
            .collect();
        listed.sort_by(|left, right| {
            left.details()
                .name()
                .as_str()
                .cmp(right.details().name().as_str())
                .then_with(|| left.id().cmp(&right.id()))
        });
        Ok(listed)
    }

    async fn update_live(
        &self,
        id: AlumniId,
        details: AlumniDetails,
        at: DateTime<Utc>,
    ) -> AppResult<u64> {
        let mut profiles = self.profiles.write().await;
        let is_live = profiles
            .get(&id)
            .is_some_and(|profile| profile.state() == LifecycleState::Live);
        if !is_live {
            return Ok(0);
        }
        ensure_unique_student_number(&profiles, id, &details)?;

        let Some(profile) = profiles.get_mut(&id) else {
            return Ok(0);
        };
        Ok(u64::from(profile.replace_details(details, at).is_ok()))
    }

    async fn soft_delete(&self, id: AlumniId, at: DateTime<Utc>) -> AppResult<u64> {
        self.transition(id, LifecycleState::Live, |profile| profile.trash(at))
            .await
    }

    async fn restore(&self, id: AlumniId, at: DateTime<Utc>) -> AppResult<u64> {
        self.transition(id, LifecycleState::Trashed, |profile| profile.restore(at))
            .await
    }

    async fn hard_delete(&self, id: AlumniId) -> AppResult<u64> {
        let mut profiles = self.profiles.write().await;
        let is_trashed = profiles
            .get(&id)
            .is_some_and(|profile| profile.state() == LifecycleState::Trashed);
        if !is_trashed {
            return Ok(0);
        }

        Ok(u64::from(profiles.remove(&id).is_some()))
    }

    async fn list_owned_alumni_ids(&self, account_id: AccountId) -> AppResult<Vec<AlumniId>> {
        let profiles = self.profiles.read().await;
        let mut owned: Vec<AlumniId> = profiles
            .values()
            .filter(|profile| profile.account_id() == account_id)
            .map(AlumniProfile::id)
            .collect();
        owned.sort();
        Ok(owned)
    }
}
