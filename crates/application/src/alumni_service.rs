use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use alumnet_core::{AppError, AppResult, Principal};
use alumnet_domain::{AccountId, AlumniId, AlumniProfile, LifecycleFilter};

use crate::alumni_ports::{AlumniInput, AlumniRepository};
use crate::employment_ports::{EmploymentRecordFilter, EmploymentRecordStore};
use crate::employment_service::require_admin;

/// Application service for administrator-managed alumni profiles.
#[derive(Clone)]
pub struct AlumniService {
    repository: Arc<dyn AlumniRepository>,
    employment_store: Arc<dyn EmploymentRecordStore>,
}

impl AlumniService {
    /// Creates a new alumni service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn AlumniRepository>,
        employment_store: Arc<dyn EmploymentRecordStore>,
    ) -> Self {
        Self {
            repository,
            employment_store,
        }
    }

    /// Creates a live profile owned by `account_id`.
    pub async fn create(
        &self,
        actor: &Principal,
        account_id: AccountId,
        input: AlumniInput,
    ) -> AppResult<AlumniProfile> {
        require_admin(actor)?;

        let profile =
            AlumniProfile::create(AlumniId::new(), account_id, input.into_details()?, Utc::now());
        self.repository.create(profile.clone()).await?;

        info!(alumni_id = %profile.id(), account_id = %account_id, "alumni profile created");
        Ok(profile)
    }

    /// Returns a live profile.
    pub async fn get(&self, actor: &Principal, alumni_id: AlumniId) -> AppResult<AlumniProfile> {
        require_admin(actor)?;
        self.repository
            .find(alumni_id, LifecycleFilter::Live)
            .await?
            .ok_or_else(|| not_found(alumni_id))
    }

    /// Lists live profiles.
    pub async fn list(&self, actor: &Principal) -> AppResult<Vec<AlumniProfile>> {
        require_admin(actor)?;
        self.repository.list(LifecycleFilter::Live).await
    }

    /// Lists trashed profiles.
    pub async fn list_trash(&self, actor: &Principal) -> AppResult<Vec<AlumniProfile>> {
        require_admin(actor)?;
        self.repository.list(LifecycleFilter::Trashed).await
    }

    /// Replaces the editable fields of a live profile.
    pub async fn update(
        &self,
        actor: &Principal,
        alumni_id: AlumniId,
        input: AlumniInput,
    ) -> AppResult<AlumniProfile> {
        require_admin(actor)?;

        let details = input.into_details()?;
        let matched = self
            .repository
            .update_live(alumni_id, details, Utc::now())
            .await?;
        if matched == 0 {
            return Err(not_found(alumni_id));
        }

        info!(alumni_id = %alumni_id, "alumni profile updated");
        self.repository
            .find(alumni_id, LifecycleFilter::Any)
            .await?
            .ok_or_else(|| not_found(alumni_id))
    }

    /// Moves a live profile to the trash. Its employment records are left untouched.
    pub async fn soft_delete(&self, actor: &Principal, alumni_id: AlumniId) -> AppResult<()> {
        require_admin(actor)?;
        if self.repository.soft_delete(alumni_id, Utc::now()).await? == 0 {
            return Err(not_found(alumni_id));
        }

        info!(alumni_id = %alumni_id, "alumni profile trashed");
        Ok(())
    }

    /// Returns a trashed profile to the live state.
    pub async fn restore(&self, actor: &Principal, alumni_id: AlumniId) -> AppResult<()> {
        require_admin(actor)?;
        if self.repository.restore(alumni_id, Utc::now()).await? == 0 {
            return Err(not_found(alumni_id));
        }

        info!(alumni_id = %alumni_id, "alumni profile restored");
        Ok(())
    }

    /// Permanently removes a trashed profile that no longer has employment records.
    pub async fn hard_delete(&self, actor: &Principal, alumni_id: AlumniId) -> AppResult<()> {
        require_admin(actor)?;

        let remaining = self
            .employment_store
            .count(&EmploymentRecordFilter::new(LifecycleFilter::Any).with_alumni_id(alumni_id))
            .await?;
        if remaining > 0 {
            return Err(AppError::Conflict(format!(
                "alumni profile '{alumni_id}' still has {remaining} employment record(s)"
            )));
        }

        if self.repository.hard_delete(alumni_id).await? == 0 {
            return Err(not_found(alumni_id));
        }

        info!(alumni_id = %alumni_id, "alumni profile permanently deleted");
        Ok(())
    }
}

fn not_found(alumni_id: AlumniId) -> AppError {
    AppError::NotFound(format!("alumni profile '{alumni_id}' was not found"))
}
