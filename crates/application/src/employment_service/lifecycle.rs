use alumnet_domain::{
    AlumniId, EmploymentRecord, EmploymentRecordId, EmploymentSortKey, LifecycleFilter, SortOrder,
};
use chrono::Utc;
use tracing::info;

use crate::employment_ports::{
    EmploymentRecordFilter, EmploymentRecordOrdering, EmploymentRecordPatch, ResultWindow,
};

use super::*;

impl EmploymentService {
    /// Creates a live employment record for an alumni profile inside the caller scope.
    pub async fn create(
        &self,
        actor: &Principal,
        alumni_id: AlumniId,
        input: EmploymentInput,
    ) -> AppResult<EmploymentRecord> {
        let scope = self.scope_for(actor).await?;
        let details = parse_details(input)?;

        if !scope.permits(alumni_id) {
            return Err(AppError::Validation(format!(
                "alumni profile '{alumni_id}' is not available to this account"
            )));
        }

        self.alumni_repository
            .find(alumni_id, LifecycleFilter::Live)
            .await?
            .ok_or_else(|| {
                AppError::Validation(format!("alumni profile '{alumni_id}' does not exist"))
            })?;

        let record =
            EmploymentRecord::create(EmploymentRecordId::new(), alumni_id, details, Utc::now());
        self.store.insert(record.clone()).await?;

        info!(
            record_id = %record.id(),
            alumni_id = %alumni_id,
            account_id = actor.account_id(),
            "employment record created"
        );
        Ok(record)
    }

    /// Returns a live record inside the caller scope.
    pub async fn get(
        &self,
        actor: &Principal,
        record_id: EmploymentRecordId,
    ) -> AppResult<EmploymentRecord> {
        let scope = self.scope_for(actor).await?;
        self.store
            .find_one(&EmploymentRecordFilter::targeting(
                record_id,
                &scope,
                LifecycleFilter::Live,
            ))
            .await?
            .ok_or_else(|| not_found(record_id))
    }

    /// Replaces the editable fields of a live record inside the caller scope.
    pub async fn update(
        &self,
        actor: &Principal,
        record_id: EmploymentRecordId,
        input: EmploymentInput,
    ) -> AppResult<EmploymentRecord> {
        let scope = self.scope_for(actor).await?;
        let details = parse_details(input)?;

        self.apply_transition(
            &scope,
            record_id,
            LifecycleFilter::Live,
            EmploymentRecordPatch::Replace {
                details,
                at: Utc::now(),
            },
        )
        .await?;

        info!(record_id = %record_id, account_id = actor.account_id(), "employment record updated");

        self.store
            .find_one(&EmploymentRecordFilter::targeting(
                record_id,
                &scope,
                LifecycleFilter::Any,
            ))
            .await?
            .ok_or_else(|| not_found(record_id))
    }

    /// Moves a live record inside the caller scope to the trash.
    pub async fn soft_delete(
        &self,
        actor: &Principal,
        record_id: EmploymentRecordId,
    ) -> AppResult<()> {
        let scope = self.scope_for(actor).await?;
        self.apply_transition(
            &scope,
            record_id,
            LifecycleFilter::Live,
            EmploymentRecordPatch::Trash { at: Utc::now() },
        )
        .await?;

        info!(record_id = %record_id, account_id = actor.account_id(), "employment record trashed");
        Ok(())
    }

    /// Returns a trashed record inside the caller scope to the live state.
    pub async fn restore(&self, actor: &Principal, record_id: EmploymentRecordId) -> AppResult<()> {
        let scope = self.scope_for(actor).await?;
        self.apply_transition(
            &scope,
            record_id,
            LifecycleFilter::Trashed,
            EmploymentRecordPatch::Restore { at: Utc::now() },
        )
        .await?;

        info!(
            record_id = %record_id,
            account_id = actor.account_id(),
            "employment record restored"
        );
        Ok(())
    }

    /// Permanently removes a trashed record inside the caller scope.
    pub async fn hard_delete(
        &self,
        actor: &Principal,
        record_id: EmploymentRecordId,
    ) -> AppResult<()> {
        let scope = self.scope_for(actor).await?;
        let deleted = self
            .store
            .delete_one(&EmploymentRecordFilter::targeting(
                record_id,
                &scope,
                LifecycleFilter::Trashed,
            ))
            .await?;

        if deleted == 0 {
            return Err(not_found(record_id));
        }

        info!(
            record_id = %record_id,
            account_id = actor.account_id(),
            "employment record permanently deleted"
        );
        Ok(())
    }

    /// Lists the records of one alumni profile inside the caller scope.
    ///
    /// Administrators also see trashed records; owners only see live ones.
    pub async fn list_for_alumni(
        &self,
        actor: &Principal,
        alumni_id: AlumniId,
    ) -> AppResult<Vec<EmploymentRecord>> {
        let scope = self.scope_for(actor).await?;
        let lifecycle = if scope.is_admin() {
            LifecycleFilter::Any
        } else {
            LifecycleFilter::Live
        };
        let filter = EmploymentRecordFilter::new(lifecycle)
            .with_alumni_id(alumni_id)
            .within(&scope);

        self.store
            .find_many(
                &filter,
                EmploymentRecordOrdering::Column {
                    key: EmploymentSortKey::CreatedAt,
                    order: SortOrder::Desc,
                },
                ResultWindow::unbounded(),
            )
            .await
    }

    async fn apply_transition(
        &self,
        scope: &AuthorizationScope,
        record_id: EmploymentRecordId,
        required: LifecycleFilter,
        patch: EmploymentRecordPatch,
    ) -> AppResult<()> {
        let matched = self
            .store
            .update_one(
                &EmploymentRecordFilter::targeting(record_id, scope, required),
                patch,
            )
            .await?;

        if matched == 0 {
            return Err(not_found(record_id));
        }

        Ok(())
    }
}

fn not_found(record_id: EmploymentRecordId) -> AppError {
    AppError::NotFound(format!("employment record '{record_id}' was not found"))
}
