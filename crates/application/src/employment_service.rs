use std::sync::Arc;

use alumnet_core::{AppError, AppResult, Principal};
use alumnet_domain::{EmploymentDetails, EmploymentPeriod};

use crate::alumni_ports::AlumniRepository;
use crate::employment_ports::{EmploymentInput, EmploymentRecordStore};
use crate::ownership::{AuthorizationScope, OwnershipResolver};

mod lifecycle;
mod query;
mod report;

pub use report::{EmploymentStatusReport, EmploymentStatusRow, build_status_report};

/// Application service for the employment record lifecycle, listings and reports.
#[derive(Clone)]
pub struct EmploymentService {
    ownership_resolver: OwnershipResolver,
    store: Arc<dyn EmploymentRecordStore>,
    alumni_repository: Arc<dyn AlumniRepository>,
}

impl EmploymentService {
    /// Creates a new employment service.
    #[must_use]
    pub fn new(
        ownership_resolver: OwnershipResolver,
        store: Arc<dyn EmploymentRecordStore>,
        alumni_repository: Arc<dyn AlumniRepository>,
    ) -> Self {
        Self {
            ownership_resolver,
            store,
            alumni_repository,
        }
    }

    async fn scope_for(&self, actor: &Principal) -> AppResult<AuthorizationScope> {
        self.ownership_resolver.resolve(actor).await
    }
}

fn parse_details(input: EmploymentInput) -> AppResult<EmploymentDetails> {
    let period = EmploymentPeriod::parse(input.start_date.as_str(), input.end_date.as_deref())?;
    EmploymentDetails::new(
        input.company,
        input.position,
        input.industry,
        input.location,
        input.salary_range,
        period,
        input.status,
        input.description,
    )
}

pub(crate) fn require_admin(actor: &Principal) -> AppResult<()> {
    if !actor.is_admin() {
        return Err(AppError::Forbidden(format!(
            "account '{}' lacks the admin role",
            actor.account_id()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests;
