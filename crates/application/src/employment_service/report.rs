use std::collections::HashMap;

use alumnet_domain::{
    AlumniId, AlumniProfile, EmploymentRecord, EmploymentRecordId, EmploymentSortKey,
    EmploymentStatusFilter, LifecycleFilter, SortOrder,
};
use chrono::{NaiveDate, Utc};

use crate::employment_ports::{EmploymentRecordFilter, EmploymentRecordOrdering, ResultWindow};

use super::*;

/// One employment record joined with its alumni profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmploymentStatusRow {
    /// Owning alumni profile.
    pub alumni_id: AlumniId,
    /// Alumni full name.
    pub alumni_name: String,
    /// Alumni study programme.
    pub major: String,
    /// Alumni year of enrolment.
    pub entry_year: i32,
    /// Employment record.
    pub record_id: EmploymentRecordId,
    /// Employer name.
    pub company: String,
    /// Job title.
    pub position: String,
    /// Industry sector.
    pub industry: String,
    /// Employment status as stored.
    pub status: String,
    /// First day of employment.
    pub start_date: NaiveDate,
    /// Optional salary band.
    pub salary_range: Option<String>,
    /// Whether the stint started more than one calendar year before the report date.
    pub more_than_one_year: bool,
}

/// Employment status report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmploymentStatusReport {
    /// Status filter that produced the rows.
    pub status: EmploymentStatusFilter,
    /// Report date used for the one-year rule.
    pub generated_on: NaiveDate,
    /// Joined rows.
    pub rows: Vec<EmploymentStatusRow>,
    /// Number of rows with `more_than_one_year` set.
    pub more_than_one_year_count: u64,
}

impl EmploymentService {
    /// Builds the employment status report over live records and live profiles.
    pub async fn employment_status_report(
        &self,
        actor: &Principal,
        status: EmploymentStatusFilter,
    ) -> AppResult<EmploymentStatusReport> {
        require_admin(actor)?;

        let records = self
            .store
            .find_many(
                &EmploymentRecordFilter::new(LifecycleFilter::Live),
                EmploymentRecordOrdering::Column {
                    key: EmploymentSortKey::StartDate,
                    order: SortOrder::Asc,
                },
                ResultWindow::unbounded(),
            )
            .await?;
        let profiles = self.alumni_repository.list(LifecycleFilter::Live).await?;

        Ok(build_status_report(
            &records,
            &profiles,
            status,
            Utc::now().date_naive(),
        ))
    }
}

/// Joins records with their profiles and applies the status filter.
///
/// Records whose profile is missing from `profiles` are skipped. The order of
/// `records` is preserved.
#[must_use]
pub fn build_status_report(
    records: &[EmploymentRecord],
    profiles: &[AlumniProfile],
    status: EmploymentStatusFilter,
    today: NaiveDate,
) -> EmploymentStatusReport {
    let profiles_by_id: HashMap<AlumniId, &AlumniProfile> = profiles
        .iter()
        .map(|profile| (profile.id(), profile))
        .collect();

    let rows: Vec<EmploymentStatusRow> = records
        .iter()
        .filter(|record| status.admits(record.details().status().as_str()))
        .filter_map(|record| {
            let profile = profiles_by_id.get(&record.owner_id())?;
            let details = record.details();
            Some(EmploymentStatusRow {
                alumni_id: profile.id(),
                alumni_name: profile.details().name().as_str().to_owned(),
                major: profile.details().major().as_str().to_owned(),
                entry_year: profile.details().entry_year(),
                record_id: record.id(),
                company: details.company().as_str().to_owned(),
                position: details.position().as_str().to_owned(),
                industry: details.industry().as_str().to_owned(),
                status: details.status().as_str().to_owned(),
                start_date: details.period().start_date(),
                salary_range: details.salary_range().map(str::to_owned),
                more_than_one_year: details.period().started_more_than_one_year_before(today),
            })
        })
        .collect();

    let more_than_one_year_count = rows.iter().filter(|row| row.more_than_one_year).count();

    EmploymentStatusReport {
        status,
        generated_on: today,
        rows,
        more_than_one_year_count: u64::try_from(more_than_one_year_count).unwrap_or(u64::MAX),
    }
}
