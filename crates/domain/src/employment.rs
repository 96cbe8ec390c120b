//! Employment record types and validation rules.

use std::str::FromStr;

use alumnet_core::{AppError, AppResult, NonEmptyString};
use chrono::{DateTime, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::alumni::{AlumniId, optional_text};
use crate::lifecycle::{LifecycleState, RecordTimestamps};

/// Calendar date format accepted for employment start and end dates.
pub const EMPLOYMENT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Unique identifier for an employment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmploymentRecordId(Uuid);

impl EmploymentRecordId {
    /// Creates a new random record identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a record identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EmploymentRecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for EmploymentRecordId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim()).map(Self).map_err(|error| {
            AppError::Validation(format!("invalid employment record id '{value}': {error}"))
        })
    }
}

impl std::fmt::Display for EmploymentRecordId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Start and optional end of an employment stint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentPeriod {
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
}

impl EmploymentPeriod {
    /// Creates a period, rejecting an end date before the start date.
    pub fn new(start_date: NaiveDate, end_date: Option<NaiveDate>) -> AppResult<Self> {
        if let Some(end_date) = end_date
            && end_date < start_date
        {
            return Err(AppError::Validation(format!(
                "end_date '{end_date}' must not precede start_date '{start_date}'"
            )));
        }

        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Parses `YYYY-MM-DD` transport values. A blank end date means the stint is ongoing.
    pub fn parse(start_date: &str, end_date: Option<&str>) -> AppResult<Self> {
        let start_date = parse_date("start_date", start_date)?;
        let end_date = end_date
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| parse_date("end_date", value))
            .transpose()?;

        Self::new(start_date, end_date)
    }

    /// Returns the first day of employment.
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns the last day of employment, if the stint has ended.
    #[must_use]
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// Returns whether the stint started strictly more than one calendar year before `today`.
    #[must_use]
    pub fn started_more_than_one_year_before(&self, today: NaiveDate) -> bool {
        today
            .checked_sub_months(Months::new(12))
            .is_some_and(|one_year_ago| self.start_date < one_year_ago)
    }
}

fn parse_date(field_name: &str, value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), EMPLOYMENT_DATE_FORMAT).map_err(|error| {
        AppError::Validation(format!(
            "{field_name} '{value}' is not a valid YYYY-MM-DD date: {error}"
        ))
    })
}

/// Validated, editable fields of an employment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentDetails {
    company: NonEmptyString,
    position: NonEmptyString,
    industry: NonEmptyString,
    location: NonEmptyString,
    salary_range: Option<String>,
    period: EmploymentPeriod,
    status: NonEmptyString,
    description: Option<String>,
}

impl EmploymentDetails {
    /// Creates validated employment fields.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        company: impl Into<String>,
        position: impl Into<String>,
        industry: impl Into<String>,
        location: impl Into<String>,
        salary_range: Option<String>,
        period: EmploymentPeriod,
        status: impl Into<String>,
        description: Option<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            company: NonEmptyString::for_field("company", company)?,
            position: NonEmptyString::for_field("position", position)?,
            industry: NonEmptyString::for_field("industry", industry)?,
            location: NonEmptyString::for_field("location", location)?,
            salary_range: optional_text(salary_range),
            period,
            status: NonEmptyString::for_field("status", status)?,
            description: optional_text(description),
        })
    }

    /// Returns the employer name.
    #[must_use]
    pub fn company(&self) -> &NonEmptyString {
        &self.company
    }

    /// Returns the job title.
    #[must_use]
    pub fn position(&self) -> &NonEmptyString {
        &self.position
    }

    /// Returns the industry sector.
    #[must_use]
    pub fn industry(&self) -> &NonEmptyString {
        &self.industry
    }

    /// Returns the work location.
    #[must_use]
    pub fn location(&self) -> &NonEmptyString {
        &self.location
    }

    /// Returns the reported salary band, if any.
    #[must_use]
    pub fn salary_range(&self) -> Option<&str> {
        self.salary_range.as_deref()
    }

    /// Returns the employment period.
    #[must_use]
    pub fn period(&self) -> EmploymentPeriod {
        self.period
    }

    /// Returns the free-text employment status.
    #[must_use]
    pub fn status(&self) -> &NonEmptyString {
        &self.status
    }

    /// Returns the job description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns whether `term` occurs case-insensitively in company, position or industry.
    #[must_use]
    pub fn matches_search(&self, term: &str) -> bool {
        if term.trim().is_empty() {
            return true;
        }

        let needle = term.to_lowercase();

        [&self.company, &self.position, &self.industry]
            .iter()
            .any(|value| value.as_str().to_lowercase().contains(needle.as_str()))
    }
}

/// One stint of employment reported by an alumnus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentRecord {
    id: EmploymentRecordId,
    owner_id: AlumniId,
    details: EmploymentDetails,
    timestamps: RecordTimestamps,
}

impl EmploymentRecord {
    /// Creates a new live record.
    #[must_use]
    pub fn create(
        id: EmploymentRecordId,
        owner_id: AlumniId,
        details: EmploymentDetails,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            details,
            timestamps: RecordTimestamps::created(at),
        }
    }

    /// Rehydrates a stored record.
    #[must_use]
    pub fn from_stored(
        id: EmploymentRecordId,
        owner_id: AlumniId,
        details: EmploymentDetails,
        timestamps: RecordTimestamps,
    ) -> Self {
        Self {
            id,
            owner_id,
            details,
            timestamps,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub fn id(&self) -> EmploymentRecordId {
        self.id
    }

    /// Returns the owning alumni profile.
    #[must_use]
    pub fn owner_id(&self) -> AlumniId {
        self.owner_id
    }

    /// Returns the editable fields.
    #[must_use]
    pub fn details(&self) -> &EmploymentDetails {
        &self.details
    }

    /// Returns lifecycle timestamps.
    #[must_use]
    pub fn timestamps(&self) -> &RecordTimestamps {
        &self.timestamps
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.timestamps.state()
    }

    /// Replaces editable fields on a live record.
    pub fn replace_details(
        &mut self,
        details: EmploymentDetails,
        at: DateTime<Utc>,
    ) -> AppResult<()> {
        self.timestamps.touch(at)?;
        self.details = details;
        Ok(())
    }

    /// Moves the record to the trash.
    pub fn trash(&mut self, at: DateTime<Utc>) -> AppResult<()> {
        self.timestamps.trash(at)
    }

    /// Restores the record from the trash.
    pub fn restore(&mut self, at: DateTime<Utc>) -> AppResult<()> {
        self.timestamps.restore(at)
    }
}

/// Status filter for the employment status report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatusFilter {
    /// Records whose status is `active`.
    Active,
    /// Records whose status is `completed` or `resigned`.
    Inactive,
    /// Every record regardless of status.
    All,
}

impl EmploymentStatusFilter {
    /// Statuses counted as a current position.
    pub const ACTIVE_STATUSES: &'static [&'static str] = &["active"];

    /// Statuses counted as a finished position.
    pub const INACTIVE_STATUSES: &'static [&'static str] = &["completed", "resigned"];

    /// Returns whether a record with `status` belongs to this filter.
    #[must_use]
    pub fn admits(&self, status: &str) -> bool {
        let status = status.trim().to_lowercase();
        match self {
            Self::Active => Self::ACTIVE_STATUSES.contains(&status.as_str()),
            Self::Inactive => Self::INACTIVE_STATUSES.contains(&status.as_str()),
            Self::All => true,
        }
    }

    /// Returns the stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::All => "all",
        }
    }
}

impl FromStr for EmploymentStatusFilter {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "all" => Ok(Self::All),
            other => Err(AppError::Validation(format!(
                "unknown employment status filter '{other}'"
            ))),
        }
    }
}
