use std::cmp::{Ordering, Reverse};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use alumnet_core::AppResult;
use alumnet_domain::{
    AlumniId, EmploymentDetails, EmploymentRecord, EmploymentRecordId, EmploymentSortKey,
    LifecycleFilter, PageRequest, SortOrder,
};

use crate::ownership::AuthorizationScope;

/// Input payload for employment record creation and replacement.
///
/// Dates travel as `YYYY-MM-DD` text and are parsed by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmploymentInput {
    /// Employer name.
    pub company: String,
    /// Job title.
    pub position: String,
    /// Industry sector.
    pub industry: String,
    /// Work location.
    pub location: String,
    /// Optional salary band.
    pub salary_range: Option<String>,
    /// First day of employment.
    pub start_date: String,
    /// Last day of employment; blank or absent for an ongoing stint.
    pub end_date: Option<String>,
    /// Free-text status such as `active`, `completed` or `resigned`.
    pub status: String,
    /// Optional job description.
    pub description: Option<String>,
}

/// Caller-supplied listing parameters after lenient normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmploymentListQuery {
    /// Case-insensitive substring matched against company, position and industry.
    pub search: Option<String>,
    /// Sort column.
    pub sort_key: EmploymentSortKey,
    /// Sort direction.
    pub order: SortOrder,
    /// Page window.
    pub page: PageRequest,
}

/// One page of employment records plus the unpaged match count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmploymentListing {
    /// Records on the requested page.
    pub records: Vec<EmploymentRecord>,
    /// Number of records matching the filter, ignoring the page window.
    pub total: u64,
    /// Normalized page window that produced `records`.
    pub page: PageRequest,
}

/// Match filter for employment record store operations.
///
/// Every populated field narrows the match; an `owner_ids` set that is present
/// but empty matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmploymentRecordFilter {
    /// Exact record identifier.
    pub record_id: Option<EmploymentRecordId>,
    /// Owning alumni profiles the caller may reach.
    pub owner_ids: Option<Vec<AlumniId>>,
    /// Exact owning alumni profile.
    pub alumni_id: Option<AlumniId>,
    /// Required lifecycle state.
    pub lifecycle: LifecycleFilter,
    /// Case-insensitive substring over company, position and industry.
    pub search: Option<String>,
}

impl EmploymentRecordFilter {
    /// Creates a filter that only constrains the lifecycle state.
    #[must_use]
    pub fn new(lifecycle: LifecycleFilter) -> Self {
        Self {
            record_id: None,
            owner_ids: None,
            alumni_id: None,
            lifecycle,
            search: None,
        }
    }

    /// Creates a filter for one record inside `scope` in the given state.
    #[must_use]
    pub fn targeting(
        record_id: EmploymentRecordId,
        scope: &AuthorizationScope,
        lifecycle: LifecycleFilter,
    ) -> Self {
        Self::new(lifecycle)
            .with_record_id(record_id)
            .within(scope)
    }

    /// Narrows the filter to one record.
    #[must_use]
    pub fn with_record_id(mut self, record_id: EmploymentRecordId) -> Self {
        self.record_id = Some(record_id);
        self
    }

    /// Narrows the filter to one owning alumni profile.
    #[must_use]
    pub fn with_alumni_id(mut self, alumni_id: AlumniId) -> Self {
        self.alumni_id = Some(alumni_id);
        self
    }

    /// Narrows the filter to a search term. Blank terms are ignored; any other
    /// term is kept as given, surrounding whitespace included.
    #[must_use]
    pub fn with_search(mut self, search: Option<&str>) -> Self {
        self.search = search
            .filter(|term| !term.trim().is_empty())
            .map(str::to_owned);
        self
    }

    /// Narrows the filter to the records reachable from `scope`.
    #[must_use]
    pub fn within(mut self, scope: &AuthorizationScope) -> Self {
        self.owner_ids = scope.owner_ids().map(<[AlumniId]>::to_vec);
        self
    }

    /// Returns whether `record` satisfies every populated constraint.
    #[must_use]
    pub fn matches(&self, record: &EmploymentRecord) -> bool {
        self.record_id.is_none_or(|id| id == record.id())
            && self
                .owner_ids
                .as_ref()
                .is_none_or(|owner_ids| owner_ids.contains(&record.owner_id()))
            && self.alumni_id.is_none_or(|id| id == record.owner_id())
            && self.lifecycle.admits(record.state())
            && self
                .search
                .as_deref()
                .is_none_or(|term| record.details().matches_search(term))
    }
}

/// Ordering applied by `find_many`. Ties always break on the record id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmploymentRecordOrdering {
    /// Order by a caller-selected column.
    Column {
        /// Sort column.
        key: EmploymentSortKey,
        /// Sort direction.
        order: SortOrder,
    },
    /// Most recently trashed first.
    RecentlyTrashed,
}

impl EmploymentRecordOrdering {
    /// Compares two records the way a relational store orders them: missing
    /// values sort as the largest value, and equal keys fall back to ascending id.
    #[must_use]
    pub fn compare(&self, left: &EmploymentRecord, right: &EmploymentRecord) -> Ordering {
        let primary = match self {
            Self::Column { key, order } => {
                let ordering = compare_column(*key, left, right);
                match order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            }
            Self::RecentlyTrashed => nulls_last(
                left.timestamps().deleted_at().map(Reverse),
                right.timestamps().deleted_at().map(Reverse),
            ),
        };

        primary.then_with(|| left.id().cmp(&right.id()))
    }
}

fn compare_column(
    key: EmploymentSortKey,
    left: &EmploymentRecord,
    right: &EmploymentRecord,
) -> Ordering {
    let (left_details, right_details) = (left.details(), right.details());
    match key {
        EmploymentSortKey::CreatedAt => left
            .timestamps()
            .created_at()
            .cmp(&right.timestamps().created_at()),
        EmploymentSortKey::UpdatedAt => left
            .timestamps()
            .updated_at()
            .cmp(&right.timestamps().updated_at()),
        EmploymentSortKey::Company => left_details
            .company()
            .as_str()
            .cmp(right_details.company().as_str()),
        EmploymentSortKey::Position => left_details
            .position()
            .as_str()
            .cmp(right_details.position().as_str()),
        EmploymentSortKey::Industry => left_details
            .industry()
            .as_str()
            .cmp(right_details.industry().as_str()),
        EmploymentSortKey::Location => left_details
            .location()
            .as_str()
            .cmp(right_details.location().as_str()),
        EmploymentSortKey::StartDate => left_details
            .period()
            .start_date()
            .cmp(&right_details.period().start_date()),
        EmploymentSortKey::EndDate => nulls_last(
            left_details.period().end_date(),
            right_details.period().end_date(),
        ),
        EmploymentSortKey::Status => left_details
            .status()
            .as_str()
            .cmp(right_details.status().as_str()),
    }
}

// Ascending comparison where `None` is larger than every value.
fn nulls_last<T: Ord>(left: Option<T>, right: Option<T>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Limit and offset applied by `find_many`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResultWindow {
    /// Maximum number of records; `None` returns every match.
    pub limit: Option<u32>,
    /// Number of matching records to skip.
    pub offset: u64,
}

impl ResultWindow {
    /// Window returning every match.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }
}

impl From<PageRequest> for ResultWindow {
    fn from(page: PageRequest) -> Self {
        Self {
            limit: Some(page.limit()),
            offset: page.offset(),
        }
    }
}

/// Mutation applied by `update_one` to the matched record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmploymentRecordPatch {
    /// Replace editable fields and advance `updated_at`.
    Replace {
        /// New field values.
        details: EmploymentDetails,
        /// Mutation time.
        at: DateTime<Utc>,
    },
    /// Set `deleted_at` and advance `updated_at`.
    Trash {
        /// Mutation time.
        at: DateTime<Utc>,
    },
    /// Clear `deleted_at` and advance `updated_at`.
    Restore {
        /// Mutation time.
        at: DateTime<Utc>,
    },
}

impl EmploymentRecordPatch {
    /// Applies the patch to an in-process record.
    pub fn apply(&self, record: &mut EmploymentRecord) -> AppResult<()> {
        match self {
            Self::Replace { details, at } => record.replace_details(details.clone(), *at),
            Self::Trash { at } => record.trash(*at),
            Self::Restore { at } => record.restore(*at),
        }
    }
}

/// Persistence port for employment records.
///
/// Implementations apply filters verbatim and perform each conditional write
/// as one atomic match-and-mutate step. They make no authorization decisions.
#[async_trait]
pub trait EmploymentRecordStore: Send + Sync {
    /// Returns matching records in the requested order and window.
    async fn find_many(
        &self,
        filter: &EmploymentRecordFilter,
        ordering: EmploymentRecordOrdering,
        window: ResultWindow,
    ) -> AppResult<Vec<EmploymentRecord>>;

    /// Counts matching records.
    async fn count(&self, filter: &EmploymentRecordFilter) -> AppResult<u64>;

    /// Returns one matching record.
    async fn find_one(&self, filter: &EmploymentRecordFilter)
    -> AppResult<Option<EmploymentRecord>>;

    /// Inserts a new record.
    async fn insert(&self, record: EmploymentRecord) -> AppResult<()>;

    /// Applies `patch` to at most one matching record and returns the matched count.
    async fn update_one(
        &self,
        filter: &EmploymentRecordFilter,
        patch: EmploymentRecordPatch,
    ) -> AppResult<u64>;

    /// Removes at most one matching record and returns the affected count.
    async fn delete_one(&self, filter: &EmploymentRecordFilter) -> AppResult<u64>;
}
