//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod alumni;
mod employment;
mod lifecycle;
mod listing;

pub use alumni::{
    AccountId, AlumniDetails, AlumniId, AlumniProfile, MAX_ACADEMIC_YEAR, MIN_ACADEMIC_YEAR,
};
pub use employment::{
    EMPLOYMENT_DATE_FORMAT, EmploymentDetails, EmploymentPeriod, EmploymentRecord,
    EmploymentRecordId, EmploymentStatusFilter,
};
pub use lifecycle::{LifecycleFilter, LifecycleState, RecordTimestamps, advance_timestamp};
pub use listing::{DEFAULT_PAGE_LIMIT, EmploymentSortKey, MAX_PAGE_LIMIT, PageRequest, SortOrder};
