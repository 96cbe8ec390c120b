//! Application services and ports.

#![forbid(unsafe_code)]

mod alumni_ports;
mod alumni_service;
mod employment_ports;
mod employment_service;
mod ownership;

#[cfg(test)]
mod test_support;

pub use alumni_ports::{AlumniInput, AlumniRepository};
pub use alumni_service::AlumniService;
pub use employment_ports::{
    EmploymentInput, EmploymentListQuery, EmploymentListing, EmploymentRecordFilter,
    EmploymentRecordOrdering, EmploymentRecordPatch, EmploymentRecordStore, ResultWindow,
};
pub use employment_service::{
    EmploymentService, EmploymentStatusReport, EmploymentStatusRow, build_status_report,
};
pub use ownership::{AuthorizationScope, OwnershipResolver};
