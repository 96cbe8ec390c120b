mod alumni;
mod common;
mod employment;
mod reports;

pub use alumni::{AlumniProfileResponse, CreateAlumniProfileRequest, UpdateAlumniProfileRequest};
pub use common::{HealthResponse, IssueSessionRequest, PrincipalResponse};
pub use employment::{
    CreateEmploymentRecordRequest, EmploymentListMetaResponse, EmploymentListParams,
    EmploymentListResponse, EmploymentRecordResponse, UpdateEmploymentRecordRequest,
};
pub use reports::{
    EmploymentStatusParams, EmploymentStatusReportResponse, EmploymentStatusRowResponse,
};

fn format_timestamp(value: chrono::DateTime<chrono::Utc>) -> String {
    value.to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}
