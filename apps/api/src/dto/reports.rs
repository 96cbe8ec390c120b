use alumnet_application::{EmploymentStatusReport, EmploymentStatusRow};
use alumnet_domain::EMPLOYMENT_DATE_FORMAT;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Query string accepted by the employment status report. A missing status means `all`.
#[derive(Debug, Deserialize)]
pub struct EmploymentStatusParams {
    pub status: Option<String>,
}

/// One row of the employment status report.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/employment-status-row-response.ts"
)]
pub struct EmploymentStatusRowResponse {
    pub alumni_id: String,
    pub alumni_name: String,
    pub major: String,
    pub entry_year: i32,
    pub record_id: String,
    pub company: String,
    pub position: String,
    pub industry: String,
    pub status: String,
    pub start_date: String,
    pub salary_range: Option<String>,
    pub more_than_one_year: bool,
}

impl From<EmploymentStatusRow> for EmploymentStatusRowResponse {
    fn from(row: EmploymentStatusRow) -> Self {
        Self {
            alumni_id: row.alumni_id.to_string(),
            alumni_name: row.alumni_name,
            major: row.major,
            entry_year: row.entry_year,
            record_id: row.record_id.to_string(),
            company: row.company,
            position: row.position,
            industry: row.industry,
            status: row.status,
            start_date: row.start_date.format(EMPLOYMENT_DATE_FORMAT).to_string(),
            salary_range: row.salary_range,
            more_than_one_year: row.more_than_one_year,
        }
    }
}

/// Employment status report payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/employment-status-report-response.ts"
)]
pub struct EmploymentStatusReportResponse {
    pub status: String,
    pub generated_on: String,
    #[ts(type = "number")]
    pub more_than_one_year_count: u64,
    pub rows: Vec<EmploymentStatusRowResponse>,
}

impl From<EmploymentStatusReport> for EmploymentStatusReportResponse {
    fn from(report: EmploymentStatusReport) -> Self {
        Self {
            status: report.status.as_str().to_owned(),
            generated_on: report.generated_on.format(EMPLOYMENT_DATE_FORMAT).to_string(),
            more_than_one_year_count: report.more_than_one_year_count,
            rows: report
                .rows
                .into_iter()
                .map(EmploymentStatusRowResponse::from)
                .collect(),
        }
    }
}
