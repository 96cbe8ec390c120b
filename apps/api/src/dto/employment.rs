use alumnet_application::{EmploymentInput, EmploymentListQuery, EmploymentListing};
use alumnet_domain::{
    EMPLOYMENT_DATE_FORMAT, EmploymentRecord, EmploymentSortKey, PageRequest, SortOrder,
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::format_timestamp;

/// Incoming payload for employment record creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/create-employment-record-request.ts"
)]
pub struct CreateEmploymentRecordRequest {
    pub alumni_id: String,
    pub company: String,
    pub position: String,
    pub industry: String,
    pub location: String,
    pub salary_range: Option<String>,
    /// `YYYY-MM-DD`.
    pub start_date: String,
    /// `YYYY-MM-DD`; blank or absent means the employment is ongoing.
    pub end_date: Option<String>,
    pub status: String,
    pub description: Option<String>,
}

impl CreateEmploymentRecordRequest {
    /// Splits the payload into the owning alumni identifier and the record input.
    #[must_use]
    pub fn into_parts(self) -> (String, EmploymentInput) {
        (
            self.alumni_id,
            EmploymentInput {
                company: self.company,
                position: self.position,
                industry: self.industry,
                location: self.location,
                salary_range: self.salary_range,
                start_date: self.start_date,
                end_date: self.end_date,
                status: self.status,
                description: self.description,
            },
        )
    }
}

/// Incoming payload for employment record updates.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/update-employment-record-request.ts"
)]
pub struct UpdateEmploymentRecordRequest {
    pub company: String,
    pub position: String,
    pub industry: String,
    pub location: String,
    pub salary_range: Option<String>,
    pub start_date: String,
    pub end_date: Option<String>,
    pub status: String,
    pub description: Option<String>,
}

impl From<UpdateEmploymentRecordRequest> for EmploymentInput {
    fn from(value: UpdateEmploymentRecordRequest) -> Self {
        Self {
            company: value.company,
            position: value.position,
            industry: value.industry,
            location: value.location,
            salary_range: value.salary_range,
            start_date: value.start_date,
            end_date: value.end_date,
            status: value.status,
            description: value.description,
        }
    }
}

/// Query string accepted by the employment listing.
///
/// Every field is optional and parsed leniently: unusable values fall back to defaults.
#[derive(Debug, Default, Deserialize)]
pub struct EmploymentListParams {
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub limit: Option<String>,
    pub page: Option<String>,
}

impl From<EmploymentListParams> for EmploymentListQuery {
    fn from(value: EmploymentListParams) -> Self {
        let number = |raw: Option<&str>| raw.and_then(|raw| raw.trim().parse::<i64>().ok());

        Self {
            search: value.search,
            sort_key: EmploymentSortKey::parse_lenient(value.sort_by.as_deref()),
            order: SortOrder::parse_lenient(value.order.as_deref()),
            page: PageRequest::new(number(value.limit.as_deref()), number(value.page.as_deref())),
        }
    }
}

/// API representation of an employment record.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/employment-record-response.ts"
)]
pub struct EmploymentRecordResponse {
    pub id: String,
    pub alumni_id: String,
    pub company: String,
    pub position: String,
    pub industry: String,
    pub location: String,
    pub salary_range: Option<String>,
    pub start_date: String,
    pub end_date: Option<String>,
    pub status: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
}

impl From<EmploymentRecord> for EmploymentRecordResponse {
    fn from(record: EmploymentRecord) -> Self {
        let details = record.details();
        let period = details.period();
        let timestamps = record.timestamps();

        Self {
            id: record.id().to_string(),
            alumni_id: record.owner_id().to_string(),
            company: details.company().as_str().to_owned(),
            position: details.position().as_str().to_owned(),
            industry: details.industry().as_str().to_owned(),
            location: details.location().as_str().to_owned(),
            salary_range: details.salary_range().map(str::to_owned),
            start_date: period.start_date().format(EMPLOYMENT_DATE_FORMAT).to_string(),
            end_date: period
                .end_date()
                .map(|end_date| end_date.format(EMPLOYMENT_DATE_FORMAT).to_string()),
            status: details.status().as_str().to_owned(),
            description: details.description().map(str::to_owned),
            created_at: format_timestamp(timestamps.created_at()),
            updated_at: format_timestamp(timestamps.updated_at()),
            deleted_at: timestamps.deleted_at().map(format_timestamp),
        }
    }
}

/// Paging metadata of an employment listing.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/employment-list-meta-response.ts"
)]
pub struct EmploymentListMetaResponse {
    #[ts(type = "number")]
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

/// One page of employment records with the total match count.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/employment-list-response.ts"
)]
pub struct EmploymentListResponse {
    pub data: Vec<EmploymentRecordResponse>,
    pub meta: EmploymentListMetaResponse,
}

impl From<EmploymentListing> for EmploymentListResponse {
    fn from(listing: EmploymentListing) -> Self {
        Self {
            meta: EmploymentListMetaResponse {
                total: listing.total,
                page: listing.page.page(),
                limit: listing.page.limit(),
            },
            data: listing
                .records
                .into_iter()
                .map(EmploymentRecordResponse::from)
                .collect(),
        }
    }
}
