use std::str::FromStr;

use alumnet_core::Principal;
use alumnet_domain::EmploymentStatusFilter;
use axum::Json;
use axum::extract::{Extension, Query, State};

use crate::dto::{EmploymentStatusParams, EmploymentStatusReportResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn employment_status_report_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(params): Query<EmploymentStatusParams>,
) -> ApiResult<Json<EmploymentStatusReportResponse>> {
    let status = match params.status.as_deref().map(str::trim) {
        None | Some("") => EmploymentStatusFilter::All,
        Some(value) => EmploymentStatusFilter::from_str(value)?,
    };
    let report = state
        .employment_service
        .employment_status_report(&principal, status)
        .await?;

    Ok(Json(EmploymentStatusReportResponse::from(report)))
}
