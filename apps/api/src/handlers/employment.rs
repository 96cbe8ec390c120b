use std::str::FromStr;

use alumnet_core::Principal;
use alumnet_domain::{AlumniId, EmploymentRecordId};
use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;

use crate::dto::{
    CreateEmploymentRecordRequest, EmploymentListParams, EmploymentListResponse,
    EmploymentRecordResponse, UpdateEmploymentRecordRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_employment_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(params): Query<EmploymentListParams>,
) -> ApiResult<Json<EmploymentListResponse>> {
    let listing = state
        .employment_service
        .list(&principal, params.into())
        .await?;

    Ok(Json(EmploymentListResponse::from(listing)))
}

pub async fn list_employment_trash_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Json<Vec<EmploymentRecordResponse>>> {
    let records = state
        .employment_service
        .list_trash(&principal)
        .await?
        .into_iter()
        .map(EmploymentRecordResponse::from)
        .collect();

    Ok(Json(records))
}

pub async fn list_alumni_employment_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(alumni_id): Path<String>,
) -> ApiResult<Json<Vec<EmploymentRecordResponse>>> {
    let alumni_id = AlumniId::from_str(alumni_id.as_str())?;
    let records = state
        .employment_service
        .list_for_alumni(&principal, alumni_id)
        .await?
        .into_iter()
        .map(EmploymentRecordResponse::from)
        .collect();

    Ok(Json(records))
}

pub async fn create_employment_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<CreateEmploymentRecordRequest>,
) -> ApiResult<(StatusCode, Json<EmploymentRecordResponse>)> {
    let (alumni_id, input) = payload.into_parts();
    let alumni_id = AlumniId::from_str(alumni_id.as_str())?;
    let record = state
        .employment_service
        .create(&principal, alumni_id, input)
        .await?;

    Ok((StatusCode::CREATED, Json(EmploymentRecordResponse::from(record))))
}

pub async fn get_employment_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(record_id): Path<String>,
) -> ApiResult<Json<EmploymentRecordResponse>> {
    let record_id = EmploymentRecordId::from_str(record_id.as_str())?;
    let record = state.employment_service.get(&principal, record_id).await?;

    Ok(Json(EmploymentRecordResponse::from(record)))
}

pub async fn update_employment_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(record_id): Path<String>,
    Json(payload): Json<UpdateEmploymentRecordRequest>,
) -> ApiResult<Json<EmploymentRecordResponse>> {
    let record_id = EmploymentRecordId::from_str(record_id.as_str())?;
    let record = state
        .employment_service
        .update(&principal, record_id, payload.into())
        .await?;

    Ok(Json(EmploymentRecordResponse::from(record)))
}

pub async fn soft_delete_employment_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(record_id): Path<String>,
) -> ApiResult<StatusCode> {
    let record_id = EmploymentRecordId::from_str(record_id.as_str())?;
    state
        .employment_service
        .soft_delete(&principal, record_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn restore_employment_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(record_id): Path<String>,
) -> ApiResult<StatusCode> {
    let record_id = EmploymentRecordId::from_str(record_id.as_str())?;
    state
        .employment_service
        .restore(&principal, record_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn hard_delete_employment_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(record_id): Path<String>,
) -> ApiResult<StatusCode> {
    let record_id = EmploymentRecordId::from_str(record_id.as_str())?;
    state
        .employment_service
        .hard_delete(&principal, record_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
