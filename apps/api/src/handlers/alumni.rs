use std::str::FromStr;

use alumnet_core::Principal;
use alumnet_domain::{AccountId, AlumniId};
use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;

use crate::dto::{AlumniProfileResponse, CreateAlumniProfileRequest, UpdateAlumniProfileRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_alumni_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Json<Vec<AlumniProfileResponse>>> {
    let profiles = state
        .alumni_service
        .list(&principal)
        .await?
        .into_iter()
        .map(AlumniProfileResponse::from)
        .collect();

    Ok(Json(profiles))
}

pub async fn list_alumni_trash_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Json<Vec<AlumniProfileResponse>>> {
    let profiles = state
        .alumni_service
        .list_trash(&principal)
        .await?
        .into_iter()
        .map(AlumniProfileResponse::from)
        .collect();

    Ok(Json(profiles))
}

pub async fn create_alumni_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<CreateAlumniProfileRequest>,
) -> ApiResult<(StatusCode, Json<AlumniProfileResponse>)> {
    let (account_id, input) = payload.into_parts();
    let account_id = AccountId::from_str(account_id.trim())?;
    let profile = state
        .alumni_service
        .create(&principal, account_id, input)
        .await?;

    Ok((StatusCode::CREATED, Json(AlumniProfileResponse::from(profile))))
}

pub async fn get_alumni_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(alumni_id): Path<String>,
) -> ApiResult<Json<AlumniProfileResponse>> {
    let alumni_id = AlumniId::from_str(alumni_id.as_str())?;
    let profile = state.alumni_service.get(&principal, alumni_id).await?;

    Ok(Json(AlumniProfileResponse::from(profile)))
}

pub async fn update_alumni_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(alumni_id): Path<String>,
    Json(payload): Json<UpdateAlumniProfileRequest>,
) -> ApiResult<Json<AlumniProfileResponse>> {
    let alumni_id = AlumniId::from_str(alumni_id.as_str())?;
    let profile = state
        .alumni_service
        .update(&principal, alumni_id, payload.into())
        .await?;

    Ok(Json(AlumniProfileResponse::from(profile)))
}

pub async fn soft_delete_alumni_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(alumni_id): Path<String>,
) -> ApiResult<StatusCode> {
    let alumni_id = AlumniId::from_str(alumni_id.as_str())?;
    state.alumni_service.soft_delete(&principal, alumni_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn restore_alumni_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(alumni_id): Path<String>,
) -> ApiResult<StatusCode> {
    let alumni_id = AlumniId::from_str(alumni_id.as_str())?;
    state.alumni_service.restore(&principal, alumni_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn hard_delete_alumni_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(alumni_id): Path<String>,
) -> ApiResult<StatusCode> {
    let alumni_id = AlumniId::from_str(alumni_id.as_str())?;
    state.alumni_service.hard_delete(&principal, alumni_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
