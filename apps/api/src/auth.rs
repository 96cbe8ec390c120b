use std::str::FromStr;

use alumnet_core::{AppError, Principal, Role};
use alumnet_domain::AccountId;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tower_sessions::Session;
use tracing::{info, warn};

use crate::dto::{IssueSessionRequest, PrincipalResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub const SESSION_PRINCIPAL_KEY: &str = "principal";

/// POST /auth/session - Issues a session for a caller vouched for by the bootstrap token.
pub async fn issue_session_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<IssueSessionRequest>,
) -> ApiResult<Json<PrincipalResponse>> {
    if payload.token != state.bootstrap_token {
        warn!(
            account_id = %payload.account_id,
            "session issuance rejected: invalid bootstrap token"
        );
        return Err(AppError::Unauthorized("invalid bootstrap token".to_owned()).into());
    }

    let role = Role::from_str(payload.role.trim()).inspect_err(|_| {
        warn!(role = %payload.role, "session issuance rejected: unknown role");
    })?;
    let account_id = AccountId::from_str(payload.account_id.trim())?;
    let principal = Principal::new(account_id.to_string(), role);

    session
        .cycle_id()
        .await
        .map_err(|error| AppError::Internal(format!("failed to cycle session id: {error}")))?;

    session
        .insert(SESSION_PRINCIPAL_KEY, &principal)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to persist session principal: {error}"))
        })?;

    info!(
        account_id = principal.account_id(),
        role = role.as_str(),
        "session issued"
    );
    Ok(Json(PrincipalResponse::from(principal)))
}

pub async fn logout_handler(session: Session) -> ApiResult<StatusCode> {
    session
        .delete()
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete session: {error}")))?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn me_handler(
    axum::Extension(principal): axum::Extension<Principal>,
) -> Json<PrincipalResponse> {
    Json(PrincipalResponse::from(principal))
}
