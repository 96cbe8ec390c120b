use alumnet_core::{AppError, Principal};
use axum::extract::{Extension, Request};
use axum::middleware::Next;
use axum::response::Response;
use tower_sessions::Session;

use crate::auth::SESSION_PRINCIPAL_KEY;
use crate::error::ApiResult;

pub async fn require_auth(
    session: Session,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let principal = session
        .get::<Principal>(SESSION_PRINCIPAL_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session principal: {error}")))?
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

/// Rejects callers without the administrator role. Runs after [`require_auth`].
pub async fn require_admin(
    Extension(principal): Extension<Principal>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    if !principal.is_admin() {
        return Err(AppError::Forbidden("administrator role is required".to_owned()).into());
    }

    Ok(next.run(request).await)
}
