use alumnet_core::Principal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
    /// `postgres` or `memory`.
    pub store: &'static str,
}

/// Incoming payload for trusted session issuance.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/issue-session-request.ts"
)]
pub struct IssueSessionRequest {
    pub token: String,
    pub account_id: String,
    /// `admin` or `user`.
    pub role: String,
}

/// API representation of the authenticated caller.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/principal-response.ts"
)]
pub struct PrincipalResponse {
    pub account_id: String,
    pub role: String,
}

impl From<Principal> for PrincipalResponse {
    fn from(principal: Principal) -> Self {
        Self {
            account_id: principal.account_id().to_owned(),
            role: principal.role().as_str().to_owned(),
        }
    }
}
