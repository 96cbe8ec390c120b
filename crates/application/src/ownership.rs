//! Caller scope resolution.
//!
//! The resolver turns an authenticated principal into the set of alumni
//! profiles whose employment records the caller may act on. It runs once per
//! request; the resulting scope is folded into every store filter.

use std::sync::Arc;

use alumnet_core::{AppError, AppResult, Principal, Role};
use alumnet_domain::{AccountId, AlumniId};

use crate::alumni_ports::AlumniRepository;

/// Records a caller may reach, derived per request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationScope {
    /// Matches every record.
    Admin,
    /// Matches records owned by one of the account's alumni profiles.
    Owner {
        /// Calling account.
        account_id: AccountId,
        /// Alumni profiles owned by the account, trashed ones included; empty
        /// matches nothing.
        alumni_ids: Vec<AlumniId>,
    },
}

impl AuthorizationScope {
    /// Returns whether the scope is unrestricted.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Returns the owner restriction, or `None` for administrators.
    #[must_use]
    pub fn owner_ids(&self) -> Option<&[AlumniId]> {
        match self {
            Self::Admin => None,
            Self::Owner { alumni_ids, .. } => Some(alumni_ids.as_slice()),
        }
    }

    /// Returns whether records of `alumni_id` are reachable.
    #[must_use]
    pub fn permits(&self, alumni_id: AlumniId) -> bool {
        self.owner_ids()
            .is_none_or(|alumni_ids| alumni_ids.contains(&alumni_id))
    }
}

/// Resolves principals into authorization scopes.
#[derive(Clone)]
pub struct OwnershipResolver {
    alumni_repository: Arc<dyn AlumniRepository>,
}

impl OwnershipResolver {
    /// Creates a resolver backed by the alumni profile store.
    #[must_use]
    pub fn new(alumni_repository: Arc<dyn AlumniRepository>) -> Self {
        Self { alumni_repository }
    }

    /// Resolves the caller scope.
    pub async fn resolve(&self, principal: &Principal) -> AppResult<AuthorizationScope> {
        match principal.role() {
            Role::Admin => Ok(AuthorizationScope::Admin),
            Role::User => {
                let account_id = principal.account_id().parse::<AccountId>().map_err(|_| {
                    AppError::Unauthorized(format!(
                        "account id '{}' is not a valid identifier",
                        principal.account_id()
                    ))
                })?;
                let alumni_ids = self
                    .alumni_repository
                    .list_owned_alumni_ids(account_id)
                    .await?;

                Ok(AuthorizationScope::Owner {
                    account_id,
                    alumni_ids,
                })
            }
        }
    }
}
