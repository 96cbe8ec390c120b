use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::AppError;

/// Role carried by an authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// May act on every record.
    Admin,
    /// May only act on records reachable from the caller's own account.
    User,
}

impl Role {
    /// Returns the stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err(AppError::Unauthorized(format!("unknown role '{value}'"))),
        }
    }
}

/// Authenticated caller, produced once at the transport boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    account_id: String,
    role: Role,
}

impl Principal {
    /// Creates a principal from a verified account identifier and role.
    #[must_use]
    pub fn new(account_id: impl Into<String>, role: Role) -> Self {
        Self {
            account_id: account_id.into(),
            role,
        }
    }

    /// Returns the account identifier exactly as issued by the identity provider.
    #[must_use]
    pub fn account_id(&self) -> &str {
        self.account_id.as_str()
    }

    /// Returns the caller role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns whether the caller holds the administrator role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{Principal, Role};
    use crate::AppError;

    #[test]
    fn role_roundtrips_transport_value() {
        for role in [Role::Admin, Role::User] {
            let parsed = Role::from_str(role.as_str());
            assert_eq!(parsed.ok(), Some(role));
        }
    }

    #[test]
    fn unknown_role_is_unauthorized() {
        let parsed = Role::from_str("superuser");
        assert!(matches!(parsed, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn principal_reports_admin_role() {
        assert!(Principal::new("acc", Role::Admin).is_admin());
        assert!(!Principal::new("acc", Role::User).is_admin());
    }
}
