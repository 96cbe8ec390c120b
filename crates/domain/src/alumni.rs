//! Alumni profile types.
//!
//! An alumni profile is owned by exactly one login account. The
//! account → profile link is the single hop used to decide which employment
//! records a regular user may act on.

use std::str::FromStr;

use alumnet_core::{AppError, AppResult, NonEmptyString};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::lifecycle::{LifecycleState, RecordTimestamps};

/// Identifier of a login account, as issued by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Creates a new random account identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an account identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for AccountId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|error| AppError::Validation(format!("invalid account id '{value}': {error}")))
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Identifier of an alumni profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AlumniId(Uuid);

impl AlumniId {
    /// Creates a new random alumni identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an alumni identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for AlumniId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for AlumniId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|error| AppError::Validation(format!("invalid alumni id '{value}': {error}")))
    }
}

impl std::fmt::Display for AlumniId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Earliest accepted entry or graduation year.
pub const MIN_ACADEMIC_YEAR: i32 = 1900;

/// Latest accepted entry or graduation year.
pub const MAX_ACADEMIC_YEAR: i32 = 2200;

/// Validated, editable fields of an alumni profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlumniDetails {
    student_number: NonEmptyString,
    name: NonEmptyString,
    major: NonEmptyString,
    entry_year: i32,
    graduation_year: i32,
    email: NonEmptyString,
    phone: Option<String>,
    address: Option<String>,
}

impl AlumniDetails {
    /// Creates validated alumni profile fields.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        student_number: impl Into<String>,
        name: impl Into<String>,
        major: impl Into<String>,
        entry_year: i32,
        graduation_year: i32,
        email: impl Into<String>,
        phone: Option<String>,
        address: Option<String>,
    ) -> AppResult<Self> {
        for (field_name, year) in [("entry_year", entry_year), ("graduation_year", graduation_year)]
        {
            if !(MIN_ACADEMIC_YEAR..=MAX_ACADEMIC_YEAR).contains(&year) {
                return Err(AppError::Validation(format!(
                    "{field_name} must be between {MIN_ACADEMIC_YEAR} and {MAX_ACADEMIC_YEAR}"
                )));
            }
        }

        if graduation_year < entry_year {
            return Err(AppError::Validation(
                "graduation_year must not precede entry_year".to_owned(),
            ));
        }

        let email = NonEmptyString::for_field("email", email)?;
        if !email.as_str().contains('@') {
            return Err(AppError::Validation(
                "email must contain an '@'".to_owned(),
            ));
        }

        Ok(Self {
            student_number: NonEmptyString::for_field("student_number", student_number)?,
            name: NonEmptyString::for_field("name", name)?,
            major: NonEmptyString::for_field("major", major)?,
            entry_year,
            graduation_year,
            email,
            phone: optional_text(phone),
            address: optional_text(address),
        })
    }

    /// Returns the student registration number.
    #[must_use]
    pub fn student_number(&self) -> &NonEmptyString {
        &self.student_number
    }

    /// Returns the full name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the study programme.
    #[must_use]
    pub fn major(&self) -> &NonEmptyString {
        &self.major
    }

    /// Returns the year of enrolment.
    #[must_use]
    pub fn entry_year(&self) -> i32 {
        self.entry_year
    }

    /// Returns the year of graduation.
    #[must_use]
    pub fn graduation_year(&self) -> i32 {
        self.graduation_year
    }

    /// Returns the contact email.
    #[must_use]
    pub fn email(&self) -> &NonEmptyString {
        &self.email
    }

    /// Returns the phone number, if any.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Returns the postal address, if any.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }
}

/// Persisted alumni profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlumniProfile {
    id: AlumniId,
    account_id: AccountId,
    details: AlumniDetails,
    timestamps: RecordTimestamps,
}

impl AlumniProfile {
    /// Creates a new live profile.
    #[must_use]
    pub fn create(
        id: AlumniId,
        account_id: AccountId,
        details: AlumniDetails,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            account_id,
            details,
            timestamps: RecordTimestamps::created(at),
        }
    }

    /// Rehydrates a stored profile.
    #[must_use]
    pub fn from_stored(
        id: AlumniId,
        account_id: AccountId,
        details: AlumniDetails,
        timestamps: RecordTimestamps,
    ) -> Self {
        Self {
            id,
            account_id,
            details,
            timestamps,
        }
    }

    /// Returns the profile identifier.
    #[must_use]
    pub fn id(&self) -> AlumniId {
        self.id
    }

    /// Returns the owning account.
    #[must_use]
    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// Returns the editable fields.
    #[must_use]
    pub fn details(&self) -> &AlumniDetails {
        &self.details
    }

    /// Returns lifecycle timestamps.
    #[must_use]
    pub fn timestamps(&self) -> &RecordTimestamps {
        &self.timestamps
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.timestamps.state()
    }

    /// Replaces editable fields on a live profile.
    pub fn replace_details(&mut self, details: AlumniDetails, at: DateTime<Utc>) -> AppResult<()> {
        self.timestamps.touch(at)?;
        self.details = details;
        Ok(())
    }

    /// Moves the profile to the trash.
    pub fn trash(&mut self, at: DateTime<Utc>) -> AppResult<()> {
        self.timestamps.trash(at)
    }

    /// Restores the profile from the trash.
    pub fn restore(&mut self, at: DateTime<Utc>) -> AppResult<()> {
        self.timestamps.restore(at)
    }
}

pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
