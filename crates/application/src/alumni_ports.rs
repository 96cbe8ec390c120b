use async_trait::async_trait;
use chrono::{DateTime, Utc};

use alumnet_core::AppResult;
use alumnet_domain::{AccountId, AlumniDetails, AlumniId, AlumniProfile, LifecycleFilter};

/// Input payload for alumni profile creation and replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlumniInput {
    /// Student registration number, unique across profiles.
    pub student_number: String,
    /// Full name.
    pub name: String,
    /// Study programme.
    pub major: String,
    /// Year of enrolment.
    pub entry_year: i32,
    /// Year of graduation.
    pub graduation_year: i32,
    /// Contact email.
    pub email: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Optional postal address.
    pub address: Option<String>,
}

impl AlumniInput {
    /// Validates the payload into domain fields.
    pub fn into_details(self) -> AppResult<AlumniDetails> {
        AlumniDetails::new(
            self.student_number,
            self.name,
            self.major,
            self.entry_year,
            self.graduation_year,
            self.email,
            self.phone,
            self.address,
        )
    }
}

/// Persistence port for alumni profiles.
///
/// Conditional writes return the matched count; `update_live` and `soft_delete`
/// only match live profiles, `restore` and `hard_delete` only trashed ones.
#[async_trait]
pub trait AlumniRepository: Send + Sync {
    /// Inserts a new profile. A duplicate student number is a conflict.
    async fn create(&self, profile: AlumniProfile) -> AppResult<()>;

    /// Finds one profile in the given lifecycle state.
    async fn find(&self, id: AlumniId, lifecycle: LifecycleFilter)
    -> AppResult<Option<AlumniProfile>>;

    /// Lists profiles in the given lifecycle state.
    async fn list(&self, lifecycle: LifecycleFilter) -> AppResult<Vec<AlumniProfile>>;

    /// Replaces editable fields of a live profile.
    async fn update_live(
        &self,
        id: AlumniId,
        details: AlumniDetails,
        at: DateTime<Utc>,
    ) -> AppResult<u64>;

    /// Moves a live profile to the trash.
    async fn soft_delete(&self, id: AlumniId, at: DateTime<Utc>) -> AppResult<u64>;

    /// Restores a trashed profile.
    async fn restore(&self, id: AlumniId, at: DateTime<Utc>) -> AppResult<u64>;

    /// Permanently removes a trashed profile.
    async fn hard_delete(&self, id: AlumniId) -> AppResult<u64>;

    /// Lists ids of every profile owned by an account, trashed or not.
    async fn list_owned_alumni_ids(&self, account_id: AccountId) -> AppResult<Vec<AlumniId>>;
}
