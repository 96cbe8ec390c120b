use alumnet_application::AlumniInput;
use alumnet_domain::AlumniProfile;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::format_timestamp;

/// Incoming payload for alumni profile creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/create-alumni-profile-request.ts"
)]
pub struct CreateAlumniProfileRequest {
    /// Identity-provider account that will own the profile.
    pub account_id: String,
    pub student_number: String,
    pub name: String,
    pub major: String,
    pub entry_year: i32,
    pub graduation_year: i32,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl CreateAlumniProfileRequest {
    /// Splits the payload into the owning account identifier and the profile input.
    #[must_use]
    pub fn into_parts(self) -> (String, AlumniInput) {
        (
            self.account_id,
            AlumniInput {
                student_number: self.student_number,
                name: self.name,
                major: self.major,
                entry_year: self.entry_year,
                graduation_year: self.graduation_year,
                email: self.email,
                phone: self.phone,
                address: self.address,
            },
        )
    }
}

/// Incoming payload for alumni profile updates.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/update-alumni-profile-request.ts"
)]
pub struct UpdateAlumniProfileRequest {
    pub student_number: String,
    pub name: String,
    pub major: String,
    pub entry_year: i32,
    pub graduation_year: i32,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl From<UpdateAlumniProfileRequest> for AlumniInput {
    fn from(value: UpdateAlumniProfileRequest) -> Self {
        Self {
            student_number: value.student_number,
            name: value.name,
            major: value.major,
            entry_year: value.entry_year,
            graduation_year: value.graduation_year,
            email: value.email,
            phone: value.phone,
            address: value.address,
        }
    }
}

/// API representation of an alumni profile.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/alumni-profile-response.ts"
)]
pub struct AlumniProfileResponse {
    pub id: String,
    pub account_id: String,
    pub student_number: String,
    pub name: String,
    pub major: String,
    pub entry_year: i32,
    pub graduation_year: i32,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
}

impl From<AlumniProfile> for AlumniProfileResponse {
    fn from(profile: AlumniProfile) -> Self {
        let details = profile.details();
        let timestamps = profile.timestamps();

        Self {
            id: profile.id().to_string(),
            account_id: profile.account_id().to_string(),
            student_number: details.student_number().as_str().to_owned(),
            name: details.name().as_str().to_owned(),
            major: details.major().as_str().to_owned(),
            entry_year: details.entry_year(),
            graduation_year: details.graduation_year(),
            email: details.email().as_str().to_owned(),
            phone: details.phone().map(str::to_owned),
            address: details.address().map(str::to_owned),
            created_at: format_timestamp(timestamps.created_at()),
            updated_at: format_timestamp(timestamps.updated_at()),
            deleted_at: timestamps.deleted_at().map(format_timestamp),
        }
    }
}
