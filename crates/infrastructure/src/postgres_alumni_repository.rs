use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use alumnet_application::AlumniRepository;
use alumnet_core::{AppError, AppResult};
use alumnet_domain::{
    AccountId, AlumniDetails, AlumniId, AlumniProfile, LifecycleFilter, RecordTimestamps,
};

use crate::store_timeout::{DEFAULT_STORE_TIMEOUT, bounded};

/// PostgreSQL-backed alumni profile repository.
#[derive(Clone)]
pub struct PostgresAlumniRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PostgresAlumniRepository {
    /// Creates a repository with the provided connection pool and the default call deadline.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self::with_timeout(pool, DEFAULT_STORE_TIMEOUT)
    }

    /// Creates a repository with an explicit per-call deadline.
    #[must_use]
    pub fn with_timeout(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[derive(Debug, FromRow)]
struct AlumniProfileRow {
    id: Uuid,
    account_id: Uuid,
    student_number: String,
    name: String,
    major: String,
    entry_year: i32,
    graduation_year: i32,
    email: String,
    phone: Option<String>,
    address: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl AlumniProfileRow {
    fn into_profile(self) -> AppResult<AlumniProfile> {
        let id = self.id;
        let details = AlumniDetails::new(
            self.student_number,
            self.name,
            self.major,
            self.entry_year,
            self.graduation_year,
            self.email,
            self.phone,
            self.address,
        )
        .map_err(|error| {
            AppError::Internal(format!("stored alumni profile '{id}' is invalid: {error}"))
        })?;
        let timestamps =
            RecordTimestamps::from_stored(self.created_at, self.updated_at, self.deleted_at)?;

        Ok(AlumniProfile::from_stored(
            AlumniId::from_uuid(self.id),
            AccountId::from_uuid(self.account_id),
            details,
            timestamps,
        ))
    }
}

fn lifecycle_predicate(lifecycle: LifecycleFilter) -> &'static str {
    match lifecycle {
        LifecycleFilter::Live => "deleted_at IS NULL",
        LifecycleFilter::Trashed => "deleted_at IS NOT NULL",
        LifecycleFilter::Any => "TRUE",
    }
}

const PROFILE_COLUMNS: &str = "id, account_id, student_number, name, major, entry_year, \
     graduation_year, email, phone, address, created_at, updated_at, deleted_at";

#[async_trait]
impl AlumniRepository for PostgresAlumniRepository {
    async fn create(&self, profile: AlumniProfile) -> AppResult<()> {
        let details = profile.details();
        let timestamps = profile.timestamps();

        bounded(
            self.timeout,
            "create alumni profile",
            sqlx::query(
                r#"
                INSERT INTO alumni_profiles (
                    id, account_id, student_number, name, major, entry_year, graduation_year,
                    email, phone, address, created_at, updated_at, deleted_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
                "#,
            )
            .bind(profile.id().as_uuid())
            .bind(profile.account_id().as_uuid())
            .bind(details.student_number().as_str())
            .bind(details.name().as_str())
            .bind(details.major().as_str())
            .bind(details.entry_year())
            .bind(details.graduation_year())
            .bind(details.email().as_str())
            .bind(details.phone())
            .bind(details.address())
            .bind(timestamps.created_at())
            .bind(timestamps.updated_at())
            .bind(timestamps.deleted_at())
            .execute(&self.pool),
        )
        .await?;

        Ok(())
    }

    async fn find(
        &self,
        id: AlumniId,
        lifecycle: LifecycleFilter,
    ) -> AppResult<Option<AlumniProfile>> {
        let statement = format!(
            "SELECT {PROFILE_COLUMNS} FROM alumni_profiles WHERE id = $1 AND {}",
            lifecycle_predicate(lifecycle)
        );
        let row = bounded(
            self.timeout,
            "find alumni profile",
            sqlx::query_as::<_, AlumniProfileRow>(statement.as_str())
                .bind(id.as_uuid())
                .fetch_optional(&self.pool),
        )
        .await?;

        row.map(AlumniProfileRow::into_profile).transpose()
    }

    async fn list(&self, lifecycle: LifecycleFilter) -> AppResult<Vec<AlumniProfile>> {
        let statement = format!(
            "SELECT {PROFILE_COLUMNS} FROM alumni_profiles WHERE {} ORDER BY name ASC, id ASC",
            lifecycle_predicate(lifecycle)
        );
        let rows = bounded(
            self.timeout,
            "list alumni profiles",
            sqlx::query_as::<_, AlumniProfileRow>(statement.as_str()).fetch_all(&self.pool),
        )
        .await?;

        rows.into_iter().map(AlumniProfileRow::into_profile).collect()
    }

    async fn update_live(
        &self,
        id: AlumniId,
        details: AlumniDetails,
        at: DateTime<Utc>,
    ) -> AppResult<u64> {
        let result = bounded(
            self.timeout,
            "update alumni profile",
            sqlx::query(
                r#"
                UPDATE alumni_profiles
                SET student_number = $2,
                    name = $3,
                    major = $4,
                    entry_year = $5,
                    graduation_year = $6,
                    email = $7,
                    phone = $8,
                    address = $9,
                    updated_at = GREATEST($10, updated_at + INTERVAL '1 microsecond')
                WHERE id = $1 AND deleted_at IS NULL
                "#,
            )
            .bind(id.as_uuid())
            .bind(details.student_number().as_str())
            .bind(details.name().as_str())
            .bind(details.major().as_str())
            .bind(details.entry_year())
            .bind(details.graduation_year())
            .bind(details.email().as_str())
            .bind(details.phone())
            .bind(details.address())
            .bind(at)
            .execute(&self.pool),
        )
        .await?;

        Ok(result.rows_affected())
    }

    async fn soft_delete(&self, id: AlumniId, at: DateTime<Utc>) -> AppResult<u64> {
        let result = bounded(
            self.timeout,
            "trash alumni profile",
            sqlx::query(
                r#"
                UPDATE alumni_profiles
                SET updated_at = GREATEST($2, updated_at + INTERVAL '1 microsecond'),
                    deleted_at = GREATEST(
                        created_at,
                        GREATEST($2, updated_at + INTERVAL '1 microsecond')
                    )
                WHERE id = $1 AND deleted_at IS NULL
                "#,
            )
            .bind(id.as_uuid())
            .bind(at)
            .execute(&self.pool),
        )
        .await?;

        Ok(result.rows_affected())
    }

    async fn restore(&self, id: AlumniId, at: DateTime<Utc>) -> AppResult<u64> {
        let result = bounded(
            self.timeout,
            "restore alumni profile",
            sqlx::query(
                r#"
                UPDATE alumni_profiles
                SET deleted_at = NULL,
                    updated_at = GREATEST($2, updated_at + INTERVAL '1 microsecond')
                WHERE id = $1 AND deleted_at IS NOT NULL
                "#,
            )
            .bind(id.as_uuid())
            .bind(at)
            .execute(&self.pool),
        )
        .await?;

        Ok(result.rows_affected())
    }

    async fn hard_delete(&self, id: AlumniId) -> AppResult<u64> {
        let result = bounded(
            self.timeout,
            "delete alumni profile",
            sqlx::query(
                r#"
                DELETE FROM alumni_profiles
                WHERE id = $1 AND deleted_at IS NOT NULL
                "#,
            )
            .bind(id.as_uuid())
            .execute(&self.pool),
        )
        .await?;

        Ok(result.rows_affected())
    }

    async fn list_owned_alumni_ids(&self, account_id: AccountId) -> AppResult<Vec<AlumniId>> {
        let ids = bounded(
            self.timeout,
            "resolve owned alumni profiles",
            sqlx::query_scalar::<_, Uuid>(
                r#"
                SELECT id
                FROM alumni_profiles
                WHERE account_id = $1
                ORDER BY id
                "#,
            )
            .bind(account_id.as_uuid())
            .fetch_all(&self.pool),
        )
        .await?;

        Ok(ids.into_iter().map(AlumniId::from_uuid).collect())
    }
}
