use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use alumnet_application::{
    EmploymentRecordFilter, EmploymentRecordOrdering, EmploymentRecordPatch,
    EmploymentRecordStore, ResultWindow,
};
use alumnet_core::{AppError, AppResult};
use alumnet_domain::{
    AlumniId, EmploymentDetails, EmploymentPeriod, EmploymentRecord, EmploymentRecordId,
    RecordTimestamps,
};

use crate::store_timeout::{DEFAULT_STORE_TIMEOUT, bounded};

mod statements;

use statements::{push_match, push_ordering, push_patch, push_window};

const RECORD_COLUMNS: &str = "id, owner_id, company, position, industry, location, salary_range, \
     start_date, end_date, status, description, created_at, updated_at, deleted_at";

/// PostgreSQL-backed employment record store.
#[derive(Clone)]
pub struct PostgresEmploymentRecordStore {
    pool: PgPool,
    timeout: Duration,
}

impl PostgresEmploymentRecordStore {
    /// Creates a store with the provided connection pool and the default call deadline.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self::with_timeout(pool, DEFAULT_STORE_TIMEOUT)
    }

    /// Creates a store with an explicit per-call deadline.
    #[must_use]
    pub fn with_timeout(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[derive(Debug, FromRow)]
struct EmploymentRecordRow {
    id: Uuid,
    owner_id: Uuid,
    company: String,
    position: String,
    industry: String,
    location: String,
    salary_range: Option<String>,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    status: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl EmploymentRecordRow {
    fn into_record(self) -> AppResult<EmploymentRecord> {
        let id = self.id;
        let invalid = |error: AppError| {
            AppError::Internal(format!("stored employment record '{id}' is invalid: {error}"))
        };

        let period = EmploymentPeriod::new(self.start_date, self.end_date).map_err(invalid)?;
        let details = EmploymentDetails::new(
            self.company,
            self.position,
            self.industry,
            self.location,
            self.salary_range,
            period,
            self.status,
            self.description,
        )
        .map_err(invalid)?;
        let timestamps =
            RecordTimestamps::from_stored(self.created_at, self.updated_at, self.deleted_at)?;

        Ok(EmploymentRecord::from_stored(
            EmploymentRecordId::from_uuid(self.id),
            AlumniId::from_uuid(self.owner_id),
            details,
            timestamps,
        ))
    }
}

#[async_trait]
impl EmploymentRecordStore for PostgresEmploymentRecordStore {
    async fn find_many(
        &self,
        filter: &EmploymentRecordFilter,
        ordering: EmploymentRecordOrdering,
        window: ResultWindow,
    ) -> AppResult<Vec<EmploymentRecord>> {
        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new(format!("SELECT {RECORD_COLUMNS} FROM employment_records"));
        push_match(&mut builder, filter);
        push_ordering(&mut builder, ordering);
        push_window(&mut builder, window)?;

        let rows = bounded(
            self.timeout,
            "list employment records",
            builder
                .build_query_as::<EmploymentRecordRow>()
                .fetch_all(&self.pool),
        )
        .await?;

        rows.into_iter()
            .map(EmploymentRecordRow::into_record)
            .collect()
    }

    async fn count(&self, filter: &EmploymentRecordFilter) -> AppResult<u64> {
        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM employment_records");
        push_match(&mut builder, filter);

        let count = bounded(
            self.timeout,
            "count employment records",
            builder.build_query_scalar::<i64>().fetch_one(&self.pool),
        )
        .await?;

        u64::try_from(count).map_err(|error| {
            AppError::Internal(format!("employment record count out of range: {error}"))
        })
    }

    async fn find_one(
        &self,
        filter: &EmploymentRecordFilter,
    ) -> AppResult<Option<EmploymentRecord>> {
        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new(format!("SELECT {RECORD_COLUMNS} FROM employment_records"));
        push_match(&mut builder, filter);
        builder.push(" ORDER BY id LIMIT 1");

        let row = bounded(
            self.timeout,
            "find employment record",
            builder
                .build_query_as::<EmploymentRecordRow>()
                .fetch_optional(&self.pool),
        )
        .await?;

        row.map(EmploymentRecordRow::into_record).transpose()
    }

    async fn insert(&self, record: EmploymentRecord) -> AppResult<()> {
        let details = record.details();
        let timestamps = record.timestamps();

        bounded(
            self.timeout,
            "insert employment record",
            sqlx::query(
                r#"
                INSERT INTO employment_records (
                    id, owner_id, company, position, industry, location, salary_range,
                    start_date, end_date, status, description, created_at, updated_at, deleted_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
                "#,
            )
            .bind(record.id().as_uuid())
            .bind(record.owner_id().as_uuid())
            .bind(details.company().as_str())
            .bind(details.position().as_str())
            .bind(details.industry().as_str())
            .bind(details.location().as_str())
            .bind(details.salary_range())
            .bind(details.period().start_date())
            .bind(details.period().end_date())
            .bind(details.status().as_str())
            .bind(details.description())
            .bind(timestamps.created_at())
            .bind(timestamps.updated_at())
            .bind(timestamps.deleted_at())
            .execute(&self.pool),
        )
        .await?;

        Ok(())
    }

    async fn update_one(
        &self,
        filter: &EmploymentRecordFilter,
        patch: EmploymentRecordPatch,
    ) -> AppResult<u64> {
        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("UPDATE employment_records SET ");
        push_patch(&mut builder, patch);
        push_single_match(&mut builder, filter);

        let result = bounded(
            self.timeout,
            "update employment record",
            builder.build().execute(&self.pool),
        )
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_one(&self, filter: &EmploymentRecordFilter) -> AppResult<u64> {
        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("DELETE FROM employment_records");
        push_single_match(&mut builder, filter);

        let result = bounded(
            self.timeout,
            "delete employment record",
            builder.build().execute(&self.pool),
        )
        .await?;

        Ok(result.rows_affected())
    }
}

// Restricts a write to at most one matching row. The outer predicate is
// re-evaluated after a concurrent writer releases the row lock, so a
// transition that lost the race matches nothing.
fn push_single_match(builder: &mut QueryBuilder<'_, Postgres>, filter: &EmploymentRecordFilter) {
    push_match(builder, filter);
    builder.push(" AND id = (SELECT id FROM employment_records");
    push_match(builder, filter);
    builder.push(" ORDER BY id LIMIT 1)");
}
