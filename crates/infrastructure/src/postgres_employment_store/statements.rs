use chrono::{DateTime, Utc};
use sqlx::{Postgres, QueryBuilder};

use alumnet_application::{
    EmploymentRecordFilter, EmploymentRecordOrdering, EmploymentRecordPatch, ResultWindow,
};
use alumnet_core::{AppError, AppResult};
use alumnet_domain::{AlumniId, LifecycleFilter};

/// Appends a `WHERE` clause for every populated filter field.
pub(super) fn push_match(
    builder: &mut QueryBuilder<'_, Postgres>,
    filter: &EmploymentRecordFilter,
) {
    builder.push(" WHERE TRUE");

    if let Some(record_id) = filter.record_id {
        builder.push(" AND id = ");
        builder.push_bind(record_id.as_uuid());
    }

    if let Some(owner_ids) = &filter.owner_ids {
        let owner_ids: Vec<uuid::Uuid> = owner_ids.iter().map(AlumniId::as_uuid).collect();
        builder.push(" AND owner_id = ANY(");
        builder.push_bind(owner_ids);
        builder.push(")");
    }

    if let Some(alumni_id) = filter.alumni_id {
        builder.push(" AND owner_id = ");
        builder.push_bind(alumni_id.as_uuid());
    }

    match filter.lifecycle {
        LifecycleFilter::Live => {
            builder.push(" AND deleted_at IS NULL");
        }
        LifecycleFilter::Trashed => {
            builder.push(" AND deleted_at IS NOT NULL");
        }
        LifecycleFilter::Any => {}
    }

    if let Some(search) = filter.search.as_deref() {
        let pattern = format!("%{}%", escape_like(search));
        builder.push(" AND (");
        for (index, column) in ["company", "position", "industry"].into_iter().enumerate() {
            if index > 0 {
                builder.push(" OR ");
            }
            builder.push(column);
            builder.push(" ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(r" ESCAPE '\'");
        }
        builder.push(")");
    }
}

/// Appends `ORDER BY`, always ending with the id tiebreaker.
pub(super) fn push_ordering(
    builder: &mut QueryBuilder<'_, Postgres>,
    ordering: EmploymentRecordOrdering,
) {
    match ordering {
        EmploymentRecordOrdering::Column { key, order } => {
            builder.push(" ORDER BY ");
            builder.push(key.as_str());
            builder.push(" ");
            builder.push(order.as_sql());
        }
        EmploymentRecordOrdering::RecentlyTrashed => {
            builder.push(" ORDER BY deleted_at DESC NULLS LAST");
        }
    }
    builder.push(", id ASC");
}

/// Appends `LIMIT`/`OFFSET` when the window is bounded.
pub(super) fn push_window(
    builder: &mut QueryBuilder<'_, Postgres>,
    window: ResultWindow,
) -> AppResult<()> {
    if let Some(limit) = window.limit {
        builder.push(" LIMIT ");
        builder.push_bind(i64::from(limit));
    }

    if window.offset > 0 {
        let offset = i64::try_from(window.offset).map_err(|error| {
            AppError::Validation(format!("invalid employment record offset: {error}"))
        })?;
        builder.push(" OFFSET ");
        builder.push_bind(offset);
    }

    Ok(())
}

/// Appends the `SET` list for a patch.
///
/// `updated_at` moves to the later of the mutation time and one microsecond
/// past its stored value; a trash marker never precedes `created_at`.
pub(super) fn push_patch(builder: &mut QueryBuilder<'_, Postgres>, patch: EmploymentRecordPatch) {
    match patch {
        EmploymentRecordPatch::Replace { details, at } => {
            builder.push("company = ");
            builder.push_bind(details.company().as_str().to_owned());
            builder.push(", position = ");
            builder.push_bind(details.position().as_str().to_owned());
            builder.push(", industry = ");
            builder.push_bind(details.industry().as_str().to_owned());
            builder.push(", location = ");
            builder.push_bind(details.location().as_str().to_owned());
            builder.push(", salary_range = ");
            builder.push_bind(details.salary_range().map(str::to_owned));
            builder.push(", start_date = ");
            builder.push_bind(details.period().start_date());
            builder.push(", end_date = ");
            builder.push_bind(details.period().end_date());
            builder.push(", status = ");
            builder.push_bind(details.status().as_str().to_owned());
            builder.push(", description = ");
            builder.push_bind(details.description().map(str::to_owned));
            builder.push(", updated_at = ");
            push_next_updated_at(builder, at);
        }
        EmploymentRecordPatch::Trash { at } => {
            builder.push("updated_at = ");
            push_next_updated_at(builder, at);
            builder.push(", deleted_at = GREATEST(created_at, ");
            push_next_updated_at(builder, at);
            builder.push(")");
        }
        EmploymentRecordPatch::Restore { at } => {
            builder.push("deleted_at = NULL, updated_at = ");
            push_next_updated_at(builder, at);
        }
    }
}

fn push_next_updated_at(builder: &mut QueryBuilder<'_, Postgres>, at: DateTime<Utc>) {
    builder.push("GREATEST(");
    builder.push_bind(at);
    builder.push(", updated_at + INTERVAL '1 microsecond')");
}

/// Escapes `LIKE` wildcards so the search term matches literally.
pub(super) fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for character in term.chars() {
        if matches!(character, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(character);
    }
    escaped
}
