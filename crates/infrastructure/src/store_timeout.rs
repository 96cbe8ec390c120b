use std::future::Future;
use std::time::Duration;

use alumnet_core::{AppError, AppResult};
use tracing::warn;

/// Deadline applied to store calls when none is configured.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Awaits a database call under `timeout`, mapping both failure kinds to internal errors.
///
/// Expiry is reported, never retried.
pub(crate) async fn bounded<T>(
    timeout: Duration,
    operation: &str,
    call: impl Future<Output = Result<T, sqlx::Error>>,
) -> AppResult<T> {
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result.map_err(|error| classify(operation, error)),
        Err(_) => {
            warn!(operation, timeout_ms = timeout.as_millis(), "store call timed out");
            Err(AppError::Internal(format!(
                "failed to {operation}: store did not respond within {} ms",
                timeout.as_millis()
            )))
        }
    }
}

// Unique and foreign-key violations become conflicts; everything else is internal.
fn classify(operation: &str, error: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(database_error) = &error
        && (database_error.is_unique_violation() || database_error.is_foreign_key_violation())
    {
        return AppError::Conflict(format!("failed to {operation}: {database_error}"));
    }

    AppError::Internal(format!("failed to {operation}: {error}"))
}
