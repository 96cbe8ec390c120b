//! Soft-delete lifecycle shared by every persisted record type.
//!
//! A record is either **Live** (`deleted_at` absent) or **Trashed**
//! (`deleted_at` present). The presence of `deleted_at` is the only
//! discriminant; there is no separate status flag that could disagree with it.

use alumnet_core::{AppError, AppResult};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Observable lifecycle state of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// Visible in default listings.
    Live,
    /// Visible only in trash views, recoverable via restore.
    Trashed,
}

impl LifecycleState {
    /// Returns the stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Trashed => "trashed",
        }
    }
}

/// Lifecycle constraint applied when matching stored records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleFilter {
    /// Only records without `deleted_at`.
    Live,
    /// Only records with `deleted_at`.
    Trashed,
    /// Records in either state.
    Any,
}

impl LifecycleFilter {
    /// Returns whether a record in `state` satisfies this filter.
    #[must_use]
    pub fn admits(&self, state: LifecycleState) -> bool {
        match self {
            Self::Live => state == LifecycleState::Live,
            Self::Trashed => state == LifecycleState::Trashed,
            Self::Any => true,
        }
    }
}

/// Server-maintained timestamps for a record, including the soft-delete marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordTimestamps {
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl RecordTimestamps {
    /// Timestamps for a freshly created, live record.
    #[must_use]
    pub fn created(at: DateTime<Utc>) -> Self {
        Self {
            created_at: at,
            updated_at: at,
            deleted_at: None,
        }
    }

    /// Rehydrates stored timestamps, rejecting a trash marker older than the record.
    pub fn from_stored(
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        deleted_at: Option<DateTime<Utc>>,
    ) -> AppResult<Self> {
        if let Some(deleted_at) = deleted_at
            && deleted_at < created_at
        {
            return Err(AppError::Internal(format!(
                "stored record has deleted_at '{deleted_at}' before created_at '{created_at}'"
            )));
        }

        Ok(Self {
            created_at,
            updated_at,
            deleted_at,
        })
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last mutation timestamp.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the trash marker, if any.
    #[must_use]
    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Returns the lifecycle state derived from the trash marker.
    #[must_use]
    pub fn state(&self) -> LifecycleState {
        if self.deleted_at.is_some() {
            LifecycleState::Trashed
        } else {
            LifecycleState::Live
        }
    }

    /// Refreshes `updated_at` for a field mutation on a live record.
    pub fn touch(&mut self, at: DateTime<Utc>) -> AppResult<()> {
        self.require_state(LifecycleState::Live, "update")?;
        self.updated_at = advance_timestamp(self.updated_at, at);
        Ok(())
    }

    /// Moves a live record to the trash.
    pub fn trash(&mut self, at: DateTime<Utc>) -> AppResult<()> {
        self.require_state(LifecycleState::Live, "trash")?;
        let updated_at = advance_timestamp(self.updated_at, at);
        self.deleted_at = Some(updated_at.max(self.created_at));
        self.updated_at = updated_at;
        Ok(())
    }

    /// Returns a trashed record to the live state.
    pub fn restore(&mut self, at: DateTime<Utc>) -> AppResult<()> {
        self.require_state(LifecycleState::Trashed, "restore")?;
        self.deleted_at = None;
        self.updated_at = advance_timestamp(self.updated_at, at);
        Ok(())
    }

    fn require_state(&self, required: LifecycleState, transition: &str) -> AppResult<()> {
        if self.state() != required {
            return Err(AppError::NotFound(format!(
                "cannot {transition} a record that is not {}",
                required.as_str()
            )));
        }

        Ok(())
    }
}

/// Returns the next `updated_at` value, strictly after `previous`.
///
/// Storage keeps microsecond precision, so a clock reading that does not move
/// past the previous value is bumped by one microsecond.
#[must_use]
pub fn advance_timestamp(previous: DateTime<Utc>, at: DateTime<Utc>) -> DateTime<Utc> {
    if at > previous {
        at
    } else {
        previous + Duration::microseconds(1)
    }
}
