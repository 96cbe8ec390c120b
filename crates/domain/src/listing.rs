//! Sort and pagination parameters for record listings.
//!
//! Every parser here is lenient: unrecognized input falls back to a default
//! instead of failing the request.

use serde::{Deserialize, Serialize};

/// Page size used when the caller does not supply one.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Largest accepted page size.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Sortable employment record columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentSortKey {
    /// Record creation time.
    #[default]
    CreatedAt,
    /// Last mutation time.
    UpdatedAt,
    /// Employer name.
    Company,
    /// Job title.
    Position,
    /// Industry sector.
    Industry,
    /// Work location.
    Location,
    /// First day of employment.
    StartDate,
    /// Last day of employment.
    EndDate,
    /// Employment status.
    Status,
}

impl EmploymentSortKey {
    /// Every accepted sort key.
    pub const ALL: [Self; 9] = [
        Self::CreatedAt,
        Self::UpdatedAt,
        Self::Company,
        Self::Position,
        Self::Industry,
        Self::Location,
        Self::StartDate,
        Self::EndDate,
        Self::Status,
    ];

    /// Parses a transport value; anything outside the allow-list sorts by creation time.
    #[must_use]
    pub fn parse_lenient(value: Option<&str>) -> Self {
        let Some(value) = value.map(str::trim) else {
            return Self::default();
        };

        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == value)
            .unwrap_or_default()
    }

    /// Returns the stable transport value, which is also the storage column name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::Company => "company",
            Self::Position => "position",
            Self::Industry => "industry",
            Self::Location => "location",
            Self::StartDate => "start_date",
            Self::EndDate => "end_date",
            Self::Status => "status",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Ascending order.
    Asc,
    /// Descending order.
    #[default]
    Desc,
}

impl SortOrder {
    /// `asc` in any letter case sorts ascending; anything else sorts descending.
    #[must_use]
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value {
            Some(value) if value.trim().eq_ignore_ascii_case("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }

    /// Returns the SQL keyword for this direction.
    #[must_use]
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Normalized pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    limit: u32,
    page: u32,
}

impl PageRequest {
    /// Normalizes raw values: missing limit uses the default, limit is clamped to
    /// `1..=MAX_PAGE_LIMIT`, and a missing or non-positive page becomes 1.
    #[must_use]
    pub fn new(limit: Option<i64>, page: Option<i64>) -> Self {
        let limit = limit
            .unwrap_or(i64::from(DEFAULT_PAGE_LIMIT))
            .clamp(1, i64::from(MAX_PAGE_LIMIT));
        let page = page.unwrap_or(1).clamp(1, i64::from(u32::MAX));

        Self {
            limit: u32::try_from(limit).unwrap_or(DEFAULT_PAGE_LIMIT),
            page: u32::try_from(page).unwrap_or(1),
        }
    }

    /// Returns the page size.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Returns the 1-indexed page number.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Returns the number of records skipped before this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{EmploymentSortKey, MAX_PAGE_LIMIT, PageRequest, SortOrder};

    #[test]
    fn unknown_sort_key_falls_back_to_created_at() {
        assert_eq!(
            EmploymentSortKey::parse_lenient(Some("salary; DROP TABLE")),
            EmploymentSortKey::CreatedAt
        );
        assert_eq!(EmploymentSortKey::parse_lenient(None), EmploymentSortKey::CreatedAt);
        assert_eq!(
            EmploymentSortKey::parse_lenient(Some("company")),
            EmploymentSortKey::Company
        );
    }

    #[test]
    fn order_is_ascending_only_for_asc() {
        assert_eq!(SortOrder::parse_lenient(Some("ASC")), SortOrder::Asc);
        assert_eq!(SortOrder::parse_lenient(Some("asc")), SortOrder::Asc);
        assert_eq!(SortOrder::parse_lenient(Some("up")), SortOrder::Desc);
        assert_eq!(SortOrder::parse_lenient(None), SortOrder::Desc);
    }

    #[test]
    fn page_defaults_and_offset() {
        let page = PageRequest::default();
        assert_eq!((page.limit(), page.page(), page.offset()), (10, 1, 0));

        let page = PageRequest::new(Some(25), Some(3));
        assert_eq!(page.offset(), 50);
    }

    proptest! {
        #[test]
        fn normalized_window_stays_in_bounds(limit in any::<i64>(), page in any::<i64>()) {
            let request = PageRequest::new(Some(limit), Some(page));
            prop_assert!((1..=MAX_PAGE_LIMIT).contains(&request.limit()));
            prop_assert!(request.page() >= 1);
        }
    }
}
