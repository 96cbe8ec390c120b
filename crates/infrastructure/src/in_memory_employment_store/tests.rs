use chrono::{DateTime, Duration, TimeZone, Utc};

use alumnet_application::{
    AuthorizationScope, EmploymentRecordFilter, EmploymentRecordOrdering, EmploymentRecordPatch,
    EmploymentRecordStore, ResultWindow,
};
use alumnet_domain::{
    AccountId, AlumniId, EmploymentDetails, EmploymentPeriod, EmploymentRecord,
    EmploymentRecordId, EmploymentSortKey, LifecycleFilter, LifecycleState, SortOrder,
};

use super::InMemoryEmploymentRecordStore;

fn at(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0)
        .single()
        .unwrap_or_else(|| unreachable!())
        + Duration::seconds(seconds)
}

fn record(owner_id: AlumniId, company: &str, created_offset: i64) -> EmploymentRecord {
    let period = EmploymentPeriod::parse("2021-02-01", None).unwrap_or_else(|_| unreachable!());
    let details = EmploymentDetails::new(
        company,
        "Analyst",
        "Finance",
        "Surabaya",
        None,
        period,
        "active",
        None,
    )
    .unwrap_or_else(|_| unreachable!());
    EmploymentRecord::create(EmploymentRecordId::new(), owner_id, details, at(created_offset))
}

async fn seeded(records: &[EmploymentRecord]) -> InMemoryEmploymentRecordStore {
    let store = InMemoryEmploymentRecordStore::new();
    for record in records {
        assert!(store.insert(record.clone()).await.is_ok());
    }
    store
}

#[tokio::test]
async fn find_many_orders_pages_and_counts() {
    let owner = AlumniId::new();
    let records = vec![
        record(owner, "Charlie", 0),
        record(owner, "alpha", 1),
        record(owner, "Bravo", 2),
    ];
    let store = seeded(&records).await;
    let filter = EmploymentRecordFilter::new(LifecycleFilter::Live);

    let newest_first = store
        .find_many(
            &filter,
            EmploymentRecordOrdering::Column {
                key: EmploymentSortKey::CreatedAt,
                order: SortOrder::Desc,
            },
            ResultWindow {
                limit: Some(2),
                offset: 0,
            },
        )
        .await
        .unwrap_or_default();
    let companies: Vec<&str> = newest_first
        .iter()
        .map(|record| record.details().company().as_str())
        .collect();
    assert_eq!(companies, vec!["Bravo", "alpha"]);

    let second_page = store
        .find_many(
            &filter,
            EmploymentRecordOrdering::Column {
                key: EmploymentSortKey::CreatedAt,
                order: SortOrder::Desc,
            },
            ResultWindow {
                limit: Some(2),
                offset: 2,
            },
        )
        .await
        .unwrap_or_default();
    assert_eq!(second_page.len(), 1);
    assert_eq!(store.count(&filter).await.ok(), Some(3));
}

#[tokio::test]
async fn search_matches_case_insensitively() {
    let owner = AlumniId::new();
    let store = seeded(&[record(owner, "PT Acme", 0), record(owner, "Globex", 1)]).await;

    let filter = EmploymentRecordFilter::new(LifecycleFilter::Live).with_search(Some("aCmE"));
    let found = store
        .find_many(
            &filter,
            EmploymentRecordOrdering::Column {
                key: EmploymentSortKey::Company,
                order: SortOrder::Asc,
            },
            ResultWindow::unbounded(),
        )
        .await
        .unwrap_or_default();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].details().company().as_str(), "PT Acme");
}

#[tokio::test]
async fn search_keeps_surrounding_whitespace_of_the_term() {
    let owner = AlumniId::new();
    let store = seeded(&[record(owner, "PT Acme", 0), record(owner, "Acme", 1)]).await;

    let padded = EmploymentRecordFilter::new(LifecycleFilter::Live).with_search(Some(" Acme"));
    assert_eq!(store.count(&padded).await.ok(), Some(1));

    let blank = EmploymentRecordFilter::new(LifecycleFilter::Live).with_search(Some("   "));
    assert_eq!(blank.search, None);
    assert_eq!(store.count(&blank).await.ok(), Some(2));
}

#[tokio::test]
async fn empty_owner_scope_matches_nothing() {
    let store = seeded(&[record(AlumniId::new(), "Acme", 0)]).await;
    let scope = AuthorizationScope::Owner {
        account_id: AccountId::new(),
        alumni_ids: Vec::new(),
    };
    let filter = EmploymentRecordFilter::new(LifecycleFilter::Any).within(&scope);

    assert_eq!(store.count(&filter).await.ok(), Some(0));
    assert_eq!(
        store
            .update_one(&filter, EmploymentRecordPatch::Trash { at: at(10) })
            .await
            .ok(),
        Some(0)
    );
}

#[tokio::test]
async fn conditional_writes_respect_lifecycle_filter() {
    let owner = AlumniId::new();
    let stored = record(owner, "Acme", 0);
    let store = seeded(std::slice::from_ref(&stored)).await;
    let live = EmploymentRecordFilter::targeting(
        stored.id(),
        &AuthorizationScope::Admin,
        LifecycleFilter::Live,
    );
    let trashed = EmploymentRecordFilter::targeting(
        stored.id(),
        &AuthorizationScope::Admin,
        LifecycleFilter::Trashed,
    );

    assert_eq!(store.delete_one(&trashed).await.ok(), Some(0));
    assert_eq!(
        store
            .update_one(&live, EmploymentRecordPatch::Trash { at: at(5) })
            .await
            .ok(),
        Some(1)
    );
    assert_eq!(
        store
            .update_one(&live, EmploymentRecordPatch::Trash { at: at(6) })
            .await
            .ok(),
        Some(0)
    );

    let trashed_record = store.find_one(&trashed).await.ok().flatten();
    assert_eq!(
        trashed_record.map(|record| record.state()),
        Some(LifecycleState::Trashed)
    );

    assert_eq!(store.delete_one(&trashed).await.ok(), Some(1));
    assert_eq!(store.find_one(&trashed).await.ok().flatten(), None);
}

#[tokio::test]
async fn duplicate_insert_is_a_conflict() {
    let stored = record(AlumniId::new(), "Acme", 0);
    let store = seeded(std::slice::from_ref(&stored)).await;
    assert!(store.insert(stored).await.is_err());
}
