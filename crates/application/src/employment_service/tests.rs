use std::sync::Arc;

use chrono::NaiveDate;

use alumnet_core::{AppError, Principal};
use alumnet_domain::{
    AccountId, AlumniId, EmploymentRecord, EmploymentRecordId, EmploymentSortKey,
    EmploymentStatusFilter, LifecycleState, PageRequest, SortOrder,
};

use crate::test_support::{
    FakeAlumniRepository, FakeEmploymentStore, UnavailableEmploymentStore, admin,
    employment_input, seed_profile, user,
};
use crate::{EmploymentListQuery, EmploymentRecordStore, OwnershipResolver};

use super::{EmploymentService, build_status_report};

struct Fixture {
    service: EmploymentService,
    alumni: Arc<FakeAlumniRepository>,
    store: Arc<FakeEmploymentStore>,
}

fn fixture() -> Fixture {
    let alumni = Arc::new(FakeAlumniRepository::default());
    let store = Arc::new(FakeEmploymentStore::default());
    let service = EmploymentService::new(
        OwnershipResolver::new(alumni.clone()),
        store.clone(),
        alumni.clone(),
    );

    Fixture {
        service,
        alumni,
        store,
    }
}

async fn owner(fixture: &Fixture, name: &str) -> (Principal, AlumniId) {
    let account_id = AccountId::new();
    let alumni_id = seed_profile(&fixture.alumni, account_id, name).await;
    (user(account_id), alumni_id)
}

async fn create_record(
    fixture: &Fixture,
    actor: &Principal,
    alumni_id: AlumniId,
    company: &str,
) -> EmploymentRecordId {
    fixture
        .service
        .create(actor, alumni_id, employment_input(company, "2020-01-01", "active"))
        .await
        .map(|record| record.id())
        .unwrap_or_else(|_| unreachable!())
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_else(|| unreachable!())
}

#[tokio::test]
async fn create_without_end_date_yields_live_record_with_given_status() {
    let fixture = fixture();
    let (actor, alumni_id) = owner(&fixture, "Sari").await;

    let record = fixture
        .service
        .create(
            &actor,
            alumni_id,
            employment_input("Acme", "2020-01-01", "active"),
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(record.state(), LifecycleState::Live);
    assert_eq!(record.owner_id(), alumni_id);
    assert_eq!(record.details().status().as_str(), "active");
    assert_eq!(record.details().period().start_date(), date(2020, 1, 1));
    assert_eq!(record.details().period().end_date(), None);
}

#[tokio::test]
async fn create_rejects_end_before_start() {
    let fixture = fixture();
    let (actor, alumni_id) = owner(&fixture, "Sari").await;
    let mut input = employment_input("Acme", "2021-06-01", "completed");
    input.end_date = Some("2021-05-31".to_owned());

    let result = fixture.service.create(&actor, alumni_id, input).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(fixture.store.records.lock().await.is_empty());
}

#[tokio::test]
async fn create_for_foreign_or_unknown_owner_is_a_validation_error() {
    let fixture = fixture();
    let (actor, _) = owner(&fixture, "Sari").await;
    let (_, foreign_alumni_id) = owner(&fixture, "Joko").await;

    let foreign = fixture
        .service
        .create(
            &actor,
            foreign_alumni_id,
            employment_input("Acme", "2020-01-01", "active"),
        )
        .await;
    assert!(matches!(foreign, Err(AppError::Validation(_))));

    let unknown = fixture
        .service
        .create(
            &admin(),
            AlumniId::new(),
            employment_input("Acme", "2020-01-01", "active"),
        )
        .await;
    assert!(matches!(unknown, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn trashed_record_moves_from_listing_to_trash() {
    let fixture = fixture();
    let (actor, alumni_id) = owner(&fixture, "Sari").await;
    let kept = create_record(&fixture, &actor, alumni_id, "Acme").await;
    let trashed = create_record(&fixture, &actor, alumni_id, "Globex").await;

    assert!(fixture.service.soft_delete(&actor, trashed).await.is_ok());

    let listing = fixture
        .service
        .list(&actor, EmploymentListQuery::default())
        .await
        .unwrap_or_else(|_| unreachable!());
    let listed: Vec<_> = listing.records.iter().map(|record| record.id()).collect();
    assert_eq!(listed, vec![kept]);
    assert_eq!(listing.total, 1);

    let trash = fixture
        .service
        .list_trash(&actor)
        .await
        .unwrap_or_else(|_| unreachable!());
    let trash: Vec<_> = trash.iter().map(|record| record.id()).collect();
    assert_eq!(trash, vec![trashed]);

    assert!(matches!(
        fixture.service.get(&actor, trashed).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn second_soft_delete_is_not_found() {
    let fixture = fixture();
    let (actor, alumni_id) = owner(&fixture, "Sari").await;
    let record_id = create_record(&fixture, &actor, alumni_id, "Acme").await;

    assert!(fixture.service.soft_delete(&actor, record_id).await.is_ok());
    assert!(matches!(
        fixture.service.soft_delete(&actor, record_id).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn restore_round_trip_advances_updated_at() {
    let fixture = fixture();
    let (actor, alumni_id) = owner(&fixture, "Sari").await;
    let record_id = create_record(&fixture, &actor, alumni_id, "Acme").await;
    let before = fixture
        .service
        .get(&actor, record_id)
        .await
        .unwrap_or_else(|_| unreachable!());

    assert!(fixture.service.soft_delete(&actor, record_id).await.is_ok());
    assert!(fixture.service.restore(&actor, record_id).await.is_ok());

    let after = fixture
        .service
        .get(&actor, record_id)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(after.state(), LifecycleState::Live);
    assert_eq!(after.details(), before.details());
    assert!(after.timestamps().updated_at() > before.timestamps().updated_at());

    assert!(matches!(
        fixture.service.restore(&actor, record_id).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn update_replaces_fields_and_rejects_trashed_records() {
    let fixture = fixture();
    let (actor, alumni_id) = owner(&fixture, "Sari").await;
    let record_id = create_record(&fixture, &actor, alumni_id, "Acme").await;

    let mut input = employment_input("Acme Indonesia", "2020-01-01", "resigned");
    input.end_date = Some("2023-12-31".to_owned());
    let updated = fixture
        .service
        .update(&actor, record_id, input.clone())
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(updated.details().company().as_str(), "Acme Indonesia");
    assert_eq!(updated.details().period().end_date(), Some(date(2023, 12, 31)));
    assert!(updated.timestamps().updated_at() > updated.timestamps().created_at());

    assert!(fixture.service.soft_delete(&actor, record_id).await.is_ok());
    assert!(matches!(
        fixture.service.update(&actor, record_id, input).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn owner_scope_hides_other_accounts_records() {
    let fixture = fixture();
    let (owner_x, alumni_x) = owner(&fixture, "Sari").await;
    let (owner_y, alumni_y) = owner(&fixture, "Joko").await;
    let record_x = create_record(&fixture, &owner_x, alumni_x, "Acme").await;
    let record_y = create_record(&fixture, &owner_y, alumni_y, "Globex").await;

    assert!(matches!(
        fixture.service.get(&owner_x, record_y).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        fixture
            .service
            .update(
                &owner_x,
                record_y,
                employment_input("Hijacked", "2020-01-01", "active")
            )
            .await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        fixture.service.soft_delete(&owner_x, record_y).await,
        Err(AppError::NotFound(_))
    ));

    let listing = fixture
        .service
        .list(&owner_x, EmploymentListQuery::default())
        .await
        .unwrap_or_else(|_| unreachable!());
    let listed: Vec<_> = listing.records.iter().map(|record| record.id()).collect();
    assert_eq!(listed, vec![record_x]);
    assert_eq!(listing.total, 1);

    let untouched = fixture
        .service
        .get(&owner_y, record_y)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(untouched.details().company().as_str(), "Globex");

    assert!(fixture.service.soft_delete(&owner_y, record_y).await.is_ok());
    assert!(matches!(
        fixture.service.restore(&owner_x, record_y).await,
        Err(AppError::NotFound(_))
    ));
    let still_trashed = fixture
        .store
        .records
        .lock()
        .await
        .iter()
        .find(|record| record.id() == record_y)
        .map(EmploymentRecord::state);
    assert_eq!(still_trashed, Some(LifecycleState::Trashed));
}

#[tokio::test]
async fn account_without_profiles_sees_nothing() {
    let fixture = fixture();
    let (actor, alumni_id) = owner(&fixture, "Sari").await;
    create_record(&fixture, &actor, alumni_id, "Acme").await;

    let stranger = user(AccountId::new());
    let listing = fixture
        .service
        .list(&stranger, EmploymentListQuery::default())
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(listing.records.is_empty());
    assert_eq!(listing.total, 0);
}

#[tokio::test]
async fn admin_soft_delete_trashes_any_owners_record() {
    let fixture = fixture();
    let (actor, alumni_id) = owner(&fixture, "Sari").await;
    let record_id = create_record(&fixture, &actor, alumni_id, "Acme").await;

    assert!(fixture.service.soft_delete(&admin(), record_id).await.is_ok());

    let trash = fixture
        .service
        .list_trash(&actor)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(trash.len(), 1);
    assert_eq!(trash[0].state(), LifecycleState::Trashed);
}

#[tokio::test]
async fn hard_delete_of_foreign_record_is_not_found() {
    let fixture = fixture();
    let (owner_x, _) = owner(&fixture, "Sari").await;
    let (owner_y, alumni_y) = owner(&fixture, "Joko").await;
    let record_y = create_record(&fixture, &owner_y, alumni_y, "Globex").await;
    assert!(fixture.service.soft_delete(&owner_y, record_y).await.is_ok());

    assert!(matches!(
        fixture.service.hard_delete(&owner_x, record_y).await,
        Err(AppError::NotFound(_))
    ));
    assert_eq!(fixture.store.records.lock().await.len(), 1);
}

#[tokio::test]
async fn hard_delete_requires_trashed_state_even_for_admins() {
    let fixture = fixture();
    let (actor, alumni_id) = owner(&fixture, "Sari").await;
    let record_id = create_record(&fixture, &actor, alumni_id, "Acme").await;

    assert!(matches!(
        fixture.service.hard_delete(&admin(), record_id).await,
        Err(AppError::NotFound(_))
    ));

    assert!(fixture.service.soft_delete(&actor, record_id).await.is_ok());
    assert!(fixture.service.hard_delete(&actor, record_id).await.is_ok());
    assert!(fixture.store.records.lock().await.is_empty());
    assert!(matches!(
        fixture.service.restore(&actor, record_id).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn soft_delete_of_unknown_id_is_not_found() {
    let fixture = fixture();
    assert!(matches!(
        fixture
            .service
            .soft_delete(&admin(), EmploymentRecordId::new())
            .await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn concurrent_soft_deletes_have_exactly_one_winner() {
    let fixture = fixture();
    let (actor, alumni_id) = owner(&fixture, "Sari").await;
    let record_id = create_record(&fixture, &actor, alumni_id, "Acme").await;
    let admin = admin();

    let (first, second) = tokio::join!(
        fixture.service.soft_delete(&actor, record_id),
        fixture.service.soft_delete(&admin, record_id),
    );

    assert_eq!(
        usize::from(first.is_ok()) + usize::from(second.is_ok()),
        1,
        "exactly one soft delete must win"
    );
    assert!(
        matches!(first, Err(AppError::NotFound(_))) || matches!(second, Err(AppError::NotFound(_)))
    );
}

#[tokio::test]
async fn search_with_unknown_sort_key_falls_back_and_pages() {
    let fixture = fixture();
    let (actor, alumni_id) = owner(&fixture, "Sari").await;
    for index in 0..12 {
        create_record(&fixture, &actor, alumni_id, &format!("ACME Branch {index:02}")).await;
    }
    create_record(&fixture, &actor, alumni_id, "Globex").await;
    let trashed = create_record(&fixture, &actor, alumni_id, "acme trashed").await;
    assert!(fixture.service.soft_delete(&actor, trashed).await.is_ok());

    let query = EmploymentListQuery {
        search: Some("Acme".to_owned()),
        sort_key: EmploymentSortKey::parse_lenient(Some("unknownColumn")),
        order: SortOrder::parse_lenient(Some("ASC")),
        page: PageRequest::new(Some(10), Some(1)),
    };
    let first_page = fixture
        .service
        .list(&actor, query.clone())
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(first_page.records.len(), 10);
    assert_eq!(first_page.total, 12);
    assert!(first_page.records.iter().all(|record| {
        record.state() == LifecycleState::Live
            && record.details().company().as_str().to_lowercase().contains("acme")
    }));
    assert!(first_page.records.windows(2).all(|pair| {
        pair[0].timestamps().created_at() <= pair[1].timestamps().created_at()
    }));

    let second_page = fixture
        .service
        .list(
            &actor,
            EmploymentListQuery {
                page: PageRequest::new(Some(10), Some(2)),
                ..query
            },
        )
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(second_page.records.len(), 2);
    assert_eq!(second_page.total, first_page.total);
}

#[tokio::test]
async fn total_does_not_depend_on_page_window() {
    let fixture = fixture();
    let (actor, alumni_id) = owner(&fixture, "Sari").await;
    for index in 0..7 {
        create_record(&fixture, &actor, alumni_id, &format!("Company {index}")).await;
    }

    for (limit, page) in [(1, 1), (3, 2), (5, 9), (100, 1)] {
        let listing = fixture
            .service
            .list(
                &actor,
                EmploymentListQuery {
                    page: PageRequest::new(Some(limit), Some(page)),
                    ..EmploymentListQuery::default()
                },
            )
            .await
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(listing.total, 7, "limit {limit} page {page}");
    }
}

#[tokio::test]
async fn list_for_alumni_shows_trash_to_admins_only() {
    let fixture = fixture();
    let (actor, alumni_id) = owner(&fixture, "Sari").await;
    create_record(&fixture, &actor, alumni_id, "Acme").await;
    let trashed = create_record(&fixture, &actor, alumni_id, "Globex").await;
    assert!(fixture.service.soft_delete(&actor, trashed).await.is_ok());

    let as_owner = fixture
        .service
        .list_for_alumni(&actor, alumni_id)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(as_owner.len(), 1);

    let as_admin = fixture
        .service
        .list_for_alumni(&admin(), alumni_id)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(as_admin.len(), 2);

    let as_stranger = fixture
        .service
        .list_for_alumni(&user(AccountId::new()), alumni_id)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(as_stranger.is_empty());
}

#[tokio::test]
async fn store_failures_surface_as_internal_errors() {
    let alumni = Arc::new(FakeAlumniRepository::default());
    let store: Arc<dyn EmploymentRecordStore> = Arc::new(UnavailableEmploymentStore);
    let service = EmploymentService::new(OwnershipResolver::new(alumni.clone()), store, alumni);

    assert!(matches!(
        service.soft_delete(&admin(), EmploymentRecordId::new()).await,
        Err(AppError::Internal(_))
    ));
    assert!(matches!(
        service.list(&admin(), EmploymentListQuery::default()).await,
        Err(AppError::Internal(_))
    ));
}

#[tokio::test]
async fn status_report_is_admin_only_and_filters_by_status() {
    let fixture = fixture();
    let (actor, alumni_id) = owner(&fixture, "Sari").await;
    create_record(&fixture, &actor, alumni_id, "Acme").await;
    assert!(
        fixture
            .service
            .create(
                &actor,
                alumni_id,
                employment_input("Globex", "2019-03-01", "resigned"),
            )
            .await
            .is_ok()
    );

    assert!(matches!(
        fixture
            .service
            .employment_status_report(&actor, EmploymentStatusFilter::All)
            .await,
        Err(AppError::Forbidden(_))
    ));

    let report = fixture
        .service
        .employment_status_report(&admin(), EmploymentStatusFilter::Inactive)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].company, "Globex");
    assert_eq!(report.rows[0].alumni_name, "Sari");
}

#[tokio::test]
async fn more_than_one_year_flag_is_computed_against_the_report_date() {
    let fixture = fixture();
    let (actor, alumni_id) = owner(&fixture, "Sari").await;
    create_record(&fixture, &actor, alumni_id, "Acme").await;

    let records = fixture.store.records.lock().await.clone();
    let profiles = fixture.alumni.profiles.lock().await.clone();

    let early = build_status_report(
        &records,
        &profiles,
        EmploymentStatusFilter::Active,
        date(2021, 1, 1),
    );
    assert!(!early.rows[0].more_than_one_year);
    assert_eq!(early.more_than_one_year_count, 0);

    let later = build_status_report(
        &records,
        &profiles,
        EmploymentStatusFilter::Active,
        date(2021, 1, 2),
    );
    assert!(later.rows[0].more_than_one_year);
    assert_eq!(later.more_than_one_year_count, 1);
}
