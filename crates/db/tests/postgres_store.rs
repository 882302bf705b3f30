//! Postgres store tests. They need a reachable `DATABASE_URL`, so they are
//! ignored by default: `cargo test -p jualputus-db -- --ignored`.

use assert_matches::assert_matches;
use chrono::TimeZone;
use jualputus_core::submission::Submission;
use jualputus_db::{export_json, import_json, PgSubmissionStore, StoreError, SubmissionRepo};
use sqlx::PgPool;

fn record(id: &str, ticket: &str, day: u32) -> Submission {
    let at = chrono::Utc.with_ymd_and_hms(2024, 5, day, 9, 30, 0).unwrap();
    Submission {
        id: id.into(),
        ticket_number: ticket.into(),
        category: "komputer".into(),
        brand: "Dell".into(),
        model: "OptiPlex 7010".into(),
        year_released: 2023,
        physical_condition: "ada_dent".into(),
        functional_features: vec!["port".into(), "layar".into()],
        accessories: vec![],
        full_name: "Rudi".into(),
        whatsapp: "085700000000".into(),
        email: Some("rudi@example.com".into()),
        full_address: "Surabaya".into(),
        location_lat: Some(-7.2575),
        location_lng: Some(112.7521),
        status: "pending".into(),
        created_at: at,
        updated_at: at,
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn save_and_find_round_trip(pool: PgPool) {
    let store = PgSubmissionStore::new(pool);
    let sub = record("sub_a", "JP20240501-0001", 1);
    store.save(&sub).await.unwrap();

    assert_eq!(store.find_by_id("sub_a").await.unwrap(), Some(sub.clone()));
    assert_eq!(
        store.find_by_ticket("JP20240501-0001").await.unwrap().map(|s| s.id),
        Some("sub_a".to_string())
    );
    assert!(store.find_by_id("sub_missing").await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn list_is_newest_first_and_ticket_picks_newest(pool: PgPool) {
    let store = PgSubmissionStore::new(pool);
    store.save(&record("sub_1", "JP-DUP", 1)).await.unwrap();
    store.save(&record("sub_3", "JP-3", 3)).await.unwrap();
    store.save(&record("sub_2", "JP-DUP", 2)).await.unwrap();

    let ids: Vec<_> = store.list_all().await.unwrap().into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec!["sub_3", "sub_2", "sub_1"]);
    assert_eq!(store.find_by_ticket("JP-DUP").await.unwrap().unwrap().id, "sub_2");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn status_update_delete_and_import(pool: PgPool) {
    let store = PgSubmissionStore::new(pool);
    store.save(&record("sub_1", "JP-1", 1)).await.unwrap();

    let updated = store.update_status("sub_1", "completed").await.unwrap().unwrap();
    assert_eq!(updated.status, "completed");
    assert!(store.update_status("nope", "completed").await.unwrap().is_none());

    let json = export_json(&store).await.unwrap();
    assert!(store.delete("sub_1").await.unwrap());
    assert!(!store.delete("sub_1").await.unwrap());

    assert_eq!(import_json(&store, &json).await.unwrap(), 1);
    assert_eq!(store.find_by_id("sub_1").await.unwrap().unwrap().status, "completed");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn unknown_status_is_rejected_by_schema(pool: PgPool) {
    let store = PgSubmissionStore::new(pool);
    store.save(&record("sub_1", "JP-1", 1)).await.unwrap();
    assert!(store.update_status("sub_1", "lost").await.is_err());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn invalid_import_leaves_table_untouched(pool: PgPool) {
    let store = PgSubmissionStore::new(pool);
    store.save(&record("sub_keep", "JP-0", 1)).await.unwrap();

    let mut lost = record("sub_1", "JP-1", 2);
    lost.status = "lost".into();
    let duplicated = vec![record("sub_2", "JP-2", 2), record("sub_2", "JP-3", 3)];

    for batch in [vec![lost], vec![record("", "JP-4", 4)], duplicated] {
        let json = serde_json::to_string(&batch).unwrap();
        assert_matches!(import_json(&store, &json).await, Err(StoreError::Import(_)));
    }

    let ids: Vec<_> = store.list_all().await.unwrap().into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec!["sub_keep"]);
}
