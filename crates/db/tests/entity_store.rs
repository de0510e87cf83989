//! Integration tests for the PostgreSQL object store and the versioned
//! service running on top of it.
//!
//! These need a live database (`DATABASE_URL`) and are ignored by default:
//! `cargo test -p strata-db -- --ignored`.

use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;
use strata_core::{NewEntity, ObjectStore, Product, ProductDto, Versioned, VersionedService};
use strata_db::PgObjectStore;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_entity(pk_id: Uuid, version: i32) -> NewEntity {
    NewEntity {
        pk_id,
        json_doc: r#"{"title":"Desk","description":"Oak","price":250.0}"#.to_string(),
        updated_by: Some("tester".to_string()),
        updated_date: Utc::now(),
        is_valid: true,
        is_visible: true,
        is_deleted: false,
        base_version_id: Some(version - 1),
        version_id: Some(version),
        is_latest_version: true,
        status_id: Some(1),
    }
}

fn product(title: &str) -> ProductDto {
    Versioned::new(Product {
        title: title.to_string(),
        description: "integration".to_string(),
        price: 99.5,
    })
    .valid(true)
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn add_get_update_delete(pool: PgPool) {
    let store = PgObjectStore::for_payload::<Product>(pool);
    let key = Uuid::new_v4();

    let created = store.add(new_entity(key, 1)).await.unwrap();
    assert!(created.id > 0);
    assert_eq!(created.pk_id, key);

    let fetched = store.get(created.id).await.unwrap().unwrap();
    let doc: serde_json::Value = serde_json::from_str(&fetched.json_doc).unwrap();
    assert_eq!(doc["title"], "Desk");

    let mut stale = fetched.clone();
    stale.is_latest_version = false;
    let updated = store.update(created.id, &stale).await.unwrap().unwrap();
    assert!(!updated.is_latest_version);
    assert!(updated.updated_date >= fetched.updated_date);

    assert!(store.delete(created.id).await.unwrap());
    assert!(store.get(created.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn unknown_ids_are_absent(pool: PgPool) {
    let store = PgObjectStore::for_payload::<Product>(pool);
    let ghost = new_entity(Uuid::new_v4(), 1).into_stored(123_456);

    assert!(store.get(123_456).await.unwrap().is_none());
    assert!(store.update(123_456, &ghost).await.unwrap().is_none());
    assert!(!store.delete(123_456).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn list_by_key_only_returns_that_chain(pool: PgPool) {
    let store = PgObjectStore::for_payload::<Product>(pool);
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    store.add(new_entity(a, 1)).await.unwrap();
    store.add(new_entity(b, 1)).await.unwrap();
    store.add(new_entity(a, 2)).await.unwrap();

    let chain = store.list_by_key(a).await.unwrap();
    assert_eq!(chain.len(), 2);
    assert!(chain.iter().all(|e| e.pk_id == a));
    assert_eq!(store.list().await.unwrap().len(), 3);
}

// ---------------------------------------------------------------------------
// Service over PostgreSQL
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn save_twice_then_list_latest(pool: PgPool) {
    let service: VersionedService<Product> =
        VersionedService::new(Arc::new(PgObjectStore::for_payload::<Product>(pool)));

    let first = service.save(product("A")).await.unwrap();
    let pk_id = first.meta.pk_id.unwrap();
    let second = service.save(product("B").with_key(pk_id)).await.unwrap();

    assert_eq!(first.meta.version_id, Some(1));
    assert_eq!(second.meta.version_id, Some(2));
    assert_eq!(second.meta.base_version_id, Some(1));

    let old = service.get_by_id(first.meta.id.unwrap()).await.unwrap().unwrap();
    assert_eq!(old.meta.is_latest_version, Some(false));

    let all = service.get_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].payload.title, "B");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn discard_draft_deletes_draft_rows(pool: PgPool) {
    let store = Arc::new(PgObjectStore::for_payload::<Product>(pool));
    let service: VersionedService<Product> = VersionedService::new(store.clone());

    let first = service.save(product("A")).await.unwrap();
    let pk_id = first.meta.pk_id.unwrap();
    let draft = service
        .save(product("draft").with_key(pk_id).valid(false))
        .await
        .unwrap();

    let restored = service.discard_draft(&draft).await.unwrap().unwrap();
    assert_eq!(restored.meta.id, first.meta.id);
    assert_eq!(restored.meta.is_latest_version, Some(true));
    assert_eq!(store.list_by_key(pk_id).await.unwrap().len(), 1);
}
