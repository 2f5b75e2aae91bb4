//! File-backed store tests.

use roster_core::{Employee, EmployeeDraft, EmployeeIdPool};
use roster_db::{schema, DbError, Store, StoreConfig};
use tempfile::TempDir;

async fn fresh_store(dir: &TempDir) -> Store {
    let mut store = Store::open(dir.path().join("t.db")).await.unwrap();
    store.create_schema().await.unwrap();
    store
}

fn ann() -> Employee {
    Employee::new(1, "Ann", 30, "Eng")
}

#[tokio::test]
async fn scenario_insert_list_delete() {
    let dir = TempDir::new().unwrap();
    let mut store = fresh_store(&dir).await;

    store.insert(&ann()).await.unwrap();
    assert_eq!(store.fetch_all().await.unwrap(), vec![ann()]);

    store.delete_by_id(1).await.unwrap();
    assert!(store.fetch_all().await.unwrap().is_empty());

    store.close().await;
}

#[tokio::test]
async fn insert_then_fetch_by_id_round_trips() {
    let dir = TempDir::new().unwrap();
    let mut store = fresh_store(&dir).await;

    let records = [
        Employee::new(1, "Ann", 30, "Eng"),
        Employee::new(-5, "Ünal Çelik", 0, "R&D"),
        Employee::new(i32::MAX, "Max", 150, "D".repeat(255)),
        Employee::new(2, "Neg", -1, "Ops"),
        Employee::new(3, "Min", i32::MIN, "Ops"),
        Employee::new(4, "Top", i32::MAX, "Ops"),
        Employee::new(5, "N".repeat(300), 200, "D".repeat(4096)),
    ];
    for record in &records {
        store.insert(record).await.unwrap();
    }
    for record in &records {
        assert_eq!(store.fetch_by_id(record.id()).await.unwrap().as_ref(), Some(record));
    }
}

#[tokio::test]
async fn fetch_by_id_after_delete_is_not_found() {
    let dir = TempDir::new().unwrap();
    let mut store = fresh_store(&dir).await;

    store.insert(&ann()).await.unwrap();
    store.delete_by_id(1).await.unwrap();

    assert_eq!(store.fetch_by_id(1).await.unwrap(), None);
}

#[tokio::test]
async fn deleting_missing_id_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let mut store = fresh_store(&dir).await;

    store.insert(&ann()).await.unwrap();
    let before = store.fetch_all().await.unwrap();

    store.delete_by_id(404).await.unwrap();

    assert_eq!(store.fetch_all().await.unwrap(), before);
}

#[tokio::test]
async fn fetch_all_on_empty_schema_is_empty() {
    let dir = TempDir::new().unwrap();
    let mut store = fresh_store(&dir).await;

    assert_eq!(store.fetch_all().await.unwrap(), Vec::<Employee>::new());
}

#[tokio::test]
async fn duplicate_id_is_step_error_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut store = fresh_store(&dir).await;

    store.insert(&ann()).await.unwrap();
    let err = store
        .insert(&Employee::new(1, "Impostor", 99, "Ops"))
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::Step { .. }));
    assert!(err.is_constraint_violation());
    assert_eq!(store.count().await.unwrap(), 1);
    assert_eq!(store.fetch_by_id(1).await.unwrap(), Some(ann()));

    // the connection is still usable after the failure
    store.insert(&Employee::new(2, "Bob", 41, "Sales")).await.unwrap();
    assert_eq!(store.count().await.unwrap(), 2);
}

#[tokio::test]
async fn create_schema_twice_is_harmless() {
    let dir = TempDir::new().unwrap();
    let mut store = fresh_store(&dir).await;

    store.insert(&ann()).await.unwrap();
    store.create_schema().await.unwrap();
    store.create_schema().await.unwrap();

    assert_eq!(store.fetch_all().await.unwrap(), vec![ann()]);
    store.close().await;

    let mut conn = <sqlx::SqliteConnection as sqlx::Connection>::connect(&format!(
        "sqlite://{}",
        dir.path().join("t.db").display()
    ))
    .await
    .unwrap();
    assert_eq!(schema::table_count(&mut conn, schema::EMPLOYEES_TABLE).await.unwrap(), 1);
}

#[tokio::test]
async fn records_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("t.db");

    let mut store = fresh_store(&dir).await;
    store.insert(&ann()).await.unwrap();
    store.close().await;

    let mut store = Store::connect(StoreConfig::new(&path)).await.unwrap();
    assert_eq!(store.path(), path.as_path());
    assert_eq!(store.fetch_all().await.unwrap(), vec![ann()]);
}

#[tokio::test]
async fn fetch_all_keeps_insertion_order_of_rowids() {
    let dir = TempDir::new().unwrap();
    let mut store = fresh_store(&dir).await;

    for id in [3, 1, 2] {
        store
            .insert(&Employee::new(id, format!("E{id}"), 20 + id, "Ops"))
            .await
            .unwrap();
    }

    // Id is the rowid, so natural order is by id
    let ids: Vec<i32> = store.fetch_all().await.unwrap().iter().map(Employee::id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn id_pool_resumes_after_reload() {
    let dir = TempDir::new().unwrap();
    let mut store = fresh_store(&dir).await;
    store.insert(&Employee::new(7, "Ann", 30, "Eng")).await.unwrap();

    let mut ids = EmployeeIdPool::resume_after(&store.fetch_all().await.unwrap()).unwrap();
    let bob = EmployeeDraft::parse("Bob", "41", "Sales")
        .unwrap()
        .into_employee(None, &mut ids)
        .unwrap();
    store.insert(&bob).await.unwrap();

    assert_eq!(bob.id(), 8);
    assert_eq!(store.count().await.unwrap(), 2);
}

#[tokio::test]
async fn open_missing_directory_is_open_error() {
    let dir = TempDir::new().unwrap();
    let err = Store::open(dir.path().join("missing").join("t.db"))
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::Open { .. }));
}

#[tokio::test]
async fn open_non_database_file_is_open_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("junk.db");
    std::fs::write(&path, vec![b'x'; 4096]).unwrap();

    let err = Store::open(&path).await.unwrap_err();

    assert!(matches!(err, DbError::Open { ref message } if message.contains("not a database")));
}

#[tokio::test]
async fn open_without_create_requires_existing_file() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::new(dir.path().join("absent.db")).create_if_missing(false);

    assert!(matches!(
        Store::connect(config).await,
        Err(DbError::Open { .. })
    ));
}
