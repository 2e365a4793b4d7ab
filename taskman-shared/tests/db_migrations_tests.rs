/// Integration tests for schema initialization
///
/// Run with: cargo test -p taskman-shared --test db_migrations_tests

mod common;

use taskman_shared::db::migrations::{ensure_schema, get_schema_status};
use taskman_shared::db::pool::{close_pool, create_pool, DatabaseConfig};

#[tokio::test]
async fn test_status_before_schema() {
    let pool = create_pool(DatabaseConfig::in_memory()).await.unwrap();

    let status = get_schema_status(&pool).await.unwrap();
    assert_eq!(status.applied_migrations, 0);
    assert_eq!(status.latest_version, None);
    assert!(!status.tasks_table_exists);
    assert!(!status.is_up_to_date);

    close_pool(pool).await;
}

#[tokio::test]
async fn test_ensure_schema_creates_tasks_table() {
    let pool = create_pool(DatabaseConfig::in_memory()).await.unwrap();

    ensure_schema(&pool).await.unwrap();

    let status = get_schema_status(&pool).await.unwrap();
    assert_eq!(status.applied_migrations, 1);
    assert!(status.latest_version.is_some());
    assert!(status.tasks_table_exists);
    assert!(status.is_up_to_date);

    close_pool(pool).await;
}

#[tokio::test]
async fn test_ensure_schema_is_idempotent() {
    let pool = create_pool(DatabaseConfig::in_memory()).await.unwrap();

    ensure_schema(&pool).await.unwrap();
    let first = get_schema_status(&pool).await.unwrap();

    ensure_schema(&pool).await.unwrap();
    ensure_schema(&pool).await.unwrap();
    let second = get_schema_status(&pool).await.unwrap();

    assert_eq!(first.applied_migrations, second.applied_migrations);
    assert_eq!(first.latest_version, second.latest_version);

    close_pool(pool).await;
}

#[tokio::test]
async fn test_ensure_schema_keeps_existing_rows() {
    let pool = common::test_pool().await;

    common::insert_task(&pool, "Survives restarts", None, "pending").await;
    ensure_schema(&pool).await.unwrap();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);

    close_pool(pool).await;
}

#[tokio::test]
async fn test_tasks_table_columns() {
    let pool = common::test_pool().await;

    let columns: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info('tasks') ORDER BY cid")
        .fetch_all(&pool)
        .await
        .unwrap();

    assert_eq!(
        columns,
        vec!["id", "title", "description", "status", "created_at", "updated_at"]
    );

    close_pool(pool).await;
}
