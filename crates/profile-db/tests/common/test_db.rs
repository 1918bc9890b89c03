use profile_db::{open_in_memory_pool, run_migrations};

use sqlx::SqlitePool;

/// In-memory SQLite pool with the profiles schema applied.
pub async fn create_test_pool() -> SqlitePool {
    let pool = open_in_memory_pool()
        .await
        .expect("Failed to create test pool");

    run_migrations(&pool).await.expect("Failed to run migrations");

    pool
}
