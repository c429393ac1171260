//! SQLite pool setup and the posts repository.

mod posts;

pub use posts::{PostRepository, UpdateOutcome, UpdateQuery};

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

const SCHEMA: &str = include_str!("../../sql/schema.sql");

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("post {id} not found")]
    NotFound { id: i64 },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Open a pool for `url`, creating the database file if needed.
///
/// An in-memory database lives only as long as its connection, so those URLs
/// get a single connection that is never recycled.
pub async fn connect(url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

    let pool = if is_in_memory(url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections)
    };

    pool.connect_with(options).await
}

/// Create the `posts` table and its `updated_at` trigger if they are missing.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA).execute(pool).await.map(|_| ())
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}
