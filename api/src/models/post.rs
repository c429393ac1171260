use chrono::{DateTime, Local, NaiveDateTime};
use sqlx::FromRow;

/// One row of the `posts` table with timestamps shifted to local time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Local>,
    pub updated_at: DateTime<Local>,
}

/// Requested state of an existing post, compared against the stored row
/// before anything is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostUpdate {
    pub id: i64,
    pub title: String,
    pub body: String,
}

/// Raw row as SQLite hands it back. `CURRENT_TIMESTAMP` is stored as UTC
/// without an offset.
#[derive(Debug, FromRow)]
pub struct PostRow {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            body: row.body,
            created_at: row.created_at.and_utc().with_timezone(&Local),
            updated_at: row.updated_at.and_utc().with_timezone(&Local),
        }
    }
}
