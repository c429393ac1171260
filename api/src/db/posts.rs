use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::models::{Post, PostRow, PostUpdate};

use super::RepoError;

const SELECT_POSTS: &str = "SELECT id, title, body, created_at, updated_at FROM posts";

/// Whether `PostRepository::update` touched the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    Unchanged,
}

/// An `UPDATE` restricted to the columns that differ from the stored row.
///
/// `args` line up with `columns`; the post id is bound last for the `WHERE`
/// clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateQuery {
    pub columns: Vec<&'static str>,
    pub args: Vec<String>,
    pub id: i64,
}

impl UpdateQuery {
    /// Diff `requested` against `current`. `None` means nothing to write.
    pub fn build(current: &Post, requested: &PostUpdate) -> Option<Self> {
        let mut columns = Vec::new();
        let mut args = Vec::new();

        if current.title != requested.title {
            columns.push("Title");
            args.push(requested.title.clone());
        }
        if current.body != requested.body {
            columns.push("Body");
            args.push(requested.body.clone());
        }

        if columns.is_empty() {
            return None;
        }

        Some(Self {
            columns,
            args,
            id: current.id,
        })
    }

    pub fn query_builder(&self) -> QueryBuilder<'_, Sqlite> {
        let mut qb = QueryBuilder::new("UPDATE posts SET ");

        let mut sets = qb.separated(", ");
        for (column, arg) in self.columns.iter().zip(&self.args) {
            sets.push(format!("{column} = "));
            sets.push_bind_unseparated(arg.as_str());
        }

        qb.push(" WHERE id = ");
        qb.push_bind(self.id);
        qb
    }

    pub fn sql(&self) -> String {
        self.query_builder().sql().to_string()
    }
}

/// CRUD access to the `posts` table over a shared pool.
#[derive(Clone)]
pub struct PostRepository {
    pool: SqlitePool,
}

impl PostRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Post>, RepoError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!("{SELECT_POSTS} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    /// Insert a post and return the id storage assigned to it.
    pub async fn create(&self, title: &str, body: &str) -> Result<i64, RepoError> {
        let result = sqlx::query("INSERT INTO posts (title, body) VALUES (?, ?)")
            .bind(title)
            .bind(body)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn find(&self, id: i64) -> Result<Post, RepoError> {
        let row = sqlx::query_as::<_, PostRow>(&format!("{SELECT_POSTS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepoError::NotFound { id })?;

        Ok(Post::from(row))
    }

    /// Write only the columns of `post` that differ from what is stored.
    pub async fn update(&self, post: &PostUpdate) -> Result<UpdateOutcome, RepoError> {
        let current = self.find(post.id).await?;

        let Some(update) = UpdateQuery::build(&current, post) else {
            debug!(id = post.id, "post unchanged, skipping write");
            return Ok(UpdateOutcome::Unchanged);
        };

        update
            .query_builder()
            .build()
            .execute(&self.pool)
            .await?;

        Ok(UpdateOutcome::Updated)
    }

    /// Remove a post. A missing id is not an error.
    pub async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            debug!(id, "delete matched no post");
        }

        Ok(())
    }

    pub async fn ping(&self) -> Result<(), RepoError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{connect, init_schema};
    use chrono::Local;

    async fn repo() -> PostRepository {
        let pool = connect("sqlite::memory:", 1).await.unwrap();
        init_schema(&pool).await.unwrap();
        PostRepository::new(pool)
    }

    fn stored(id: i64, title: &str, body: &str) -> Post {
        let now = Local::now();
        Post {
            id,
            title: title.into(),
            body: body.into(),
            created_at: now,
            updated_at: now,
        }
    }

    fn requested(id: i64, title: &str, body: &str) -> PostUpdate {
        PostUpdate {
            id,
            title: title.into(),
            body: body.into(),
        }
    }

    #[test]
    fn build_skips_identical_posts() {
        let current = stored(1, "Hello", "World");
        assert_eq!(
            UpdateQuery::build(&current, &requested(1, "Hello", "World")),
            None
        );
    }

    #[test]
    fn build_sets_only_the_title() {
        let current = stored(3, "Hello", "World");
        let update = UpdateQuery::build(&current, &requested(3, "Howdy", "World")).unwrap();

        assert_eq!(update.columns, vec!["Title"]);
        assert_eq!(update.args, vec!["Howdy".to_string()]);
        assert_eq!(update.id, 3);
        assert_eq!(update.sql(), "UPDATE posts SET Title = ? WHERE id = ?");
    }

    #[test]
    fn build_sets_both_columns_in_order() {
        let current = stored(2, "a", "b");
        let update = UpdateQuery::build(&current, &requested(2, "c", "d")).unwrap();

        assert_eq!(update.columns, vec!["Title", "Body"]);
        assert_eq!(update.args, vec!["c".to_string(), "d".to_string()]);
        assert_eq!(
            update.sql(),
            "UPDATE posts SET Title = ?, Body = ? WHERE id = ?"
        );
    }

    #[test]
    fn build_binds_the_stored_id() {
        let current = stored(9, "a", "b");
        let update = UpdateQuery::build(&current, &requested(9, "a", "z")).unwrap();
        assert_eq!(update.columns, vec!["Body"]);
        assert_eq!(update.id, 9);
        assert_eq!(update.sql(), "UPDATE posts SET Body = ? WHERE id = ?");
    }

    #[tokio::test]
    async fn create_then_find_round_trips() {
        let repo = repo().await;
        let id = repo.create("Hello", "World").await.unwrap();

        let post = repo.find(id).await.unwrap();
        assert_eq!(post.id, id);
        assert_eq!(post.title, "Hello");
        assert_eq!(post.body, "World");
        assert!(post.created_at.timestamp() > 0);
        assert!(post.updated_at.timestamp() > 0);
    }

    #[tokio::test]
    async fn create_accepts_empty_text() {
        let repo = repo().await;
        let id = repo.create("", "").await.unwrap();

        let post = repo.find(id).await.unwrap();
        assert_eq!(post.title, "");
        assert_eq!(post.body, "");
    }

    #[tokio::test]
    async fn list_returns_posts_in_insertion_order() {
        let repo = repo().await;
        assert!(repo.list().await.unwrap().is_empty());

        let first = repo.create("first", "1").await.unwrap();
        let second = repo.create("second", "2").await.unwrap();

        let ids: Vec<i64> = repo.list().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[tokio::test]
    async fn find_missing_post_is_not_found() {
        let repo = repo().await;
        let err = repo.find(42).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound { id: 42 }));
    }

    #[tokio::test]
    async fn update_with_identical_fields_is_a_no_op() {
        let repo = repo().await;
        let id = repo.create("Hello", "World").await.unwrap();
        let before = repo.find(id).await.unwrap();

        let outcome = repo
            .update(&requested(id, "Hello", "World"))
            .await
            .unwrap();

        assert_eq!(outcome, UpdateOutcome::Unchanged);
        assert_eq!(repo.find(id).await.unwrap(), before);
    }

    #[tokio::test]
    async fn update_changes_only_differing_columns() {
        let repo = repo().await;
        let id = repo.create("Hello", "World").await.unwrap();

        let outcome = repo
            .update(&requested(id, "Hello", "Changed"))
            .await
            .unwrap();

        assert_eq!(outcome, UpdateOutcome::Updated);
        let post = repo.find(id).await.unwrap();
        assert_eq!(post.title, "Hello");
        assert_eq!(post.body, "Changed");
        assert!(post.updated_at >= post.created_at);
    }

    #[tokio::test]
    async fn update_missing_post_fails() {
        let repo = repo().await;
        let err = repo.update(&requested(5, "a", "b")).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound { id: 5 }));
    }

    #[tokio::test]
    async fn delete_missing_post_succeeds() {
        let repo = repo().await;
        repo.delete(404).await.unwrap();
    }

    #[tokio::test]
    async fn post_lifecycle() {
        let repo = repo().await;

        let id = repo.create("Hello", "World").await.unwrap();
        assert_eq!(id, 1);

        let post = repo.find(1).await.unwrap();
        assert_eq!((post.id, post.title.as_str(), post.body.as_str()), (1, "Hello", "World"));

        let outcome = repo
            .update(&requested(1, "Hello", "Changed"))
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Updated);
        assert_eq!(repo.find(1).await.unwrap().body, "Changed");

        repo.delete(1).await.unwrap();
        assert!(matches!(
            repo.find(1).await.unwrap_err(),
            RepoError::NotFound { id: 1 }
        ));
    }

    #[tokio::test]
    async fn ping_succeeds_on_open_pool() {
        repo().await.ping().await.unwrap();
    }
}
