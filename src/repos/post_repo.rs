/*
 * Responsibility
 * - posts テーブル向け SQLx 操作 (SQLite)
 * - SqlitePool を受け取り CRUD を提供
 * - created_at / updated_at はここで書き込む
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::repos::error::RepoError;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PostRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertion order, oldest first.
pub async fn list(pool: &SqlitePool) -> Result<Vec<PostRow>, RepoError> {
    let rows = sqlx::query_as::<_, PostRow>(
        r#"
        SELECT id, title, content, created_at, updated_at
        FROM posts
        ORDER BY id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn create(pool: &SqlitePool, title: &str, content: &str) -> Result<PostRow, RepoError> {
    let now = Utc::now();

    let row = sqlx::query_as::<_, PostRow>(
        r#"
        INSERT INTO posts (title, content, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?3)
        RETURNING id, title, content, created_at, updated_at
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<PostRow>, RepoError> {
    let row = sqlx::query_as::<_, PostRow>(
        r#"
        SELECT id, title, content, created_at, updated_at
        FROM posts
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// `None` fields keep the stored value. Returns `None` when the row is gone.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    title: Option<&str>,
    content: Option<&str>,
) -> Result<Option<PostRow>, RepoError> {
    let row = sqlx::query_as::<_, PostRow>(
        r#"
        UPDATE posts
        SET
            title = COALESCE(?2, title),
            content = COALESCE(?3, content),
            updated_at = ?4
        WHERE id = ?1
        RETURNING id, title, content, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(content)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM posts
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::db;

    /// Fresh file-backed database; keep the `TempDir` alive for the test's duration.
    pub(crate) async fn test_pool() -> (SqlitePool, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("tempdir");
        let url = format!("sqlite://{}", dir.path().join("test.sqlite3").display());
        let pool = db::connect_with(&url, 1, 4).await.expect("connect");
        db::migrate(&pool).await.expect("migrate");
        (pool, dir)
    }

    // Makes every DELETE on posts a no-op, so a delete finds its row but removes nothing.
    pub(crate) async fn refuse_deletes(pool: &SqlitePool) {
        sqlx::query(
            "CREATE TRIGGER keep_posts BEFORE DELETE ON posts BEGIN SELECT RAISE(IGNORE); END",
        )
        .execute(pool)
        .await
        .expect("create trigger");
    }

    #[tokio::test]
    async fn create_assigns_id_and_timestamps() {
        let (pool, _dir) = test_pool().await;

        let row = create(&pool, "T", "C").await.expect("create");

        assert!(row.id > 0);
        assert_eq!(row.title, "T");
        assert_eq!(row.content, "C");
        assert_eq!(row.created_at, row.updated_at);

        let fetched = get(&pool, row.id).await.expect("get").expect("row exists");
        assert_eq!(fetched, row);
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let (pool, _dir) = test_pool().await;

        assert!(get(&pool, 999_999).await.expect("get").is_none());
    }

    #[tokio::test]
    async fn list_is_in_insertion_order() {
        let (pool, _dir) = test_pool().await;

        for i in 0..3 {
            create(&pool, &format!("title {i}"), "body")
                .await
                .expect("create");
        }

        let titles: Vec<String> = list(&pool)
            .await
            .expect("list")
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["title 0", "title 1", "title 2"]);
    }

    #[tokio::test]
    async fn update_keeps_omitted_columns() {
        let (pool, _dir) = test_pool().await;
        let row = create(&pool, "T", "C").await.expect("create");

        let updated = update(&pool, row.id, None, Some("new body"))
            .await
            .expect("update")
            .expect("row exists");

        assert_eq!(updated.title, "T");
        assert_eq!(updated.content, "new body");
        assert_eq!(updated.created_at, row.created_at);
        assert!(updated.updated_at >= row.updated_at);
    }

    #[tokio::test]
    async fn update_missing_returns_none() {
        let (pool, _dir) = test_pool().await;

        let updated = update(&pool, 42, Some("x"), None).await.expect("update");
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_was_removed() {
        let (pool, _dir) = test_pool().await;
        let row = create(&pool, "T", "C").await.expect("create");

        assert!(delete(&pool, row.id).await.expect("first delete"));
        assert!(!delete(&pool, row.id).await.expect("second delete"));
        assert!(get(&pool, row.id).await.expect("get").is_none());
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let (pool, _dir) = test_pool().await;
        let first = create(&pool, "a", "a").await.expect("create");
        delete(&pool, first.id).await.expect("delete");

        let second = create(&pool, "b", "b").await.expect("create");
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn concurrent_creates_get_distinct_ids() {
        let (pool, _dir) = test_pool().await;

        let (a, b) = tokio::join!(create(&pool, "a", "a"), create(&pool, "b", "b"));
        let (a, b) = (a.expect("create a"), b.expect("create b"));

        assert_ne!(a.id, b.id);
        assert_eq!(list(&pool).await.expect("list").len(), 2);
    }
}
