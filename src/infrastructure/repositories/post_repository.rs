use crate::infrastructure::db::DbPool;
use crate::{domain::post::Post, error::AppResult};
use std::sync::Arc;

/// Shared projection: a post with its author and group joined in.
const POST_SELECT: &str = r#"
    SELECT p.id, p.text, p.pub_date, p.author_id,
           u.username AS author_username,
           p.group_id, g.slug AS group_slug, g.title AS group_title
    FROM posts p
    JOIN users u ON u.id = p.author_id
    LEFT JOIN groups g ON g.id = p.group_id
"#;

/// Newest first; id breaks ties between posts stored within the same instant.
const NEWEST_FIRST: &str = "ORDER BY p.pub_date DESC, p.id DESC";

pub struct PostRepository {
    pool: Arc<DbPool>,
}

impl PostRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Get a post by ID
    pub async fn find_by_id(&self, post_id: i64) -> AppResult<Option<Post>> {
        let pool = self.pool.as_ref();
        let sql = format!("{POST_SELECT} WHERE p.id = $1");
        let post = sqlx::query_as::<_, Post>(&sql)
            .bind(post_id)
            .fetch_optional(pool)
            .await?;

        Ok(post)
    }

    /// One slice of all posts
    pub async fn find_all(&self, limit: i64, offset: i64) -> AppResult<Vec<Post>> {
        let pool = self.pool.as_ref();
        let sql = format!("{POST_SELECT} {NEWEST_FIRST} LIMIT $1 OFFSET $2");
        let posts = sqlx::query_as::<_, Post>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        Ok(posts)
    }

    /// One slice of the posts filed under a group
    pub async fn find_by_group(
        &self,
        group_id: i64,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Post>> {
        let pool = self.pool.as_ref();
        let sql = format!("{POST_SELECT} WHERE p.group_id = $1 {NEWEST_FIRST} LIMIT $2 OFFSET $3");
        let posts = sqlx::query_as::<_, Post>(&sql)
            .bind(group_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        Ok(posts)
    }

    /// One slice of the posts written by a user
    pub async fn find_by_author(
        &self,
        author_id: i64,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Post>> {
        let pool = self.pool.as_ref();
        let sql = format!("{POST_SELECT} WHERE p.author_id = $1 {NEWEST_FIRST} LIMIT $2 OFFSET $3");
        let posts = sqlx::query_as::<_, Post>(&sql)
            .bind(author_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        Ok(posts)
    }

    pub async fn count_all(&self) -> AppResult<i64> {
        let pool = self.pool.as_ref();
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    pub async fn count_by_group(&self, group_id: i64) -> AppResult<i64> {
        let pool = self.pool.as_ref();
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM posts
            WHERE group_id = $1
            "#,
        )
        .bind(group_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    pub async fn count_by_author(&self, author_id: i64) -> AppResult<i64> {
        let pool = self.pool.as_ref();
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM posts
            WHERE author_id = $1
            "#,
        )
        .bind(author_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Store a new post and return its ID
    pub async fn create(
        &self,
        author_id: i64,
        text: &str,
        group_id: Option<i64>,
    ) -> AppResult<i64> {
        let pool = self.pool.as_ref();
        let now = chrono::Utc::now();

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO posts (text, pub_date, author_id, group_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(text)
        .bind(now)
        .bind(author_id)
        .bind(group_id)
        .fetch_one(pool)
        .await?;

        Ok(id)
    }

    /// Update text and group of a post
    pub async fn update(
        &self,
        post_id: i64,
        text: &str,
        group_id: Option<i64>,
    ) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET text = $1, group_id = $2
            WHERE id = $3
            "#,
        )
        .bind(text)
        .bind(group_id)
        .bind(post_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
