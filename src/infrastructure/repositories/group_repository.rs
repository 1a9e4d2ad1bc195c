use crate::infrastructure::db::DbPool;
use crate::{domain::group::Group, error::AppResult};
use std::sync::Arc;

pub struct GroupRepository {
    pool: Arc<DbPool>,
}

impl GroupRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Get a group by its slug
    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Group>> {
        let pool = self.pool.as_ref();
        let group = sqlx::query_as::<_, Group>(
            r#"
            SELECT id, title, slug, description
            FROM groups
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(pool)
        .await?;

        Ok(group)
    }

    /// All groups, alphabetically
    pub async fn find_all(&self) -> AppResult<Vec<Group>> {
        let pool = self.pool.as_ref();
        let groups = sqlx::query_as::<_, Group>(
            r#"
            SELECT id, title, slug, description
            FROM groups
            ORDER BY title, id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(groups)
    }
}
