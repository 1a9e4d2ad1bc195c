use crate::infrastructure::db::DbPool;
use crate::{
    domain::user::User,
    error::{AppError, AppResult},
};
use std::sync::Arc;

pub struct UserRepository {
    pool: Arc<DbPool>,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Find user by ID
    pub async fn find_by_id(&self, user_id: i64) -> AppResult<Option<User>> {
        let pool = self.pool.as_ref();
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, date_joined FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Find user by username
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let pool = self.pool.as_ref();
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, date_joined FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Create a new user
    pub async fn create(&self, username: &str) -> AppResult<User> {
        let pool = self.pool.as_ref();
        let now = chrono::Utc::now();

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, date_joined)
            VALUES ($1, $2)
            RETURNING id, username, date_joined
            "#,
        )
        .bind(username)
        .bind(now)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_unique_violation() {
                    return AppError::BadRequest(format!("Username {username} is taken"));
                }
            }
            AppError::Database(e)
        })?;

        Ok(user)
    }
}
