use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use yatube::domain::group::Group;
use yatube::domain::post::Post;
use yatube::domain::user::User;
use yatube::infrastructure::repositories::{PostRepository, UserRepository};

pub struct TestFixtures {
    pool: PgPool,
}

impl TestFixtures {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_user(&self, username: &str) -> Result<User> {
        let repo = UserRepository::new(Arc::new(self.pool.clone()));
        Ok(repo.create(username).await?)
    }

    pub async fn create_group(&self, title: &str, slug: &str, description: &str) -> Result<Group> {
        let group = sqlx::query_as::<_, Group>(
            r#"
            INSERT INTO groups (title, slug, description)
            VALUES ($1, $2, $3)
            RETURNING id, title, slug, description
            "#,
        )
        .bind(title)
        .bind(slug)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;

        Ok(group)
    }

    pub async fn create_post(
        &self,
        author: &User,
        text: &str,
        group: Option<&Group>,
    ) -> Result<Post> {
        self.create_post_at(author, text, group, Utc::now()).await
    }

    /// `count` posts, published one minute apart, oldest first
    pub async fn create_posts(
        &self,
        author: &User,
        group: Option<&Group>,
        count: usize,
    ) -> Result<Vec<Post>> {
        let start = Utc::now() - Duration::minutes(count as i64);
        let mut posts = Vec::with_capacity(count);
        for i in 0..count {
            let post = self
                .create_post_at(
                    author,
                    &format!("Test text {}", i),
                    group,
                    start + Duration::minutes(i as i64),
                )
                .await?;
            posts.push(post);
        }
        Ok(posts)
    }

    async fn create_post_at(
        &self,
        author: &User,
        text: &str,
        group: Option<&Group>,
        pub_date: chrono::DateTime<Utc>,
    ) -> Result<Post> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO posts (text, pub_date, author_id, group_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(text)
        .bind(pub_date)
        .bind(author.id)
        .bind(group.map(|g| g.id))
        .fetch_one(&self.pool)
        .await?;

        self.get_post(id)
            .await?
            .context("Inserted post could not be read back")
    }

    pub async fn get_post(&self, post_id: i64) -> Result<Option<Post>> {
        let repo = PostRepository::new(Arc::new(self.pool.clone()));
        Ok(repo.find_by_id(post_id).await?)
    }

    pub async fn get_post_count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }

    /// Most recently stored post, if any
    pub async fn latest_post(&self) -> Result<Option<Post>> {
        let id = sqlx::query_scalar::<_, i64>("SELECT id FROM posts ORDER BY id DESC LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;

        match id {
            Some(id) => self.get_post(id).await,
            None => Ok(None),
        }
    }
}
