use super::error::PostServiceError;
use super::form::{GroupChoice, PostForm, PostFormData};
use super::Post;
use crate::domain::group::Group;
use crate::domain::pagination::{Page, Paginator};
use crate::domain::user::User;
use crate::infrastructure::repositories::{GroupRepository, PostRepository, UserRepository};
use async_trait::async_trait;
use std::sync::Arc;

/// Posts of one group.
#[derive(Debug, Clone)]
pub struct GroupListing {
    pub group: Group,
    pub page: Page<Post>,
}

/// Posts of one author.
#[derive(Debug, Clone)]
pub struct AuthorListing {
    pub author: User,
    pub post_count: i64,
    pub page: Page<Post>,
}

#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: Post,
    pub author_post_count: i64,
}

pub struct PostService {
    post_repo: Arc<PostRepository>,
    group_repo: Arc<GroupRepository>,
    user_repo: Arc<UserRepository>,
    paginator: Paginator,
}

impl PostService {
    pub fn new(
        post_repo: Arc<PostRepository>,
        group_repo: Arc<GroupRepository>,
        user_repo: Arc<UserRepository>,
    ) -> Self {
        Self {
            post_repo,
            group_repo,
            user_repo,
            paginator: Paginator::default(),
        }
    }
}

#[async_trait]
pub trait PostServiceApi: Send + Sync {
    /// Latest posts of the whole site
    async fn index(&self, page: u32) -> Result<Page<Post>, PostServiceError>;

    async fn group_posts(&self, slug: &str, page: u32) -> Result<GroupListing, PostServiceError>;

    async fn profile(&self, username: &str, page: u32) -> Result<AuthorListing, PostServiceError>;

    async fn post_detail(&self, post_id: i64) -> Result<PostDetail, PostServiceError>;

    async fn group_choices(&self) -> Result<Vec<GroupChoice>, PostServiceError>;

    async fn create_post(
        &self,
        author_id: i64,
        data: &PostFormData,
    ) -> Result<Post, PostServiceError>;

    /// Form for editing a post, pre-filled; only its author gets one
    async fn edit_form(&self, editor_id: i64, post_id: i64) -> Result<PostForm, PostServiceError>;

    async fn update_post(
        &self,
        editor_id: i64,
        post_id: i64,
        data: &PostFormData,
    ) -> Result<Post, PostServiceError>;
}

#[async_trait]
impl PostServiceApi for PostService {
    async fn index(&self, page: u32) -> Result<Page<Post>, PostServiceError> {
        let count = self.post_repo.count_all().await.map_err(dependency)?;
        let posts = self
            .post_repo
            .find_all(self.paginator.limit(), self.paginator.offset(page))
            .await
            .map_err(dependency)?;

        Ok(self.paginator.page(posts, page, count))
    }

    async fn group_posts(&self, slug: &str, page: u32) -> Result<GroupListing, PostServiceError> {
        let group = self
            .group_repo
            .find_by_slug(slug)
            .await
            .map_err(dependency)?
            .ok_or(PostServiceError::GroupNotFound)?;

        let count = self
            .post_repo
            .count_by_group(group.id)
            .await
            .map_err(dependency)?;
        let posts = self
            .post_repo
            .find_by_group(group.id, self.paginator.limit(), self.paginator.offset(page))
            .await
            .map_err(dependency)?;

        Ok(GroupListing {
            group,
            page: self.paginator.page(posts, page, count),
        })
    }

    async fn profile(&self, username: &str, page: u32) -> Result<AuthorListing, PostServiceError> {
        let author = self
            .user_repo
            .find_by_username(username)
            .await
            .map_err(dependency)?
            .ok_or(PostServiceError::AuthorNotFound)?;

        let post_count = self
            .post_repo
            .count_by_author(author.id)
            .await
            .map_err(dependency)?;
        let posts = self
            .post_repo
            .find_by_author(author.id, self.paginator.limit(), self.paginator.offset(page))
            .await
            .map_err(dependency)?;

        Ok(AuthorListing {
            author,
            post_count,
            page: self.paginator.page(posts, page, post_count),
        })
    }

    async fn post_detail(&self, post_id: i64) -> Result<PostDetail, PostServiceError> {
        let post = self.find_post(post_id).await?;
        let author_post_count = self
            .post_repo
            .count_by_author(post.author_id)
            .await
            .map_err(dependency)?;

        Ok(PostDetail {
            post,
            author_post_count,
        })
    }

    async fn group_choices(&self) -> Result<Vec<GroupChoice>, PostServiceError> {
        let groups = self.group_repo.find_all().await.map_err(dependency)?;
        Ok(groups.into_iter().map(GroupChoice::from).collect())
    }

    async fn create_post(
        &self,
        author_id: i64,
        data: &PostFormData,
    ) -> Result<Post, PostServiceError> {
        let choices = self.group_choices().await?;
        let cleaned = PostForm::clean(data, &choices).map_err(PostServiceError::InvalidForm)?;

        let post_id = self
            .post_repo
            .create(author_id, &cleaned.text, cleaned.group_id)
            .await
            .map_err(dependency)?;

        tracing::info!(post_id, author_id, "Post created");

        self.post_repo
            .find_by_id(post_id)
            .await
            .map_err(dependency)?
            .ok_or_else(|| anyhow::anyhow!("post {post_id} missing right after insert").into())
    }

    async fn edit_form(&self, editor_id: i64, post_id: i64) -> Result<PostForm, PostServiceError> {
        let post = self.find_post(post_id).await?;
        ensure_author(&post, editor_id)?;

        let choices = self.group_choices().await?;
        Ok(PostForm::from_post(&post, choices))
    }

    async fn update_post(
        &self,
        editor_id: i64,
        post_id: i64,
        data: &PostFormData,
    ) -> Result<Post, PostServiceError> {
        let post = self.find_post(post_id).await?;
        ensure_author(&post, editor_id)?;

        let choices = self.group_choices().await?;
        let cleaned = PostForm::clean(data, &choices).map_err(PostServiceError::InvalidForm)?;

        self.post_repo
            .update(post.id, &cleaned.text, cleaned.group_id)
            .await
            .map_err(dependency)?;

        tracing::info!(post_id, editor_id, "Post updated");

        self.find_post(post_id).await
    }
}

impl PostService {
    async fn find_post(&self, post_id: i64) -> Result<Post, PostServiceError> {
        self.post_repo
            .find_by_id(post_id)
            .await
            .map_err(dependency)?
            .ok_or(PostServiceError::NotFound)
    }
}

fn ensure_author(post: &Post, user_id: i64) -> Result<(), PostServiceError> {
    if !post.is_authored_by(user_id) {
        tracing::debug!(post_id = post.id, user_id, "Edit attempt by non-author");
        return Err(PostServiceError::NotAuthor { post_id: post.id });
    }
    Ok(())
}

fn dependency(err: crate::error::AppError) -> PostServiceError {
    PostServiceError::Dependency(err.to_string())
}
