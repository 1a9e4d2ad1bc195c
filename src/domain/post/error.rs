use super::form::FieldErrors;
use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum PostServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid form submission")]
    InvalidForm(FieldErrors),
    #[error("post not found")]
    NotFound,
    #[error("group not found")]
    GroupNotFound,
    #[error("author not found")]
    AuthorNotFound,
    #[error("post {post_id} belongs to another author")]
    NotAuthor { post_id: i64 },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<PostServiceError> for AppError {
    fn from(err: PostServiceError) -> Self {
        match err {
            PostServiceError::NotFound => AppError::NotFound("Post not found".to_string()),
            PostServiceError::GroupNotFound => AppError::NotFound("Group not found".to_string()),
            PostServiceError::AuthorNotFound => AppError::NotFound("Author not found".to_string()),
            PostServiceError::InvalidForm(_) => AppError::BadRequest(err.to_string()),
            PostServiceError::NotAuthor { .. } => AppError::BadRequest(err.to_string()),
            PostServiceError::Dependency(msg) => AppError::Internal(msg),
            PostServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
