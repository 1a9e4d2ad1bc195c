use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::presentation::views::render_not_found;

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Template rendering failed: {0}")]
    Template(#[from] askama::Error),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Template(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Implement IntoResponse for automatic conversion in handlers
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status == StatusCode::NOT_FOUND {
            tracing::debug!(error = %self, "Resource not found");
            return render_not_found(None);
        }

        tracing::error!(
            error = %self,
            status = %status.as_u16(),
            "Request failed"
        );

        // Internal details stay in the logs
        let message = match self {
            Self::BadRequest(msg) => msg,
            _ => "Internal server error".to_string(),
        };

        (status, message).into_response()
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
