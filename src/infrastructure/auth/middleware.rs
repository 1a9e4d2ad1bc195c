use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use crate::domain::auth::JwtManager;
use crate::infrastructure::config::Config;
use crate::infrastructure::repositories::UserRepository;

/// Viewer injected into request extensions after authentication
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    pub username: String,
}

/// Authentication middleware.
///
/// Attaches an [`AuthUser`] when the request carries a valid bearer token for an
/// existing user. Anything else leaves the request anonymous.
pub async fn auth_middleware(
    State((user_repo, config)): State<(Arc<UserRepository>, Arc<Config>)>,
    mut request: Request,
    next: Next,
) -> Response {
    // Owned copy: the request body is not Sync, so no borrow of the request may cross an await
    let token = bearer_token(request.headers()).map(str::to_string);

    if let Some(user) = authenticate(token.as_deref(), &user_repo, &config).await {
        request.extensions_mut().insert(user);
    }

    next.run(request).await
}

/// Sends anonymous visitors to the login page, remembering where they were going
pub async fn login_required(
    State(config): State<Arc<Config>>,
    request: Request,
    next: Next,
) -> Response {
    if request.extensions().get::<AuthUser>().is_some() {
        return next.run(request).await;
    }

    let target = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let location = format!("{}?next={}", config.login_url, urlencoding::encode(target));

    tracing::debug!(%location, "Anonymous request to protected page");

    Redirect::to(&location).into_response()
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())?
        .strip_prefix("Bearer ")
}

async fn authenticate(
    token: Option<&str>,
    user_repo: &UserRepository,
    config: &Config,
) -> Option<AuthUser> {
    let token = token?;

    let jwt_manager = JwtManager::new(config.jwt_secret.clone(), config.jwt_expiration_hours);
    let user_id = match jwt_manager.extract_user_id(token) {
        Ok(user_id) => user_id,
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring invalid token");
            return None;
        }
    };

    match user_repo.find_by_id(user_id).await {
        Ok(Some(user)) => Some(AuthUser {
            user_id: user.id,
            username: user.username,
        }),
        Ok(None) => {
            tracing::debug!(user_id, "Token for unknown user");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load user for token");
            None
        }
    }
}
