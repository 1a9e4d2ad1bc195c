use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::controllers::{health, not_found::not_found, posts::PostController};
use crate::domain::post::PostService;
use crate::infrastructure::auth::{auth_middleware, login_required, request_id_middleware};
use crate::infrastructure::config::Config;
use crate::infrastructure::db::DbPool;
use crate::infrastructure::repositories::{GroupRepository, PostRepository, UserRepository};

/// Wire repositories, services and controllers into the application router
pub fn create_app(pool: Arc<DbPool>, config: Arc<Config>) -> Router {
    // 1. Repositories (inject db pool)
    let user_repo = Arc::new(UserRepository::new(pool.clone()));
    let group_repo = Arc::new(GroupRepository::new(pool.clone()));
    let post_repo = Arc::new(PostRepository::new(pool.clone()));

    // 2. Services (inject repositories)
    let post_service = Arc::new(PostService::new(
        post_repo,
        group_repo,
        user_repo.clone(),
    ));

    // 3. Controllers (inject services)
    let post_controller = Arc::new(PostController::new(post_service));

    // Listings and post pages (public)
    let public_routes = Router::new()
        .route("/", get(PostController::index))
        .route("/group/:slug/", get(PostController::group_posts))
        .route("/profile/:username/", get(PostController::profile))
        .route("/posts/:post_id/", get(PostController::post_detail))
        .with_state(post_controller.clone());

    // Post form (requires a signed-in viewer)
    let protected_routes = Router::new()
        .route(
            "/create/",
            get(PostController::create_form).post(PostController::create_post),
        )
        .route(
            "/posts/:post_id/edit/",
            get(PostController::edit_form).post(PostController::update_post),
        )
        .with_state(post_controller)
        .route_layer(middleware::from_fn_with_state(
            config.clone(),
            login_required,
        ));

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(pool)
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_id_middleware))
                .layer(middleware::from_fn_with_state(
                    (user_repo, config),
                    auth_middleware,
                )),
        )
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    pool: Arc<DbPool>,
    config: Arc<Config>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_app(pool, config.clone());

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
