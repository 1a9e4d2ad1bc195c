use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    Extension, Form,
};
use std::sync::Arc;

use crate::domain::pagination::PageQuery;
use crate::domain::post::{PostForm, PostFormData, PostService, PostServiceApi, PostServiceError};
use crate::presentation::views::{
    render_page, CreatePostTemplate, GroupListTemplate, IndexTemplate, Layout, PostDetailTemplate,
    ProfileTemplate, INDEX_TITLE,
};
use crate::{
    error::{AppError, AppResult},
    infrastructure::auth::AuthUser,
};

pub struct PostController {
    post_service: Arc<PostService>,
}

impl PostController {
    pub fn new(post_service: Arc<PostService>) -> Self {
        Self { post_service }
    }

    /// GET / - Latest posts
    pub async fn index(
        State(controller): State<Arc<PostController>>,
        viewer: Option<Extension<AuthUser>>,
        Query(params): Query<Vec<(String, String)>>,
    ) -> AppResult<Response> {
        let page = controller
            .post_service
            .index(PageQuery::from_pairs(params).number())
            .await?;

        render_page(IndexTemplate {
            layout: Layout::new(INDEX_TITLE, viewer.as_deref()),
            page,
        })
    }

    /// GET /group/{slug}/ - Posts of a group
    pub async fn group_posts(
        State(controller): State<Arc<PostController>>,
        viewer: Option<Extension<AuthUser>>,
        Path(slug): Path<String>,
        Query(params): Query<Vec<(String, String)>>,
    ) -> AppResult<Response> {
        let listing = controller
            .post_service
            .group_posts(&slug, PageQuery::from_pairs(params).number())
            .await?;

        render_page(GroupListTemplate {
            layout: Layout::new(
                format!("Записи сообщества {}", listing.group),
                viewer.as_deref(),
            ),
            group: listing.group,
            page: listing.page,
        })
    }

    /// GET /profile/{username}/ - Posts of an author
    pub async fn profile(
        State(controller): State<Arc<PostController>>,
        viewer: Option<Extension<AuthUser>>,
        Path(username): Path<String>,
        Query(params): Query<Vec<(String, String)>>,
    ) -> AppResult<Response> {
        let listing = controller
            .post_service
            .profile(&username, PageQuery::from_pairs(params).number())
            .await?;

        render_page(ProfileTemplate {
            layout: Layout::new(
                format!("Профайл пользователя {}", listing.author),
                viewer.as_deref(),
            ),
            author: listing.author,
            post_count: listing.post_count,
            page: listing.page,
        })
    }

    /// GET /posts/{id}/ - A single post
    pub async fn post_detail(
        State(controller): State<Arc<PostController>>,
        viewer: Option<Extension<AuthUser>>,
        Path(post_id): Path<String>,
    ) -> AppResult<Response> {
        let post_id = parse_post_id(&post_id)?;
        let detail = controller.post_service.post_detail(post_id).await?;
        let can_edit = viewer
            .as_deref()
            .is_some_and(|user| detail.post.is_authored_by(user.user_id));

        render_page(PostDetailTemplate {
            layout: Layout::new(format!("Пост {}", detail.post), viewer.as_deref()),
            post: detail.post,
            author_post_count: detail.author_post_count,
            can_edit,
        })
    }

    /// GET /create/ - Empty post form
    pub async fn create_form(
        State(controller): State<Arc<PostController>>,
        Extension(auth_user): Extension<AuthUser>,
    ) -> AppResult<Response> {
        let choices = controller.post_service.group_choices().await?;

        render_create_page(&auth_user, PostForm::empty(choices), None)
    }

    /// POST /create/ - Publish a post
    pub async fn create_post(
        State(controller): State<Arc<PostController>>,
        Extension(auth_user): Extension<AuthUser>,
        Form(data): Form<PostFormData>,
    ) -> AppResult<Response> {
        match controller
            .post_service
            .create_post(auth_user.user_id, &data)
            .await
        {
            Ok(_) => Ok(Redirect::to(&profile_url(&auth_user.username)).into_response()),
            Err(PostServiceError::InvalidForm(errors)) => {
                let choices = controller.post_service.group_choices().await?;
                render_create_page(&auth_user, PostForm::rejected(&data, choices, errors), None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// GET /posts/{id}/edit/ - Pre-filled post form
    pub async fn edit_form(
        State(controller): State<Arc<PostController>>,
        Extension(auth_user): Extension<AuthUser>,
        Path(post_id): Path<String>,
    ) -> AppResult<Response> {
        let post_id = parse_post_id(&post_id)?;

        match controller
            .post_service
            .edit_form(auth_user.user_id, post_id)
            .await
        {
            Ok(form) => render_create_page(&auth_user, form, Some(post_id)),
            Err(PostServiceError::NotAuthor { post_id }) => {
                Ok(Redirect::to(&post_url(post_id)).into_response())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// POST /posts/{id}/edit/ - Save changes to a post
    pub async fn update_post(
        State(controller): State<Arc<PostController>>,
        Extension(auth_user): Extension<AuthUser>,
        Path(post_id): Path<String>,
        Form(data): Form<PostFormData>,
    ) -> AppResult<Response> {
        let post_id = parse_post_id(&post_id)?;

        match controller
            .post_service
            .update_post(auth_user.user_id, post_id, &data)
            .await
        {
            Ok(post) => Ok(Redirect::to(&post_url(post.id)).into_response()),
            Err(PostServiceError::NotAuthor { post_id }) => {
                Ok(Redirect::to(&post_url(post_id)).into_response())
            }
            Err(PostServiceError::InvalidForm(errors)) => {
                let choices = controller.post_service.group_choices().await?;
                render_create_page(
                    &auth_user,
                    PostForm::rejected(&data, choices, errors),
                    Some(post_id),
                )
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Shared by create and edit; `editing` holds the id of the post being edited.
fn render_create_page(
    auth_user: &AuthUser,
    form: PostForm,
    editing: Option<i64>,
) -> AppResult<Response> {
    let (title, action) = match editing {
        Some(post_id) => ("Редактировать пост", format!("/posts/{post_id}/edit/")),
        None => ("Новый пост", "/create/".to_string()),
    };

    render_page(CreatePostTemplate {
        layout: Layout::new(title, Some(auth_user)),
        form,
        is_edit: editing.is_some(),
        action,
    })
}

/// Non-numeric ids cannot exist, so they are a 404 rather than a bad request
fn parse_post_id(raw: &str) -> AppResult<i64> {
    raw.parse::<i64>()
        .map_err(|_| AppError::NotFound(format!("Post {raw}")))
}

pub fn post_url(post_id: i64) -> String {
    format!("/posts/{post_id}/")
}

pub fn profile_url(username: &str) -> String {
    format!("/profile/{}/", urlencoding::encode(username))
}
