use askama::Template;
use axum::{
    http::{HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::domain::group::Group;
use crate::domain::pagination::Page;
use crate::domain::post::{Post, PostForm};
use crate::domain::user::User;
use crate::error::AppResult;
use crate::infrastructure::auth::AuthUser;

/// Response header naming the template behind an HTML page
pub const X_TEMPLATE: &str = "x-template";

pub const INDEX_TITLE: &str = "Последние обновления на сайте";

/// Template with a stable, externally visible name.
pub trait NamedTemplate: Template {
    const NAME: &'static str;
}

macro_rules! named_template {
    ($template:ty, $name:literal) => {
        impl NamedTemplate for $template {
            const NAME: &'static str = $name;
        }
    };
}

/// Data every page shares with the base layout.
#[derive(Debug, Clone)]
pub struct Layout {
    pub title: String,
    /// Username of the signed-in viewer
    pub viewer: Option<String>,
}

impl Layout {
    pub fn new(title: impl Into<String>, viewer: Option<&AuthUser>) -> Self {
        Self {
            title: title.into(),
            viewer: viewer.map(|user| user.username.clone()),
        }
    }
}

#[derive(Template)]
#[template(path = "posts/index.html")]
pub struct IndexTemplate {
    pub layout: Layout,
    pub page: Page<Post>,
}

#[derive(Template)]
#[template(path = "posts/group_list.html")]
pub struct GroupListTemplate {
    pub layout: Layout,
    pub group: Group,
    pub page: Page<Post>,
}

#[derive(Template)]
#[template(path = "posts/profile.html")]
pub struct ProfileTemplate {
    pub layout: Layout,
    pub author: User,
    pub post_count: i64,
    pub page: Page<Post>,
}

#[derive(Template)]
#[template(path = "posts/post_detail.html")]
pub struct PostDetailTemplate {
    pub layout: Layout,
    pub post: Post,
    pub author_post_count: i64,
    pub can_edit: bool,
}

#[derive(Template)]
#[template(path = "posts/create_post.html")]
pub struct CreatePostTemplate {
    pub layout: Layout,
    pub form: PostForm,
    pub is_edit: bool,
    pub action: String,
}

#[derive(Template)]
#[template(path = "core/404.html")]
pub struct NotFoundTemplate {
    pub layout: Layout,
    pub path: Option<String>,
}

named_template!(IndexTemplate, "posts/index.html");
named_template!(GroupListTemplate, "posts/group_list.html");
named_template!(ProfileTemplate, "posts/profile.html");
named_template!(PostDetailTemplate, "posts/post_detail.html");
named_template!(CreatePostTemplate, "posts/create_post.html");
named_template!(NotFoundTemplate, "core/404.html");

pub fn render_page<T: NamedTemplate>(template: T) -> AppResult<Response> {
    render_page_with_status(template, StatusCode::OK)
}

pub fn render_page_with_status<T: NamedTemplate>(
    template: T,
    status: StatusCode,
) -> AppResult<Response> {
    let html = template.render()?;
    let mut response = (status, Html(html)).into_response();
    response
        .headers_mut()
        .insert(X_TEMPLATE, HeaderValue::from_static(T::NAME));
    Ok(response)
}

/// 404 page; degrades to plain text if the page itself cannot be rendered.
pub fn render_not_found(path: Option<String>) -> Response {
    let template = NotFoundTemplate {
        layout: Layout::new("Страница не найдена", None),
        path,
    };

    match render_page_with_status(template, StatusCode::NOT_FOUND) {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(error = %err, "Failed to render not found page");
            (StatusCode::NOT_FOUND, "Not found").into_response()
        }
    }
}
