use crate::e2e::helpers;

use helpers::{TestContext, LOGIN_URL};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use test_context::test_context;
use yatube::domain::post::Post;
use yatube::domain::user::User;

struct Setup {
    author: User,
    post: Post,
    author_token: String,
    other_token: String,
}

async fn setup(ctx: &TestContext) -> Setup {
    let author = ctx.fixtures.create_user("test_user").await.unwrap();
    let other = ctx.fixtures.create_user("other_user").await.unwrap();
    let post = ctx
        .fixtures
        .create_post(&author, "Test text", None)
        .await
        .unwrap();
    let author_token = ctx.token_for(&author);
    let other_token = ctx.token_for(&other);

    Setup {
        author,
        post,
        author_token,
        other_token,
    }
}

fn login_redirect(next: &str) -> String {
    format!("{}?next={}", LOGIN_URL, urlencoding::encode(next))
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_send_guest_to_login_from_create(ctx: &TestContext) {
    let _s = setup(ctx).await;
    let posts_count = ctx.fixtures.get_post_count().await.unwrap();

    let response = ctx.client.get("/create/").await.unwrap();
    response.assert_redirect("/auth/login/?next=%2Fcreate%2F");

    let response = ctx
        .client
        .post_form("/create/", &[("text", "Guest post")])
        .await
        .unwrap();
    response.assert_redirect(&login_redirect("/create/"));

    assert_eq!(ctx.fixtures.get_post_count().await.unwrap(), posts_count);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_send_guest_to_login_from_edit(ctx: &TestContext) {
    let s = setup(ctx).await;
    let edit_url = format!("/posts/{}/edit/", s.post.id);

    let response = ctx.client.get(&edit_url).await.unwrap();
    response.assert_redirect(&login_redirect(&edit_url));

    let response = ctx
        .client
        .post_form(&edit_url, &[("text", "Guest edit")])
        .await
        .unwrap();
    response.assert_redirect(&login_redirect(&edit_url));

    let post = ctx.fixtures.get_post(s.post.id).await.unwrap().unwrap();
    assert_eq!(post.text, "Test text");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_send_non_author_back_to_post(ctx: &TestContext) {
    let s = setup(ctx).await;
    let edit_url = format!("/posts/{}/edit/", s.post.id);
    let detail_url = format!("/posts/{}/", s.post.id);

    let response = ctx
        .client
        .get_with_auth(&edit_url, &s.other_token)
        .await
        .unwrap();
    response.assert_redirect(&detail_url);

    let response = ctx
        .client
        .post_form_with_auth(&edit_url, &[("text", "Hijacked")], &s.other_token)
        .await
        .unwrap();
    response.assert_redirect(&detail_url);

    let post = ctx.fixtures.get_post(s.post.id).await.unwrap().unwrap();
    assert_eq!(post.text, "Test text");
    assert_eq!(post.author_id, s.author.id);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_treat_invalid_token_as_guest(ctx: &TestContext) {
    let s = setup(ctx).await;

    let response = ctx
        .client
        .get_with_auth(&format!("/posts/{}/", s.post.id), "not-a-token")
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let response = ctx
        .client
        .get_with_auth("/create/", "not-a-token")
        .await
        .unwrap();
    response.assert_redirect(&login_redirect("/create/"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_show_edit_link_to_author_only(ctx: &TestContext) {
    let s = setup(ctx).await;
    let detail_url = format!("/posts/{}/", s.post.id);
    let edit_link = format!("href=\"/posts/{}/edit/\"", s.post.id);

    let response = ctx
        .client
        .get_with_auth(&detail_url, &s.author_token)
        .await
        .unwrap();
    response.assert_contains(&edit_link);

    let response = ctx
        .client
        .get_with_auth(&detail_url, &s.other_token)
        .await
        .unwrap();
    assert!(!response.body.contains(&edit_link));

    let response = ctx.client.get(&detail_url).await.unwrap();
    assert!(!response.body.contains(&edit_link));
}
