use axum::http::Method;
use serde_json::{Value, json};

mod support;

use support::{MEMBER_TOKEN, MODERATOR_TOKEN, OTHER_TOKEN};

async fn post_comment(app: &axum::Router, token: &str, article_id: i64, content: &str) -> Value {
    let (status, body) = support::send(
        app,
        Method::POST,
        "/api/v3/comments",
        Some(token),
        Some(json!({ "article_id": article_id, "content": content })),
    )
    .await;
    support::expect_success(status, &body)
}

async fn reply(app: &axum::Router, token: &str, parent: &Value, content: &str) -> Value {
    let (status, body) = support::send(
        app,
        Method::POST,
        &format!("/api/v3/comments/{}/replies", parent["id"]),
        Some(token),
        Some(json!({ "content": content })),
    )
    .await;
    support::expect_success(status, &body)
}

async fn get(app: &axum::Router, uri: &str) -> Value {
    let (status, body) = support::send(app, Method::GET, uri, None, None).await;
    support::expect_success(status, &body)
}

#[tokio::test]
async fn commenting_on_missing_article_is_404() {
    let (app, _store) = support::make_test_router();
    let (status, body) = support::send(
        &app,
        Method::POST,
        "/api/v3/comments",
        Some(MEMBER_TOKEN),
        Some(json!({ "article_id": 77, "content": "hello" })),
    )
    .await;
    support::expect_code(status, &body, 404);
}

#[tokio::test]
async fn replies_form_threads_with_counters() {
    let (app, store) = support::make_test_router();
    let article = support::seed_article(&store, "u-other", "Post", 0);

    let root = post_comment(&app, MEMBER_TOKEN, article.id.0, "first!").await;
    assert!(root["parent_id"].is_null());
    assert!(root["root_id"].is_null());

    let child = reply(&app, OTHER_TOKEN, &root, "thanks").await;
    assert_eq!(child["parent_id"], root["id"]);
    assert_eq!(child["root_id"], root["id"]);
    assert_eq!(child["reply_to_user_id"], "u-member");

    let nested = reply(&app, MEMBER_TOKEN, &child, "you're welcome").await;
    assert_eq!(nested["parent_id"], child["id"]);
    assert_eq!(nested["root_id"], root["id"]);
    assert_eq!(nested["reply_to_user_id"], "u-other");

    let root_now = get(&app, &format!("/api/v3/comments/{}", root["id"])).await;
    assert_eq!(root_now["reply_count"], 2);
    let child_now = get(&app, &format!("/api/v3/comments/{}", child["id"])).await;
    assert_eq!(child_now["reply_count"], 1);

    let thread = get(&app, &format!("/api/v3/comments/{}/replies", root["id"])).await;
    assert_eq!(thread["total"], 2);
    assert_eq!(thread["items"][0]["id"], child["id"]);
    assert_eq!(thread["items"][1]["id"], nested["id"]);

    let direct = get(&app, &format!("/api/v3/comments/{}/replies", child["id"])).await;
    assert_eq!(direct["total"], 1);
    assert_eq!(direct["items"][0]["id"], nested["id"]);

    let tree = get(&app, &format!("/api/v3/comments/article/{}/tree", article.id.0)).await;
    assert_eq!(tree["total"], 1);
    assert_eq!(tree["items"][0]["root"]["id"], root["id"]);
    assert_eq!(tree["items"][0]["replies"].as_array().map(Vec::len), Some(2));

    let stats = get(&app, &format!("/api/v3/comments/article/{}/stats", article.id.0)).await;
    assert_eq!(stats["total"], 3);
    assert_eq!(stats["root_count"], 1);
    assert_eq!(stats["reply_count"], 2);
}

#[tokio::test]
async fn deleting_a_reply_removes_its_subtree() {
    let (app, store) = support::make_test_router();
    let article = support::seed_article(&store, "u-other", "Post", 0);
    let root = post_comment(&app, MEMBER_TOKEN, article.id.0, "root").await;
    let child = reply(&app, OTHER_TOKEN, &root, "child").await;
    let nested = reply(&app, MEMBER_TOKEN, &child, "nested").await;

    let (status, body) = support::send(
        &app,
        Method::DELETE,
        &format!("/api/v3/comments/{}", child["id"]),
        Some(MEMBER_TOKEN),
        None,
    )
    .await;
    support::expect_code(status, &body, 403);

    let (status, body) = support::send(
        &app,
        Method::DELETE,
        &format!("/api/v3/comments/{}", child["id"]),
        Some(OTHER_TOKEN),
        None,
    )
    .await;
    support::expect_success(status, &body);

    let (status, body) = support::send(
        &app,
        Method::GET,
        &format!("/api/v3/comments/{}", nested["id"]),
        None,
        None,
    )
    .await;
    support::expect_code(status, &body, 404);

    let root_now = get(&app, &format!("/api/v3/comments/{}", root["id"])).await;
    assert_eq!(root_now["reply_count"], 0);
}

#[tokio::test]
async fn moderator_may_delete_any_comment() {
    let (app, store) = support::make_test_router();
    let article = support::seed_article(&store, "u-other", "Post", 0);
    let root = post_comment(&app, MEMBER_TOKEN, article.id.0, "root").await;

    let (status, body) = support::send(
        &app,
        Method::DELETE,
        &format!("/api/v3/comments/{}", root["id"]),
        Some(MODERATOR_TOKEN),
        None,
    )
    .await;
    support::expect_success(status, &body);
}

#[tokio::test]
async fn sensitive_words_are_masked() {
    let (app, store) = support::make_test_router();
    let article = support::seed_article(&store, "u-other", "Post", 0);
    support::seed_sensitive_word(&store, "spam");

    let created = post_comment(&app, MEMBER_TOKEN, article.id.0, "buy SPAM now").await;
    assert_eq!(created["content"], "buy **** now");
}

#[tokio::test]
async fn replies_are_masked_too() {
    let (app, store) = support::make_test_router();
    let article = support::seed_article(&store, "u-other", "Post", 0);
    support::seed_sensitive_word(&store, "spam");

    let root = post_comment(&app, MEMBER_TOKEN, article.id.0, "hello").await;
    let child = reply(&app, OTHER_TOKEN, &root, "Spam here").await;
    assert_eq!(child["content"], "**** here");

    let nested = reply(&app, MEMBER_TOKEN, &child, "İstanbul spam").await;
    assert_eq!(nested["content"], "İstanbul ****");
}

#[tokio::test]
async fn reactions_are_idempotent_and_counted() {
    let (app, store) = support::make_test_router();
    let article = support::seed_article(&store, "u-other", "Post", 0);
    let plain = post_comment(&app, MEMBER_TOKEN, article.id.0, "plain").await;
    let liked = post_comment(&app, MEMBER_TOKEN, article.id.0, "liked").await;
    let like = format!("/api/v3/comments/{}/like", liked["id"]);

    for _ in 0..2 {
        let (status, body) = support::send(&app, Method::POST, &like, Some(OTHER_TOKEN), None).await;
        support::expect_success(status, &body);
    }
    support::send(&app, Method::POST, &like, Some(MODERATOR_TOKEN), None).await;
    support::send(
        &app,
        Method::POST,
        &format!("/api/v3/comments/{}/dislike", plain["id"]),
        Some(OTHER_TOKEN),
        None,
    )
    .await;

    let now = get(&app, &format!("/api/v3/comments/{}", liked["id"])).await;
    assert_eq!(now["like_count"], 2);

    let hot = get(&app, &format!("/api/v3/comments/article/{}/hot", article.id.0)).await;
    assert_eq!(hot[0]["id"], liked["id"]);
    assert_eq!(hot[1]["id"], plain["id"]);

    let (status, body) = support::send(&app, Method::DELETE, &like, Some(OTHER_TOKEN), None).await;
    support::expect_success(status, &body);
    let now = get(&app, &format!("/api/v3/comments/{}", liked["id"])).await;
    assert_eq!(now["like_count"], 1);
}

#[tokio::test]
async fn reports_reject_self_and_duplicates() {
    let (app, store) = support::make_test_router();
    let article = support::seed_article(&store, "u-other", "Post", 0);
    let comment = post_comment(&app, MEMBER_TOKEN, article.id.0, "hot take").await;
    let uri = format!("/api/v3/comments/{}/report", comment["id"]);

    let (status, body) = support::send(
        &app,
        Method::POST,
        &uri,
        Some(MEMBER_TOKEN),
        Some(json!({ "reason": "mine" })),
    )
    .await;
    support::expect_code(status, &body, 400);

    let (status, body) = support::send(
        &app,
        Method::POST,
        &uri,
        Some(OTHER_TOKEN),
        Some(json!({ "reason": "rude" })),
    )
    .await;
    let report = support::expect_success(status, &body);
    assert_eq!(report["status"], "pending");
    assert_eq!(report["reporter_id"], "u-other");

    let (status, body) = support::send(
        &app,
        Method::POST,
        &uri,
        Some(OTHER_TOKEN),
        Some(json!({ "reason": "still rude" })),
    )
    .await;
    support::expect_code(status, &body, 409);
}

#[tokio::test]
async fn root_listing_is_newest_first() {
    let (app, store) = support::make_test_router();
    let article = support::seed_article(&store, "u-other", "Post", 0);
    let older = post_comment(&app, MEMBER_TOKEN, article.id.0, "older").await;
    let newer = post_comment(&app, MEMBER_TOKEN, article.id.0, "newer").await;

    let page = get(&app, &format!("/api/v3/comments/article/{}", article.id.0)).await;
    assert_eq!(page["page_size"], 20);
    assert_eq!(page["items"][0]["id"], newer["id"]);
    assert_eq!(page["items"][1]["id"], older["id"]);
}
