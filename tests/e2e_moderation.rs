use axum::http::Method;
use serde_json::{Value, json};

mod support;

use support::{ADMIN_TOKEN, MEMBER_TOKEN, MODERATOR_TOKEN, OTHER_TOKEN};

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

async fn call(
    app: &axum::Router,
    method: Method,
    uri: &str,
    token: &str,
    body: Option<Value>,
) -> Value {
    let (status, body) = support::send(app, method, uri, Some(token), body).await;
    support::expect_success(status, &body)
}

#[tokio::test]
async fn members_cannot_moderate() {
    let (app, store) = support::make_test_router();
    let article = support::seed_article(&store, "u-other", "Post", 0);
    let comment = post_comment(&app, MEMBER_TOKEN, article.id.0, "hi").await;

    let attempts = [
        (Method::POST, format!("/api/v3/comments/{}/pin", comment["id"]), None),
        (Method::POST, format!("/api/v3/comments/{}/feature", comment["id"]), None),
        (Method::GET, "/api/v3/comments/reports".to_string(), None),
        (
            Method::POST,
            "/api/v3/comments/batch/fold".to_string(),
            Some(json!({ "ids": [comment["id"]] })),
        ),
        (Method::GET, "/api/v3/comments/sensitive-words".to_string(), None),
    ];

    for (method, uri, body) in attempts {
        let (status, response) = support::send(&app, method, &uri, Some(MEMBER_TOKEN), body).await;
        support::expect_code(status, &response, 403);
    }
}

#[tokio::test]
async fn pinned_roots_come_first_and_replies_cannot_be_pinned() {
    let (app, store) = support::make_test_router();
    let article = support::seed_article(&store, "u-other", "Post", 0);
    let old = post_comment(&app, MEMBER_TOKEN, article.id.0, "old").await;
    let new = post_comment(&app, MEMBER_TOKEN, article.id.0, "new").await;

    let pinned = call(
        &app,
        Method::POST,
        &format!("/api/v3/comments/{}/pin", old["id"]),
        MODERATOR_TOKEN,
        None,
    )
    .await;
    assert_eq!(pinned["is_pinned"], true);

    let (status, body) = support::send(
        &app,
        Method::GET,
        &format!("/api/v3/comments/article/{}", article.id.0),
        None,
        None,
    )
    .await;
    let page = support::expect_success(status, &body);
    assert_eq!(page["items"][0]["id"], old["id"]);
    assert_eq!(page["items"][1]["id"], new["id"]);

    let reply = call(
        &app,
        Method::POST,
        &format!("/api/v3/comments/{}/replies", new["id"]),
        OTHER_TOKEN,
        Some(json!({ "content": "a reply" })),
    )
    .await;
    let (status, body) = support::send(
        &app,
        Method::POST,
        &format!("/api/v3/comments/{}/pin", reply["id"]),
        Some(MODERATOR_TOKEN),
        None,
    )
    .await;
    support::expect_code(status, &body, 400);

    let unpinned = call(
        &app,
        Method::DELETE,
        &format!("/api/v3/comments/{}/pin", old["id"]),
        MODERATOR_TOKEN,
        None,
    )
    .await;
    assert_eq!(unpinned["is_pinned"], false);
}

#[tokio::test]
async fn feature_toggles_flag() {
    let (app, store) = support::make_test_router();
    let article = support::seed_article(&store, "u-other", "Post", 0);
    let comment = post_comment(&app, MEMBER_TOKEN, article.id.0, "insightful").await;
    let uri = format!("/api/v3/comments/{}/feature", comment["id"]);

    let featured = call(&app, Method::POST, &uri, ADMIN_TOKEN, None).await;
    assert_eq!(featured["is_featured"], true);
    let plain = call(&app, Method::DELETE, &uri, ADMIN_TOKEN, None).await;
    assert_eq!(plain["is_featured"], false);
}

#[tokio::test]
async fn article_author_may_post_author_reply() {
    let (app, store) = support::make_test_router();
    let article = support::seed_article(&store, "u-other", "Post", 0);
    let comment = post_comment(&app, MEMBER_TOKEN, article.id.0, "question?").await;
    let uri = format!("/api/v3/comments/{}/author-reply", comment["id"]);

    let (status, body) = support::send(
        &app,
        Method::POST,
        &uri,
        Some(MEMBER_TOKEN),
        Some(json!({ "content": "not my article" })),
    )
    .await;
    support::expect_code(status, &body, 403);

    let reply = call(
        &app,
        Method::POST,
        &uri,
        OTHER_TOKEN,
        Some(json!({ "content": "answer" })),
    )
    .await;
    assert_eq!(reply["is_author_reply"], true);
    assert_eq!(reply["parent_id"], comment["id"]);
    assert_eq!(reply["reply_to_user_id"], "u-member");
}

#[tokio::test]
async fn author_reply_is_masked() {
    let (app, store) = support::make_test_router();
    let article = support::seed_article(&store, "u-other", "Post", 0);
    support::seed_sensitive_word(&store, "spam");
    let comment = post_comment(&app, MEMBER_TOKEN, article.id.0, "question?").await;

    let reply = call(
        &app,
        Method::POST,
        &format!("/api/v3/comments/{}/author-reply", comment["id"]),
        OTHER_TOKEN,
        Some(json!({ "content": "no SPAM please" })),
    )
    .await;
    assert_eq!(reply["content"], "no **** please");
    assert_eq!(reply["is_author_reply"], true);
}

#[tokio::test]
async fn handling_a_report_can_delete_the_comment() {
    let (app, store) = support::make_test_router();
    let article = support::seed_article(&store, "u-other", "Post", 0);
    let comment = post_comment(&app, MEMBER_TOKEN, article.id.0, "rude").await;
    let report = call(
        &app,
        Method::POST,
        &format!("/api/v3/comments/{}/report", comment["id"]),
        OTHER_TOKEN,
        Some(json!({ "reason": "abusive" })),
    )
    .await;

    let pending = call(
        &app,
        Method::GET,
        "/api/v3/comments/reports?status=pending",
        MODERATOR_TOKEN,
        None,
    )
    .await;
    assert_eq!(pending["total"], 1);

    let (status, body) = support::send(
        &app,
        Method::PUT,
        &format!("/api/v3/comments/reports/{}", report["id"]),
        Some(MODERATOR_TOKEN),
        Some(json!({ "status": "pending" })),
    )
    .await;
    support::expect_code(status, &body, 400);

    let handled = call(
        &app,
        Method::PUT,
        &format!("/api/v3/comments/reports/{}", report["id"]),
        MODERATOR_TOKEN,
        Some(json!({ "status": "handled", "note": " removed ", "delete_comment": true })),
    )
    .await;
    assert_eq!(handled["status"], "handled");
    assert_eq!(handled["handler_id"], "u-mod");
    assert_eq!(handled["handler_note"], "removed");

    let (status, body) = support::send(
        &app,
        Method::GET,
        &format!("/api/v3/comments/{}", comment["id"]),
        None,
        None,
    )
    .await;
    support::expect_code(status, &body, 404);

    let (status, body) = support::send(
        &app,
        Method::PUT,
        &format!("/api/v3/comments/reports/{}", report["id"]),
        Some(MODERATOR_TOKEN),
        Some(json!({ "status": "rejected" })),
    )
    .await;
    support::expect_code(status, &body, 409);

    // The report outlives the comment it pointed at.
    let handled_list = call(
        &app,
        Method::GET,
        "/api/v3/comments/reports?status=handled",
        MODERATOR_TOKEN,
        None,
    )
    .await;
    assert_eq!(handled_list["total"], 1);
}

#[tokio::test]
async fn unknown_report_status_filter_is_400() {
    let (app, _store) = support::make_test_router();
    let (status, body) = support::send(
        &app,
        Method::GET,
        "/api/v3/comments/reports?status=closed",
        Some(MODERATOR_TOKEN),
        None,
    )
    .await;
    support::expect_code(status, &body, 400);
}

#[tokio::test]
async fn batch_operations_report_affected_rows() {
    let (app, store) = support::make_test_router();
    let article = support::seed_article(&store, "u-other", "Post", 0);
    let a = post_comment(&app, MEMBER_TOKEN, article.id.0, "a").await;
    let b = post_comment(&app, MEMBER_TOKEN, article.id.0, "b").await;
    let reply = call(
        &app,
        Method::POST,
        &format!("/api/v3/comments/{}/replies", a["id"]),
        OTHER_TOKEN,
        Some(json!({ "content": "reply" })),
    )
    .await;

    let folded = call(
        &app,
        Method::POST,
        "/api/v3/comments/batch/fold",
        MODERATOR_TOKEN,
        Some(json!({ "ids": [a["id"], b["id"], 999] })),
    )
    .await;
    assert_eq!(folded["requested"], 3);
    assert_eq!(folded["affected"], 2);

    let (status, body) = support::send(
        &app,
        Method::GET,
        &format!("/api/v3/comments/{}", b["id"]),
        None,
        None,
    )
    .await;
    assert_eq!(support::expect_success(status, &body)["is_folded"], true);

    let deleted = call(
        &app,
        Method::POST,
        "/api/v3/comments/batch/delete",
        MODERATOR_TOKEN,
        Some(json!({ "ids": [a["id"], a["id"]] })),
    )
    .await;
    assert_eq!(deleted["requested"], 1);
    assert_eq!(deleted["affected"], 2);

    let (status, body) = support::send(
        &app,
        Method::GET,
        &format!("/api/v3/comments/{}", reply["id"]),
        None,
        None,
    )
    .await;
    support::expect_code(status, &body, 404);
}

#[tokio::test]
async fn empty_or_oversized_batches_are_rejected() {
    let (app, _store) = support::make_test_router();
    let too_many: Vec<i64> = (1..=101).collect();

    for ids in [json!([]), json!(too_many)] {
        let (status, body) = support::send(
            &app,
            Method::POST,
            "/api/v3/comments/batch/delete",
            Some(MODERATOR_TOKEN),
            Some(json!({ "ids": ids })),
        )
        .await;
        support::expect_code(status, &body, 400);
    }
}

#[tokio::test]
async fn sensitive_word_lifecycle() {
    let (app, store) = support::make_test_router();
    let article = support::seed_article(&store, "u-other", "Post", 0);

    let word = call(
        &app,
        Method::POST,
        "/api/v3/comments/sensitive-words",
        MODERATOR_TOKEN,
        Some(json!({ "word": " scam " })),
    )
    .await;
    assert_eq!(word["word"], "scam");

    let (status, body) = support::send(
        &app,
        Method::POST,
        "/api/v3/comments/sensitive-words",
        Some(MODERATOR_TOKEN),
        Some(json!({ "word": "SCAM" })),
    )
    .await;
    support::expect_code(status, &body, 409);

    let masked = post_comment(&app, MEMBER_TOKEN, article.id.0, "total Scam here").await;
    assert_eq!(masked["content"], "total **** here");

    let words = call(
        &app,
        Method::GET,
        "/api/v3/comments/sensitive-words",
        MODERATOR_TOKEN,
        None,
    )
    .await;
    assert_eq!(words.as_array().map(Vec::len), Some(1));

    let uri = format!("/api/v3/comments/sensitive-words/{}", word["id"]);
    call(&app, Method::DELETE, &uri, MODERATOR_TOKEN, None).await;
    let (status, body) = support::send(&app, Method::DELETE, &uri, Some(MODERATOR_TOKEN), None).await;
    support::expect_code(status, &body, 404);

    let clean = post_comment(&app, MEMBER_TOKEN, article.id.0, "total Scam here").await;
    assert_eq!(clean["content"], "total Scam here");
}
