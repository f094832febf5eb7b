// tests/support/helpers.rs
use std::sync::Arc;

use axum::body::{self, Body};
use axum::http::{Method, Request, StatusCode, header};
use inkwell::application::services::{ApplicationServices, ColumnService, Repositories};
use inkwell::presentation::http::{routes, state::HttpState};
use serde_json::Value;
use tower::util::ServiceExt as _;

use super::mocks::{DummyClock, DummySlug, DummyTokenManager, MemoryStore};

/// Every repository backed by the same in-memory store.
pub fn memory_repositories(store: &MemoryStore) -> Repositories {
    Repositories {
        article_write: Arc::new(store.clone()),
        article_read: Arc::new(store.clone()),
        article_revisions: Arc::new(store.clone()),
        drafts: Arc::new(store.clone()),
        categories: Arc::new(store.clone()),
        topics: Arc::new(store.clone()),
        comments: Arc::new(store.clone()),
        comment_reports: Arc::new(store.clone()),
        sensitive_words: Arc::new(store.clone()),
        columns: Arc::new(store.clone()),
        column_entries: Arc::new(store.clone()),
    }
}

pub fn build_services(store: &MemoryStore) -> ApplicationServices {
    ApplicationServices::new(
        memory_repositories(store),
        Arc::new(DummyTokenManager),
        Arc::new(DummyClock),
        Arc::new(DummySlug),
    )
}

pub fn build_test_state(store: &MemoryStore) -> HttpState {
    HttpState {
        services: Arc::new(build_services(store)),
    }
}

/// Router over a fresh store, returned alongside it so tests can seed and inspect rows.
pub fn make_test_router() -> (axum::Router, MemoryStore) {
    let store = MemoryStore::new();
    let router = routes::build_router(build_test_state(&store));
    (router, store)
}

/// Router whose column service is replaced by `columns`.
pub fn make_router_with_columns(columns: Arc<dyn ColumnService>) -> axum::Router {
    let store = MemoryStore::new();
    let services = build_services(&store).with_column_service(columns);
    routes::build_router(HttpState {
        services: Arc::new(services),
    })
}

/// Issue one request and decode the JSON body.
pub async fn send(
    app: &axum::Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    send_raw(app, method, uri, token, body.map(|json| json.to_string())).await
}

/// Like [`send`] but with the body bytes taken verbatim, so broken JSON can
/// be sent.
pub async fn send_raw(
    app: &axum::Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<String>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(raw) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(raw)),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}

/// Unwrap a successful envelope and return its `data`.
pub fn expect_success(status: StatusCode, body: &Value) -> Value {
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 200, "unexpected envelope: {body}");
    assert_eq!(body["message"], "success");
    body["data"].clone()
}

/// Assert an error envelope with the given business code. Transport status stays 200.
pub fn expect_code(status: StatusCode, body: &Value, code: u16) {
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], code, "unexpected envelope: {body}");
    assert!(body["data"].is_null(), "error envelope carried data: {body}");
    assert!(
        body["message"].as_str().is_some_and(|m| !m.is_empty()),
        "error envelope without message: {body}"
    );
}
