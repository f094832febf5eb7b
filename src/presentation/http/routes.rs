// src/presentation/http/routes.rs
use crate::presentation::http::middleware::{rate_limit_layer, require_authentication};
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{articles, categories, columns, comments, drafts, moderation, topics},
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post, put},
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

/// Knobs for the outer layers of the router.
#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
    pub rate_limit: bool,
}

pub fn build_router(state: HttpState) -> Router {
    build_router_with_options(state, &RouterOptions::default())
}

pub fn build_router_with_options(state: HttpState, options: &RouterOptions) -> Router {
    let mut router = Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .merge(article_routes())
        .merge(draft_routes())
        .merge(category_routes())
        .merge(topic_routes())
        .merge(comment_routes())
        .merge(moderation_routes())
        .merge(column_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&options.allowed_origins));

    if options.rate_limit {
        match rate_limit_layer() {
            Some(layer) => router = router.layer(layer),
            None => warn!("rate limiter configuration rejected; serving without it"),
        }
    }

    router.layer(Extension(state))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}

fn protected(router: Router) -> Router {
    router.route_layer(middleware::from_fn(require_authentication))
}

fn article_routes() -> Router {
    let public = Router::new()
        .route("/api/v3/articles", get(articles::list_articles))
        .route("/api/v3/articles/{id}", get(articles::get_article))
        .route(
            "/api/v3/articles/{id}/history",
            get(articles::list_article_history),
        );

    let private = Router::new()
        .route("/api/v3/articles", post(articles::create_article))
        .route(
            "/api/v3/articles/{id}",
            put(articles::update_article).delete(articles::delete_article),
        );

    public.merge(protected(private))
}

fn draft_routes() -> Router {
    protected(
        Router::new()
            .route(
                "/api/v3/drafts",
                get(drafts::list_drafts).post(drafts::save_draft),
            )
            .route(
                "/api/v3/drafts/{id}",
                get(drafts::get_draft)
                    .put(drafts::update_draft)
                    .delete(drafts::delete_draft),
            )
            .route("/api/v3/drafts/{id}/publish", post(drafts::publish_draft)),
    )
}

fn category_routes() -> Router {
    let public = Router::new()
        .route("/api/v3/categories/tree", get(categories::category_tree))
        .route(
            "/api/v3/categories/{id}/articles",
            get(categories::list_category_articles),
        );

    let private = Router::new().route("/api/v3/categories", post(categories::create_category));

    public.merge(protected(private))
}

fn topic_routes() -> Router {
    let public = Router::new()
        .route("/api/v3/topics/hot", get(topics::hot_topics))
        .route("/api/v3/topics/{id}", get(topics::get_topic))
        .route(
            "/api/v3/topics/{id}/articles",
            get(topics::list_topic_articles),
        );

    let private = Router::new()
        .route("/api/v3/topics", post(topics::create_topic))
        .route(
            "/api/v3/topics/{id}/follow",
            post(topics::follow_topic).delete(topics::unfollow_topic),
        );

    public.merge(protected(private))
}

fn comment_routes() -> Router {
    let public = Router::new()
        .route("/api/v3/comments/{id}", get(comments::get_comment))
        .route("/api/v3/comments/{id}/replies", get(comments::list_replies))
        .route(
            "/api/v3/comments/article/{article_id}",
            get(comments::list_article_comments),
        )
        .route(
            "/api/v3/comments/article/{article_id}/tree",
            get(comments::comment_tree),
        )
        .route(
            "/api/v3/comments/article/{article_id}/hot",
            get(comments::hot_comments),
        )
        .route(
            "/api/v3/comments/article/{article_id}/stats",
            get(comments::comment_stats),
        );

    let private = Router::new()
        .route("/api/v3/comments", post(comments::create_comment))
        .route(
            "/api/v3/comments/{id}",
            axum::routing::delete(comments::delete_comment),
        )
        .route(
            "/api/v3/comments/{id}/replies",
            post(comments::reply_comment),
        )
        .route(
            "/api/v3/comments/{id}/like",
            post(comments::like_comment).delete(comments::unlike_comment),
        )
        .route(
            "/api/v3/comments/{id}/dislike",
            post(comments::dislike_comment).delete(comments::undislike_comment),
        )
        .route("/api/v3/comments/{id}/report", post(comments::report_comment));

    public.merge(protected(private))
}

fn moderation_routes() -> Router {
    protected(
        Router::new()
            .route(
                "/api/v3/comments/{id}/pin",
                post(moderation::pin_comment).delete(moderation::unpin_comment),
            )
            .route(
                "/api/v3/comments/{id}/feature",
                post(moderation::feature_comment).delete(moderation::unfeature_comment),
            )
            .route(
                "/api/v3/comments/{id}/author-reply",
                post(moderation::author_reply),
            )
            .route("/api/v3/comments/reports", get(moderation::list_reports))
            .route(
                "/api/v3/comments/reports/{id}",
                put(moderation::handle_report),
            )
            .route(
                "/api/v3/comments/batch/delete",
                post(moderation::batch_delete),
            )
            .route("/api/v3/comments/batch/fold", post(moderation::batch_fold))
            .route(
                "/api/v3/comments/sensitive-words",
                get(moderation::list_sensitive_words).post(moderation::add_sensitive_word),
            )
            .route(
                "/api/v3/comments/sensitive-words/{id}",
                axum::routing::delete(moderation::delete_sensitive_word),
            ),
    )
}

fn column_routes() -> Router {
    let public = Router::new()
        .route("/api/v3/columns", get(columns::list_columns))
        .route("/api/v3/columns/hot", get(columns::hot_columns))
        .route("/api/v3/columns/{id}", get(columns::get_column))
        .route(
            "/api/v3/columns/user/{user_id}",
            get(columns::list_user_columns),
        )
        .route(
            "/api/v3/columns/{id}/articles",
            get(columns::list_column_articles),
        );

    let private = Router::new()
        .route("/api/v3/columns", post(columns::create_column))
        .route(
            "/api/v3/columns/subscribed",
            get(columns::list_subscribed_columns),
        )
        .route(
            "/api/v3/columns/{id}",
            put(columns::update_column).delete(columns::delete_column),
        )
        .route(
            "/api/v3/columns/{id}/subscribe",
            post(columns::subscribe_column).delete(columns::unsubscribe_column),
        )
        .route(
            "/api/v3/columns/{id}/articles",
            post(columns::add_column_article),
        )
        .route(
            "/api/v3/columns/{id}/articles/{article_id}",
            axum::routing::delete(columns::remove_column_article),
        )
        .route(
            "/api/v3/columns/{id}/articles/{article_id}/sort",
            put(columns::reposition_column_article),
        );

    public.merge(protected(private))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = crate::presentation::http::openapi::StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
