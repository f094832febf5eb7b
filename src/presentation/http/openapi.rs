// src/presentation/http/openapi.rs
use axum::{Router, response::Redirect, routing::get};
use serde::{Deserialize, Serialize};
use std::{env, fs::File, io::BufWriter, path::Path};
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

/// Envelope of operations that return no payload; `data` is always null.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmptyResponse {
    pub code: u16,
    pub message: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::articles::list_articles,
        crate::presentation::http::controllers::articles::get_article,
        crate::presentation::http::controllers::articles::list_article_history,
        crate::presentation::http::controllers::articles::create_article,
        crate::presentation::http::controllers::articles::update_article,
        crate::presentation::http::controllers::articles::delete_article,
        crate::presentation::http::controllers::drafts::save_draft,
        crate::presentation::http::controllers::drafts::list_drafts,
        crate::presentation::http::controllers::drafts::get_draft,
        crate::presentation::http::controllers::drafts::update_draft,
        crate::presentation::http::controllers::drafts::publish_draft,
        crate::presentation::http::controllers::drafts::delete_draft,
        crate::presentation::http::controllers::categories::category_tree,
        crate::presentation::http::controllers::categories::list_category_articles,
        crate::presentation::http::controllers::categories::create_category,
        crate::presentation::http::controllers::topics::hot_topics,
        crate::presentation::http::controllers::topics::get_topic,
        crate::presentation::http::controllers::topics::list_topic_articles,
        crate::presentation::http::controllers::topics::create_topic,
        crate::presentation::http::controllers::topics::follow_topic,
        crate::presentation::http::controllers::topics::unfollow_topic,
        crate::presentation::http::controllers::comments::get_comment,
        crate::presentation::http::controllers::comments::list_article_comments,
        crate::presentation::http::controllers::comments::list_replies,
        crate::presentation::http::controllers::comments::comment_tree,
        crate::presentation::http::controllers::comments::hot_comments,
        crate::presentation::http::controllers::comments::comment_stats,
        crate::presentation::http::controllers::comments::create_comment,
        crate::presentation::http::controllers::comments::reply_comment,
        crate::presentation::http::controllers::comments::delete_comment,
        crate::presentation::http::controllers::comments::like_comment,
        crate::presentation::http::controllers::comments::unlike_comment,
        crate::presentation::http::controllers::comments::dislike_comment,
        crate::presentation::http::controllers::comments::undislike_comment,
        crate::presentation::http::controllers::comments::report_comment,
        crate::presentation::http::controllers::moderation::pin_comment,
        crate::presentation::http::controllers::moderation::unpin_comment,
        crate::presentation::http::controllers::moderation::feature_comment,
        crate::presentation::http::controllers::moderation::unfeature_comment,
        crate::presentation::http::controllers::moderation::author_reply,
        crate::presentation::http::controllers::moderation::list_reports,
        crate::presentation::http::controllers::moderation::handle_report,
        crate::presentation::http::controllers::moderation::batch_delete,
        crate::presentation::http::controllers::moderation::batch_fold,
        crate::presentation::http::controllers::moderation::list_sensitive_words,
        crate::presentation::http::controllers::moderation::add_sensitive_word,
        crate::presentation::http::controllers::moderation::delete_sensitive_word,
        crate::presentation::http::controllers::columns::list_columns,
        crate::presentation::http::controllers::columns::hot_columns,
        crate::presentation::http::controllers::columns::get_column,
        crate::presentation::http::controllers::columns::list_user_columns,
        crate::presentation::http::controllers::columns::list_column_articles,
        crate::presentation::http::controllers::columns::create_column,
        crate::presentation::http::controllers::columns::update_column,
        crate::presentation::http::controllers::columns::delete_column,
        crate::presentation::http::controllers::columns::subscribe_column,
        crate::presentation::http::controllers::columns::unsubscribe_column,
        crate::presentation::http::controllers::columns::list_subscribed_columns,
        crate::presentation::http::controllers::columns::add_column_article,
        crate::presentation::http::controllers::columns::remove_column_article,
        crate::presentation::http::controllers::columns::reposition_column_article,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            EmptyResponse,
            crate::presentation::http::controllers::articles::CreateArticleRequest,
            crate::presentation::http::controllers::articles::UpdateArticleRequest,
            crate::presentation::http::controllers::drafts::SaveDraftRequest,
            crate::presentation::http::controllers::drafts::UpdateDraftRequest,
            crate::presentation::http::controllers::categories::CreateCategoryRequest,
            crate::presentation::http::controllers::topics::CreateTopicRequest,
            crate::presentation::http::controllers::comments::CreateCommentRequest,
            crate::presentation::http::controllers::comments::ReplyCommentRequest,
            crate::presentation::http::controllers::comments::ReportCommentRequest,
            crate::presentation::http::controllers::moderation::AuthorReplyRequest,
            crate::presentation::http::controllers::moderation::HandleReportRequest,
            crate::presentation::http::controllers::moderation::BatchDeleteRequest,
            crate::presentation::http::controllers::moderation::BatchFoldRequest,
            crate::presentation::http::controllers::moderation::SensitiveWordRequest,
            crate::presentation::http::controllers::columns::CreateColumnRequest,
            crate::presentation::http::controllers::columns::UpdateColumnRequest,
            crate::presentation::http::controllers::columns::AddColumnArticleRequest,
            crate::presentation::http::controllers::columns::RepositionRequest,
            crate::application::dto::ArticleDto,
            crate::application::dto::ArticleRevisionDto,
            crate::application::dto::DraftDto,
            crate::application::dto::CategoryDto,
            crate::application::dto::CategoryTreeDto,
            crate::application::dto::TopicDto,
            crate::application::dto::CommentDto,
            crate::application::dto::CommentThreadDto,
            crate::application::dto::CommentStatsDto,
            crate::application::dto::ReportDto,
            crate::application::dto::SensitiveWordDto,
            crate::application::dto::BatchResultDto,
            crate::application::dto::ColumnDto,
            crate::application::dto::ColumnArticleDto,
            crate::application::dto::ColumnEntryDto
        )
    ),
    tags(
        (name = "Articles", description = "Published articles and their history"),
        (name = "Drafts", description = "Private work in progress"),
        (name = "Categories", description = "Category tree"),
        (name = "Topics", description = "Topics and follows"),
        (name = "Comments", description = "Threaded comments and reactions"),
        (name = "Moderation", description = "Comment moderation and reports"),
        (name = "Columns", description = "Curated article collections"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    info(
        title = "Inkwell API",
        description = "Content platform backend",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        let mut http = Http::new(HttpAuthScheme::Bearer);
        http.bearer_format = Some("Biscuit".into());
        components.add_security_scheme("bearerAuth", SecurityScheme::Http(http));
    }
}

pub fn docs_router() -> Router {
    let openapi = ApiDoc::openapi();
    let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi.clone());
    let redoc = Redoc::with_url("/redoc", openapi);
    Router::new()
        .merge(swagger)
        .merge(redoc)
        .route("/", get(|| async { Redirect::permanent("/docs") }))
}

pub fn write_openapi_snapshot() -> std::io::Result<()> {
    let spec = ApiDoc::openapi();
    let output_path =
        env::var("OPENAPI_SNAPSHOT_PATH").unwrap_or_else(|_| "spec/openapi.json".to_string());
    let path = Path::new(&output_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &spec)?;
    Ok(())
}
