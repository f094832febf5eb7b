// src/presentation/http/controllers/comments.rs
use crate::application::{
    dto::{CommentDto, CommentStatsDto, CommentThreadDto, PageResult, ReportDto},
    services::{CreateCommentCommand, ReplyCommentCommand},
};
use crate::domain::comment::ReactionKind;
use crate::presentation::http::controllers::{COMMENT_PAGE_SIZE, DEFAULT_LIMIT, not_blank};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{
    ApiPath, ApiQuery, Authenticated, LimitParams, PageParams, ResourceId, ValidatedJson,
};
use crate::presentation::http::openapi::EmptyResponse;
use crate::presentation::http::response::ApiResponse;
use crate::presentation::http::state::HttpState;
use axum::Extension;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCommentRequest {
    #[validate(range(min = 1))]
    pub article_id: i64,
    #[validate(custom(function = "not_blank"), length(max = 2000))]
    pub content: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReplyCommentRequest {
    #[validate(custom(function = "not_blank"), length(max = 2000))]
    pub content: String,
    /// Defaults to the author of the comment being replied to.
    #[serde(default)]
    pub reply_to_user_id: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReportCommentRequest {
    #[validate(custom(function = "not_blank"), length(max = 500))]
    pub reason: String,
}

#[utoipa::path(
    get,
    path = "/api/v3/comments/{id}",
    params(("id" = i64, Path, description = "Comment id")),
    responses((status = 200, description = "Comment detail.", body = ApiResponse<CommentDto>)),
    tag = "Comments"
)]
pub async fn get_comment(
    Extension(state): Extension<HttpState>,
    ApiPath(id): ApiPath<ResourceId>,
) -> HttpResult<ApiResponse<CommentDto>> {
    state
        .services
        .comments
        .get_comment(id.get())
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    get,
    path = "/api/v3/comments/article/{article_id}",
    params(("article_id" = i64, Path, description = "Article id"), PageParams),
    responses((status = 200, description = "Root comments, pinned first, then newest.", body = ApiResponse<PageResult<CommentDto>>)),
    tag = "Comments"
)]
pub async fn list_article_comments(
    Extension(state): Extension<HttpState>,
    ApiPath(article_id): ApiPath<ResourceId>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> HttpResult<ApiResponse<PageResult<CommentDto>>> {
    state
        .services
        .comments
        .list_root_comments(article_id.get(), params.page_request(COMMENT_PAGE_SIZE))
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    get,
    path = "/api/v3/comments/{id}/replies",
    params(("id" = i64, Path, description = "Comment id"), PageParams),
    responses((status = 200, description = "Replies, oldest first.", body = ApiResponse<PageResult<CommentDto>>)),
    tag = "Comments"
)]
pub async fn list_replies(
    Extension(state): Extension<HttpState>,
    ApiPath(id): ApiPath<ResourceId>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> HttpResult<ApiResponse<PageResult<CommentDto>>> {
    state
        .services
        .comments
        .list_replies(id.get(), params.page_request(COMMENT_PAGE_SIZE))
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    get,
    path = "/api/v3/comments/article/{article_id}/tree",
    params(("article_id" = i64, Path, description = "Article id"), PageParams),
    responses((status = 200, description = "Paged roots, each with its replies.", body = ApiResponse<PageResult<CommentThreadDto>>)),
    tag = "Comments"
)]
pub async fn comment_tree(
    Extension(state): Extension<HttpState>,
    ApiPath(article_id): ApiPath<ResourceId>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> HttpResult<ApiResponse<PageResult<CommentThreadDto>>> {
    state
        .services
        .comments
        .comment_tree(article_id.get(), params.page_request(COMMENT_PAGE_SIZE))
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    get,
    path = "/api/v3/comments/article/{article_id}/hot",
    params(("article_id" = i64, Path, description = "Article id"), LimitParams),
    responses((status = 200, description = "Hottest comments first.", body = ApiResponse<Vec<CommentDto>>)),
    tag = "Comments"
)]
pub async fn hot_comments(
    Extension(state): Extension<HttpState>,
    ApiPath(article_id): ApiPath<ResourceId>,
    ApiQuery(params): ApiQuery<LimitParams>,
) -> HttpResult<ApiResponse<Vec<CommentDto>>> {
    state
        .services
        .comments
        .hot_comments(article_id.get(), params.limit(DEFAULT_LIMIT))
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    get,
    path = "/api/v3/comments/article/{article_id}/stats",
    params(("article_id" = i64, Path, description = "Article id")),
    responses((status = 200, description = "Comment counts for the article.", body = ApiResponse<CommentStatsDto>)),
    tag = "Comments"
)]
pub async fn comment_stats(
    Extension(state): Extension<HttpState>,
    ApiPath(article_id): ApiPath<ResourceId>,
) -> HttpResult<ApiResponse<CommentStatsDto>> {
    state
        .services
        .comments
        .comment_stats(article_id.get())
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    post,
    path = "/api/v3/comments",
    request_body = CreateCommentRequest,
    responses((status = 200, description = "Created root comment.", body = ApiResponse<CommentDto>)),
    security(("bearerAuth" = [])),
    tag = "Comments"
)]
pub async fn create_comment(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ValidatedJson(payload): ValidatedJson<CreateCommentRequest>,
) -> HttpResult<ApiResponse<CommentDto>> {
    let command = CreateCommentCommand {
        article_id: payload.article_id,
        content: payload.content,
    };

    state
        .services
        .comments
        .create_comment(&user, command)
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    post,
    path = "/api/v3/comments/{id}/replies",
    params(("id" = i64, Path, description = "Comment being replied to")),
    request_body = ReplyCommentRequest,
    responses((status = 200, description = "Created reply.", body = ApiResponse<CommentDto>)),
    security(("bearerAuth" = [])),
    tag = "Comments"
)]
pub async fn reply_comment(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiPath(id): ApiPath<ResourceId>,
    ValidatedJson(payload): ValidatedJson<ReplyCommentRequest>,
) -> HttpResult<ApiResponse<CommentDto>> {
    let command = ReplyCommentCommand {
        content: payload.content,
        reply_to_user_id: payload.reply_to_user_id,
    };

    state
        .services
        .comments
        .reply_comment(&user, id.get(), command)
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    delete,
    path = "/api/v3/comments/{id}",
    params(("id" = i64, Path, description = "Comment id")),
    responses((status = 200, description = "Comment and its replies removed.", body = EmptyResponse)),
    security(("bearerAuth" = [])),
    tag = "Comments"
)]
pub async fn delete_comment(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiPath(id): ApiPath<ResourceId>,
) -> HttpResult<ApiResponse<()>> {
    state
        .services
        .comments
        .delete_comment(&user, id.get())
        .await
        .into_http()?;

    Ok(ApiResponse::empty())
}

async fn react(
    state: &HttpState,
    user: &crate::application::dto::AuthenticatedUser,
    id: ResourceId,
    kind: ReactionKind,
    add: bool,
) -> HttpResult<ApiResponse<()>> {
    let comments = &state.services.comments;
    if add {
        comments.add_reaction(user, id.get(), kind).await.into_http()?;
    } else {
        comments.remove_reaction(user, id.get(), kind).await.into_http()?;
    }
    Ok(ApiResponse::empty())
}

#[utoipa::path(
    post,
    path = "/api/v3/comments/{id}/like",
    params(("id" = i64, Path, description = "Comment id")),
    responses((status = 200, description = "Liked; repeating is a no-op.", body = EmptyResponse)),
    security(("bearerAuth" = [])),
    tag = "Comments"
)]
pub async fn like_comment(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiPath(id): ApiPath<ResourceId>,
) -> HttpResult<ApiResponse<()>> {
    react(&state, &user, id, ReactionKind::Like, true).await
}

#[utoipa::path(
    delete,
    path = "/api/v3/comments/{id}/like",
    params(("id" = i64, Path, description = "Comment id")),
    responses((status = 200, description = "Like withdrawn.", body = EmptyResponse)),
    security(("bearerAuth" = [])),
    tag = "Comments"
)]
pub async fn unlike_comment(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiPath(id): ApiPath<ResourceId>,
) -> HttpResult<ApiResponse<()>> {
    react(&state, &user, id, ReactionKind::Like, false).await
}

#[utoipa::path(
    post,
    path = "/api/v3/comments/{id}/dislike",
    params(("id" = i64, Path, description = "Comment id")),
    responses((status = 200, description = "Disliked; repeating is a no-op.", body = EmptyResponse)),
    security(("bearerAuth" = [])),
    tag = "Comments"
)]
pub async fn dislike_comment(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiPath(id): ApiPath<ResourceId>,
) -> HttpResult<ApiResponse<()>> {
    react(&state, &user, id, ReactionKind::Dislike, true).await
}

#[utoipa::path(
    delete,
    path = "/api/v3/comments/{id}/dislike",
    params(("id" = i64, Path, description = "Comment id")),
    responses((status = 200, description = "Dislike withdrawn.", body = EmptyResponse)),
    security(("bearerAuth" = [])),
    tag = "Comments"
)]
pub async fn undislike_comment(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiPath(id): ApiPath<ResourceId>,
) -> HttpResult<ApiResponse<()>> {
    react(&state, &user, id, ReactionKind::Dislike, false).await
}

#[utoipa::path(
    post,
    path = "/api/v3/comments/{id}/report",
    params(("id" = i64, Path, description = "Comment id")),
    request_body = ReportCommentRequest,
    responses((status = 200, description = "Pending report.", body = ApiResponse<ReportDto>)),
    security(("bearerAuth" = [])),
    tag = "Comments"
)]
pub async fn report_comment(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiPath(id): ApiPath<ResourceId>,
    ValidatedJson(payload): ValidatedJson<ReportCommentRequest>,
) -> HttpResult<ApiResponse<ReportDto>> {
    state
        .services
        .comments
        .report_comment(&user, id.get(), payload.reason)
        .await
        .into_http()
        .map(ApiResponse::success)
}
