// src/presentation/http/controllers/moderation.rs
use crate::application::{
    dto::{BatchResultDto, CommentDto, PageResult, ReportDto, SensitiveWordDto},
    services::HandleReportCommand,
};
use crate::presentation::http::controllers::{COMMENT_PAGE_SIZE, not_blank};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{
    ApiPath, ApiQuery, Authenticated, PageParams, ResourceId, ValidatedJson,
};
use crate::presentation::http::openapi::EmptyResponse;
use crate::presentation::http::response::ApiResponse;
use crate::presentation::http::state::HttpState;
use axum::Extension;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AuthorReplyRequest {
    #[validate(custom(function = "not_blank"), length(max = 2000))]
    pub content: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportListParams {
    /// `pending`, `handled` or `rejected`; all reports when absent.
    pub status: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct HandleReportRequest {
    /// `handled` or `rejected`.
    #[validate(custom(function = "not_blank"))]
    pub status: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub note: Option<String>,
    /// Only honoured together with `handled`.
    #[serde(default)]
    pub delete_comment: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BatchDeleteRequest {
    #[validate(length(min = 1, max = 100))]
    pub ids: Vec<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BatchFoldRequest {
    #[validate(length(min = 1, max = 100))]
    pub ids: Vec<i64>,
    #[serde(default = "default_folded")]
    pub folded: bool,
}

fn default_folded() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SensitiveWordRequest {
    #[validate(custom(function = "not_blank"), length(max = 50))]
    pub word: String,
}

async fn toggle_pin(
    state: HttpState,
    user: crate::application::dto::AuthenticatedUser,
    id: ResourceId,
    pinned: bool,
) -> HttpResult<ApiResponse<CommentDto>> {
    state
        .services
        .moderation
        .set_pinned(&user, id.get(), pinned)
        .await
        .into_http()
        .map(ApiResponse::success)
}

async fn toggle_feature(
    state: HttpState,
    user: crate::application::dto::AuthenticatedUser,
    id: ResourceId,
    featured: bool,
) -> HttpResult<ApiResponse<CommentDto>> {
    state
        .services
        .moderation
        .set_featured(&user, id.get(), featured)
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    post,
    path = "/api/v3/comments/{id}/pin",
    params(("id" = i64, Path, description = "Root comment id")),
    responses((status = 200, description = "Pinned comment.", body = ApiResponse<CommentDto>)),
    security(("bearerAuth" = [])),
    tag = "Moderation"
)]
pub async fn pin_comment(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiPath(id): ApiPath<ResourceId>,
) -> HttpResult<ApiResponse<CommentDto>> {
    toggle_pin(state, user, id, true).await
}

#[utoipa::path(
    delete,
    path = "/api/v3/comments/{id}/pin",
    params(("id" = i64, Path, description = "Root comment id")),
    responses((status = 200, description = "Unpinned comment.", body = ApiResponse<CommentDto>)),
    security(("bearerAuth" = [])),
    tag = "Moderation"
)]
pub async fn unpin_comment(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiPath(id): ApiPath<ResourceId>,
) -> HttpResult<ApiResponse<CommentDto>> {
    toggle_pin(state, user, id, false).await
}

#[utoipa::path(
    post,
    path = "/api/v3/comments/{id}/feature",
    params(("id" = i64, Path, description = "Comment id")),
    responses((status = 200, description = "Featured comment.", body = ApiResponse<CommentDto>)),
    security(("bearerAuth" = [])),
    tag = "Moderation"
)]
pub async fn feature_comment(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiPath(id): ApiPath<ResourceId>,
) -> HttpResult<ApiResponse<CommentDto>> {
    toggle_feature(state, user, id, true).await
}

#[utoipa::path(
    delete,
    path = "/api/v3/comments/{id}/feature",
    params(("id" = i64, Path, description = "Comment id")),
    responses((status = 200, description = "Comment no longer featured.", body = ApiResponse<CommentDto>)),
    security(("bearerAuth" = [])),
    tag = "Moderation"
)]
pub async fn unfeature_comment(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiPath(id): ApiPath<ResourceId>,
) -> HttpResult<ApiResponse<CommentDto>> {
    toggle_feature(state, user, id, false).await
}

#[utoipa::path(
    post,
    path = "/api/v3/comments/{id}/author-reply",
    params(("id" = i64, Path, description = "Comment being answered")),
    request_body = AuthorReplyRequest,
    responses((status = 200, description = "Reply flagged as the author's.", body = ApiResponse<CommentDto>)),
    security(("bearerAuth" = [])),
    tag = "Moderation"
)]
pub async fn author_reply(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiPath(id): ApiPath<ResourceId>,
    ValidatedJson(payload): ValidatedJson<AuthorReplyRequest>,
) -> HttpResult<ApiResponse<CommentDto>> {
    state
        .services
        .moderation
        .author_reply(&user, id.get(), payload.content)
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    get,
    path = "/api/v3/comments/reports",
    params(ReportListParams),
    responses((status = 200, description = "Reports, newest first.", body = ApiResponse<PageResult<ReportDto>>)),
    security(("bearerAuth" = [])),
    tag = "Moderation"
)]
pub async fn list_reports(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiQuery(params): ApiQuery<ReportListParams>,
) -> HttpResult<ApiResponse<PageResult<ReportDto>>> {
    let page = PageParams {
        page: params.page,
        page_size: params.page_size,
    }
    .page_request(COMMENT_PAGE_SIZE);

    state
        .services
        .moderation
        .list_reports(&user, params.status, page)
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    put,
    path = "/api/v3/comments/reports/{id}",
    params(("id" = i64, Path, description = "Report id")),
    request_body = HandleReportRequest,
    responses((status = 200, description = "Resolved report.", body = ApiResponse<ReportDto>)),
    security(("bearerAuth" = [])),
    tag = "Moderation"
)]
pub async fn handle_report(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiPath(id): ApiPath<ResourceId>,
    ValidatedJson(payload): ValidatedJson<HandleReportRequest>,
) -> HttpResult<ApiResponse<ReportDto>> {
    let command = HandleReportCommand {
        status: payload.status,
        note: payload.note,
        delete_comment: payload.delete_comment,
    };

    state
        .services
        .moderation
        .handle_report(&user, id.get(), command)
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    post,
    path = "/api/v3/comments/batch/delete",
    request_body = BatchDeleteRequest,
    responses((status = 200, description = "How many comments went, replies included.", body = ApiResponse<BatchResultDto>)),
    security(("bearerAuth" = [])),
    tag = "Moderation"
)]
pub async fn batch_delete(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ValidatedJson(payload): ValidatedJson<BatchDeleteRequest>,
) -> HttpResult<ApiResponse<BatchResultDto>> {
    state
        .services
        .moderation
        .batch_delete(&user, payload.ids)
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    post,
    path = "/api/v3/comments/batch/fold",
    request_body = BatchFoldRequest,
    responses((status = 200, description = "How many comments changed.", body = ApiResponse<BatchResultDto>)),
    security(("bearerAuth" = [])),
    tag = "Moderation"
)]
pub async fn batch_fold(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ValidatedJson(payload): ValidatedJson<BatchFoldRequest>,
) -> HttpResult<ApiResponse<BatchResultDto>> {
    state
        .services
        .moderation
        .batch_fold(&user, payload.ids, payload.folded)
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    get,
    path = "/api/v3/comments/sensitive-words",
    responses((status = 200, description = "Masked words.", body = ApiResponse<Vec<SensitiveWordDto>>)),
    security(("bearerAuth" = [])),
    tag = "Moderation"
)]
pub async fn list_sensitive_words(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<ApiResponse<Vec<SensitiveWordDto>>> {
    state
        .services
        .moderation
        .list_sensitive_words(&user)
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    post,
    path = "/api/v3/comments/sensitive-words",
    request_body = SensitiveWordRequest,
    responses((status = 200, description = "Added word.", body = ApiResponse<SensitiveWordDto>)),
    security(("bearerAuth" = [])),
    tag = "Moderation"
)]
pub async fn add_sensitive_word(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ValidatedJson(payload): ValidatedJson<SensitiveWordRequest>,
) -> HttpResult<ApiResponse<SensitiveWordDto>> {
    state
        .services
        .moderation
        .add_sensitive_word(&user, payload.word)
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    delete,
    path = "/api/v3/comments/sensitive-words/{id}",
    params(("id" = i64, Path, description = "Word id")),
    responses((status = 200, description = "Word removed.", body = EmptyResponse)),
    security(("bearerAuth" = [])),
    tag = "Moderation"
)]
pub async fn delete_sensitive_word(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiPath(id): ApiPath<ResourceId>,
) -> HttpResult<ApiResponse<()>> {
    state
        .services
        .moderation
        .delete_sensitive_word(&user, id.get())
        .await
        .into_http()?;

    Ok(ApiResponse::empty())
}
