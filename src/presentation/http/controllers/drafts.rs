// src/presentation/http/controllers/drafts.rs
use crate::application::{
    dto::{ArticleDto, DraftDto, PageResult},
    services::{SaveDraftCommand, UpdateDraftCommand},
};
use crate::presentation::http::controllers::{ARTICLE_PAGE_SIZE, double_option};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{
    ApiPath, ApiQuery, Authenticated, PageParams, ResourceId, ValidatedJson,
};
use crate::presentation::http::openapi::EmptyResponse;
use crate::presentation::http::response::ApiResponse;
use crate::presentation::http::state::HttpState;
use axum::Extension;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Drafts may be incomplete; blank title and body are accepted until publishing.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SaveDraftRequest {
    #[serde(default)]
    #[validate(length(max = 200))]
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    #[validate(range(min = 1))]
    pub category_id: Option<i64>,
    #[serde(default)]
    #[validate(length(max = 5))]
    pub topic_ids: Vec<i64>,
    /// Set when the draft edits an existing article.
    #[serde(default)]
    #[validate(range(min = 1))]
    pub article_id: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateDraftRequest {
    #[serde(default)]
    #[validate(length(max = 200))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub summary: Option<Option<String>>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>)]
    pub category_id: Option<Option<i64>>,
    #[serde(default)]
    #[validate(length(max = 5))]
    pub topic_ids: Option<Vec<i64>>,
}

#[utoipa::path(
    post,
    path = "/api/v3/drafts",
    request_body = SaveDraftRequest,
    responses((status = 200, description = "Saved draft.", body = ApiResponse<DraftDto>)),
    security(("bearerAuth" = [])),
    tag = "Drafts"
)]
pub async fn save_draft(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ValidatedJson(payload): ValidatedJson<SaveDraftRequest>,
) -> HttpResult<ApiResponse<DraftDto>> {
    let command = SaveDraftCommand {
        title: payload.title,
        summary: payload.summary,
        body: payload.body,
        category_id: payload.category_id,
        topic_ids: payload.topic_ids,
        article_id: payload.article_id,
    };

    state
        .services
        .drafts
        .save_draft(&user, command)
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    get,
    path = "/api/v3/drafts",
    params(PageParams),
    responses((status = 200, description = "The caller's drafts, most recently edited first.", body = ApiResponse<PageResult<DraftDto>>)),
    security(("bearerAuth" = [])),
    tag = "Drafts"
)]
pub async fn list_drafts(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiQuery(params): ApiQuery<PageParams>,
) -> HttpResult<ApiResponse<PageResult<DraftDto>>> {
    state
        .services
        .drafts
        .list_drafts(&user, params.page_request(ARTICLE_PAGE_SIZE))
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    get,
    path = "/api/v3/drafts/{id}",
    params(("id" = i64, Path, description = "Draft id")),
    responses((status = 200, description = "Draft detail.", body = ApiResponse<DraftDto>)),
    security(("bearerAuth" = [])),
    tag = "Drafts"
)]
pub async fn get_draft(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiPath(id): ApiPath<ResourceId>,
) -> HttpResult<ApiResponse<DraftDto>> {
    state
        .services
        .drafts
        .get_draft(&user, id.get())
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    put,
    path = "/api/v3/drafts/{id}",
    params(("id" = i64, Path, description = "Draft id")),
    request_body = UpdateDraftRequest,
    responses((status = 200, description = "Updated draft.", body = ApiResponse<DraftDto>)),
    security(("bearerAuth" = [])),
    tag = "Drafts"
)]
pub async fn update_draft(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiPath(id): ApiPath<ResourceId>,
    ValidatedJson(payload): ValidatedJson<UpdateDraftRequest>,
) -> HttpResult<ApiResponse<DraftDto>> {
    let command = UpdateDraftCommand {
        title: payload.title,
        summary: payload.summary,
        body: payload.body,
        category_id: payload.category_id,
        topic_ids: payload.topic_ids,
    };

    state
        .services
        .drafts
        .update_draft(&user, id.get(), command)
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    post,
    path = "/api/v3/drafts/{id}/publish",
    params(("id" = i64, Path, description = "Draft id")),
    responses((status = 200, description = "Published article; the draft is gone.", body = ApiResponse<ArticleDto>)),
    security(("bearerAuth" = [])),
    tag = "Drafts"
)]
pub async fn publish_draft(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiPath(id): ApiPath<ResourceId>,
) -> HttpResult<ApiResponse<ArticleDto>> {
    state
        .services
        .drafts
        .publish_draft(&user, id.get())
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    delete,
    path = "/api/v3/drafts/{id}",
    params(("id" = i64, Path, description = "Draft id")),
    responses((status = 200, description = "Draft removed.", body = EmptyResponse)),
    security(("bearerAuth" = [])),
    tag = "Drafts"
)]
pub async fn delete_draft(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiPath(id): ApiPath<ResourceId>,
) -> HttpResult<ApiResponse<()>> {
    state
        .services
        .drafts
        .delete_draft(&user, id.get())
        .await
        .into_http()?;

    Ok(ApiResponse::empty())
}
