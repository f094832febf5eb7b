// src/presentation/http/controllers/columns.rs
use crate::application::{
    dto::{ColumnArticleDto, ColumnDto, ColumnEntryDto, PageResult},
    services::{AddColumnArticleCommand, CreateColumnCommand, UpdateColumnCommand},
};
use crate::presentation::http::controllers::{
    ARTICLE_PAGE_SIZE, DEFAULT_LIMIT, double_option, not_blank,
};
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
pub struct CreateColumnRequest {
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub cover_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateColumnRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub cover_url: Option<Option<String>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddColumnArticleRequest {
    #[validate(range(min = 1))]
    pub article_id: i64,
    /// Appended after the current last entry when absent.
    #[serde(default)]
    pub sort: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RepositionRequest {
    pub sort: i32,
}

#[utoipa::path(
    get,
    path = "/api/v3/columns",
    params(PageParams),
    responses((status = 200, description = "Newest columns first.", body = ApiResponse<PageResult<ColumnDto>>)),
    tag = "Columns"
)]
pub async fn list_columns(
    Extension(state): Extension<HttpState>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> HttpResult<ApiResponse<PageResult<ColumnDto>>> {
    state
        .services
        .columns
        .list_columns(params.page_request(ARTICLE_PAGE_SIZE))
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    get,
    path = "/api/v3/columns/hot",
    params(LimitParams),
    responses((status = 200, description = "Most subscribed columns first.", body = ApiResponse<Vec<ColumnDto>>)),
    tag = "Columns"
)]
pub async fn hot_columns(
    Extension(state): Extension<HttpState>,
    ApiQuery(params): ApiQuery<LimitParams>,
) -> HttpResult<ApiResponse<Vec<ColumnDto>>> {
    state
        .services
        .columns
        .hot_columns(params.limit(DEFAULT_LIMIT))
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    get,
    path = "/api/v3/columns/{id}",
    params(("id" = i64, Path, description = "Column id")),
    responses((status = 200, description = "Column detail.", body = ApiResponse<ColumnDto>)),
    tag = "Columns"
)]
pub async fn get_column(
    Extension(state): Extension<HttpState>,
    ApiPath(id): ApiPath<ResourceId>,
) -> HttpResult<ApiResponse<ColumnDto>> {
    state
        .services
        .columns
        .get_column(id.get())
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    get,
    path = "/api/v3/columns/user/{user_id}",
    params(("user_id" = String, Path, description = "Owner id"), PageParams),
    responses((status = 200, description = "Columns owned by the user.", body = ApiResponse<PageResult<ColumnDto>>)),
    tag = "Columns"
)]
pub async fn list_user_columns(
    Extension(state): Extension<HttpState>,
    ApiPath(user_id): ApiPath<String>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> HttpResult<ApiResponse<PageResult<ColumnDto>>> {
    state
        .services
        .columns
        .list_user_columns(&user_id, params.page_request(ARTICLE_PAGE_SIZE))
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    get,
    path = "/api/v3/columns/{id}/articles",
    params(("id" = i64, Path, description = "Column id"), PageParams),
    responses((status = 200, description = "Member articles by sort key.", body = ApiResponse<PageResult<ColumnArticleDto>>)),
    tag = "Columns"
)]
pub async fn list_column_articles(
    Extension(state): Extension<HttpState>,
    ApiPath(id): ApiPath<ResourceId>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> HttpResult<ApiResponse<PageResult<ColumnArticleDto>>> {
    state
        .services
        .columns
        .list_column_articles(id.get(), params.page_request(ARTICLE_PAGE_SIZE))
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    post,
    path = "/api/v3/columns",
    request_body = CreateColumnRequest,
    responses((status = 200, description = "Created column.", body = ApiResponse<ColumnDto>)),
    security(("bearerAuth" = [])),
    tag = "Columns"
)]
pub async fn create_column(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ValidatedJson(payload): ValidatedJson<CreateColumnRequest>,
) -> HttpResult<ApiResponse<ColumnDto>> {
    let command = CreateColumnCommand {
        name: payload.name,
        description: payload.description,
        cover_url: payload.cover_url,
    };

    state
        .services
        .columns
        .create_column(&user, command)
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    put,
    path = "/api/v3/columns/{id}",
    params(("id" = i64, Path, description = "Column id")),
    request_body = UpdateColumnRequest,
    responses((status = 200, description = "Updated column.", body = ApiResponse<ColumnDto>)),
    security(("bearerAuth" = [])),
    tag = "Columns"
)]
pub async fn update_column(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiPath(id): ApiPath<ResourceId>,
    ValidatedJson(payload): ValidatedJson<UpdateColumnRequest>,
) -> HttpResult<ApiResponse<ColumnDto>> {
    let command = UpdateColumnCommand {
        name: payload.name,
        description: payload.description,
        cover_url: payload.cover_url,
    };

    state
        .services
        .columns
        .update_column(&user, id.get(), command)
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    delete,
    path = "/api/v3/columns/{id}",
    params(("id" = i64, Path, description = "Column id")),
    responses((status = 200, description = "Column removed.", body = EmptyResponse)),
    security(("bearerAuth" = [])),
    tag = "Columns"
)]
pub async fn delete_column(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiPath(id): ApiPath<ResourceId>,
) -> HttpResult<ApiResponse<()>> {
    state
        .services
        .columns
        .delete_column(&user, id.get())
        .await
        .into_http()?;

    Ok(ApiResponse::empty())
}

#[utoipa::path(
    post,
    path = "/api/v3/columns/{id}/subscribe",
    params(("id" = i64, Path, description = "Column id")),
    responses((status = 200, description = "Subscribed; repeating is a no-op.", body = EmptyResponse)),
    security(("bearerAuth" = [])),
    tag = "Columns"
)]
pub async fn subscribe_column(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiPath(id): ApiPath<ResourceId>,
) -> HttpResult<ApiResponse<()>> {
    state
        .services
        .columns
        .subscribe(&user, id.get())
        .await
        .into_http()?;

    Ok(ApiResponse::empty())
}

#[utoipa::path(
    delete,
    path = "/api/v3/columns/{id}/subscribe",
    params(("id" = i64, Path, description = "Column id")),
    responses((status = 200, description = "Unsubscribed.", body = EmptyResponse)),
    security(("bearerAuth" = [])),
    tag = "Columns"
)]
pub async fn unsubscribe_column(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiPath(id): ApiPath<ResourceId>,
) -> HttpResult<ApiResponse<()>> {
    state
        .services
        .columns
        .unsubscribe(&user, id.get())
        .await
        .into_http()?;

    Ok(ApiResponse::empty())
}

#[utoipa::path(
    get,
    path = "/api/v3/columns/subscribed",
    params(PageParams),
    responses((status = 200, description = "Columns the caller subscribes to.", body = ApiResponse<PageResult<ColumnDto>>)),
    security(("bearerAuth" = [])),
    tag = "Columns"
)]
pub async fn list_subscribed_columns(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiQuery(params): ApiQuery<PageParams>,
) -> HttpResult<ApiResponse<PageResult<ColumnDto>>> {
    state
        .services
        .columns
        .list_subscribed(&user, params.page_request(ARTICLE_PAGE_SIZE))
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    post,
    path = "/api/v3/columns/{id}/articles",
    params(("id" = i64, Path, description = "Column id")),
    request_body = AddColumnArticleRequest,
    responses((status = 200, description = "New column entry.", body = ApiResponse<ColumnEntryDto>)),
    security(("bearerAuth" = [])),
    tag = "Columns"
)]
pub async fn add_column_article(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiPath(id): ApiPath<ResourceId>,
    ValidatedJson(payload): ValidatedJson<AddColumnArticleRequest>,
) -> HttpResult<ApiResponse<ColumnEntryDto>> {
    let command = AddColumnArticleCommand {
        article_id: payload.article_id,
        sort: payload.sort,
    };

    state
        .services
        .columns
        .add_article(&user, id.get(), command)
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    delete,
    path = "/api/v3/columns/{id}/articles/{article_id}",
    params(
        ("id" = i64, Path, description = "Column id"),
        ("article_id" = i64, Path, description = "Article id")
    ),
    responses((status = 200, description = "Article taken out of the column.", body = EmptyResponse)),
    security(("bearerAuth" = [])),
    tag = "Columns"
)]
pub async fn remove_column_article(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiPath((id, article_id)): ApiPath<(ResourceId, ResourceId)>,
) -> HttpResult<ApiResponse<()>> {
    state
        .services
        .columns
        .remove_article(&user, id.get(), article_id.get())
        .await
        .into_http()?;

    Ok(ApiResponse::empty())
}

#[utoipa::path(
    put,
    path = "/api/v3/columns/{id}/articles/{article_id}/sort",
    params(
        ("id" = i64, Path, description = "Column id"),
        ("article_id" = i64, Path, description = "Article id")
    ),
    request_body = RepositionRequest,
    responses((status = 200, description = "Entry with its new sort key.", body = ApiResponse<ColumnEntryDto>)),
    security(("bearerAuth" = [])),
    tag = "Columns"
)]
pub async fn reposition_column_article(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiPath((id, article_id)): ApiPath<(ResourceId, ResourceId)>,
    ValidatedJson(payload): ValidatedJson<RepositionRequest>,
) -> HttpResult<ApiResponse<ColumnEntryDto>> {
    state
        .services
        .columns
        .reposition_article(&user, id.get(), article_id.get(), payload.sort)
        .await
        .into_http()
        .map(ApiResponse::success)
}
