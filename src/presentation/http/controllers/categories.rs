// src/presentation/http/controllers/categories.rs
use crate::application::{
    dto::{ArticleDto, CategoryDto, CategoryTreeDto, PageResult},
    services::CreateCategoryCommand,
};
use crate::presentation::http::controllers::{ARTICLE_PAGE_SIZE, not_blank};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{
    ApiPath, ApiQuery, Authenticated, PageParams, ResourceId, ValidatedJson,
};
use crate::presentation::http::response::ApiResponse;
use crate::presentation::http::state::HttpState;
use axum::Extension;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryRequest {
    #[validate(custom(function = "not_blank"), length(max = 50))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(range(min = 1))]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

#[utoipa::path(
    get,
    path = "/api/v3/categories/tree",
    responses((status = 200, description = "Every category nested under its parent.", body = ApiResponse<Vec<CategoryTreeDto>>)),
    tag = "Categories"
)]
pub async fn category_tree(
    Extension(state): Extension<HttpState>,
) -> HttpResult<ApiResponse<Vec<CategoryTreeDto>>> {
    state
        .services
        .categories
        .category_tree()
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    get,
    path = "/api/v3/categories/{id}/articles",
    params(("id" = i64, Path, description = "Category id"), PageParams),
    responses((status = 200, description = "Articles filed directly under the category.", body = ApiResponse<PageResult<ArticleDto>>)),
    tag = "Categories"
)]
pub async fn list_category_articles(
    Extension(state): Extension<HttpState>,
    ApiPath(id): ApiPath<ResourceId>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> HttpResult<ApiResponse<PageResult<ArticleDto>>> {
    state
        .services
        .categories
        .list_category_articles(id.get(), params.page_request(ARTICLE_PAGE_SIZE))
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    post,
    path = "/api/v3/categories",
    request_body = CreateCategoryRequest,
    responses((status = 200, description = "Created category.", body = ApiResponse<CategoryDto>)),
    security(("bearerAuth" = [])),
    tag = "Categories"
)]
pub async fn create_category(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ValidatedJson(payload): ValidatedJson<CreateCategoryRequest>,
) -> HttpResult<ApiResponse<CategoryDto>> {
    let command = CreateCategoryCommand {
        name: payload.name,
        description: payload.description,
        parent_id: payload.parent_id,
        sort_order: payload.sort_order,
    };

    state
        .services
        .categories
        .create_category(&user, command)
        .await
        .into_http()
        .map(ApiResponse::success)
}
