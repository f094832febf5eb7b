// src/presentation/http/controllers/articles.rs
use crate::application::{
    dto::{ArticleDto, ArticleRevisionDto, PageResult},
    error::ApplicationError,
    services::{CreateArticleCommand, UpdateArticleCommand},
};
use crate::domain::{article::ArticleFilter, category::CategoryId, topic::TopicId, user::UserId};
use crate::presentation::http::controllers::{ARTICLE_PAGE_SIZE, double_option, not_blank};
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

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ArticleListParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub category_id: Option<i64>,
    pub topic_id: Option<i64>,
    pub author_id: Option<String>,
}

impl ArticleListParams {
    fn filter(&self) -> Result<ArticleFilter, ApplicationError> {
        Ok(ArticleFilter {
            category_id: self.category_id.map(CategoryId::new).transpose()?,
            topic_id: self.topic_id.map(TopicId::new).transpose()?,
            author_id: self.author_id.clone().map(UserId::new).transpose()?,
        })
    }

    fn paging(&self) -> PageParams {
        PageParams {
            page: self.page.clone(),
            page_size: self.page_size.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateArticleRequest {
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub body: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    #[validate(range(min = 1))]
    pub category_id: Option<i64>,
    #[serde(default)]
    #[validate(length(max = 5))]
    pub topic_ids: Vec<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateArticleRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub title: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub body: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub summary: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>)]
    pub category_id: Option<Option<i64>>,
    #[serde(default)]
    #[validate(length(max = 5))]
    pub topic_ids: Option<Vec<i64>>,
}

#[utoipa::path(
    get,
    path = "/api/v3/articles",
    params(ArticleListParams),
    responses((status = 200, description = "Newest articles first.", body = ApiResponse<PageResult<ArticleDto>>)),
    tag = "Articles"
)]
pub async fn list_articles(
    Extension(state): Extension<HttpState>,
    ApiQuery(params): ApiQuery<ArticleListParams>,
) -> HttpResult<ApiResponse<PageResult<ArticleDto>>> {
    let filter = params.filter().into_http()?;
    let page = params.paging().page_request(ARTICLE_PAGE_SIZE);

    state
        .services
        .articles
        .list_articles(filter, page)
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    get,
    path = "/api/v3/articles/{id}",
    params(("id" = i64, Path, description = "Article id")),
    responses((status = 200, description = "Article detail; counts as a view.", body = ApiResponse<ArticleDto>)),
    tag = "Articles"
)]
pub async fn get_article(
    Extension(state): Extension<HttpState>,
    ApiPath(id): ApiPath<ResourceId>,
) -> HttpResult<ApiResponse<ArticleDto>> {
    state
        .services
        .articles
        .get_article(id.get())
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    get,
    path = "/api/v3/articles/{id}/history",
    params(("id" = i64, Path, description = "Article id")),
    responses((status = 200, description = "Revisions, newest first.", body = ApiResponse<Vec<ArticleRevisionDto>>)),
    tag = "Articles"
)]
pub async fn list_article_history(
    Extension(state): Extension<HttpState>,
    ApiPath(id): ApiPath<ResourceId>,
) -> HttpResult<ApiResponse<Vec<ArticleRevisionDto>>> {
    state
        .services
        .articles
        .list_history(id.get())
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    post,
    path = "/api/v3/articles",
    request_body = CreateArticleRequest,
    responses((status = 200, description = "Created article.", body = ApiResponse<ArticleDto>)),
    security(("bearerAuth" = [])),
    tag = "Articles"
)]
pub async fn create_article(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ValidatedJson(payload): ValidatedJson<CreateArticleRequest>,
) -> HttpResult<ApiResponse<ArticleDto>> {
    let command = CreateArticleCommand {
        title: payload.title,
        body: payload.body,
        summary: payload.summary,
        category_id: payload.category_id,
        topic_ids: payload.topic_ids,
    };

    state
        .services
        .articles
        .create_article(&user, command)
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    put,
    path = "/api/v3/articles/{id}",
    params(("id" = i64, Path, description = "Article id")),
    request_body = UpdateArticleRequest,
    responses((status = 200, description = "Updated article.", body = ApiResponse<ArticleDto>)),
    security(("bearerAuth" = [])),
    tag = "Articles"
)]
pub async fn update_article(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiPath(id): ApiPath<ResourceId>,
    ValidatedJson(payload): ValidatedJson<UpdateArticleRequest>,
) -> HttpResult<ApiResponse<ArticleDto>> {
    let command = UpdateArticleCommand {
        title: payload.title,
        body: payload.body,
        summary: payload.summary,
        category_id: payload.category_id,
        topic_ids: payload.topic_ids,
    };

    state
        .services
        .articles
        .update_article(&user, id.get(), command)
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    delete,
    path = "/api/v3/articles/{id}",
    params(("id" = i64, Path, description = "Article id")),
    responses((status = 200, description = "Article removed.", body = EmptyResponse)),
    security(("bearerAuth" = [])),
    tag = "Articles"
)]
pub async fn delete_article(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiPath(id): ApiPath<ResourceId>,
) -> HttpResult<ApiResponse<()>> {
    state
        .services
        .articles
        .delete_article(&user, id.get())
        .await
        .into_http()?;

    Ok(ApiResponse::empty())
}
