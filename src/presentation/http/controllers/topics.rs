// src/presentation/http/controllers/topics.rs
use crate::application::{
    dto::{ArticleDto, PageResult, TopicDto},
    services::CreateTopicCommand,
};
use crate::presentation::http::controllers::{ARTICLE_PAGE_SIZE, DEFAULT_LIMIT, not_blank};
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
pub struct CreateTopicRequest {
    /// A leading `#` is dropped.
    #[validate(custom(function = "not_blank"), length(max = 41))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v3/topics/hot",
    params(LimitParams),
    responses((status = 200, description = "Hottest topics first.", body = ApiResponse<Vec<TopicDto>>)),
    tag = "Topics"
)]
pub async fn hot_topics(
    Extension(state): Extension<HttpState>,
    ApiQuery(params): ApiQuery<LimitParams>,
) -> HttpResult<ApiResponse<Vec<TopicDto>>> {
    state
        .services
        .topics
        .hot_topics(params.limit(DEFAULT_LIMIT))
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    get,
    path = "/api/v3/topics/{id}",
    params(("id" = i64, Path, description = "Topic id")),
    responses((status = 200, description = "Topic detail.", body = ApiResponse<TopicDto>)),
    tag = "Topics"
)]
pub async fn get_topic(
    Extension(state): Extension<HttpState>,
    ApiPath(id): ApiPath<ResourceId>,
) -> HttpResult<ApiResponse<TopicDto>> {
    state
        .services
        .topics
        .get_topic(id.get())
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    get,
    path = "/api/v3/topics/{id}/articles",
    params(("id" = i64, Path, description = "Topic id"), PageParams),
    responses((status = 200, description = "Articles tagged with the topic.", body = ApiResponse<PageResult<ArticleDto>>)),
    tag = "Topics"
)]
pub async fn list_topic_articles(
    Extension(state): Extension<HttpState>,
    ApiPath(id): ApiPath<ResourceId>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> HttpResult<ApiResponse<PageResult<ArticleDto>>> {
    state
        .services
        .topics
        .list_topic_articles(id.get(), params.page_request(ARTICLE_PAGE_SIZE))
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    post,
    path = "/api/v3/topics",
    request_body = CreateTopicRequest,
    responses((status = 200, description = "Created topic.", body = ApiResponse<TopicDto>)),
    security(("bearerAuth" = [])),
    tag = "Topics"
)]
pub async fn create_topic(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ValidatedJson(payload): ValidatedJson<CreateTopicRequest>,
) -> HttpResult<ApiResponse<TopicDto>> {
    let command = CreateTopicCommand {
        name: payload.name,
        description: payload.description,
    };

    state
        .services
        .topics
        .create_topic(&user, command)
        .await
        .into_http()
        .map(ApiResponse::success)
}

#[utoipa::path(
    post,
    path = "/api/v3/topics/{id}/follow",
    params(("id" = i64, Path, description = "Topic id")),
    responses((status = 200, description = "Following; repeating is a no-op.", body = EmptyResponse)),
    security(("bearerAuth" = [])),
    tag = "Topics"
)]
pub async fn follow_topic(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiPath(id): ApiPath<ResourceId>,
) -> HttpResult<ApiResponse<()>> {
    state
        .services
        .topics
        .follow_topic(&user, id.get())
        .await
        .into_http()?;

    Ok(ApiResponse::empty())
}

#[utoipa::path(
    delete,
    path = "/api/v3/topics/{id}/follow",
    params(("id" = i64, Path, description = "Topic id")),
    responses((status = 200, description = "No longer following.", body = EmptyResponse)),
    security(("bearerAuth" = [])),
    tag = "Topics"
)]
pub async fn unfollow_topic(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiPath(id): ApiPath<ResourceId>,
) -> HttpResult<ApiResponse<()>> {
    state
        .services
        .topics
        .unfollow_topic(&user, id.get())
        .await
        .into_http()?;

    Ok(ApiResponse::empty())
}
