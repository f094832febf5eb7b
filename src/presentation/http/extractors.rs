// src/presentation/http/extractors.rs
use crate::application::{dto::AuthenticatedUser, error::ApplicationError};
use crate::presentation::http::error::HttpError;
use axum::{
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
};
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use validator::Validate;

/// Actor placed in the request extensions by the auth middleware.
#[derive(Debug, Clone)]
pub struct Authenticated(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(Self)
            .ok_or_else(|| HttpError::from(ApplicationError::unauthorized("authentication required")))
    }
}

/// `Path` whose failures become bad-request envelopes.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(HttpError))]
pub struct ApiPath<T>(pub T);

/// `Query` whose failures become bad-request envelopes.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(HttpError))]
pub struct ApiQuery<T>(pub T);

/// `Json` whose failures become bad-request envelopes.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(HttpError))]
pub struct ApiJson<T>(pub T);

/// JSON body that must also pass its `validator` rules.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let ApiJson(value) = ApiJson::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Positive numeric identifier taken from the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceId(i64);

impl ResourceId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = u64::deserialize(deserializer)?;
        match i64::try_from(raw) {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(serde::de::Error::custom("id must be a positive integer")),
        }
    }
}

/// Page parameters as sent by clients. Anything unparsable is treated as
/// absent and normalized away.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl PageParams {
    pub fn page_request(&self, default_size: u32) -> crate::domain::pagination::PageRequest {
        crate::domain::pagination::PageRequest::normalized(
            lenient(self.page.as_deref()),
            lenient(self.page_size.as_deref()),
            default_size,
        )
    }
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LimitParams {
    pub limit: Option<String>,
}

impl LimitParams {
    pub fn limit(&self, default: u32) -> u32 {
        crate::domain::pagination::normalize_limit(lenient(self.limit.as_deref()), default)
    }
}

fn lenient(value: Option<&str>) -> Option<i64> {
    value.and_then(|raw| raw.trim().parse().ok())
}
