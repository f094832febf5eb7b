// src/presentation/http/response.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

pub const CODE_SUCCESS: u16 = 200;
pub const CODE_BAD_REQUEST: u16 = 400;
pub const CODE_UNAUTHORIZED: u16 = 401;
pub const CODE_FORBIDDEN: u16 = 403;
pub const CODE_NOT_FOUND: u16 = 404;
pub const CODE_CONFLICT: u16 = 409;
pub const CODE_SERVER_ERROR: u16 = 500;

pub const SUCCESS_MESSAGE: &str = "success";

/// Body of every API response. The transport status is always 200; callers
/// branch on `code`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: CODE_SUCCESS,
            message: SUCCESS_MESSAGE.into(),
            data: Some(data),
        }
    }

    /// Arbitrary code and message with no payload.
    pub fn with_code(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

impl ApiResponse<()> {
    /// Success for operations that return nothing; `data` is `null`.
    pub fn empty() -> Self {
        Self::with_code(CODE_SUCCESS, SUCCESS_MESSAGE)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
