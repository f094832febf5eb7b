// src/presentation/http/error.rs
use crate::application::{ApplicationResult, error::ApplicationError};
use crate::presentation::http::response::{
    ApiResponse, CODE_BAD_REQUEST, CODE_CONFLICT, CODE_FORBIDDEN, CODE_NOT_FOUND,
    CODE_SERVER_ERROR, CODE_UNAUTHORIZED,
};
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    response::{IntoResponse, Response},
};
use tracing::{error, warn};
use validator::ValidationErrors;

/// Error half of a handler result, rendered as an envelope with the
/// matching business code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    code: u16,
    message: String,
}

impl HttpError {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(CODE_BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(CODE_UNAUTHORIZED, message)
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ApplicationError> for HttpError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Validation(msg) => Self::new(CODE_BAD_REQUEST, msg),
            ApplicationError::Unauthorized(msg) => Self::new(CODE_UNAUTHORIZED, msg),
            ApplicationError::Forbidden(msg) => Self::new(CODE_FORBIDDEN, msg),
            ApplicationError::NotFound(msg) => Self::new(CODE_NOT_FOUND, msg),
            ApplicationError::Conflict(msg) => Self::new(CODE_CONFLICT, msg),
            ApplicationError::Infrastructure(msg) => Self::new(
                CODE_SERVER_ERROR,
                format!("internal server error: {msg}"),
            ),
        }
    }
}

impl From<PathRejection> for HttpError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<ValidationErrors> for HttpError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort_unstable();
        Self::bad_request(format!("invalid fields: {}", fields.join(", ")))
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        if self.code >= CODE_SERVER_ERROR {
            error!(code = self.code, message = %self.message, "request failed");
        } else {
            warn!(code = self.code, message = %self.message, "request rejected");
        }
        ApiResponse::<()>::with_code(self.code, self.message).into_response()
    }
}

pub type HttpResult<T> = Result<T, HttpError>;

pub trait IntoHttpResult<T> {
    fn into_http(self) -> HttpResult<T>;
}

impl<T> IntoHttpResult<T> for ApplicationResult<T> {
    fn into_http(self) -> HttpResult<T> {
        self.map_err(HttpError::from)
    }
}
