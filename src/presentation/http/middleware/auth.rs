// src/presentation/http/middleware/auth.rs
use crate::application::error::ApplicationError;
use crate::presentation::http::error::HttpError;
use crate::presentation::http::state::HttpState;
use axum::{
    body::Body,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};

/// Verifies the bearer token and stores the resolved `AuthenticatedUser` in
/// the request extensions. Applied with `route_layer` to protected groups.
pub async fn require_authentication(mut req: Request<Body>, next: Next) -> Response {
    let Some(header) = req.headers().typed_get::<Authorization<Bearer>>() else {
        return HttpError::from(ApplicationError::unauthorized("missing bearer token"))
            .into_response();
    };

    let Some(state) = req.extensions().get::<HttpState>().cloned() else {
        return HttpError::from(ApplicationError::infrastructure("application state missing"))
            .into_response();
    };

    match state.services.authenticate(header.token()).await {
        Ok(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(err) => HttpError::from(err).into_response(),
    }
}
