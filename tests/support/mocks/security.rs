// tests/support/mocks/security.rs
use async_trait::async_trait;
use chrono::Duration;
use inkwell::application::{
    ApplicationResult, dto::AuthenticatedUser, error::ApplicationError,
    ports::security::TokenManager,
};
use inkwell::domain::user::{Role, UserId};

pub const MEMBER_TOKEN: &str = "member-token";
pub const OTHER_TOKEN: &str = "other-token";
pub const MODERATOR_TOKEN: &str = "moderator-token";
pub const ADMIN_TOKEN: &str = "admin-token";
pub const EXPIRED_TOKEN: &str = "expired-token";

/// Maps fixed bearer strings to users; anything else is rejected.
#[derive(Clone, Debug, Default)]
pub struct DummyTokenManager;

#[async_trait]
impl TokenManager for DummyTokenManager {
    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        match token {
            EXPIRED_TOKEN => Err(ApplicationError::unauthorized("token expired")),
            other => user_for(other).ok_or_else(|| ApplicationError::unauthorized("invalid token")),
        }
    }
}

/// The user a test token resolves to.
pub fn user_for(token: &str) -> Option<AuthenticatedUser> {
    let (id, username, role) = match token {
        MEMBER_TOKEN => ("u-member", "member", Role::Member),
        OTHER_TOKEN => ("u-other", "other", Role::Member),
        MODERATOR_TOKEN => ("u-mod", "moderator", Role::Moderator),
        ADMIN_TOKEN => ("u-admin", "admin", Role::Admin),
        _ => return None,
    };
    let now = super::time::fixed_now();
    Some(AuthenticatedUser {
        id: UserId::new(id).expect("valid user id"),
        username: username.into(),
        role,
        capabilities: role.default_capabilities(),
        issued_at: now,
        expires_at: now + Duration::hours(1),
    })
}
