// src/infrastructure/security/token.rs
use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
    ports::security::TokenManager,
};
use crate::infrastructure::security::claims::parse_claims;
use async_trait::async_trait;
use biscuit_auth::{
    Biscuit, PublicKey,
    builder::{Algorithm, AuthorizerBuilder},
};
use tracing::debug;

/// Verifies biscuit tokens minted by the identity service. Only the root
/// public key is held here; issuing happens elsewhere.
#[derive(Clone)]
pub struct BiscuitTokenManager {
    public: PublicKey,
}

impl BiscuitTokenManager {
    pub fn from_public_key_hex(public_key_hex: &str) -> ApplicationResult<Self> {
        let public = PublicKey::from_bytes_hex(public_key_hex.trim(), Algorithm::Ed25519)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        Ok(Self { public })
    }
}

#[async_trait]
impl TokenManager for BiscuitTokenManager {
    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let biscuit = Biscuit::from_base64(token, self.public).map_err(|err| {
            debug!(error = %err, "rejected malformed or foreign token");
            ApplicationError::unauthorized("invalid token")
        })?;

        // Token checks (expiry among them) run against the current time.
        let mut authorizer = AuthorizerBuilder::new()
            .time()
            .code("allow if true")
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
            .build(&biscuit)
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

        authorizer.authorize().map_err(|err| {
            debug!(error = %err, "token failed authorization");
            ApplicationError::unauthorized("token expired or not yet valid")
        })?;

        let view = biscuit
            .authorizer()
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;
        let (facts, _, _, _) = view.dump();

        parse_claims(facts)
    }
}
