//! Bearer token verification.
//!
//! Portal accounts are managed elsewhere; their tokens are HS256-signed with a
//! secret shared with this server. Only the subject and role are consulted,
//! to tell players apart from staff and admins.

use jsonwebtoken::errors::Error as TokenError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use portal_core::types::DbId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Portal user id.
    pub sub: DbId,
    /// `admin`, `staff` or a player role.
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Claims valid from now for `ttl`.
    pub fn new(user_id: DbId, role: impl Into<String>, ttl: chrono::Duration) -> Self {
        let now = chrono::Utc::now();
        Self {
            sub: user_id,
            role: role.into(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared HS256 secret.
    pub secret: String,
}

impl JwtConfig {
    /// | Env Var      | Required | Default |
    /// |--------------|----------|---------|
    /// | `JWT_SECRET` | **yes**  | --      |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");
        Self { secret }
    }

    fn validation() -> Validation {
        Validation::new(Algorithm::HS256)
    }
}

/// Sign claims with the shared secret. The server never issues tokens itself;
/// this exists for operator scripts and tests.
pub fn sign(claims: &Claims, config: &JwtConfig) -> Result<String, TokenError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check signature and expiry.
pub fn verify(token: &str, config: &JwtConfig) -> Result<Claims, TokenError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &JwtConfig::validation(),
    )
    .map(|data| data.claims)
}
