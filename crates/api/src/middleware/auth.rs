//! Bearer-token principal extraction.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use portal_core::error::CoreError;
use portal_core::roles::is_elevated;
use portal_core::types::DbId;

use crate::auth::jwt::{verify, Claims, JwtConfig};
use crate::error::AppError;
use crate::state::AppState;

/// Caller identified by a valid `Authorization: Bearer <jwt>` header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub role: String,
}

impl AuthUser {
    /// Whether the role may manage resources and bypass the gate.
    pub fn is_elevated(&self) -> bool {
        is_elevated(&self.role)
    }
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            role: claims.role,
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, &'static str> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or("Missing Authorization header")?
        .to_str()
        .map_err(|_| "Malformed Authorization header")?;
    value
        .strip_prefix("Bearer ")
        .ok_or("Invalid Authorization format. Expected: Bearer <token>")
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let unauthorized = |msg: &str| AppError::Core(CoreError::Unauthorized(msg.to_string()));

        let token = bearer_token(&parts.headers).map_err(unauthorized)?;
        let claims = verify(token, &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;
        Ok(claims.into())
    }
}

/// Principal for middleware that must never reject.
///
/// Missing, malformed or expired tokens all yield `None`.
pub fn optional_principal(headers: &HeaderMap, jwt: &JwtConfig) -> Option<AuthUser> {
    let token = bearer_token(headers).ok()?;
    verify(token, jwt).ok().map(AuthUser::from)
}
