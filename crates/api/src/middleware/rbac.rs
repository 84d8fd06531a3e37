//! Role-based access control extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use portal_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` or `staff` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn manage(RequireElevated(user): RequireElevated) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireElevated(pub AuthUser);

impl FromRequestParts<AppState> for RequireElevated {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_elevated() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Staff or Admin role required".into(),
            )));
        }
        Ok(RequireElevated(user))
    }
}
