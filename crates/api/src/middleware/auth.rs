//! Bearer-token guard for the admin endpoints.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jualputus_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Proof that the request carried the configured admin token.
///
/// Add it as a handler parameter to restrict the handler to the admin:
///
/// ```ignore
/// async fn my_handler(_admin: AdminAuth) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
///
/// When `ADMIN_API_TOKEN` is unset every request is rejected.
#[derive(Debug, Clone, Copy)]
pub struct AdminAuth;

impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let expected = state.config.admin_api_token.as_ref().ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Admin API disabled: ADMIN_API_TOKEN is not set".into(),
            ))
        })?;

        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        if !expected.matches(token) {
            tracing::warn!(path = %parts.uri.path(), "Rejected admin request with wrong token");
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid admin token".into(),
            )));
        }

        Ok(AdminAuth)
    }
}
