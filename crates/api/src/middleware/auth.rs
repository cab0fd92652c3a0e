//! Session-backed authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use eventpass_core::error::CoreError;
use eventpass_core::types::DbId;
use eventpass_db::repositories::SessionRepo;

use crate::auth::jwt::{hash_token, validate_token};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller resolved from the `Authorization: Bearer <jwt>` header.
///
/// The token must carry a valid signature and expiry, and a session holding
/// its hash must exist for the same user. Every route except `/health`
/// takes this extractor.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;

        let session = SessionRepo::find_by_token_hash(&state.pool, &hash_token(token)).await?;
        match session {
            Some(session) if session.user_id == claims.sub => Ok(AuthUser {
                user_id: claims.sub,
            }),
            _ => {
                tracing::debug!(user_id = claims.sub, "Token has no matching session");
                Err(unauthorized("Session not found"))
            }
        }
    }
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.into()))
}
