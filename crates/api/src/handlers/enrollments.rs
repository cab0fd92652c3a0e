//! Handlers for the caller's enrollment and postal code lookup.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use eventpass_db::models::enrollment::UpsertEnrollment;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CepQuery {
    #[serde(default)]
    pub cep: String,
}

/// GET /enrollments
pub async fn get_enrollment(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let enrollment = state.enrollments.find_for_user(user.user_id).await?;
    Ok(Json(enrollment))
}

/// POST /enrollments
///
/// Create or update the caller's enrollment and address.
pub async fn upsert_enrollment(
    user: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<UpsertEnrollment>,
) -> AppResult<impl IntoResponse> {
    let enrollment = state.enrollments.upsert(user.user_id, input).await?;
    Ok(Json(enrollment))
}

/// GET /enrollments/cep?cep=
pub async fn get_address_from_cep(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<CepQuery>,
) -> AppResult<impl IntoResponse> {
    let address = state.enrollments.address_for_cep(&query.cep).await?;
    Ok(Json(address))
}
