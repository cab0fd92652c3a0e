//! Handlers for hotel listing and detail.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use eventpass_core::types::DbId;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /hotels
pub async fn list_hotels(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let hotels = state.hotels.list_for_user(user.user_id).await?;
    Ok(Json(hotels))
}

/// GET /hotels/{hotel_id}
///
/// The hotel with all of its rooms.
pub async fn get_hotel(
    user: AuthUser,
    State(state): State<AppState>,
    Path(hotel_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let hotel = state.hotels.rooms_for_user(user.user_id, hotel_id).await?;
    Ok(Json(hotel))
}
