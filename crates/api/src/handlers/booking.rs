//! Handlers for the caller's hotel room booking.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use eventpass_core::types::DbId;
use eventpass_db::models::booking::BookingRequest;
use serde::Serialize;

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Body returned after a booking is created or moved.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingIdResponse {
    pub booking_id: DbId,
}

/// GET /booking
///
/// The caller's booking with its room. 404 if none.
pub async fn get_booking(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let booking = state.bookings.find_for_user(user.user_id).await?;
    Ok(Json(booking))
}

/// POST /booking
///
/// Book a room. 403 with a reason when a booking rule rejects it.
pub async fn create_booking(
    user: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<BookingRequest>,
) -> AppResult<impl IntoResponse> {
    let booking = state.bookings.create(user.user_id, input.room_id).await?;
    Ok(Json(BookingIdResponse {
        booking_id: booking.id,
    }))
}

/// PUT /booking/{booking_id}
///
/// Move the caller's booking to another room; the booking id is kept.
pub async fn update_booking(
    user: AuthUser,
    State(state): State<AppState>,
    Path(booking_id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<BookingRequest>,
) -> AppResult<impl IntoResponse> {
    let booking = state
        .bookings
        .change_room(user.user_id, input.room_id, booking_id)
        .await?;
    Ok(Json(BookingIdResponse {
        booking_id: booking.id,
    }))
}
