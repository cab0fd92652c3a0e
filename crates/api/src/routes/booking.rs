use axum::routing::{get, put};
use axum::Router;

use crate::handlers::booking;
use crate::state::AppState;

/// Booking routes mounted at `/booking`.
///
/// ```text
/// GET  /              -> get_booking
/// POST /              -> create_booking
/// PUT  /{booking_id}  -> update_booking
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(booking::get_booking).post(booking::create_booking))
        .route("/{booking_id}", put(booking::update_booking))
}
