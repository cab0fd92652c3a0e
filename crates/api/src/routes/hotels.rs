use axum::routing::get;
use axum::Router;

use crate::handlers::hotels;
use crate::state::AppState;

/// Hotel routes mounted at `/hotels`.
///
/// ```text
/// GET /             -> list_hotels
/// GET /{hotel_id}   -> get_hotel
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(hotels::list_hotels))
        .route("/{hotel_id}", get(hotels::get_hotel))
}
