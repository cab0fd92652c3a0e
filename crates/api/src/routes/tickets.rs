use axum::routing::get;
use axum::Router;

use crate::handlers::tickets;
use crate::state::AppState;

/// Ticket routes mounted at `/tickets`.
///
/// ```text
/// GET  /        -> get_ticket
/// POST /        -> reserve_ticket
/// GET  /types   -> list_ticket_types
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tickets::get_ticket).post(tickets::reserve_ticket))
        .route("/types", get(tickets::list_ticket_types))
}
