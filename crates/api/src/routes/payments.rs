use axum::routing::get;
use axum::Router;

use crate::handlers::payments;
use crate::state::AppState;

/// Payment routes mounted at `/payments`.
///
/// ```text
/// GET  /?ticketId=  -> get_payment
/// POST /            -> post_payment
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(payments::get_payment).post(payments::post_payment))
}
