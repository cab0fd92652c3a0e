use axum::routing::get;
use axum::Router;

use crate::handlers::enrollments;
use crate::state::AppState;

/// Enrollment routes mounted at `/enrollments`.
///
/// ```text
/// GET  /          -> get_enrollment
/// POST /          -> upsert_enrollment
/// GET  /cep?cep=  -> get_address_from_cep
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(enrollments::get_enrollment).post(enrollments::upsert_enrollment),
        )
        .route("/cep", get(enrollments::get_address_from_cep))
}
