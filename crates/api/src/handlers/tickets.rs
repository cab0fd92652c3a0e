//! Handlers for ticket types and the caller's ticket.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use eventpass_db::models::ticket::ReserveTicket;

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /tickets
///
/// The caller's ticket with its type. 404 if the caller has none.
pub async fn get_ticket(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let ticket = state.tickets.find_for_user(user.user_id).await?;
    Ok(Json(ticket))
}

/// GET /tickets/types
pub async fn list_ticket_types(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let types = state.tickets.list_types().await?;
    Ok(Json(types))
}

/// POST /tickets
///
/// Reserve a ticket of the given type. Returns 201 with the new ticket.
pub async fn reserve_ticket(
    user: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<ReserveTicket>,
) -> AppResult<impl IntoResponse> {
    let ticket = state
        .tickets
        .reserve(user.user_id, input.ticket_type_id)
        .await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}
