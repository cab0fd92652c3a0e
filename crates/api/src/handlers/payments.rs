//! Handlers for ticket payments.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use eventpass_core::types::DbId;
use eventpass_db::models::payment::PaymentRequest;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters for `GET /payments`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentQuery {
    pub ticket_id: Option<DbId>,
}

/// GET /payments?ticketId=
///
/// The payment for one of the caller's tickets. 400 if `ticketId` is missing.
pub async fn get_payment(
    user: AuthUser,
    State(state): State<AppState>,
    query: Result<Query<PaymentQuery>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(query) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let ticket_id = query
        .ticket_id
        .ok_or_else(|| AppError::BadRequest("Ticket id not provided".into()))?;

    let payment = state.payments.find_for_ticket(user.user_id, ticket_id).await?;
    Ok(Json(payment))
}

/// POST /payments
///
/// Pay for the caller's ticket with a simulated card.
pub async fn post_payment(
    user: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<PaymentRequest>,
) -> AppResult<impl IntoResponse> {
    let payment = state.payments.pay(user.user_id, &input).await?;
    Ok(Json(payment))
}
