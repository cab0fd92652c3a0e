//! Simulated card payment workflow.
//!
//! The charged value is the ticket type's price, looked up server-side. Only
//! the card issuer and its last four digits are stored.

use std::sync::Arc;

use eventpass_core::error::CoreError;
use eventpass_core::payment::{card_last_digits, ensure_payable, MSG_ALREADY_PAID};
use eventpass_core::types::DbId;
use eventpass_db::is_unique_violation;
use eventpass_db::models::payment::{CreatePayment, Payment, PaymentRequest};
use eventpass_db::models::ticket::TicketWithType;

use super::store::{PaymentStore, TicketStore};
use crate::error::AppResult;

/// Message returned when the requested ticket is not the caller's.
pub const MSG_NOT_TICKET_OWNER: &str = "Ticket does not belong to user";

/// Unique index enforcing one payment per ticket.
const UQ_PAYMENTS_TICKET_ID: &str = "uq_payments_ticket_id";

pub struct PaymentService {
    tickets: Arc<dyn TicketStore>,
    payments: Arc<dyn PaymentStore>,
}

impl PaymentService {
    pub fn new(tickets: Arc<dyn TicketStore>, payments: Arc<dyn PaymentStore>) -> Self {
        Self { tickets, payments }
    }

    /// The payment recorded for one of the caller's tickets.
    pub async fn find_for_ticket(&self, user_id: DbId, ticket_id: DbId) -> AppResult<Payment> {
        self.owned_ticket(user_id, ticket_id).await?;

        self.payments
            .find_payment(ticket_id)
            .await?
            .ok_or_else(|| {
                CoreError::NotFoundForUser {
                    entity: "Payment",
                    user_id,
                }
                .into()
            })
    }

    /// Pay for the caller's ticket and mark it `PAID`.
    pub async fn pay(&self, user_id: DbId, request: &PaymentRequest) -> AppResult<Payment> {
        let ticket = self.owned_ticket(user_id, request.ticket_id).await?;
        ensure_payable(ticket.ticket.parsed_status()?)?;

        let input = CreatePayment {
            ticket_id: ticket.ticket.id,
            value: ticket.ticket_type.price,
            card_issuer: request.card_data.issuer.clone(),
            card_last_digits: card_last_digits(&request.card_data.number.as_digits())?,
        };

        let payment = match self.payments.settle_payment(&input).await {
            Ok(payment) => payment,
            Err(err) if is_unique_violation(&err, UQ_PAYMENTS_TICKET_ID) => {
                return Err(CoreError::Conflict(MSG_ALREADY_PAID.into()).into());
            }
            Err(err) => return Err(err.into()),
        };

        tracing::info!(
            user_id,
            ticket_id = input.ticket_id,
            payment_id = payment.id,
            value = payment.value,
            "Payment settled",
        );
        Ok(payment)
    }

    /// Resolve `ticket_id` and check that it is the caller's ticket.
    ///
    /// An unknown ticket is NotFound; someone else's ticket is Unauthorized.
    async fn owned_ticket(&self, user_id: DbId, ticket_id: DbId) -> AppResult<TicketWithType> {
        if self.tickets.find_ticket(ticket_id).await?.is_none() {
            return Err(CoreError::NotFound {
                entity: "Ticket",
                id: ticket_id,
            }
            .into());
        }

        match self.tickets.find_user_ticket(user_id).await? {
            Some(own) if own.ticket.id == ticket_id => Ok(own),
            _ => Err(CoreError::Unauthorized(MSG_NOT_TICKET_OWNER.into()).into()),
        }
    }
}
