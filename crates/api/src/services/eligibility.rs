//! Hotel eligibility gate.
//!
//! Hotel listings, room details and new bookings are only open to a user
//! whose ticket is paid, in-person and includes hotel.

use std::sync::Arc;

use eventpass_core::error::CoreError;
use eventpass_core::ticket::{check_hotel_eligibility, MSG_HOTEL_NOT_INCLUDED};
use eventpass_core::types::DbId;
use eventpass_db::models::ticket::TicketWithType;

use super::store::TicketStore;
use crate::error::AppResult;

#[derive(Clone)]
pub struct EligibilityGate {
    tickets: Arc<dyn TicketStore>,
}

impl EligibilityGate {
    pub fn new(tickets: Arc<dyn TicketStore>) -> Self {
        Self { tickets }
    }

    /// Return the user's ticket if it grants hotel access.
    ///
    /// Fails with `NotFoundForUser` when the user has no ticket and with
    /// `PaymentRequired` when the ticket does not qualify.
    pub async fn require_hotel_access(&self, user_id: DbId) -> AppResult<TicketWithType> {
        let ticket = self
            .tickets
            .find_user_ticket(user_id)
            .await?
            .ok_or(CoreError::NotFoundForUser {
                entity: "Ticket",
                user_id,
            })?;

        if let Err(reason) = check_hotel_eligibility(ticket.facts()?) {
            tracing::debug!(
                user_id,
                ticket_id = ticket.ticket.id,
                reason = reason.as_str(),
                "Ticket does not grant hotel access",
            );
            return Err(CoreError::PaymentRequired(MSG_HOTEL_NOT_INCLUDED.into()).into());
        }

        Ok(ticket)
    }
}
