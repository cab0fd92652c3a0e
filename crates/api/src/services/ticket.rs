//! Ticket workflow: read the caller's ticket, list types, reserve.

use std::sync::Arc;

use eventpass_core::error::CoreError;
use eventpass_core::ticket::TicketStatus;
use eventpass_core::types::DbId;
use eventpass_db::is_unique_violation;
use eventpass_db::models::ticket::{CreateTicket, TicketType, TicketWithType};

use super::store::{EnrollmentStore, TicketStore};
use crate::error::{AppError, AppResult};

/// Message returned when a user who already holds a ticket reserves another.
pub const MSG_TICKET_EXISTS: &str = "User already has a ticket";

/// Unique index enforcing one ticket per enrollment.
const UQ_TICKETS_ENROLLMENT_ID: &str = "uq_tickets_enrollment_id";

pub struct TicketService {
    tickets: Arc<dyn TicketStore>,
    enrollments: Arc<dyn EnrollmentStore>,
}

impl TicketService {
    pub fn new(tickets: Arc<dyn TicketStore>, enrollments: Arc<dyn EnrollmentStore>) -> Self {
        Self {
            tickets,
            enrollments,
        }
    }

    /// The user's ticket with its type.
    pub async fn find_for_user(&self, user_id: DbId) -> AppResult<TicketWithType> {
        self.tickets
            .find_user_ticket(user_id)
            .await?
            .ok_or_else(|| {
                CoreError::NotFoundForUser {
                    entity: "Ticket",
                    user_id,
                }
                .into()
            })
    }

    pub async fn list_types(&self) -> AppResult<Vec<TicketType>> {
        Ok(self.tickets.list_ticket_types().await?)
    }

    /// Reserve a ticket of `ticket_type_id` against the user's enrollment.
    ///
    /// The ticket starts `RESERVED`; the re-read ticket is returned with its
    /// type.
    pub async fn reserve(&self, user_id: DbId, ticket_type_id: DbId) -> AppResult<TicketWithType> {
        let enrollment = self
            .enrollments
            .find_enrollment(user_id)
            .await?
            .ok_or(CoreError::NotFoundForUser {
                entity: "Enrollment",
                user_id,
            })?;

        if self.tickets.find_ticket_type(ticket_type_id).await?.is_none() {
            return Err(CoreError::NotFound {
                entity: "TicketType",
                id: ticket_type_id,
            }
            .into());
        }

        if self.tickets.find_user_ticket(user_id).await?.is_some() {
            return Err(CoreError::Conflict(MSG_TICKET_EXISTS.into()).into());
        }

        let input = CreateTicket {
            enrollment_id: enrollment.id,
            ticket_type_id,
            status: TicketStatus::Reserved,
        };
        let ticket = match self.tickets.create_ticket(&input).await {
            Ok(ticket) => ticket,
            Err(err) if is_unique_violation(&err, UQ_TICKETS_ENROLLMENT_ID) => {
                return Err(CoreError::Conflict(MSG_TICKET_EXISTS.into()).into());
            }
            Err(err) => return Err(err.into()),
        };

        tracing::info!(user_id, ticket_id = ticket.id, ticket_type_id, "Ticket reserved");

        self.tickets
            .find_user_ticket(user_id)
            .await?
            .ok_or_else(|| AppError::InternalError(format!("Ticket {} vanished", ticket.id)))
    }
}
